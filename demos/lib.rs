//! libre_autotile demos
//!
//! This crate contains examples demonstrating how to use the libre_autotile workspace crates.
//!
//! Run examples with:
//! ```bash
//! cargo run --example procedural_fill -p libre_autotile_demos
//! ```

// No library code - this is just a container for examples
