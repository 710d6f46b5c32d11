//! Nearest-pattern search for libre_autotile
//!
//! A [`PatternSearcher`] holds every hand-authored neighbor pattern for one
//! tile-type and picks the one that best fits the neighborhood of a cell.
//!
//! # Matching
//! 1. A registered pattern equal to the target wins outright.
//! 2. Otherwise every entry is scored slot by slot through a per-slot
//!    inverted index. Cardinals weigh 3, corners weigh 3 only when both of
//!    their cardinals are occupied in the target, else 1.
//! 3. The winner's agreeing slots form a trimmed pattern; if that pattern is
//!    registered it is returned, otherwise the winner itself is.
//!
//! A registered slot holding the wildcard id matches any tile-type seen in
//! that slot across the corpus.
//!
//! # Example
//!
//! ```rust
//! use libre_autotile_core::{AtlasRef, GridPos, Pattern, PatternEntry};
//! use libre_autotile_search::PatternSearcher;
//!
//! let searcher = PatternSearcher::new(vec![
//!     PatternEntry::new(Pattern::EMPTY, AtlasRef::new(GridPos::new(0, 0), "grass.png")),
//!     PatternEntry::new(Pattern::filled(0), AtlasRef::new(GridPos::new(1, 0), "grass.png")),
//! ]);
//!
//! let found = searcher.find_best_match(&Pattern::filled(0));
//! assert_eq!(found.atlas.position, GridPos::new(1, 0));
//! ```

mod index;
mod scorer;
mod searcher;

pub use scorer::{slot_weight, STRONG_WEIGHT, WEAK_WEIGHT};
pub use searcher::PatternSearcher;
