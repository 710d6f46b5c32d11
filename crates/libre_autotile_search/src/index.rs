//! Per-slot inverted index over registered patterns

use libre_autotile_core::{Direction, PatternEntry};
use std::collections::HashMap;

/// For each of the 8 slots, maps a tile-type id to the entries holding it there.
#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    slots: [HashMap<i32, Vec<usize>>; 8],
}

impl InvertedIndex {
    /// Build the index in two passes.
    ///
    /// The first pass files every entry under its own slot values. The second
    /// appends entries with a wildcard slot to every concrete key of that slot,
    /// so a wildcard matches each id used anywhere in the corpus at that slot,
    /// regardless of where the wildcard entry sits in the list.
    pub fn build(entries: &[PatternEntry], wildcard: i32) -> Self {
        let mut slots: [HashMap<i32, Vec<usize>>; 8] = Default::default();

        for (entry_index, entry) in entries.iter().enumerate() {
            for direction in Direction::ALL {
                slots[direction.index()]
                    .entry(entry.pattern.get(direction))
                    .or_default()
                    .push(entry_index);
            }
        }

        for slot in slots.iter_mut() {
            let Some(wild_entries) = slot.get(&wildcard).cloned() else {
                continue;
            };
            for (&tile_id, indexed) in slot.iter_mut() {
                if tile_id != wildcard {
                    indexed.extend_from_slice(&wild_entries);
                }
            }
        }

        Self { slots }
    }

    /// Entries that score when `tile_id` is found at `direction`
    pub fn candidates(&self, direction: Direction, tile_id: i32) -> &[usize] {
        self.slots[direction.index()]
            .get(&tile_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
