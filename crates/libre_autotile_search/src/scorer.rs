//! Weighted slot scoring with reusable scratch buffers

use crate::index::InvertedIndex;
use libre_autotile_core::{Direction, Pattern};

/// Score for a cardinal slot, or a corner backed by two occupied cardinals
pub const STRONG_WEIGHT: u32 = 3;
/// Score for a corner missing one of its cardinals
pub const WEAK_WEIGHT: u32 = 1;

/// Weight of a matching value at `direction` for this target
pub fn slot_weight(target: &Pattern, direction: Direction) -> u32 {
    if target.is_corner_connected(direction) {
        STRONG_WEIGHT
    } else {
        WEAK_WEIGHT
    }
}

/// Outcome of one scored search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchHit {
    /// Entry picked among the best-scoring ones
    pub best: usize,
    pub score: u32,
    /// Size of the tie set when the search finished
    pub ties: usize,
}

/// Scratch state for scoring. One per searcher, reused across queries.
///
/// Scores are never cleared in bulk: an entry's score is only valid when its
/// `seen` stamp equals the current generation.
#[derive(Debug)]
pub(crate) struct ScoreBoard {
    scores: Vec<u32>,
    seen: Vec<u32>,
    generation: u32,
    ties: Vec<usize>,
}

impl ScoreBoard {
    pub fn new(entry_count: usize) -> Self {
        Self {
            scores: vec![0; entry_count],
            seen: vec![0; entry_count],
            generation: 0,
            ties: Vec::with_capacity(entry_count),
        }
    }

    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.seen.fill(0);
            self.generation = 1;
        }
    }

    /// Score every indexed entry against `target`.
    ///
    /// A strictly higher score restarts the tie set, an equal one joins it.
    /// The winner is the last entry that joined. Returns `None` when no slot
    /// of the target matched anything.
    pub fn search(&mut self, target: &Pattern, index: &InvertedIndex) -> Option<SearchHit> {
        self.next_generation();
        self.ties.clear();
        let mut best_score = 0;

        for direction in Direction::ALL {
            let weight = slot_weight(target, direction);
            for &entry in index.candidates(direction, target.get(direction)) {
                if self.seen[entry] != self.generation {
                    self.seen[entry] = self.generation;
                    self.scores[entry] = 0;
                }
                self.scores[entry] += weight;

                let score = self.scores[entry];
                if score > best_score {
                    best_score = score;
                    self.ties.clear();
                    self.ties.push(entry);
                } else if score == best_score {
                    self.ties.push(entry);
                }
            }
        }

        self.ties.last().map(|&best| SearchHit {
            best,
            score: best_score,
            ties: self.ties.len(),
        })
    }

    #[cfg(test)]
    fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libre_autotile_core::{AtlasRef, PatternEntry, DEFAULT_WILDCARD_ID, EMPTY_ID};

    fn corpus(patterns: &[[i32; 8]]) -> Vec<PatternEntry> {
        patterns
            .iter()
            .map(|&slots| PatternEntry::new(Pattern::new(slots), AtlasRef::none()))
            .collect()
    }

    #[test]
    fn test_slot_weights() {
        // Top and Left occupied, Right and Bottom empty
        let target = Pattern::new([5, 0, 5, -1, 5, -1, 5, 0]);
        assert_eq!(slot_weight(&target, Direction::TopLeft), STRONG_WEIGHT);
        assert_eq!(slot_weight(&target, Direction::TopRight), WEAK_WEIGHT);
        assert_eq!(slot_weight(&target, Direction::BottomRight), WEAK_WEIGHT);
        assert_eq!(slot_weight(&target, Direction::BottomLeft), WEAK_WEIGHT);
        assert_eq!(slot_weight(&target, Direction::Right), STRONG_WEIGHT);
    }

    #[test]
    fn test_exact_pattern_scores_highest() {
        let entries = corpus(&[[0; 8], [1; 8], [0, 0, 0, 0, 1, 1, 1, 1]]);
        let index = InvertedIndex::build(&entries, DEFAULT_WILDCARD_ID);
        let mut board = ScoreBoard::new(entries.len());

        let hit = board.search(&Pattern::filled(1), &index).unwrap();
        assert_eq!(hit.best, 1);
        assert_eq!(hit.score, 8 * STRONG_WEIGHT);
        assert_eq!(hit.ties, 1);
    }

    #[test]
    fn test_ties_resolve_to_last_joined() {
        let entries = corpus(&[
            [-1, 0, -1, -1, -1, -1, -1, -1],
            [-1, -1, -1, -1, -1, -1, -1, 0],
        ]);
        let index = InvertedIndex::build(&entries, DEFAULT_WILDCARD_ID);
        let mut board = ScoreBoard::new(entries.len());

        // Each entry matches one of the two occupied cardinals
        let target = Pattern::new([-1, 0, -1, -1, -1, -1, -1, 0]);
        let hit = board.search(&target, &index).unwrap();
        assert_eq!(hit.best, 1);
        assert_eq!(hit.ties, 2);
    }

    #[test]
    fn test_no_match_returns_none() {
        let entries = corpus(&[[1; 8]]);
        let index = InvertedIndex::build(&entries, DEFAULT_WILDCARD_ID);
        let mut board = ScoreBoard::new(entries.len());
        assert_eq!(board.search(&Pattern::filled(EMPTY_ID), &index), None);
    }

    #[test]
    fn test_generation_wraparound_resets_scores() {
        let entries = corpus(&[[0; 8], [1; 8]]);
        let index = InvertedIndex::build(&entries, DEFAULT_WILDCARD_ID);
        let mut board = ScoreBoard::new(entries.len());

        let first = board.search(&Pattern::filled(0), &index);
        board.set_generation(u32::MAX);
        let wrapped = board.search(&Pattern::filled(0), &index);
        let after = board.search(&Pattern::filled(0), &index);

        assert_eq!(first, wrapped);
        assert_eq!(wrapped, after);
        assert_eq!(after.map(|hit| hit.score), Some(8 * STRONG_WEIGHT));
    }
}
