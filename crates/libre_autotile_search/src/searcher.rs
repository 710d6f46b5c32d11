//! Best-match lookup from a target pattern to a registered entry

use crate::index::InvertedIndex;
use crate::scorer::ScoreBoard;
use libre_autotile_core::{AtlasRef, Direction, Pattern, PatternEntry, DEFAULT_WILDCARD_ID, EMPTY_ID};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Answers "which registered tile best fits this neighborhood?" for one
/// tile-type.
///
/// Built once from a list of entries and never changed afterwards. Duplicate
/// patterns keep their first occurrence. Queries may run from any number of
/// threads; they share a scratch score board behind a lock.
pub struct PatternSearcher {
    entries: Vec<PatternEntry>,
    exact: HashMap<Pattern, usize>,
    index: InvertedIndex,
    scratch: Mutex<ScoreBoard>,
    wildcard: i32,
}

impl PatternSearcher {
    /// Create a searcher using the default wildcard id (-2)
    pub fn new(entries: impl IntoIterator<Item = PatternEntry>) -> Self {
        Self::with_wildcard(entries, DEFAULT_WILDCARD_ID)
    }

    /// Create a searcher where `wildcard` in a registered slot matches any tile-type
    pub fn with_wildcard(entries: impl IntoIterator<Item = PatternEntry>, wildcard: i32) -> Self {
        let mut exact = HashMap::new();
        let mut deduped = Vec::new();
        for entry in entries {
            if exact.contains_key(&entry.pattern) {
                continue;
            }
            exact.insert(entry.pattern, deduped.len());
            deduped.push(entry);
        }

        let index = InvertedIndex::build(&deduped, wildcard);
        let scratch = Mutex::new(ScoreBoard::new(deduped.len()));

        Self {
            entries: deduped,
            exact,
            index,
            scratch,
            wildcard,
        }
    }

    /// Number of distinct registered patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entries in first-seen order, duplicates removed
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn wildcard(&self) -> i32 {
        self.wildcard
    }

    /// Atlas registered for exactly this pattern
    pub fn get_exact(&self, pattern: &Pattern) -> Option<&AtlasRef> {
        self.exact
            .get(pattern)
            .and_then(|&index| self.entries.get(index))
            .map(|entry| &entry.atlas)
    }

    /// Find the entry that best fits `target`.
    ///
    /// Never fails: an exact registration wins outright, otherwise the
    /// highest-scoring entry is used, preferring a registered pattern that
    /// agrees with the target on every slot the winner matched. When nothing
    /// scores at all, the first registered entry is returned (or an empty
    /// entry for an empty searcher).
    pub fn find_best_match(&self, target: &Pattern) -> PatternEntry {
        if let Some(atlas) = self.get_exact(target) {
            return PatternEntry::new(*target, atlas.clone());
        }

        let hit = self.scratch.lock().search(target, &self.index);
        let Some(best) = hit.and_then(|hit| {
            trace!(pattern = %target, score = hit.score, ties = hit.ties, "scored best match");
            self.entries.get(hit.best)
        }) else {
            trace!(pattern = %target, "no slot matched, using fallback entry");
            return self.fallback();
        };

        let trimmed = self.trim(target, &best.pattern);
        if let Some(atlas) = self.get_exact(&trimmed) {
            return PatternEntry::new(trimmed, atlas.clone());
        }

        best.clone()
    }

    /// Keep the slots where `best` agrees with the target (or is a wildcard),
    /// blank the rest, then drop unsupported corners.
    fn trim(&self, target: &Pattern, best: &Pattern) -> Pattern {
        let mut trimmed = Pattern::EMPTY;
        for direction in Direction::ALL {
            let wanted = target.get(direction);
            let have = best.get(direction);
            if have == wanted || have == self.wildcard {
                trimmed = trimmed.with(direction, have);
            } else {
                trimmed = trimmed.with(direction, EMPTY_ID);
            }
        }
        trimmed.strip_corners()
    }

    fn fallback(&self) -> PatternEntry {
        self.entries.first().cloned().unwrap_or_default()
    }
}

impl FromIterator<PatternEntry> for PatternSearcher {
    fn from_iter<I: IntoIterator<Item = PatternEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for PatternSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSearcher")
            .field("entries", &self.entries.len())
            .field("wildcard", &self.wildcard)
            .finish_non_exhaustive()
    }
}
