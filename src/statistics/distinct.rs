// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Distinct value sets keyed by string representation

use rustc_hash::{FxHashMap, FxHashSet};

/// Observed representations of one column with occurrence counts
#[derive(Debug, Clone, Default)]
pub struct DistinctSet {
    counts: FxHashMap<Box<str>, u64>,
}

impl DistinctSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `repr`; returns true if it was new
    ///
    /// Allocates only for a previously unseen representation.
    pub fn insert(&mut self, repr: &str) -> bool {
        if let Some(count) = self.counts.get_mut(repr) {
            *count += 1;
            return false;
        }
        self.counts.insert(repr.into(), 1);
        true
    }

    /// Number of distinct representations
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, repr: &str) -> bool {
        self.counts.contains_key(repr)
    }

    /// Occurrences of `repr`
    pub fn count(&self, repr: &str) -> u64 {
        self.counts.get(repr).copied().unwrap_or(0)
    }

    /// Representation seen most often
    ///
    /// Ties go to the lexicographically smallest representation.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .map(|(repr, count)| (repr.as_ref(), *count))
            .min_by(|(a_repr, a_count), (b_repr, b_count)| {
                b_count.cmp(a_count).then_with(|| a_repr.cmp(b_repr))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(repr, count)| (repr.as_ref(), *count))
    }
}

/// Plain set of concatenated pair representations
#[derive(Debug, Clone, Default)]
pub struct ComboSet {
    entries: FxHashSet<Box<str>>,
}

impl ComboSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `combo`, allocating only when it is new
    pub fn insert(&mut self, combo: &str) -> bool {
        if self.entries.contains(combo) {
            return false;
        }
        self.entries.insert(combo.into())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, combo: &str) -> bool {
        self.entries.contains(combo)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_counts() {
        let mut set = DistinctSet::new();
        assert!(set.is_empty());
        assert!(set.insert("5"));
        assert!(!set.insert("5"));
        assert!(set.insert("7"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.count("5"), 2);
        assert_eq!(set.count("9"), 0);
        assert!(set.contains("7"));
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let mut set = DistinctSet::new();
        assert_eq!(set.most_frequent(), None);

        for repr in ["b", "a", "c", "b", "a"] {
            set.insert(repr);
        }
        assert_eq!(set.most_frequent(), Some(("a", 2)));

        set.insert("c");
        set.insert("c");
        assert_eq!(set.most_frequent(), Some(("c", 3)));
    }

    #[test]
    fn test_combo_set() {
        let mut set = ComboSet::new();
        assert!(set.insert("15"));
        assert!(set.insert("35"));
        assert!(!set.insert("15"));
        assert_eq!(set.len(), 2);

        let mut all: Vec<_> = set.iter().collect();
        all.sort_unstable();
        assert_eq!(all, vec!["15", "35"]);
    }
}
