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

//! Pairwise column co-occurrence
//!
//! For every unordered column pair `(i, j)` with `i < j` the builder keeps
//! the set of concatenated representations seen together in a row. The
//! concatenation has no delimiter, so `"1" + "23"` and `"12" + "3"` land on
//! the same entry and the derived dependencies are approximate.
//!
//! Pairs are stored in one flat vector in row-major upper-triangle order:
//!
//! ```text
//!        j=1    j=2    j=3
//! i=0  [  0  ] [  1 ] [  2 ]
//! i=1          [  3 ] [  4 ]
//! i=2                 [  5 ]
//! ```

use super::distinct::ComboSet;
use crate::core::{Error, Result};

/// Flat index of pair `(i, j)`, `i < j < columns`
#[inline]
pub fn pair_index(i: usize, j: usize, columns: usize) -> usize {
    debug_assert!(i < j && j < columns);
    i * (2 * columns - i - 1) / 2 + (j - i - 1)
}

/// Number of pairs among `columns` columns
#[inline]
pub fn pair_count(columns: usize) -> usize {
    columns * columns.saturating_sub(1) / 2
}

/// Co-occurrence sets for all column pairs of one output
#[derive(Debug, Clone)]
pub struct PairCoOccurrence {
    columns: usize,
    sets: Vec<ComboSet>,
    // Scratch buffer reused for every pair of every row
    scratch: String,
}

impl PairCoOccurrence {
    /// Allocate empty sets for `columns` output columns
    pub fn new(columns: usize) -> Result<Self> {
        let count = pair_count(columns);
        let mut sets = Vec::new();
        sets.try_reserve_exact(count)
            .map_err(|_| Error::out_of_memory(format!("allocating {} pair sets", count)))?;
        sets.resize_with(count, ComboSet::new);

        Ok(Self {
            columns,
            sets,
            scratch: String::new(),
        })
    }

    /// Number of columns the sets were built for
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Record one row given each column's representation
    ///
    /// Fails with `Error::OutOfMemory` when the combined value cannot be
    /// allocated. Pairs before the failing one keep this row's entry, and
    /// the caller has already applied the row to its column statistics; the
    /// session does not count the row and the query is aborted, so the
    /// partial state is never reported.
    pub fn record_row<S: AsRef<str>>(&mut self, reprs: &[S]) -> Result<()> {
        if reprs.len() != self.columns {
            return Err(Error::RowWidthMismatch {
                expected: self.columns,
                got: reprs.len(),
            });
        }

        let mut idx = 0;
        for i in 0..self.columns {
            let left = reprs[i].as_ref();
            for right in &reprs[i + 1..] {
                let right = right.as_ref();

                self.scratch.clear();
                reserve_scratch(&mut self.scratch, left.len().saturating_add(right.len()))?;
                self.scratch.push_str(left);
                self.scratch.push_str(right);

                self.sets[idx].insert(&self.scratch);
                idx += 1;
            }
        }
        Ok(())
    }

    /// Set for pair `(i, j)`; the order of `i` and `j` does not matter
    pub fn get(&self, i: usize, j: usize) -> Option<&ComboSet> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.columns {
            return None;
        }
        self.sets.get(pair_index(i, j, self.columns))
    }

    /// Number of distinct combinations seen for pair `(i, j)`
    pub fn combinations(&self, i: usize, j: usize) -> usize {
        self.get(i, j).map_or(0, ComboSet::len)
    }

    /// All pairs with their sets, in index order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &ComboSet)> {
        let n = self.columns;
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .zip(self.sets.iter())
    }
}

fn reserve_scratch(scratch: &mut String, additional: usize) -> Result<()> {
    scratch
        .try_reserve(additional)
        .map_err(|_| Error::out_of_memory("building a column pair value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_index_is_dense() {
        for n in 2..8 {
            let mut expected = 0;
            for i in 0..n {
                for j in i + 1..n {
                    assert_eq!(pair_index(i, j, n), expected);
                    expected += 1;
                }
            }
            assert_eq!(expected, pair_count(n));
        }
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
    }

    #[test]
    fn test_failed_reservation_is_out_of_memory() {
        let mut scratch = String::from("15");
        let err = reserve_scratch(&mut scratch, usize::MAX).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }));
        assert!(err.is_fatal());
        assert_eq!(scratch, "15");

        assert!(reserve_scratch(&mut scratch, 8).is_ok());
        assert!(scratch.capacity() >= 10);
    }

    #[test]
    fn test_record_rows() {
        let mut pairs = PairCoOccurrence::new(2).unwrap();
        pairs.record_row(&["1", "5"]).unwrap();
        pairs.record_row(&["3", "5"]).unwrap();
        pairs.record_row(&["1", "5"]).unwrap();

        let set = pairs.get(0, 1).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("15"));
        assert!(set.contains("35"));
        assert_eq!(pairs.combinations(1, 0), 2);
        assert!(pairs.get(0, 0).is_none());
        assert!(pairs.get(0, 2).is_none());
    }

    #[test]
    fn test_concatenation_has_no_delimiter() {
        let mut pairs = PairCoOccurrence::new(2).unwrap();
        pairs.record_row(&["1", "23"]).unwrap();
        pairs.record_row(&["12", "3"]).unwrap();
        assert_eq!(pairs.combinations(0, 1), 1);
    }

    #[test]
    fn test_three_columns() {
        let mut pairs = PairCoOccurrence::new(3).unwrap();
        pairs.record_row(&["a", "", "c"]).unwrap();
        pairs.record_row(&["a", "b", "c"]).unwrap();

        assert_eq!(pairs.combinations(0, 1), 2);
        assert_eq!(pairs.combinations(0, 2), 1);
        assert_eq!(pairs.combinations(1, 2), 2);
        assert!(pairs.get(0, 1).unwrap().contains("a"));

        let order: Vec<_> = pairs.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_width_mismatch() {
        let mut pairs = PairCoOccurrence::new(3).unwrap();
        assert_eq!(
            pairs.record_row(&["1", "2"]),
            Err(Error::RowWidthMismatch {
                expected: 3,
                got: 2
            })
        );
    }
}
