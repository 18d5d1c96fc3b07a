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

//! Teardown report
//!
//! The report is produced once per session. Its first lines are always the
//! distinct counts, one per output column:
//!
//! ```text
//! column artist (0) has 2 distinct values.
//! column year (1) has 3 distinct values.
//! ```
//!
//! With details enabled, per-column value lines and dependency lines follow.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::column::StatValue;
use crate::core::DataType;
use crate::executor::operator::PlanNodeId;

/// Final statistics of one output column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub index: usize,
    pub name: String,
    pub data_type: DataType,
    pub is_numeric: bool,
    pub min: Option<StatValue>,
    pub max: Option<StatValue>,
    pub most_frequent: Option<StatValue>,
    /// Most frequent representation, also set for text columns
    pub most_frequent_repr: Option<String>,
    pub distinct_count: u64,
    /// Pinned by an equality filter
    pub pinned: bool,
}

/// Co-occurrence size of one column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSummary {
    pub left: usize,
    pub right: usize,
    pub combinations: u64,
    /// Every observed row had a different combination
    pub unique: bool,
}

/// `determinant -> dependent`: each determinant value was seen with a
/// single dependent value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionalDependency {
    pub determinant: usize,
    pub dependent: usize,
}

/// Everything a session learned about its root's output
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub root: PlanNodeId,
    pub rows_observed: u64,
    pub columns: Vec<ColumnSummary>,
    /// Empty when pairwise collection was off for the session
    pub pairs: Vec<PairSummary>,
    pub dependencies: Vec<FunctionalDependency>,
}

impl StatisticsReport {
    /// Derive pair summaries and dependencies from raw pair sizes
    pub fn new(
        root: PlanNodeId,
        rows_observed: u64,
        columns: Vec<ColumnSummary>,
        pair_sizes: impl IntoIterator<Item = ((usize, usize), u64)>,
    ) -> Self {
        let mut pairs = Vec::new();
        let mut dependencies = Vec::new();

        for ((left, right), combinations) in pair_sizes {
            pairs.push(PairSummary {
                left,
                right,
                combinations,
                unique: rows_observed > 0 && combinations == rows_observed,
            });

            if rows_observed == 0 {
                continue;
            }
            for (determinant, dependent) in [(left, right), (right, left)] {
                let distinct = columns.get(determinant).map_or(0, |c| c.distinct_count);
                if distinct > 0 && combinations == distinct {
                    dependencies.push(FunctionalDependency {
                        determinant,
                        dependent,
                    });
                }
            }
        }

        Self {
            root,
            rows_observed,
            columns,
            pairs,
            dependencies,
        }
    }

    /// Column summary by output name
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Pair summary; the order of `i` and `j` does not matter
    pub fn pair(&self, i: usize, j: usize) -> Option<&PairSummary> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.pairs.iter().find(|p| p.left == i && p.right == j)
    }

    pub fn has_dependency(&self, determinant: usize, dependent: usize) -> bool {
        self.dependencies
            .iter()
            .any(|d| d.determinant == determinant && d.dependent == dependent)
    }

    /// Pairs that form a unique column combination
    pub fn unique_pairs(&self) -> impl Iterator<Item = &PairSummary> {
        self.pairs.iter().filter(|p| p.unique)
    }

    /// One `column <name> (<index>) has <count> distinct values.` per column
    pub fn distinct_lines(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                format!(
                    "column {} ({}) has {} distinct values.",
                    c.name, c.index, c.distinct_count
                )
            })
            .collect()
    }

    /// Per-column values, then dependencies and unique combinations
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.columns.len() + self.dependencies.len());

        for c in &self.columns {
            let most_frequent = match (&c.most_frequent, &c.most_frequent_repr) {
                (Some(v), _) => v.to_string(),
                (None, Some(repr)) => repr.clone(),
                (None, None) => "none".to_string(),
            };
            lines.push(format!(
                "column {} ({}): min {}, max {}, most frequent {}, numeric {}{}",
                c.name,
                c.index,
                OptionalValue(c.min),
                OptionalValue(c.max),
                most_frequent,
                c.is_numeric,
                if c.pinned { ", pinned" } else { "" }
            ));
        }

        for dep in &self.dependencies {
            lines.push(format!(
                "functional dependency {} -> {}",
                self.column_name(dep.determinant),
                self.column_name(dep.dependent)
            ));
        }

        for pair in self.unique_pairs() {
            lines.push(format!(
                "unique column combination ({}, {})",
                self.column_name(pair.left),
                self.column_name(pair.right)
            ));
        }

        lines
    }

    /// Report lines in output order
    pub fn lines(&self, details: bool) -> Vec<String> {
        let mut lines = self.distinct_lines();
        if details {
            lines.extend(self.detail_lines());
        }
        lines
    }

    /// Write the report, one line per `\n`
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, details: bool) -> io::Result<()> {
        for line in self.lines(details) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    fn column_name(&self, index: usize) -> &str {
        self.columns
            .get(index)
            .map(|c| c.name.as_str())
            .unwrap_or("?")
    }
}

struct OptionalValue(Option<StatValue>);

impl fmt::Display for OptionalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "none"),
        }
    }
}

/// Shareable in-memory report sink
///
/// Clones share the same buffer, so one clone can be installed as the
/// collector's writer while another reads what was written.
#[derive(Debug, Clone, Default)]
pub struct ReportBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Written lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for ReportBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(index: usize, name: &str, distinct_count: u64) -> ColumnSummary {
        ColumnSummary {
            index,
            name: name.to_string(),
            data_type: DataType::Integer,
            is_numeric: true,
            min: None,
            max: None,
            most_frequent: None,
            most_frequent_repr: None,
            distinct_count,
            pinned: false,
        }
    }

    #[test]
    fn test_distinct_lines() {
        let report = StatisticsReport::new(
            PlanNodeId::next(),
            2,
            vec![summary(0, "a", 2), summary(1, "b", 1)],
            [((0, 1), 2)],
        );
        assert_eq!(
            report.distinct_lines(),
            vec![
                "column a (0) has 2 distinct values.",
                "column b (1) has 1 distinct values."
            ]
        );
        assert_eq!(report.lines(false), report.distinct_lines());
    }

    #[test]
    fn test_dependencies_and_unique_pairs() {
        // a: 2 distinct, b: 1 distinct, 2 combinations over 2 rows
        let report = StatisticsReport::new(
            PlanNodeId::next(),
            2,
            vec![summary(0, "a", 2), summary(1, "b", 1)],
            [((0, 1), 2)],
        );
        assert!(report.has_dependency(0, 1));
        assert!(!report.has_dependency(1, 0));
        assert!(report.pair(1, 0).unwrap().unique);
        assert_eq!(report.unique_pairs().count(), 1);
    }

    #[test]
    fn test_no_dependencies_without_rows() {
        let report = StatisticsReport::new(
            PlanNodeId::next(),
            0,
            vec![summary(0, "a", 0), summary(1, "b", 0)],
            [((0, 1), 0)],
        );
        assert!(report.dependencies.is_empty());
        assert!(!report.pairs[0].unique);
    }

    #[test]
    fn test_detail_lines() {
        let mut a = summary(0, "a", 1);
        a.min = Some(StatValue::Integer(7));
        a.max = Some(StatValue::Integer(7));
        a.most_frequent = Some(StatValue::Integer(7));
        a.pinned = true;
        let mut b = summary(1, "b", 2);
        b.data_type = DataType::Text;
        b.is_numeric = false;
        b.most_frequent_repr = Some("Can".to_string());

        let report = StatisticsReport::new(PlanNodeId::next(), 2, vec![a, b], [((0, 1), 2)]);
        let lines = report.lines(true);
        assert_eq!(lines[2], "column a (0): min 7, max 7, most frequent 7, numeric true, pinned");
        assert_eq!(
            lines[3],
            "column b (1): min none, max none, most frequent Can, numeric false"
        );
        assert!(lines.contains(&"functional dependency b -> a".to_string()));
        assert!(lines.contains(&"unique column combination (a, b)".to_string()));
    }

    #[test]
    fn test_report_buffer_shared() {
        let buffer = ReportBuffer::new();
        let mut writer = buffer.clone();
        let no_pairs: [((usize, usize), u64); 0] = [];
        let report =
            StatisticsReport::new(PlanNodeId::next(), 1, vec![summary(0, "x", 1)], no_pairs);
        report.write_to(&mut writer, false).unwrap();

        assert_eq!(buffer.lines(), vec!["column x (0) has 1 distinct values."]);
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }
}
