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

//! Equality-predicate scanning
//!
//! When a scan node is initialized, its first qualifier is checked for the
//! shape `column = constant`. If the filtered column reaches the root's
//! output, every output row carries the constant in that position, so the
//! column's min, max and most frequent value are known before any row is
//! pulled. Only the first conjunct is examined.

use tracing::{debug, warn};

use super::column::ColumnStatistic;
use crate::core::{ColumnSource, EqualitySemantics, TableId};
use crate::executor::operator::ColumnInfo;
use crate::executor::qualifier::Qualifier;

/// Outcome of scanning one qualifier list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualityScan {
    /// The first qualifier is not a recognized equality
    NoEquality,
    /// Output columns pinned to the constant
    Pinned {
        columns: Vec<usize>,
        semantics: EqualitySemantics,
    },
    /// The filtered column does not appear in the output
    NotProjected { source: ColumnSource },
}

/// Scan `qualifiers` of a node over `table` and pin matching output columns
pub fn scan_equality(
    table: TableId,
    qualifiers: &[Qualifier],
    columns: &[ColumnInfo],
    statistics: &mut [ColumnStatistic],
) -> EqualityScan {
    let Some(equality) = qualifiers.first().and_then(Qualifier::as_equality) else {
        return EqualityScan::NoEquality;
    };

    let source = ColumnSource::new(table, equality.column.attribute);
    let matched: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.source == Some(source))
        .map(|(idx, _)| idx)
        .collect();

    if matched.is_empty() {
        warn!(
            "equality filter on table {} attribute {} does not reach the output; column not pinned",
            table, equality.column.attribute
        );
        return EqualityScan::NotProjected { source };
    }

    for &idx in &matched {
        if let Some(stat) = statistics.get_mut(idx) {
            stat.pin(equality.constant);
            debug!(
                "pinned output column {} ({}) to {} by {}",
                columns[idx].name, idx, equality.constant, equality.semantics
            );
        }
    }

    EqualityScan::Pinned {
        columns: matched,
        semantics: equality.semantics,
    }
}
