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

//! Nested Loop Join Operator.
//!
//! The classic nested loop join with O(N*M) complexity. The right input is
//! materialized in `open()`; the left input streams. Output columns keep
//! the base-table sources of an input only when that input is never padded
//! with NULLs, so equality filters pushed into it still resolve to join
//! output positions.

use std::fmt;

use crate::core::{Error, Operator as CompareOp, Result, Row, Value};
use crate::executor::observer::ExecutionObserver;
use crate::executor::operator::{ColumnInfo, Operator, PlanNodeId};

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    /// True when unmatched right rows are emitted with a NULL left side
    pub fn pads_left(&self) -> bool {
        matches!(self, JoinType::Right | JoinType::Full)
    }

    /// True when unmatched left rows are emitted with a NULL right side
    pub fn pads_right(&self) -> bool {
        matches!(self, JoinType::Left | JoinType::Full)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Full => write!(f, "FULL"),
            JoinType::Cross => write!(f, "CROSS"),
        }
    }
}

/// `left.column <op> right.column`, by position in each input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinCondition {
    pub left: usize,
    pub operator: CompareOp,
    pub right: usize,
}

impl JoinCondition {
    /// Equi-join on one column of each side
    pub fn equals(left: usize, right: usize) -> Self {
        Self {
            left,
            operator: CompareOp::Eq,
            right,
        }
    }

    fn matches(&self, left: &Row, right: &Row) -> bool {
        match (left.get(self.left), right.get(self.right)) {
            (Some(l), Some(r)) if !l.is_null() && !r.is_null() => l
                .compare(r)
                .map(|ord| self.operator.matches(ord))
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Nested Loop Join Operator.
///
/// For each row in the outer (left) input, scans all rows in the inner (right)
/// input and emits matches based on the join condition.
pub struct NestedLoopJoinOperator {
    id: PlanNodeId,

    // Input operators
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,

    // Join configuration
    join_type: JoinType,
    condition: Option<JoinCondition>,

    // Output schema
    schema: Vec<ColumnInfo>,
    left_col_count: usize,

    // Materialized right side (inner loop)
    right_rows: Vec<Row>,

    // Current state
    current_left_row: Option<Row>,
    current_right_idx: usize,
    left_had_match: bool,

    // Track matched right rows for RIGHT/FULL OUTER
    right_matched: Vec<bool>,

    // Phase for returning unmatched right rows
    returning_unmatched_right: bool,
    unmatched_right_idx: usize,

    // Cached null rows for OUTER joins
    null_left: Row,
    null_right: Row,

    // State tracking
    opened: bool,
    left_exhausted: bool,
}

impl NestedLoopJoinOperator {
    /// Create a new nested loop join operator.
    ///
    /// A `condition` of `None` matches every pair. Column positions in the
    /// condition are validated against the input schemas.
    pub fn new(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        join_type: JoinType,
        condition: Option<JoinCondition>,
    ) -> Result<Self> {
        if let Some(cond) = condition {
            if cond.left >= left.schema().len() {
                return Err(Error::ColumnIndexOutOfBounds { index: cond.left });
            }
            if cond.right >= right.schema().len() {
                return Err(Error::ColumnIndexOutOfBounds { index: cond.right });
            }
        }

        // A NULL-padded side no longer carries its scan's filter constant
        let output_column = |column: &ColumnInfo, padded: bool| {
            let mut column = column.clone();
            if padded {
                column.source = None;
            }
            column
        };
        let mut schema = Vec::with_capacity(left.schema().len() + right.schema().len());
        schema.extend(
            left.schema()
                .iter()
                .map(|c| output_column(c, join_type.pads_left())),
        );
        schema.extend(
            right
                .schema()
                .iter()
                .map(|c| output_column(c, join_type.pads_right())),
        );

        let null_left = left
            .schema()
            .iter()
            .map(|c| Value::null(c.data_type))
            .collect();
        let null_right = right
            .schema()
            .iter()
            .map(|c| Value::null(c.data_type))
            .collect();
        let left_col_count = left.schema().len();

        Ok(Self {
            id: PlanNodeId::next(),
            left,
            right,
            join_type,
            condition,
            schema,
            left_col_count,
            right_rows: Vec::new(),
            current_left_row: None,
            current_right_idx: 0,
            left_had_match: false,
            right_matched: Vec::new(),
            returning_unmatched_right: false,
            unmatched_right_idx: 0,
            null_left,
            null_right,
            opened: false,
            left_exhausted: false,
        })
    }

    /// Inner join on `left_col = right_col`.
    pub fn inner(
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
        left_col: usize,
        right_col: usize,
    ) -> Result<Self> {
        Self::new(
            left,
            right,
            JoinType::Inner,
            Some(JoinCondition::equals(left_col, right_col)),
        )
    }

    /// Get the next left row from the outer input.
    #[inline]
    fn advance_left(&mut self) -> Result<bool> {
        match self.left.next()? {
            Some(row) => {
                self.current_left_row = Some(row);
                self.current_right_idx = 0;
                self.left_had_match = false;
                Ok(true)
            }
            None => {
                self.current_left_row = None;
                self.left_exhausted = true;
                Ok(false)
            }
        }
    }

    fn is_right_outer(&self) -> bool {
        matches!(self.join_type, JoinType::Right | JoinType::Full)
    }

    fn is_left_outer(&self) -> bool {
        matches!(self.join_type, JoinType::Left | JoinType::Full)
    }

    fn pair_matches(&self, left: &Row, right: &Row) -> bool {
        match (self.join_type, &self.condition) {
            (JoinType::Cross, _) | (_, None) => true,
            (_, Some(cond)) => cond.matches(left, right),
        }
    }

    fn next_unmatched_right(&mut self) -> Option<Row> {
        while self.unmatched_right_idx < self.right_rows.len() {
            let idx = self.unmatched_right_idx;
            self.unmatched_right_idx += 1;
            if !self.right_matched[idx] {
                return Some(Row::from_combined(&self.null_left, &self.right_rows[idx]));
            }
        }
        None
    }
}

impl Operator for NestedLoopJoinOperator {
    fn open(&mut self, observer: &mut dyn ExecutionObserver) -> Result<()> {
        self.left.open(observer)?;
        self.right.open(observer)?;

        // Materialize right side (inner loop must be restarted for each left row)
        self.right_rows.clear();
        while let Some(row) = self.right.next()? {
            self.right_rows.push(row);
        }

        if self.is_right_outer() {
            self.right_matched = vec![false; self.right_rows.len()];
        }
        self.returning_unmatched_right = false;
        self.unmatched_right_idx = 0;
        self.left_exhausted = false;

        self.advance_left()?;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        if !self.opened {
            return Err(Error::OperatorNotOpen(self.name().to_string()));
        }

        // Phase 2: unmatched right rows (RIGHT/FULL OUTER)
        if self.returning_unmatched_right {
            return Ok(self.next_unmatched_right());
        }

        // Phase 1: nested loop
        while !self.left_exhausted {
            let Some(left_row) = self.current_left_row.as_ref() else {
                break;
            };

            while self.current_right_idx < self.right_rows.len() {
                let right_idx = self.current_right_idx;
                self.current_right_idx += 1;
                let right_row = &self.right_rows[right_idx];

                if self.pair_matches(left_row, right_row) {
                    self.left_had_match = true;
                    if self.is_right_outer() {
                        self.right_matched[right_idx] = true;
                    }
                    return Ok(Some(Row::from_combined(left_row, right_row)));
                }
            }

            // Right side exhausted for this left row
            if self.is_left_outer() && !self.left_had_match {
                let padded = Row::from_combined(left_row, &self.null_right);
                self.advance_left()?;
                return Ok(Some(padded));
            }

            self.advance_left()?;
        }

        if self.is_right_outer() {
            self.returning_unmatched_right = true;
            self.unmatched_right_idx = 0;
            return Ok(self.next_unmatched_right());
        }
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        self.right_rows.clear();
        self.current_left_row = None;
        self.opened = false;
        self.left.close()?;
        self.right.close()?;
        Ok(())
    }

    fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        let left_est = self.left.estimated_rows()?;
        let right_est = self.right.estimated_rows()?;

        Some(match self.join_type {
            JoinType::Inner => (left_est * right_est) / 10, // Assume 10% selectivity
            JoinType::Left => left_est,
            JoinType::Right => right_est,
            JoinType::Full => left_est + right_est,
            JoinType::Cross => left_est * right_est,
        })
    }

    fn name(&self) -> &str {
        match self.join_type {
            JoinType::Inner => "NestedLoop (INNER)",
            JoinType::Left => "NestedLoop (LEFT)",
            JoinType::Right => "NestedLoop (RIGHT)",
            JoinType::Full => "NestedLoop (FULL)",
            JoinType::Cross => "NestedLoop (CROSS)",
        }
    }
}

impl NestedLoopJoinOperator {
    /// Number of columns contributed by the left input
    pub fn left_column_count(&self) -> usize {
        self.left_col_count
    }
}
