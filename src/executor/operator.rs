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

//! Volcano-style operator interface for streaming query execution.
//!
//! Operators pull rows on demand from their children. The statistics
//! collector never sits inside an operator; it is handed to the tree as an
//! [`ExecutionObserver`] and sees exactly two events: scan initialization
//! (from `open`) and rows leaving the root (from the query driver).
//!
//! ```text
//! ┌──────────────┐
//! │ QueryExecutor│ ← pulls root rows, notifies observer
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ Projection   │
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ TableScan    │ ← open() reports its qualifiers to the observer
//! └──────────────┘
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::observer::ExecutionObserver;
use crate::core::{ColumnSource, DataType, Result, Row};

static NEXT_PLAN_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a node in a plan tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanNodeId(u32);

impl PlanNodeId {
    /// Allocate a process-unique node id
    pub fn next() -> Self {
        PlanNodeId(NEXT_PLAN_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlanNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Column information for operator schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared type of the values in this column
    pub data_type: DataType,
    /// Base table column the values come from, if any
    pub source: Option<ColumnSource>,
}

impl ColumnInfo {
    /// Create a computed column (no base table source).
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            source: None,
        }
    }

    /// Create a column that reads a base table column.
    pub fn with_source(name: impl Into<String>, data_type: DataType, source: ColumnSource) -> Self {
        Self {
            name: name.into(),
            data_type,
            source: Some(source),
        }
    }

    /// Same column under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Volcano-style iterator interface for query operators.
///
/// 1. `open()` - Initialize the operator and its children (called once)
/// 2. `next()` - Get the next row (called repeatedly until None)
/// 3. `close()` - Release resources (called once at end)
pub trait Operator: Send {
    /// Initialize the operator.
    ///
    /// Children are opened here. Scan operators report their backing table
    /// and qualifier list to `observer` before any row is pulled.
    fn open(&mut self, observer: &mut dyn ExecutionObserver) -> Result<()>;

    /// Get the next row from this operator.
    ///
    /// Returns `Ok(None)` once exhausted, and keeps returning it.
    fn next(&mut self) -> Result<Option<Row>>;

    /// Close the operator and its children.
    ///
    /// Called once after all rows have been consumed or when execution
    /// stops early.
    fn close(&mut self) -> Result<()>;

    /// Output columns of this operator.
    fn schema(&self) -> &[ColumnInfo];

    /// Identity of this node in the plan.
    fn id(&self) -> PlanNodeId;

    /// Estimated number of output rows, if known.
    fn estimated_rows(&self) -> Option<usize> {
        None
    }

    /// Descriptive name (for EXPLAIN and logging).
    fn name(&self) -> &str;
}

// ============================================================================
// Helper Operators
// ============================================================================

/// An empty operator that produces no rows.
pub struct EmptyOperator {
    id: PlanNodeId,
    schema: Vec<ColumnInfo>,
}

impl EmptyOperator {
    /// Create an empty operator with no schema.
    pub fn new() -> Self {
        Self::with_schema(Vec::new())
    }

    /// Create an empty operator with a specific schema.
    pub fn with_schema(schema: Vec<ColumnInfo>) -> Self {
        Self {
            id: PlanNodeId::next(),
            schema,
        }
    }
}

impl Default for EmptyOperator {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator for EmptyOperator {
    fn open(&mut self, _observer: &mut dyn ExecutionObserver) -> Result<()> {
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        Some(0)
    }

    fn name(&self) -> &str {
        "Empty"
    }
}

/// An operator that yields rows from a pre-materialized vector.
///
/// Its columns have no base table source, so equality filters elsewhere in
/// the plan never pin them.
pub struct MaterializedOperator {
    id: PlanNodeId,
    rows: Vec<Row>,
    schema: Vec<ColumnInfo>,
    current_idx: usize,
}

impl MaterializedOperator {
    /// Create an operator from a vector of rows.
    pub fn new(rows: Vec<Row>, schema: Vec<ColumnInfo>) -> Self {
        Self {
            id: PlanNodeId::next(),
            rows,
            schema,
            current_idx: 0,
        }
    }

    /// Create from an `Arc<Vec<Row>>`, unwrapping if sole owner.
    pub fn from_arc(rows: Arc<Vec<Row>>, schema: Vec<ColumnInfo>) -> Self {
        let rows = Arc::try_unwrap(rows).unwrap_or_else(|arc| (*arc).clone());
        Self::new(rows, schema)
    }
}

impl Operator for MaterializedOperator {
    fn open(&mut self, _observer: &mut dyn ExecutionObserver) -> Result<()> {
        self.current_idx = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        if self.current_idx >= self.rows.len() {
            return Ok(None);
        }

        // Forward-only: take the row instead of cloning it.
        let row = std::mem::take(&mut self.rows[self.current_idx]);
        self.current_idx += 1;
        Ok(Some(row))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        Some(self.rows.len())
    }

    fn name(&self) -> &str {
        "Materialized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::executor::observer::NoopObserver;

    #[test]
    fn test_plan_node_ids_are_unique() {
        let a = PlanNodeId::next();
        let b = PlanNodeId::next();
        assert_ne!(a, b);
        assert!(b.as_u32() > a.as_u32());
    }

    #[test]
    fn test_column_info() {
        let computed = ColumnInfo::new("total", DataType::Integer);
        assert_eq!(computed.source, None);

        let sourced = ColumnInfo::with_source(
            "id",
            DataType::Integer,
            ColumnSource::new(crate::core::TableId(1), 0),
        );
        let renamed = sourced.renamed("album_id");
        assert_eq!(renamed.name, "album_id");
        assert_eq!(renamed.source, sourced.source);
    }

    #[test]
    fn test_empty_operator() {
        let mut op = EmptyOperator::new();
        op.open(&mut NoopObserver).unwrap();

        assert!(op.next().unwrap().is_none());
        assert!(op.next().unwrap().is_none());

        op.close().unwrap();
    }

    #[test]
    fn test_materialized_operator() {
        let rows = vec![
            Row::from_values(vec![Value::integer(1)]),
            Row::from_values(vec![Value::integer(2)]),
        ];
        let schema = vec![ColumnInfo::new("id", DataType::Integer)];

        let mut op = MaterializedOperator::new(rows, schema);
        assert_eq!(op.estimated_rows(), Some(2));
        op.open(&mut NoopObserver).unwrap();

        assert_eq!(op.next().unwrap().unwrap()[0], Value::integer(1));
        assert_eq!(op.next().unwrap().unwrap()[0], Value::integer(2));
        assert!(op.next().unwrap().is_none());

        op.close().unwrap();
    }
}
