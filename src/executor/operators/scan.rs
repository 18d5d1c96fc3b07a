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

//! Sequential table scan.
//!
//! Walks an in-memory table and emits every row that satisfies the scan's
//! qualifier list. Each output column carries its `(table, attribute)`
//! source so that observers can map qualifiers back to output positions.

use std::sync::Arc;

use crate::core::{Error, Result, Row};
use crate::executor::observer::ExecutionObserver;
use crate::executor::operator::{ColumnInfo, Operator, PlanNodeId};
use crate::executor::qualifier::{evaluate_all, Qualifier};
use crate::storage::MemoryTable;

/// Sequential scan over a [`MemoryTable`] with pushed-down qualifiers.
pub struct TableScanOperator {
    id: PlanNodeId,
    table: Arc<MemoryTable>,
    qualifiers: Vec<Qualifier>,
    schema: Vec<ColumnInfo>,

    // Rows snapshot taken in open()
    rows: Option<Arc<Vec<Row>>>,
    position: usize,
}

impl TableScanOperator {
    /// Scan every row of `table`.
    pub fn new(table: Arc<MemoryTable>) -> Self {
        Self::with_qualifiers(table, Vec::new())
    }

    /// Scan `table`, keeping rows that satisfy all `qualifiers`.
    pub fn with_qualifiers(table: Arc<MemoryTable>, qualifiers: Vec<Qualifier>) -> Self {
        let schema = table
            .schema()
            .columns
            .iter()
            .enumerate()
            .filter_map(|(attribute, column)| {
                table
                    .column_source(attribute)
                    .map(|source| ColumnInfo::with_source(&column.name, column.data_type, source))
            })
            .collect();

        Self {
            id: PlanNodeId::next(),
            table,
            qualifiers,
            schema,
            rows: None,
            position: 0,
        }
    }

    /// Qualifiers applied by this scan
    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }
}

impl Operator for TableScanOperator {
    fn open(&mut self, observer: &mut dyn ExecutionObserver) -> Result<()> {
        let width = self.table.schema().column_count();
        if let Some(bad) = self.qualifiers.iter().find(|q| q.max_attribute() >= width) {
            return Err(Error::ColumnIndexOutOfBounds {
                index: bad.max_attribute(),
            });
        }

        observer.on_scan_init(self.table.id(), &self.qualifiers);

        self.rows = Some(self.table.rows());
        self.position = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Row>> {
        let rows = self
            .rows
            .as_ref()
            .ok_or_else(|| Error::OperatorNotOpen(self.name().to_string()))?;

        while self.position < rows.len() {
            let row = &rows[self.position];
            self.position += 1;
            if evaluate_all(&self.qualifiers, row) {
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        self.rows = None;
        Ok(())
    }

    fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        let total = self.table.row_count();
        if self.qualifiers.is_empty() {
            Some(total)
        } else {
            // Assume 10% selectivity
            Some(total.div_ceil(10))
        }
    }

    fn name(&self) -> &str {
        "TableScan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnSource, DataType, Operator as CmpOp, SchemaBuilder, TableId, Value};
    use crate::executor::observer::testing::RecordingObserver;
    use crate::executor::qualifier::ColumnRef;

    fn albums() -> Arc<MemoryTable> {
        let schema = SchemaBuilder::new("albums")
            .add("id", DataType::Integer)
            .add("artist", DataType::Text)
            .add("year", DataType::Integer)
            .build();
        let rows = vec![
            Row::from_values(vec![Value::integer(1), Value::text("Can"), Value::integer(1971)]),
            Row::from_values(vec![Value::integer(2), Value::text("Can"), Value::integer(1972)]),
            Row::from_values(vec![Value::integer(3), Value::text("Neu!"), Value::integer(1972)]),
        ];
        Arc::new(MemoryTable::new(TableId(9), schema, rows).unwrap())
    }

    #[test]
    fn test_scan_schema_carries_sources() {
        let scan = TableScanOperator::new(albums());
        let schema = scan.schema();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema[1].name, "artist");
        assert_eq!(schema[2].source, Some(ColumnSource::new(TableId(9), 2)));
    }

    #[test]
    fn test_scan_filters_and_reports_qualifiers() {
        let table = albums();
        let year = ColumnRef::named(table.schema(), "year").unwrap();
        let mut scan = TableScanOperator::with_qualifiers(
            table,
            vec![Qualifier::compare(year, CmpOp::Eq, 1972i64)],
        );

        let mut observer = RecordingObserver::default();
        scan.open(&mut observer).unwrap();
        assert_eq!(observer.scans.len(), 1);
        assert_eq!(observer.scans[0].0, TableId(9));
        assert_eq!(observer.scans[0].1, scan.qualifiers());

        let mut ids = Vec::new();
        while let Some(row) = scan.next().unwrap() {
            ids.push(row[0].as_int64().unwrap());
        }
        assert_eq!(ids, vec![2, 3]);
        assert!(scan.next().unwrap().is_none());
        scan.close().unwrap();
    }

    #[test]
    fn test_next_before_open_fails() {
        let mut scan = TableScanOperator::new(albums());
        assert!(matches!(scan.next(), Err(Error::OperatorNotOpen(_))));
    }

    #[test]
    fn test_out_of_range_qualifier_rejected() {
        let mut scan = TableScanOperator::with_qualifiers(
            albums(),
            vec![Qualifier::eq(ColumnRef::new(5, DataType::Integer), 1i64)],
        );
        let mut observer = RecordingObserver::default();
        assert_eq!(
            scan.open(&mut observer),
            Err(Error::ColumnIndexOutOfBounds { index: 5 })
        );
        assert!(observer.scans.is_empty());
    }
}
