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

//! In-memory table backing scan operators

use std::sync::Arc;

use crate::core::{ColumnSource, Result, Row, Schema, TableId};

/// An immutable in-memory table
///
/// Rows are validated against the schema when the table is built and shared
/// through an `Arc` so any number of scans can read them.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    id: TableId,
    schema: Schema,
    rows: Arc<Vec<Row>>,
}

impl MemoryTable {
    /// Build a table, validating every row against the schema
    pub fn new(id: TableId, schema: Schema, rows: Vec<Row>) -> Result<Self> {
        for row in &rows {
            row.validate(&schema)?;
        }
        Ok(Self {
            id,
            schema,
            rows: Arc::new(rows),
        })
    }

    /// Table identifier
    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Table name
    #[inline]
    pub fn name(&self) -> &str {
        &self.schema.table_name
    }

    /// Table schema
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Shared handle to the rows
    #[inline]
    pub fn rows(&self) -> Arc<Vec<Row>> {
        Arc::clone(&self.rows)
    }

    /// Source descriptor of the column at `attribute`
    pub fn column_source(&self, attribute: usize) -> Option<ColumnSource> {
        (attribute < self.schema.column_count()).then(|| ColumnSource::new(self.id, attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, SchemaBuilder, Value};

    #[test]
    fn test_memory_table_validates_rows() {
        let schema = SchemaBuilder::new("t")
            .add("id", DataType::Integer)
            .build();

        let table = MemoryTable::new(
            TableId(3),
            schema.clone(),
            vec![Row::from_values(vec![Value::integer(1)])],
        )
        .unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.name(), "t");
        assert_eq!(
            table.column_source(0),
            Some(ColumnSource::new(TableId(3), 0))
        );
        assert_eq!(table.column_source(1), None);

        let bad = MemoryTable::new(
            TableId(4),
            schema,
            vec![Row::from_values(vec![Value::text("x")])],
        );
        assert!(bad.is_err());
    }
}
