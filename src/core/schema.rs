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

//! Schema types - table identity, column definitions and column sources

use std::fmt;

use super::types::DataType;

/// Identifier of a table in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an output column's values come from
///
/// `attribute` is the 0-based position of the column in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnSource {
    pub table: TableId,
    pub attribute: usize,
}

impl ColumnSource {
    pub fn new(table: TableId, attribute: usize) -> Self {
        Self { table, attribute }
    }
}

/// A column definition in a table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    /// 0-based position in the table
    pub id: usize,

    /// Column name
    pub name: String,

    /// Data type of the column
    pub data_type: DataType,

    /// Whether the column can contain NULL values
    pub nullable: bool,
}

impl SchemaColumn {
    /// Create a new column definition
    pub fn new(id: usize, name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Create a NOT NULL column
    pub fn simple(id: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(id, name, data_type, false)
    }

    /// Create a nullable column
    pub fn nullable(id: usize, name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(id, name, data_type, true)
    }
}

impl fmt::Display for SchemaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// Table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Table name
    pub table_name: String,

    /// Column definitions in table order
    pub columns: Vec<SchemaColumn>,
}

impl Schema {
    /// Create a new schema
    pub fn new(table_name: impl Into<String>, columns: Vec<SchemaColumn>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name (case-insensitive)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Look up a column by name (case-insensitive)
    pub fn get_column_by_name(&self, name: &str) -> Option<&SchemaColumn> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    /// True if the schema has a column with this name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.table_name)?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", col)?;
        }
        write!(f, ")")
    }
}

/// Builder for table schemas
pub struct SchemaBuilder {
    table_name: String,
    columns: Vec<SchemaColumn>,
}

impl SchemaBuilder {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a NOT NULL column
    pub fn add(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        let id = self.columns.len();
        self.columns.push(SchemaColumn::simple(id, name, data_type));
        self
    }

    /// Add a nullable column
    pub fn add_nullable(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        let id = self.columns.len();
        self.columns.push(SchemaColumn::nullable(id, name, data_type));
        self
    }

    pub fn build(self) -> Schema {
        Schema::new(self.table_name, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder() {
        let schema = SchemaBuilder::new("tracks")
            .add("id", DataType::Integer)
            .add_nullable("title", DataType::Text)
            .build();

        assert_eq!(schema.column_count(), 2);
        assert_eq!(schema.columns[1].id, 1);
        assert!(schema.columns[1].nullable);
        assert_eq!(schema.column_index("TITLE"), Some(1));
        assert!(schema.has_column("id"));
        assert!(!schema.has_column("artist"));
        assert_eq!(
            schema.to_string(),
            "tracks (id INTEGER NOT NULL, title TEXT)"
        );
    }

    #[test]
    fn test_column_source_equality() {
        let a = ColumnSource::new(TableId(1), 2);
        assert_eq!(a, ColumnSource::new(TableId(1), 2));
        assert_ne!(a, ColumnSource::new(TableId(2), 2));
        assert_ne!(a, ColumnSource::new(TableId(1), 3));
    }
}
