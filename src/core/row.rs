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

//! Row type - a collection of column values

use std::fmt;
use std::ops::Index;

use super::error::{Error, Result};
use super::schema::Schema;
use super::value::Value;

/// A row of column values as produced by an operator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Create a new empty row
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create a row with pre-allocated capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Create a row from a vector of values
    #[inline]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Create a row by combining two rows (for joins)
    pub fn from_combined(left: &Row, right: &Row) -> Self {
        let mut values = Vec::with_capacity(left.len() + right.len());
        values.extend(left.iter().cloned());
        values.extend(right.iter().cloned());
        Self { values }
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the row has no columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Append a value
    #[inline]
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Iterate over values
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Borrow as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Consume into the underlying values
    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Build a new row from the given column indices (clones values)
    pub fn select_columns(&self, indices: &[usize]) -> Result<Row> {
        let mut values = Vec::with_capacity(indices.len());
        for &idx in indices {
            let value = self
                .values
                .get(idx)
                .ok_or(Error::ColumnIndexOutOfBounds { index: idx })?;
            values.push(value.clone());
        }
        Ok(Row { values })
    }

    /// Validate the row against a table schema
    ///
    /// Checks width, NOT NULL constraints and that every non-NULL value has
    /// the declared column type (integers are accepted for FLOAT columns).
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        if self.len() != schema.column_count() {
            return Err(Error::table_columns_not_match(
                schema.column_count(),
                self.len(),
            ));
        }

        for (value, column) in self.values.iter().zip(schema.columns.iter()) {
            if value.is_null() {
                if !column.nullable {
                    return Err(Error::not_null_constraint(&column.name));
                }
                continue;
            }
            let got = value.data_type();
            let compatible = got == column.data_type
                || (column.data_type == crate::core::DataType::Float
                    && got == crate::core::DataType::Integer);
            if !compatible {
                return Err(Error::column_type_mismatch(
                    &column.name,
                    column.data_type.to_string(),
                    got.to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, SchemaBuilder};

    fn albums_schema() -> Schema {
        SchemaBuilder::new("albums")
            .add("id", DataType::Integer)
            .add_nullable("title", DataType::Text)
            .add("price", DataType::Float)
            .build()
    }

    #[test]
    fn test_row_basics() {
        let row = Row::from_values(vec![Value::integer(1), Value::text("x")]);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert_eq!(row[0], Value::integer(1));
        assert_eq!(row.get(2), None);
        assert_eq!(row.to_string(), "(1, x)");
    }

    #[test]
    fn test_from_combined() {
        let left = Row::from_values(vec![Value::integer(1)]);
        let right = Row::from_values(vec![Value::text("a"), Value::integer(2)]);
        let row = Row::from_combined(&left, &right);
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], Value::text("a"));
    }

    #[test]
    fn test_select_columns() {
        let row = Row::from_values(vec![Value::integer(1), Value::text("x"), Value::float(2.5)]);
        let projected = row.select_columns(&[2, 0]).unwrap();
        assert_eq!(projected.as_slice(), &[Value::float(2.5), Value::integer(1)]);
        assert!(matches!(
            row.select_columns(&[3]),
            Err(Error::ColumnIndexOutOfBounds { index: 3 })
        ));
    }

    #[test]
    fn test_validate() {
        let schema = albums_schema();

        let ok = Row::from_values(vec![
            Value::integer(1),
            Value::null(DataType::Text),
            Value::integer(10),
        ]);
        assert!(ok.validate(&schema).is_ok());

        let short = Row::from_values(vec![Value::integer(1)]);
        assert!(short.validate(&schema).is_err());

        let null_id = Row::from_values(vec![
            Value::null(DataType::Integer),
            Value::text("t"),
            Value::float(1.0),
        ]);
        assert!(matches!(
            null_id.validate(&schema),
            Err(Error::NotNullConstraint { .. })
        ));

        let wrong_type = Row::from_values(vec![
            Value::text("1"),
            Value::text("t"),
            Value::float(1.0),
        ]);
        assert!(matches!(
            wrong_type.validate(&schema),
            Err(Error::ColumnTypeMismatch { .. })
        ));
    }
}
