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

//! Scan qualifiers
//!
//! A qualifier list is an implicit conjunction of simple predicates that a
//! scan applies to every base-table row before emitting it. Columns are
//! addressed by their attribute position in the scanned table.

use std::fmt;

use crate::core::{DataType, EqualitySemantics, Error, Operator, Result, Row, Schema, Value};

/// Reference to a column of the scanned table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// 0-based attribute position in the table
    pub attribute: usize,
    /// Declared type of the column
    pub data_type: DataType,
}

impl ColumnRef {
    pub fn new(attribute: usize, data_type: DataType) -> Self {
        Self {
            attribute,
            data_type,
        }
    }

    /// Resolve a column of `schema` by name
    pub fn named(schema: &Schema, name: &str) -> Result<Self> {
        let attribute = schema.column_index(name).ok_or_else(|| {
            Error::invalid_argument(format!(
                "column '{}' not found in table '{}'",
                name, schema.table_name
            ))
        })?;
        Ok(Self::new(attribute, schema.columns[attribute].data_type))
    }
}

/// A `column = constant` predicate with recognized equality semantics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualityPredicate<'a> {
    pub column: ColumnRef,
    pub semantics: EqualitySemantics,
    pub constant: &'a Value,
}

/// A single scan predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Qualifier {
    /// `column <op> constant`
    Compare {
        column: ColumnRef,
        operator: Operator,
        constant: Value,
    },
    /// `left <op> right`, both columns of the same table
    CompareColumns {
        left: ColumnRef,
        operator: Operator,
        right: ColumnRef,
    },
    /// `column IS NULL`
    IsNull(ColumnRef),
    /// `column IS NOT NULL`
    IsNotNull(ColumnRef),
}

impl Qualifier {
    /// `column <op> constant`
    pub fn compare(column: ColumnRef, operator: Operator, constant: impl Into<Value>) -> Self {
        Qualifier::Compare {
            column,
            operator,
            constant: constant.into(),
        }
    }

    /// `column = constant`
    pub fn eq(column: ColumnRef, constant: impl Into<Value>) -> Self {
        Self::compare(column, Operator::Eq, constant)
    }

    /// `left <op> right`
    pub fn compare_columns(left: ColumnRef, operator: Operator, right: ColumnRef) -> Self {
        Qualifier::CompareColumns {
            left,
            operator,
            right,
        }
    }

    /// Evaluate against a base-table row
    ///
    /// Comparisons involving NULL, or between values with no ordering,
    /// are false.
    pub fn evaluate(&self, row: &Row) -> bool {
        match self {
            Qualifier::Compare {
                column,
                operator,
                constant,
            } => match row.get(column.attribute) {
                Some(value) if !value.is_null() && !constant.is_null() => value
                    .compare(constant)
                    .map(|ord| operator.matches(ord))
                    .unwrap_or(false),
                _ => false,
            },
            Qualifier::CompareColumns {
                left,
                operator,
                right,
            } => match (row.get(left.attribute), row.get(right.attribute)) {
                (Some(l), Some(r)) if !l.is_null() && !r.is_null() => l
                    .compare(r)
                    .map(|ord| operator.matches(ord))
                    .unwrap_or(false),
                _ => false,
            },
            Qualifier::IsNull(column) => row.get(column.attribute).map_or(true, Value::is_null),
            Qualifier::IsNotNull(column) => {
                row.get(column.attribute).is_some_and(|v| !v.is_null())
            }
        }
    }

    /// View this qualifier as `column = constant` if the comparison is a
    /// recognized value equality
    pub fn as_equality(&self) -> Option<EqualityPredicate<'_>> {
        match self {
            Qualifier::Compare {
                column,
                operator,
                constant,
            } if !constant.is_null() => {
                EqualitySemantics::resolve(*operator, column.data_type, constant.data_type()).map(
                    |semantics| EqualityPredicate {
                        column: *column,
                        semantics,
                        constant,
                    },
                )
            }
            _ => None,
        }
    }

    /// Highest attribute position referenced
    pub fn max_attribute(&self) -> usize {
        match self {
            Qualifier::Compare { column, .. }
            | Qualifier::IsNull(column)
            | Qualifier::IsNotNull(column) => column.attribute,
            Qualifier::CompareColumns { left, right, .. } => left.attribute.max(right.attribute),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Compare {
                column,
                operator,
                constant,
            } => write!(f, "${} {} {}", column.attribute, operator, constant),
            Qualifier::CompareColumns {
                left,
                operator,
                right,
            } => write!(f, "${} {} ${}", left.attribute, operator, right.attribute),
            Qualifier::IsNull(column) => write!(f, "${} IS NULL", column.attribute),
            Qualifier::IsNotNull(column) => write!(f, "${} IS NOT NULL", column.attribute),
        }
    }
}

/// Evaluate a conjunction of qualifiers
pub fn evaluate_all(qualifiers: &[Qualifier], row: &Row) -> bool {
    qualifiers.iter().all(|q| q.evaluate(row))
}
