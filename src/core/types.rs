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

//! Core type definitions
//!
//! This module defines the fundamental types: DataType, Operator and
//! EqualitySemantics.

use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// SQL data types understood by the execution framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DataType {
    /// NULL data type, used for unknown/unspecified types
    #[default]
    Null = 0,

    /// 64-bit signed integer
    Integer = 1,

    /// 64-bit floating point number (DECIMAL/NUMERIC map here)
    Float = 2,

    /// UTF-8 text string
    Text = 3,

    /// Boolean true/false
    Boolean = 4,

    /// Timestamp with timezone (stored as UTC)
    Timestamp = 5,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "NULL"),
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NULL" => Ok(DataType::Null),
            "INTEGER" | "INT" | "INT2" | "INT4" | "INT8" | "BIGINT" | "SMALLINT" => {
                Ok(DataType::Integer)
            }
            "FLOAT" | "DOUBLE" | "REAL" | "DECIMAL" | "NUMERIC" => Ok(DataType::Float),
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "STRING" => Ok(DataType::Text),
            "BOOLEAN" | "BOOL" => Ok(DataType::Boolean),
            "TIMESTAMP" | "DATETIME" | "DATE" => Ok(DataType::Timestamp),
            _ => Err(Error::parse(format!("unknown data type: {}", s))),
        }
    }
}

/// Comparison operators for qualifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    /// Equality (=)
    Eq = 0,

    /// Inequality (!=)
    Ne = 1,

    /// Greater than (>)
    Gt = 2,

    /// Greater than or equal (>=)
    Gte = 3,

    /// Less than (<)
    Lt = 4,

    /// Less than or equal (<=)
    Lte = 5,
}

impl Operator {
    /// Returns true if an ordering satisfies this operator
    pub fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Operator::Eq => ordering == Equal,
            Operator::Ne => ordering != Equal,
            Operator::Gt => ordering == Greater,
            Operator::Gte => ordering != Less,
            Operator::Lt => ordering == Less,
            Operator::Lte => ordering != Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Ne => write!(f, "!="),
            Operator::Gt => write!(f, ">"),
            Operator::Gte => write!(f, ">="),
            Operator::Lt => write!(f, "<"),
            Operator::Lte => write!(f, "<="),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            _ => Err(Error::parse(format!("unknown operator: {}", s))),
        }
    }
}

/// Equality semantics recognized when scanning pushed-down filters
///
/// An equality qualifier pins a column to a single value only when the
/// comparison is a true value equality for the operand types involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualitySemantics {
    /// integer = integer
    IntegerEq,
    /// numeric = numeric, including mixed integer/float operands
    NumericEq,
    /// text = text
    TextEq,
}

impl EqualitySemantics {
    /// Resolve the equality semantics of `column <op> constant`
    ///
    /// Returns None when the operator is not an equality or the operand
    /// types have no recognized equality.
    pub fn resolve(op: Operator, column: DataType, constant: DataType) -> Option<Self> {
        if op != Operator::Eq {
            return None;
        }
        match (column, constant) {
            (DataType::Integer, DataType::Integer) => Some(EqualitySemantics::IntegerEq),
            (DataType::Integer, DataType::Float)
            | (DataType::Float, DataType::Integer)
            | (DataType::Float, DataType::Float) => Some(EqualitySemantics::NumericEq),
            (DataType::Text, DataType::Text) => Some(EqualitySemantics::TextEq),
            _ => None,
        }
    }
}

impl fmt::Display for EqualitySemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EqualitySemantics::IntegerEq => write!(f, "integer equality"),
            EqualitySemantics::NumericEq => write!(f, "numeric equality"),
            EqualitySemantics::TextEq => write!(f, "text equality"),
        }
    }
}
