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

//! Core types and definitions
//!
//! - [`DataType`] - SQL data types (INTEGER, TEXT, FLOAT, etc.)
//! - [`Operator`] - Comparison operators (=, !=, >, <, etc.)
//! - [`EqualitySemantics`] - Recognized value equalities
//! - [`Value`] - Runtime values with type information
//! - [`Row`] - A row (collection of values)
//! - [`Schema`] - Table schema definition
//! - [`Error`] - Error types

pub mod error;
pub mod row;
pub mod schema;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use schema::{ColumnSource, Schema, SchemaBuilder, SchemaColumn, TableId};
pub use types::{DataType, EqualitySemantics, Operator};
pub use value::Value;
