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

//! # Piggyback - execution-time column statistics
//!
//! Piggyback collects column statistics as a side effect of running a
//! query. While a Volcano-style plan streams rows out of its root, the
//! statistics collector watches them and keeps, for every output column,
//! the minimum, maximum, most frequent value and an approximate distinct
//! count, plus co-occurrence sets for every column pair from which
//! functional dependencies are derived. No extra pass over the data is made.
//!
//! ## Key Features
//!
//! - **Two hook points** - scan initialization and root row production
//! - **Equality pinning** - a pushed-down `column = constant` filter fixes
//!   that output column's statistics before the first row
//! - **Pairwise co-occurrence** - incremental upper-triangle pair sets
//! - **Functional dependencies** - derived at teardown from pair sizes
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use piggyback::core::{DataType, Row, SchemaBuilder, Value};
//! use piggyback::executor::{
//!     ColumnRef, ExecutionContext, ProjectionOperator, Qualifier, QueryExecutor,
//!     TableScanOperator,
//! };
//! use piggyback::statistics::{ReportTarget, StatisticsConfig};
//! use piggyback::storage::Catalog;
//!
//! let mut catalog = Catalog::new();
//! let albums = catalog
//!     .create_table(
//!         SchemaBuilder::new("albums")
//!             .add("artist", DataType::Text)
//!             .add("year", DataType::Integer)
//!             .build(),
//!         vec![
//!             Row::from_values(vec![Value::text("Can"), Value::integer(1971)]),
//!             Row::from_values(vec![Value::text("Can"), Value::integer(1972)]),
//!             Row::from_values(vec![Value::text("Neu!"), Value::integer(1972)]),
//!         ],
//!     )
//!     .unwrap();
//!
//! let artist = ColumnRef::named(albums.schema(), "artist").unwrap();
//! let scan = TableScanOperator::with_qualifiers(
//!     Arc::clone(&albums),
//!     vec![Qualifier::eq(artist, "Can")],
//! );
//! let mut plan = ProjectionOperator::by_name(Box::new(scan), &["artist", "year"]).unwrap();
//!
//! let mut executor =
//!     QueryExecutor::new(StatisticsConfig::new().with_report(ReportTarget::Silent));
//! let result = executor.execute(&mut plan, &ExecutionContext::new()).unwrap();
//!
//! let stats = result.statistics().unwrap();
//! assert_eq!(
//!     stats.distinct_lines(),
//!     vec![
//!         "column artist (0) has 1 distinct values.",
//!         "column year (1) has 2 distinct values.",
//!     ]
//! );
//! assert!(stats.columns[0].pinned);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`DataType`], [`Value`], [`Row`], [`Schema`], [`Error`])
//! - [`storage`] - In-memory tables and the catalog
//! - [`executor`] - Volcano operators, observer hooks and the query driver
//! - [`statistics`] - The statistics collector, session and report

pub mod core;
pub mod executor;
pub mod statistics;
pub mod storage;

// Re-export main types for convenience
pub use core::{
    ColumnSource, DataType, EqualitySemantics, Error, Result, Row, Schema, SchemaBuilder,
    SchemaColumn, TableId, Value,
};
pub use executor::{
    ColumnInfo, ExecutionContext, ExecutionObserver, PlanNodeId, QueryExecutor, QueryResult,
};
pub use statistics::{
    ReportBuffer, ReportTarget, StatisticsCollector, StatisticsConfig, StatisticsReport,
};
pub use storage::{Catalog, MemoryTable};
