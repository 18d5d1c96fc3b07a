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

//! Query executor
//!
//! A minimal pull-based (Volcano) execution framework. Plans are trees of
//! [`Operator`]s; the [`QueryExecutor`] pulls rows from the root and reports
//! execution events to an [`ExecutionObserver`].
//!
//! ```text
//! QueryExecutor ──▶ root.open(observer) ──▶ ... ──▶ TableScan.open
//!       │                                              │
//!       │                                   observer.on_scan_init
//!       ▼
//! root.next() ──▶ observer.on_row_produced(root, row)
//!       │
//!       ▼
//! root.close() ──▶ observer.on_execution_end
//! ```
//!
//! # Components
//!
//! - [`QueryExecutor`] - Runs plans and collects statistics
//! - [`Operator`] - Volcano operator interface
//! - [`Qualifier`] - Scan predicates
//! - [`ExecutionContext`] - Cancellation and per-query options

pub mod context;
pub mod observer;
pub mod operator;
pub mod operators;
pub mod qualifier;
pub mod query;

pub use context::{CancellationHandle, ExecutionContext, ExecutionContextBuilder};
pub use observer::{ExecutionObserver, NoopObserver};
pub use operator::{ColumnInfo, EmptyOperator, MaterializedOperator, Operator, PlanNodeId};
pub use operators::{
    JoinCondition, JoinType, LimitOperator, NestedLoopJoinOperator, ProjectionOperator,
    TableScanOperator,
};
pub use qualifier::{ColumnRef, EqualityPredicate, Qualifier};
pub use query::{run_plan, QueryExecutor, QueryResult};
