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

//! Query operators for streaming execution.
//!
//! Each operator implements the `Operator` trait with the `open()`,
//! `next()`, `close()` lifecycle.
//!
//! # Available Operators
//!
//! - `TableScanOperator` - Sequential scan with pushed-down qualifiers
//! - `ProjectionOperator` - Column selection and renaming
//! - `LimitOperator` - LIMIT / OFFSET
//! - `NestedLoopJoinOperator` - INNER, OUTER and CROSS joins with O(N*M) complexity

pub mod limit;
pub mod nested_loop_join;
pub mod projection;
pub mod scan;

// Re-export all operators and types
pub use limit::LimitOperator;
pub use nested_loop_join::{JoinCondition, JoinType, NestedLoopJoinOperator};
pub use projection::ProjectionOperator;
pub use scan::TableScanOperator;
