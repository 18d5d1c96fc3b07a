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

//! Execution-time statistics
//!
//! Statistics are piggybacked on query execution: instead of a separate
//! ANALYZE pass, the collector watches the rows a query's root produces
//! anyway and derives per-column and pairwise statistics from them.
//!
//! - [`StatisticsCollector`] - observer owning the per-query session
//! - [`StatisticsSession`] - running state for one query
//! - [`ColumnStatistic`] - min, max, most frequent value and distinct set
//! - [`PairCoOccurrence`] - co-occurrence sets of every column pair
//! - [`StatisticsReport`] - teardown output
//! - [`StatisticsConfig`] - collector options

pub mod column;
pub mod config;
pub mod distinct;
pub mod pairs;
pub mod report;
pub mod scanner;
pub mod session;

pub use column::{ColumnStatistic, StatKind, StatValue};
pub use config::{ReportTarget, StatisticsConfig};
pub use distinct::{ComboSet, DistinctSet};
pub use pairs::{pair_count, pair_index, PairCoOccurrence};
pub use report::{ColumnSummary, FunctionalDependency, PairSummary, ReportBuffer, StatisticsReport};
pub use scanner::{scan_equality, EqualityScan};
pub use session::{StatisticsCollector, StatisticsSession};
