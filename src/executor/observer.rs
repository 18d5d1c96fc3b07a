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

//! Execution observer hooks
//!
//! The framework invokes these at fixed points of a query's life. None of
//! them steer execution; an error from `on_execution_start` or
//! `on_row_produced` aborts the query.

use super::operator::{ColumnInfo, PlanNodeId};
use super::qualifier::Qualifier;
use crate::core::{Error, Result, Row, TableId};

/// Listener for plan execution events
pub trait ExecutionObserver {
    /// The root is known and its output columns are fixed; no node has been
    /// opened yet.
    fn on_execution_start(&mut self, _root: PlanNodeId, _columns: &[ColumnInfo]) -> Result<()> {
        Ok(())
    }

    /// A scan node is being initialized over `table` with `qualifiers`.
    fn on_scan_init(&mut self, _table: TableId, _qualifiers: &[Qualifier]) {}

    /// `node` produced `row`. The driver only reports rows of the root.
    fn on_row_produced(&mut self, _node: PlanNodeId, _row: &Row) -> Result<()> {
        Ok(())
    }

    /// Execution finished normally and the plan has been closed.
    fn on_execution_end(&mut self) {}

    /// Execution stopped early because of `error`.
    fn on_execution_abort(&mut self, _error: &Error) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}
