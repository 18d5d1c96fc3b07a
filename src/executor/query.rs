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

//! Query driver
//!
//! Runs a plan to completion and tells an observer about it:
//!
//! 1. `on_execution_start` with the root id and output columns
//! 2. `open` the plan (scans report their qualifiers)
//! 3. pull every root row, checking for cancellation, and report it
//! 4. `close` the plan, then `on_execution_end`
//!
//! If any step fails the plan is still closed and the observer gets
//! `on_execution_abort` instead of `on_execution_end`.

use tracing::debug;

use super::context::ExecutionContext;
use super::observer::{ExecutionObserver, NoopObserver};
use super::operator::{ColumnInfo, Operator};
use crate::core::{Result, Row};
use crate::statistics::{StatisticsCollector, StatisticsConfig, StatisticsReport};

/// Rows and statistics of one executed query
#[derive(Debug, Clone)]
pub struct QueryResult {
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
    statistics: Option<StatisticsReport>,
}

impl QueryResult {
    /// Output columns
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Statistics collected while the query ran
    pub fn statistics(&self) -> Option<&StatisticsReport> {
        self.statistics.as_ref()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Run `plan` to completion, reporting to `observer`
pub fn run_plan(
    plan: &mut dyn Operator,
    observer: &mut dyn ExecutionObserver,
    ctx: &ExecutionContext,
) -> Result<Vec<Row>> {
    let root = plan.id();
    observer.on_execution_start(root, plan.schema())?;

    let outcome = pull_rows(plan, observer, ctx);
    let closed = plan.close();

    match outcome.and_then(|rows| closed.map(|_| rows)) {
        Ok(rows) => {
            debug!(
                "{} {} produced {} rows{}",
                plan.name(),
                root,
                rows.len(),
                ctx.label().map(|l| format!(" [{}]", l)).unwrap_or_default()
            );
            observer.on_execution_end();
            Ok(rows)
        }
        Err(e) => {
            debug!("{} {} aborted: {}", plan.name(), root, e);
            observer.on_execution_abort(&e);
            Err(e)
        }
    }
}

fn pull_rows(
    plan: &mut dyn Operator,
    observer: &mut dyn ExecutionObserver,
    ctx: &ExecutionContext,
) -> Result<Vec<Row>> {
    let root = plan.id();
    plan.open(observer)?;

    let mut rows = Vec::with_capacity(plan.estimated_rows().unwrap_or(0).min(1024));
    loop {
        ctx.check_cancelled()?;
        match plan.next()? {
            Some(row) => {
                observer.on_row_produced(root, &row)?;
                rows.push(row);
            }
            None => break,
        }
    }
    Ok(rows)
}

/// Executes plans with execution-time statistics collection
#[derive(Debug, Default)]
pub struct QueryExecutor {
    collector: StatisticsCollector,
}

impl QueryExecutor {
    pub fn new(config: StatisticsConfig) -> Self {
        Self::with_collector(StatisticsCollector::new(config))
    }

    /// Use a preconfigured collector (for example one with a report writer)
    pub fn with_collector(collector: StatisticsCollector) -> Self {
        Self { collector }
    }

    pub fn collector(&self) -> &StatisticsCollector {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut StatisticsCollector {
        &mut self.collector
    }

    /// Execute `plan`, collecting statistics unless disabled by the
    /// configuration or the context
    pub fn execute(&mut self, plan: &mut dyn Operator, ctx: &ExecutionContext) -> Result<QueryResult> {
        let collect = ctx
            .collect_statistics()
            .unwrap_or(self.collector.config().enabled);
        let columns = plan.schema().to_vec();

        let (rows, statistics) = if collect {
            let rows = run_plan(plan, &mut self.collector, ctx)?;
            (rows, self.collector.take_report())
        } else {
            (run_plan(plan, &mut NoopObserver, ctx)?, None)
        };

        Ok(QueryResult {
            columns,
            rows,
            statistics,
        })
    }
}
