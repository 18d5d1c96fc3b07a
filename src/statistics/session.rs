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

//! Statistics sessions
//!
//! A [`StatisticsSession`] lives for exactly one query. It is created when
//! the root node is known, fed scan initializations and root rows, and
//! turned into a [`StatisticsReport`] when the plan finishes.
//!
//! The [`StatisticsCollector`] owns at most one session and is the
//! [`ExecutionObserver`] the executor hands to the plan.

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, error, info, warn};

use super::column::{ColumnStatistic, StatKind};
use super::config::{ReportTarget, StatisticsConfig};
use super::pairs::{pair_count, PairCoOccurrence};
use super::report::{ColumnSummary, StatisticsReport};
use super::scanner::{scan_equality, EqualityScan};
use crate::core::{Error, Result, Row, TableId};
use crate::executor::observer::ExecutionObserver;
use crate::executor::operator::{ColumnInfo, PlanNodeId};
use crate::executor::qualifier::Qualifier;

/// Statistics state for one in-flight query
#[derive(Debug)]
pub struct StatisticsSession {
    root: PlanNodeId,
    columns: Vec<ColumnInfo>,
    kinds: Vec<StatKind>,
    column_statistics: Vec<ColumnStatistic>,
    pairs: Option<PairCoOccurrence>,
    // One representation per output column, reused across rows
    row_values: Vec<String>,
    rows_observed: u64,
}

impl StatisticsSession {
    /// Create a session observing `root`, whose output is `columns`
    pub fn new(root: PlanNodeId, columns: &[ColumnInfo], config: &StatisticsConfig) -> Result<Self> {
        let width = columns.len();

        let pairs = if config.pairs_enabled_for(width) {
            Some(PairCoOccurrence::new(width)?)
        } else {
            if config.collect_pairs {
                warn!(
                    "root {} has {} output columns ({} pairs), above the limit of {}; pairwise statistics skipped",
                    root,
                    width,
                    pair_count(width),
                    config.max_pair_columns
                );
            }
            None
        };

        Ok(Self {
            root,
            columns: columns.to_vec(),
            kinds: columns.iter().map(|c| StatKind::of(c.data_type)).collect(),
            column_statistics: vec![ColumnStatistic::new(); width],
            pairs,
            row_values: vec![String::new(); width],
            rows_observed: 0,
        })
    }

    /// Node whose rows are observed
    pub fn root(&self) -> PlanNodeId {
        self.root
    }

    /// Output columns
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn output_column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_statistics(&self) -> &[ColumnStatistic] {
        &self.column_statistics
    }

    /// Pairwise sets, if collected
    pub fn pairs(&self) -> Option<&PairCoOccurrence> {
        self.pairs.as_ref()
    }

    pub fn rows_observed(&self) -> u64 {
        self.rows_observed
    }

    /// Representations produced for the last observed row
    pub fn row_values(&self) -> &[String] {
        &self.row_values
    }

    /// Inspect a scan node's qualifiers at initialization
    pub fn scan_node(&mut self, table: TableId, qualifiers: &[Qualifier]) -> EqualityScan {
        scan_equality(table, qualifiers, &self.columns, &mut self.column_statistics)
    }

    /// Observe one row produced by `node`
    ///
    /// Rows of other nodes and empty rows are ignored.
    pub fn observe(&mut self, node: PlanNodeId, row: &Row) -> Result<()> {
        if node != self.root || row.is_empty() {
            return Ok(());
        }
        if row.len() != self.columns.len() {
            return Err(Error::RowWidthMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }

        for (i, value) in row.iter().enumerate() {
            self.column_statistics[i].observe(self.kinds[i], value, &mut self.row_values[i]);
        }
        if let Some(pairs) = self.pairs.as_mut() {
            pairs.record_row(&self.row_values)?;
        }

        self.rows_observed += 1;
        Ok(())
    }

    /// Finalize derived statistics and build the report
    pub fn into_report(mut self) -> StatisticsReport {
        let rows = self.rows_observed;

        let columns = self
            .column_statistics
            .iter_mut()
            .zip(self.columns.iter().zip(self.kinds.iter()))
            .enumerate()
            .map(|(index, (stat, (column, kind)))| {
                stat.resolve_most_frequent(*kind);
                ColumnSummary {
                    index,
                    name: column.name.clone(),
                    data_type: column.data_type,
                    is_numeric: stat.is_numeric(),
                    min: stat.min_value(),
                    max: stat.max_value(),
                    most_frequent: stat.most_frequent_value(),
                    most_frequent_repr: stat.most_frequent_repr().map(|(repr, _)| repr.to_string()),
                    distinct_count: stat.distinct_count(rows),
                    pinned: stat.is_pinned(),
                }
            })
            .collect();

        let pair_sizes: Vec<((usize, usize), u64)> = self
            .pairs
            .as_ref()
            .map(|pairs| pairs.iter().map(|(p, set)| (p, set.len() as u64)).collect())
            .unwrap_or_default();

        StatisticsReport::new(self.root, rows, columns, pair_sizes)
    }
}

/// Owner of the statistics session of the query being executed
///
/// At most one session is live. `begin` while a session is live is a usage
/// error; `finish` and row events without a live session are no-ops.
pub struct StatisticsCollector {
    config: StatisticsConfig,
    session: Option<StatisticsSession>,
    writer: Option<Box<dyn Write + Send>>,
    last_report: Option<StatisticsReport>,
}

impl fmt::Debug for StatisticsCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatisticsCollector")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("has_writer", &self.writer.is_some())
            .finish()
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new(StatisticsConfig::default())
    }
}

impl StatisticsCollector {
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            config,
            session: None,
            writer: None,
            last_report: None,
        }
    }

    /// Send stdout-target reports to `writer` instead of standard output
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StatisticsConfig) {
        self.config = config;
    }

    /// True while a session is live
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any
    pub fn session(&self) -> Option<&StatisticsSession> {
        self.session.as_ref()
    }

    /// Start a session observing `root`
    pub fn begin(&mut self, root: PlanNodeId, columns: &[ColumnInfo]) -> Result<()> {
        if let Some(live) = &self.session {
            error!(
                "statistics session for root {} requested while session for root {} is live",
                root,
                live.root()
            );
            return Err(Error::SessionAlreadyActive {
                root: live.root().as_u32(),
            });
        }

        self.session = Some(StatisticsSession::new(root, columns, &self.config)?);
        debug!("statistics session started for root {} ({} columns)", root, columns.len());
        Ok(())
    }

    /// End the live session, emit its report and return it
    ///
    /// Returns None (and emits nothing) without a live session.
    pub fn finish(&mut self) -> Option<StatisticsReport> {
        let Some(session) = self.session.take() else {
            debug!("statistics teardown without a live session ignored");
            return None;
        };

        let report = session.into_report();
        debug!(
            "statistics session for root {} finished after {} rows",
            report.root, report.rows_observed
        );
        self.emit(&report);
        Some(report)
    }

    /// Release the live session without reporting
    pub fn abort(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(
                "statistics session for root {} released after {} rows without report",
                session.root(),
                session.rows_observed()
            );
        }
    }

    /// Report produced by the last `on_execution_end`, if not yet taken
    pub fn take_report(&mut self) -> Option<StatisticsReport> {
        self.last_report.take()
    }

    fn emit(&mut self, report: &StatisticsReport) {
        let details = self.config.details;
        let result = match self.config.report {
            ReportTarget::Silent => Ok(()),
            ReportTarget::Log => {
                for line in report.lines(details) {
                    info!("{}", line);
                }
                Ok(())
            }
            ReportTarget::Stdout => match self.writer.as_mut() {
                Some(writer) => report.write_to(writer.as_mut(), details),
                None => report.write_to(&mut io::stdout().lock(), details),
            },
        };

        if let Err(e) = result {
            warn!("failed to write statistics report: {}", e);
        }
    }
}

impl ExecutionObserver for StatisticsCollector {
    fn on_execution_start(&mut self, root: PlanNodeId, columns: &[ColumnInfo]) -> Result<()> {
        self.last_report = None;
        self.begin(root, columns)
    }

    fn on_scan_init(&mut self, table: TableId, qualifiers: &[Qualifier]) {
        if let Some(session) = self.session.as_mut() {
            session.scan_node(table, qualifiers);
        }
    }

    fn on_row_produced(&mut self, node: PlanNodeId, row: &Row) -> Result<()> {
        match self.session.as_mut() {
            Some(session) => session.observe(node, row),
            None => {
                debug!("row from {} ignored without a live statistics session", node);
                Ok(())
            }
        }
    }

    fn on_execution_end(&mut self) {
        if let Some(report) = self.finish() {
            self.last_report = Some(report);
        }
    }

    fn on_execution_abort(&mut self, error: &Error) {
        debug!("query aborted: {}", error);
        self.abort();
    }
}
