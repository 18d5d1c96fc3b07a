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

//! Statistics collector configuration
//!

use std::fmt;
use std::str::FromStr;

use crate::core::Error;

/// Where the teardown report is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTarget {
    /// Standard output (or the collector's writer, if one is installed)
    #[default]
    Stdout,
    /// `tracing` events at INFO level
    Log,
    /// Nothing is written; the report is only returned to the caller
    Silent,
}

impl FromStr for ReportTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" | "print" => Ok(ReportTarget::Stdout),
            "log" | "tracing" => Ok(ReportTarget::Log),
            "none" | "off" | "silent" => Ok(ReportTarget::Silent),
            _ => Err(Error::parse(format!("unknown report target: {}", s))),
        }
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::Stdout => write!(f, "stdout"),
            ReportTarget::Log => write!(f, "log"),
            ReportTarget::Silent => write!(f, "none"),
        }
    }
}

/// Configuration options for execution-time statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsConfig {
    /// Whether a session is started for each query
    /// Default: true
    pub enabled: bool,

    /// Whether pairwise co-occurrence sets are built
    /// Default: true
    pub collect_pairs: bool,

    /// Output width above which pairwise sets are skipped
    /// Default: 64 (2016 pair sets)
    pub max_pair_columns: usize,

    /// Report sink
    /// Default: Stdout
    pub report: ReportTarget,

    /// Emit per-column detail and dependency lines after the distinct counts
    /// Default: false
    pub details: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collect_pairs: true,
            max_pair_columns: 64,
            report: ReportTarget::Stdout,
            details: false,
        }
    }
}

impl StatisticsConfig {
    /// Creates a new StatisticsConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// No sessions are started
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Per-column statistics only, no pairwise sets
    pub fn distinct_only() -> Self {
        Self {
            collect_pairs: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable collection
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder method to enable/disable pairwise sets
    pub fn with_pairs(mut self, enabled: bool) -> Self {
        self.collect_pairs = enabled;
        self
    }

    /// Builder method to set the pairwise width limit
    pub fn with_max_pair_columns(mut self, columns: usize) -> Self {
        self.max_pair_columns = columns;
        self
    }

    /// Builder method to set the report sink
    pub fn with_report(mut self, target: ReportTarget) -> Self {
        self.report = target;
        self
    }

    /// Builder method to enable/disable detail lines
    pub fn with_details(mut self, enabled: bool) -> Self {
        self.details = enabled;
        self
    }

    /// Whether pairwise sets are built for an output of `columns` columns
    pub fn pairs_enabled_for(&self, columns: usize) -> bool {
        self.collect_pairs && columns <= self.max_pair_columns
    }

    /// Parse `key=value&key=value` options over the defaults
    ///
    /// A leading `?` is allowed. Unknown keys are ignored and malformed
    /// values leave the default in place.
    pub fn from_options(options: &str) -> Self {
        let mut config = Self::default();
        let options = options.strip_prefix('?').unwrap_or(options);

        for param in options.split('&').filter(|p| !p.is_empty()) {
            let mut parts = param.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            match key {
                // enabled=on|off
                "enabled" | "statistics" => {
                    if let Some(enabled) = parse_flag(value) {
                        config.enabled = enabled;
                    }
                }
                // pairs=on|off
                "pairs" | "collect_pairs" => {
                    if let Some(enabled) = parse_flag(value) {
                        config.collect_pairs = enabled;
                    }
                }
                // max_pair_columns=64
                "max_pair_columns" => {
                    if let Ok(columns) = value.parse::<usize>() {
                        config.max_pair_columns = columns;
                    }
                }
                // report=stdout|log|none
                "report" => {
                    if let Ok(target) = value.parse() {
                        config.report = target;
                    }
                }
                // details=on|off
                "details" => {
                    if let Some(enabled) = parse_flag(value) {
                        config.details = enabled;
                    }
                }
                _ => {} // Ignore unknown parameters
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
