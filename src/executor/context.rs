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

//! Execution context for queries

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{Error, Result};

/// Execution context for a single query
///
/// Carries cancellation, an optional timeout and per-query overrides for
/// statistics collection.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Cancellation flag
    cancelled: Arc<AtomicBool>,
    /// Query timeout in milliseconds (0 = no timeout)
    timeout_ms: u64,
    /// Start instant used for the timeout
    started: Instant,
    /// Overrides `StatisticsConfig::enabled` for this query when set
    collect_statistics: Option<bool>,
    /// Label used in log output
    label: Option<Arc<str>>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// Create a new context with no timeout and no overrides
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            timeout_ms: 0,
            started: Instant::now(),
            collect_statistics: None,
            label: None,
        }
    }

    /// Get the query timeout
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Set the query timeout, measured from now
    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
        self.started = Instant::now();
    }

    /// Check if a timeout is set
    pub fn has_timeout(&self) -> bool {
        self.timeout_ms > 0
    }

    /// Per-query statistics override, if any
    pub fn collect_statistics(&self) -> Option<bool> {
        self.collect_statistics
    }

    /// Force statistics collection on or off for this query
    pub fn set_collect_statistics(&mut self, enabled: bool) {
        self.collect_statistics = Some(enabled);
    }

    /// Query label for logging
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check if the query has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Cancel the query
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Get a cancellation handle that can be used from another thread
    pub fn cancellation_handle(&self) -> CancellationHandle {
        CancellationHandle {
            cancelled: self.cancelled.clone(),
        }
    }

    /// Check for cancellation or an expired timeout
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::QueryCancelled);
        }
        if self.has_timeout() && self.started.elapsed() >= Duration::from_millis(self.timeout_ms) {
            self.cancel();
            return Err(Error::QueryCancelled);
        }
        Ok(())
    }
}

/// Handle for cancelling a query from another thread
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancellationHandle {
    /// Cancel the query
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if the query has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Builder for ExecutionContext
pub struct ExecutionContextBuilder {
    ctx: ExecutionContext,
}

impl ExecutionContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            ctx: ExecutionContext::new(),
        }
    }

    /// Set the query timeout
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.ctx.timeout_ms = timeout_ms;
        self
    }

    /// Force statistics collection on or off
    pub fn collect_statistics(mut self, enabled: bool) -> Self {
        self.ctx.collect_statistics = Some(enabled);
        self
    }

    /// Label the query in log output
    pub fn label(mut self, label: impl AsRef<str>) -> Self {
        self.ctx.label = Some(Arc::from(label.as_ref()));
        self
    }

    /// Build the execution context
    pub fn build(self) -> ExecutionContext {
        let mut ctx = self.ctx;
        ctx.started = Instant::now();
        ctx
    }
}

impl Default for ExecutionContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = ExecutionContext::new();
        assert!(!ctx.is_cancelled());
        assert!(!ctx.has_timeout());
        assert_eq!(ctx.collect_statistics(), None);
        assert!(ctx.check_cancelled().is_ok());
    }

    #[test]
    fn test_cancellation() {
        let ctx = ExecutionContext::new();
        let handle = ctx.cancellation_handle();

        assert!(!handle.is_cancelled());
        handle.cancel();

        assert!(ctx.is_cancelled());
        assert_eq!(ctx.check_cancelled(), Err(Error::QueryCancelled));
    }

    #[test]
    fn test_cancellation_shared_across_clones() {
        let ctx = ExecutionContext::new();
        let copy = ctx.clone();
        copy.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_expired_timeout_cancels() {
        let mut ctx = ExecutionContext::new();
        ctx.set_timeout_ms(1);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(ctx.check_cancelled(), Err(Error::QueryCancelled));
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_builder() {
        let ctx = ExecutionContextBuilder::new()
            .timeout_ms(60_000)
            .collect_statistics(false)
            .label("albums by artist")
            .build();

        assert_eq!(ctx.timeout_ms(), 60_000);
        assert_eq!(ctx.collect_statistics(), Some(false));
        assert_eq!(ctx.label(), Some("albums by artist"));
        assert!(ctx.check_cancelled().is_ok());
    }
}
