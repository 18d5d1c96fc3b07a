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

//! LIMIT / OFFSET.

use crate::core::Result;
use crate::core::Row;
use crate::executor::observer::ExecutionObserver;
use crate::executor::operator::{ColumnInfo, Operator, PlanNodeId};

/// Skips `offset` input rows, then emits at most `limit` rows.
pub struct LimitOperator {
    id: PlanNodeId,
    input: Box<dyn Operator>,
    limit: usize,
    offset: usize,
    skipped: usize,
    emitted: usize,
}

impl LimitOperator {
    pub fn new(input: Box<dyn Operator>, limit: usize) -> Self {
        Self::with_offset(input, limit, 0)
    }

    pub fn with_offset(input: Box<dyn Operator>, limit: usize, offset: usize) -> Self {
        Self {
            id: PlanNodeId::next(),
            input,
            limit,
            offset,
            skipped: 0,
            emitted: 0,
        }
    }
}

impl Operator for LimitOperator {
    fn open(&mut self, observer: &mut dyn ExecutionObserver) -> Result<()> {
        self.skipped = 0;
        self.emitted = 0;
        self.input.open(observer)
    }

    fn next(&mut self) -> Result<Option<Row>> {
        if self.emitted >= self.limit {
            return Ok(None);
        }
        while self.skipped < self.offset {
            if self.input.next()?.is_none() {
                return Ok(None);
            }
            self.skipped += 1;
        }
        let row = self.input.next()?;
        if row.is_some() {
            self.emitted += 1;
        }
        Ok(row)
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn schema(&self) -> &[ColumnInfo] {
        self.input.schema()
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        match self.input.estimated_rows() {
            Some(n) => Some(n.saturating_sub(self.offset).min(self.limit)),
            None => Some(self.limit),
        }
    }

    fn name(&self) -> &str {
        "Limit"
    }
}
