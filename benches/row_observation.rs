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

//! Cost of execution-time statistics on a full scan
//!
//! Run with: cargo bench --bench row_observation
//!
//! Compares the same scan (10K rows, 5 columns) executed:
//! 1. Without statistics
//! 2. With per-column statistics only
//! 3. With per-column statistics and pairwise co-occurrence sets

use criterion::{criterion_group, criterion_main, Criterion};
use piggyback::core::{DataType, Row, SchemaBuilder, Value};
use piggyback::executor::{ExecutionContext, QueryExecutor, TableScanOperator};
use piggyback::statistics::{ReportTarget, StatisticsConfig};
use piggyback::storage::{Catalog, MemoryTable};
use std::hint::black_box;
use std::sync::Arc;

const ROW_COUNT: usize = 10_000;

/// Setup a users table with test data
fn setup_table() -> Arc<MemoryTable> {
    let rows = (1..=ROW_COUNT)
        .map(|i| {
            Row::from_values(vec![
                Value::integer(i as i64),
                Value::text(format!("User_{}", i % 500)),
                Value::integer(18 + (i % 60) as i64),
                Value::float(i as f64 * 1.25),
                Value::text(format!("city_{}", i % 40)),
            ])
        })
        .collect();

    let mut catalog = Catalog::new();
    catalog
        .create_table(
            SchemaBuilder::new("users")
                .add("id", DataType::Integer)
                .add("name", DataType::Text)
                .add("age", DataType::Integer)
                .add("balance", DataType::Float)
                .add("city", DataType::Text)
                .build(),
            rows,
        )
        .unwrap()
}

fn bench_full_scan(c: &mut Criterion) {
    let table = setup_table();
    let ctx = ExecutionContext::new();
    let mut group = c.benchmark_group("full scan (10K rows)");

    let configs = [
        ("no statistics", StatisticsConfig::disabled()),
        (
            "distinct only",
            StatisticsConfig::distinct_only().with_report(ReportTarget::Silent),
        ),
        (
            "with pairs",
            StatisticsConfig::new().with_report(ReportTarget::Silent),
        ),
    ];

    for (name, config) in configs {
        let mut executor = QueryExecutor::new(config);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut plan = TableScanOperator::new(Arc::clone(&table));
                let result = executor.execute(&mut plan, &ctx).unwrap();
                black_box(result.row_count());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_scan);
criterion_main!(benches);
