// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the decision engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use decision::{decide, DecisionInput, RunRecord, Timestamp};
use std::time::Duration;

fn sample() -> DecisionInput {
    DecisionInput {
        reading: 30,
        threshold: 25,
        now: Timestamp::from_secs(1_700_000_000),
        last_notified: Timestamp::from_secs(1_699_999_900),
        cooldown: Duration::from_secs(600),
        has_recipients: true,
    }
}

fn bench_decide(c: &mut Criterion) {
    let input = sample();
    c.bench_function("decide", |b| b.iter(|| decide(black_box(&input))));
}

fn bench_record_line(c: &mut Criterion) {
    let input = sample();
    let d = decide(&input);
    let record = RunRecord::new(input.now, input.reading, input.threshold, &d);
    c.bench_function("run_record_to_line", |b| b.iter(|| black_box(&record).to_line()));
}

criterion_group!(benches, bench_decide, bench_record_line);
criterion_main!(benches);
