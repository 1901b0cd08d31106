//! Criterion benchmarks for [`update_setting`] on large config files.
//!
//! Run with:
//! ```bash
//! cargo bench --package confed-core --bench scan_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use confed_core::{update_setting, GrammarConfig, OperationRequest};

// ── Fixture builders ──────────────────────────────────────────────────────────

/// Builds a config of `n` settings with a prose comment every tenth line and
/// the target setting near the end.
fn build_config(n: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(n + n / 10 + 1);
    for i in 0..n {
        if i % 10 == 0 {
            lines.push(format!("# Section number {i} of the file\n"));
        }
        lines.push(format!("setting_{i} = value-{i}  # note {i}\n"));
    }
    lines.push("target = old\n".to_string());
    lines
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_update_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_in_place");
    let config = GrammarConfig::default();
    let request = OperationRequest::update("target", "new");

    for n in [100usize, 1_000, 10_000] {
        let lines = build_config(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &lines, |b, lines| {
            b.iter(|| update_setting(black_box(lines), &config, &request));
        });
    }
    group.finish();
}

fn bench_append_missing(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_missing");
    let config = GrammarConfig::default();
    let request = OperationRequest::update("absent", "1");

    for n in [100usize, 1_000, 10_000] {
        let lines = build_config(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &lines, |b, lines| {
            b.iter(|| update_setting(black_box(lines), &config, &request));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update_in_place, bench_append_missing);
criterion_main!(benches);
