//! Benchmarks for intrinsic-model valuation.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use intrinsic_model::{BalanceSheet, DcfModel, prelude::*};
use rand::Rng;

fn cash_generator() -> FinancialSnapshot {
    FinancialSnapshot::new("BENCH")
        .with_free_cash_flow(5_000_000.0)
        .with_shares_outstanding(1_000_000.0)
        .with_balance_sheet(2_000_000.0, 1_000_000.0)
}

fn random_growth_company() -> FinancialSnapshot {
    let mut rng = rand::thread_rng();
    FinancialSnapshot::new("GROW")
        .with_classification("Technology", "Software - Application")
        .with_revenue(rng.r#gen::<f64>() * 1e9 + 1e8)
        .with_revenue_growth(rng.r#gen::<f64>() * 0.6)
        .with_revenue_history(vec![300.0, 240.0, 200.0])
        .with_ebitda(rng.r#gen::<f64>() * 1e7 + 1e6)
        .with_gross_margin(0.75)
        .with_unit_economics(3_000.0, 800.0)
        .with_shares_outstanding(50_000_000.0)
}

fn bench_dcf(c: &mut Criterion) {
    let mut group = c.benchmark_group("dcf");
    let sheet = BalanceSheet::new(0.0, 0.0, 1_000_000.0);

    for years in [5, 10, 20] {
        let a = ValuationAssumptions::new(0.08, 0.09, 0.025, years);
        group.bench_with_input(BenchmarkId::new("years", years), &a, |b, a| {
            b.iter(|| DcfModel::new().value(black_box(1_000_000.0), black_box(a), &sheet).unwrap());
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let engine = ValuationEngine::default();
    let a = ValuationAssumptions::default();

    group.bench_function("dcf_path", |b| {
        let s = cash_generator();
        b.iter(|| engine.evaluate(black_box(&s), &a).unwrap());
    });

    group.bench_function("zero_fcf_path", |b| {
        let s = random_growth_company();
        b.iter(|| engine.evaluate(black_box(&s), &a).unwrap());
    });

    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);

    let engine = ValuationEngine::default();
    let snapshot = cash_generator();
    let mean = ValuationAssumptions::default();
    let std = AssumptionStdDevs::default();

    for trials in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(trials as u64));
        group.bench_with_input(BenchmarkId::new("trials", trials), &trials, |b, &trials| {
            b.iter(|| engine.run_monte_carlo(&snapshot, &mean, &std, black_box(trials), 42).unwrap());
        });
    }

    group.finish();
}

fn bench_sensitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity_two_way");
    group.sample_size(30);

    let engine = ValuationEngine::default();
    let snapshot = cash_generator();
    let base = ValuationAssumptions::default();

    for n in [5, 20, 50] {
        let step = |lo: f64, hi: f64| -> Vec<f64> {
            (0..n).map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64).collect()
        };
        let growth = Axis::new(SweepParameter::GrowthRate, step(-0.05, 0.30));
        let discount = Axis::new(SweepParameter::DiscountRate, step(0.02, 0.15));

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(BenchmarkId::new("grid", n), |b| {
            b.iter(|| {
                let sweep = Sweep::two_way(growth.clone(), discount.clone());
                engine.run_sensitivity(&snapshot, &base, black_box(sweep)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dcf, bench_evaluate, bench_monte_carlo, bench_sensitivity);
criterion_main!(benches);
