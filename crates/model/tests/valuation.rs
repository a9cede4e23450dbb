//! End-to-end behaviour of the valuation engine.
#![allow(missing_docs)]

use approx::assert_relative_eq;
use intrinsic_model::{BalanceSheet, DcfModel, prelude::*};
use intrinsic_primitives::{Methodology, Scenarios};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rstest::rstest;

fn sample_case() -> FinancialSnapshot {
    FinancialSnapshot::new("SAMPLE")
        .with_free_cash_flow(1_000_000.0)
        .with_shares_outstanding(1_000_000.0)
        .with_balance_sheet(0.0, 0.0)
}

fn growth_software() -> FinancialSnapshot {
    FinancialSnapshot::new("GROW")
        .with_revenue(200.0)
        .with_revenue_growth(0.45)
        .with_sector("Software")
        .with_shares_outstanding(10.0)
}

#[test]
fn sample_case_has_equal_present_values() {
    let a = ValuationAssumptions::new(0.10, 0.10, 0.025, 5);
    let v = DcfModel::new()
        .value(1_000_000.0, &a, &BalanceSheet::new(0.0, 0.0, 1_000_000.0))
        .unwrap();

    let first = v.years[0].present_value;
    for y in &v.years {
        assert_relative_eq!(y.present_value, first, epsilon = 1e-6);
    }

    let composite = ValuationEngine::default().evaluate(&sample_case(), &a).unwrap();
    let dcf = composite.primary_result().unwrap();
    for year in 1..=5 {
        let pv = dcf.entry(&format!("year_{year}_present_value")).unwrap();
        assert_relative_eq!(pv, 1_000_000.0, epsilon = 1e-6);
    }
    assert_relative_eq!(composite.fair_value, v.fair_value, epsilon = 1e-12);
}

#[test]
fn routing_by_free_cash_flow() {
    let engine = ValuationEngine::default();
    let a = ValuationAssumptions::default();

    let dcf = engine.evaluate(&sample_case(), &a).unwrap();
    assert_eq!(dcf.primary_method, MethodKind::Dcf);

    let zero = engine.evaluate(&growth_software(), &a).unwrap();
    assert_ne!(zero.primary_method, MethodKind::Dcf);
    assert_eq!(zero.methodology, Methodology::ZeroFcfMultiMethod);
    assert!(matches!(zero.confidence, Confidence::Medium | Confidence::High));

    let negative = growth_software().with_free_cash_flow(-50.0);
    let v = engine.evaluate(&negative, &a).unwrap();
    assert_ne!(v.primary_method, MethodKind::Dcf);
}

#[test]
fn no_revenue_no_fcf_is_insufficient_data() {
    let s = FinancialSnapshot::new("EMPTY").with_shares_outstanding(100.0);
    let err = ValuationEngine::default().evaluate(&s, &ValuationAssumptions::default()).unwrap_err();
    assert!(matches!(err, ValuationError::InsufficientData { .. }));
    assert!(err.to_string().contains("EMPTY"));
}

#[rstest]
#[case::dcf(sample_case())]
#[case::zero_fcf(growth_software())]
#[case::biotech(
    FinancialSnapshot::new("BIO")
        .with_classification("Healthcare", "Biotechnology")
        .with_revenue(50.0)
        .with_ebitda(5.0)
        .with_shares_outstanding(3.0)
)]
fn scenarios_are_ordered(#[case] snapshot: FinancialSnapshot) {
    let v = ValuationEngine::default().evaluate(&snapshot, &ValuationAssumptions::default()).unwrap();
    assert!(v.fair_value >= 0.0);
    assert!(v.scenarios.is_ordered());
    assert_relative_eq!(v.scenarios.base, v.fair_value, epsilon = 1e-12);
}

#[test]
fn scenario_ordering_holds_for_random_values() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1_000 {
        let fv = rng.r#gen::<f64>() * 1_000.0;
        assert!(Scenarios::scaled(fv, [0.7, 1.0, 1.3, 1.5]).is_ordered());
    }
}

#[test]
fn discount_sweep_from_seven_to_eleven_percent_decreases() {
    let engine = ValuationEngine::default();
    let axis = Axis::new(SweepParameter::DiscountRate, vec![0.07, 0.08, 0.09, 0.10, 0.11]);
    let grid = engine
        .run_sensitivity(&sample_case(), &ValuationAssumptions::default(), Sweep::one_way(axis))
        .unwrap();

    let values: Vec<f64> = (0..grid.len()).map(|i| grid.get(i).unwrap()).collect();
    assert!(values.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn heatmap_reports_undefined_points() {
    let engine = ValuationEngine::default();
    let rows = Axis::new(SweepParameter::GrowthRate, vec![0.05, 0.10, 0.15]);
    let columns = Axis::new(SweepParameter::DiscountRate, vec![0.02, 0.025, 0.08, 0.10]);
    let grid = engine
        .run_sensitivity(&sample_case(), &ValuationAssumptions::default(), Sweep::two_way(rows, columns))
        .unwrap();

    assert_eq!(grid.len(), 12);
    assert_eq!(grid.undefined_count(), 6);
    for r in 0..3 {
        assert!(grid.get2(r, 0).is_none());
        assert!(grid.get2(r, 1).is_none());
        assert!(grid.get2(r, 2).unwrap() > grid.get2(r, 3).unwrap());
    }

    let df = sensitivity_frame(&grid).unwrap();
    assert_eq!(df.shape(), (3, 5));
    assert_eq!(df.column("discount_rate=0.02").unwrap().null_count(), 3);
}

#[test]
fn monte_carlo_is_reproducible_and_nested() {
    let engine = ValuationEngine::default();
    let mean = ValuationAssumptions::default();
    let std = AssumptionStdDevs::new(0.03, 0.01, 0.005);

    let a = engine.run_monte_carlo(&sample_case(), &mean, &std, 2_000, 1234).unwrap();
    let b = engine.run_monte_carlo(&sample_case(), &mean, &std, 2_000, 1234).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.seed, 1234);
    assert_eq!(a.valid_trials, 2_000);
    assert!(a.intervals.is_nested());
    assert!(a.percentiles.p50 > a.percentiles.p5);
    assert_relative_eq!(a.median, a.percentiles.p50, epsilon = 1e-9);
}

#[test]
fn monte_carlo_counts_discarded_trials() {
    let engine = ValuationEngine::default();
    let mean = ValuationAssumptions::new(0.10, 0.06, 0.05, 5);
    let std = AssumptionStdDevs::new(0.02, 0.02, 0.02);

    let r = engine.run_monte_carlo(&sample_case(), &mean, &std, 500, 99).unwrap();

    assert!(r.discarded_trials > 0);
    assert_eq!(r.valid_trials, 500);
    assert_relative_eq!(
        r.discard_rate(),
        r.discarded_trials as f64 / (r.discarded_trials + r.valid_trials) as f64,
        epsilon = 1e-12
    );
}

#[test]
fn config_override_from_json() {
    let json = r#"{
        "scenarios": {"bear": 0.5, "optimistic": 2.0},
        "industries": {"software": {"revenue_multiple": 12.0, "ebitda_multiple": 25.0}}
    }"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    let engine = ValuationEngine::new(config).unwrap();
    let default = ValuationEngine::default();

    let a = ValuationAssumptions::default();
    let custom = engine.evaluate(&growth_software(), &a).unwrap();
    let base = default.evaluate(&growth_software(), &a).unwrap();

    assert_relative_eq!(custom.scenarios.bear, custom.fair_value * 0.5, epsilon = 1e-9);
    assert_relative_eq!(custom.scenarios.optimistic, custom.fair_value * 2.0, epsilon = 1e-9);
    let rev = MethodKind::RevenueMultiple;
    assert_relative_eq!(
        custom.methods[&rev].fair_value,
        base.methods[&rev].fair_value * 12.0 / 8.0,
        epsilon = 1e-9
    );
}
