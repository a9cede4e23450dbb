//! Example: valuing a cash-generating company and a pre-profit one
//!
//! 1. DCF valuation of a company with positive free cash flow
//! 2. Multi-method valuation of a growth company without it
//! 3. Monte Carlo distribution of the DCF fair value
//! 4. Growth x discount rate sensitivity table
//!
//! Run with: `RUST_LOG=debug cargo run --example valuation_demo`

use intrinsic::{
    model::{Sweep, ValuationEngine, ValuationError, sensitivity_frame},
    primitives::{
        AssumptionStdDevs, Axis, CompositeValuation, FinancialSnapshot, SweepParameter,
        ValuationAssumptions,
    },
};
use tracing_subscriber::EnvFilter;

fn mature_company() -> FinancialSnapshot {
    FinancialSnapshot::new("STDY")
        .with_classification("Industrials", "Specialty Industrial Machinery")
        .with_current_price(42.0)
        .with_free_cash_flow(850_000_000.0)
        .with_revenue(6_200_000_000.0)
        .with_balance_sheet(1_100_000_000.0, 2_400_000_000.0)
        .with_shares_outstanding(310_000_000.0)
        .with_beta(0.9)
}

fn growth_company() -> FinancialSnapshot {
    FinancialSnapshot::new("GRWT")
        .with_classification("Technology", "Software - Application")
        .with_current_price(18.0)
        .with_free_cash_flow(-40_000_000.0)
        .with_revenue(480_000_000.0)
        .with_revenue_growth(0.38)
        .with_revenue_history(vec![480.0, 350.0, 260.0])
        .with_gross_margin(0.78)
        .with_ebitda(12_000_000.0)
        .with_unit_economics(24_000.0, 6_000.0)
        .with_monthly_churn(0.015)
        .with_balance_sheet(600_000_000.0, 0.0)
        .with_shares_outstanding(140_000_000.0)
        .with_beta(1.4)
}

fn print_valuation(v: &CompositeValuation) {
    println!("{} ({}, {})", v.ticker, v.company_type, v.methodology);
    println!("  fair value   {:>10.2}", v.fair_value);
    if let Some(upside) = v.upside_pct {
        println!("  upside       {upside:>9.1}%");
    }
    println!("  confidence   {:>10}", v.confidence);
    println!("  primary      {:>10}", v.primary_method);
    for (kind, result) in &v.methods {
        println!(
            "    {:<24} {:>10.2}  weight {:.2}  quality {}",
            kind.to_string(),
            result.fair_value,
            v.weights.get(kind).copied().unwrap_or(0.0),
            result.data_quality
        );
    }
    if !v.declined_methods.is_empty() {
        let declined: Vec<String> = v.declined_methods.iter().map(ToString::to_string).collect();
        println!("  declined     {}", declined.join(", "));
    }
    let s = v.scenarios;
    println!(
        "  scenarios    bear {:.2} / base {:.2} / bull {:.2} / optimistic {:.2}",
        s.bear, s.base, s.bull, s.optimistic
    );
    println!();
}

fn main() -> Result<(), ValuationError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let engine = ValuationEngine::default();

    let mature = mature_company();
    let assumptions = engine.capm_assumptions(&mature);
    print_valuation(&engine.evaluate(&mature, &assumptions)?);
    print_valuation(&engine.evaluate(&growth_company(), &ValuationAssumptions::default())?);

    let mc = engine.run_monte_carlo(&mature, &assumptions, &AssumptionStdDevs::default(), 5_000, 7)?;
    println!(
        "Monte Carlo: {} valid, {} discarded, mean {:.2}, median {:.2}",
        mc.valid_trials, mc.discarded_trials, mc.mean, mc.median
    );
    let (lo, hi) = mc.intervals.ci90;
    println!("  90% interval [{lo:.2}, {hi:.2}]");
    println!(
        "  enterprise value mean {:.0}, median {:.0}\n",
        mc.enterprise_value_mean, mc.enterprise_value_median
    );

    let sweep = Sweep::two_way(
        Axis::new(SweepParameter::GrowthRate, vec![0.0, 0.03, 0.06, 0.09]),
        Axis::new(SweepParameter::DiscountRate, vec![0.07, 0.08, 0.09, 0.10, 0.11]),
    );
    let grid = engine.run_sensitivity(&mature, &assumptions, sweep)?;
    println!("{}", sensitivity_frame(&grid)?);

    Ok(())
}
