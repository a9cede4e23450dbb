#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod assumptions;
pub use assumptions::{AssumptionStdDevs, RangeViolation, SweepParameter, ValuationAssumptions};

mod company;
pub use company::CompanyType;

mod composite;
pub use composite::{CompositeValuation, Confidence, Methodology, Scenarios, upside_pct};

mod grid;
pub use grid::{Axis, SensitivityGrid};

mod market;
pub use market::CapitalMarket;

mod method;
pub use method::{Assessment, DataQuality, MethodKind, MethodResult};

mod simulation;
pub use simulation::{ConfidenceIntervals, MonteCarloResult, Percentiles};

mod snapshot;
pub use snapshot::FinancialSnapshot;

mod ticker;
pub use ticker::Ticker;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
