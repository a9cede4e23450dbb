#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{EngineConfig, QualityWeights, ScenarioMultipliers, SimulationConfig};

mod dcf;
pub use dcf::{BalanceSheet, DcfModel, DcfValuation, ProjectedYear};

mod engine;
pub use engine::ValuationEngine;

mod error;
pub use error::ValuationError;

mod frame;
pub use frame::sensitivity_frame;

mod monte_carlo;
pub use monte_carlo::MonteCarloSimulator;

mod sensitivity;
pub use sensitivity::{SensitivityAnalyzer, Sweep};

/// Re-export commonly used types.
pub mod prelude {
    pub use intrinsic_primitives::{
        AssumptionStdDevs, Axis, CompanyType, CompositeValuation, Confidence, DataQuality,
        FinancialSnapshot, MethodKind, MethodResult, MonteCarloResult, SensitivityGrid,
        SweepParameter, Ticker, ValuationAssumptions,
    };
    pub use intrinsic_traits::{CompanyClassifier, ValuationMethod};

    pub use super::{EngineConfig, Sweep, ValuationEngine, ValuationError, sensitivity_frame};
}
