#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod classifier;
pub use classifier::{ClassifierConfig, KeywordClassifier};

mod industry;
pub use industry::{
    IndustryProfile, IndustryTable, MethodWeights, WeightTable, default_growth_bands,
};

mod revenue;
pub use revenue::RevenueMultiple;

mod ebitda;
pub use ebitda::{EbitdaConfig, EbitdaMultiple};

mod rule_of_40;
pub use rule_of_40::{RuleOf40, RuleOf40Config};

mod unit_economics;
pub use unit_economics::{UnitEconomics, UnitEconomicsConfig};

mod terminal;
pub use terminal::{RevenueTerminalConfig, RevenueTerminalValue};
