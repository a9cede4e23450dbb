#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod formulas;
pub use formulas::{
    cagr, capm_required_return, discount_factor, present_value, terminal_value, wacc,
};

mod bands;
pub use bands::StepBands;

mod stats;
pub use stats::{mean, median, percentiles, population_std};

mod error;
pub use error::MathError;
