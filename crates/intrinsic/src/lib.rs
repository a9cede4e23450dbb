//! # intrinsic
//!
//! Fundamental valuation of listed companies.
//!
//! This crate provides a unified interface to the intrinsic valuation crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Snapshots, assumptions and result types
//! - `traits`: The valuation method and classifier seams
//! - `math`: Discounting formulas, step bands and statistics
//! - `methods`: Zero-FCF methods and the company classifier
//! - `model`: DCF, the valuation engine, Monte Carlo and sensitivity sweeps
//!
//! ## Example
//!
//! ```rust,ignore
//! use intrinsic::model::prelude::*;
//!
//! let engine = ValuationEngine::default();
//! let valuation = engine.evaluate(&snapshot, &ValuationAssumptions::default())?;
//!
//! // Or with specific features only:
//! // [dependencies]
//! // intrinsic = { version = "0.1", default-features = false, features = ["math"] }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use intrinsic_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use intrinsic_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use intrinsic_math as math;
#[cfg(feature = "methods")]
#[doc(inline)]
pub use intrinsic_methods as methods;
#[cfg(feature = "model")]
#[doc(inline)]
pub use intrinsic_model as model;
