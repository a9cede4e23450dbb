#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/intrinsic-rs/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod method;
pub use method::{DeclineReason, MethodContext, MethodDeclined, ValuationMethod, require_positive};

mod classify;
pub use classify::CompanyClassifier;
