//! Company classification.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Business-model category used to pick industry multiples and method weights.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum CompanyType {
    /// Subscription software.
    #[display("SaaS")]
    Saas,
    /// Non-subscription software and application vendors.
    #[display("Software")]
    Software,
    /// Online retail and marketplaces.
    #[display("E-commerce")]
    Ecommerce,
    /// Biotechnology and drug development.
    #[display("Biotech")]
    Biotech,
    /// Everything else.
    #[display("Default")]
    Default,
}

impl CompanyType {
    /// All company types, in declaration order.
    pub const ALL: [Self; 5] =
        [Self::Saas, Self::Software, Self::Ecommerce, Self::Biotech, Self::Default];

    /// Default enterprise-value-to-revenue multiple.
    #[must_use]
    pub const fn default_revenue_multiple(self) -> f64 {
        match self {
            Self::Saas => 10.0,
            Self::Software => 8.0,
            Self::Ecommerce => 2.5,
            Self::Biotech => 5.0,
            Self::Default => 2.5,
        }
    }

    /// Default enterprise-value-to-EBITDA multiple.
    #[must_use]
    pub const fn default_ebitda_multiple(self) -> f64 {
        match self {
            Self::Saas => 30.0,
            Self::Software => 25.0,
            Self::Ecommerce => 12.0,
            Self::Biotech => 15.0,
            Self::Default => 12.0,
        }
    }

    /// Whether the company sells software on a subscription-like model.
    #[must_use]
    pub const fn is_subscription_like(self) -> bool {
        matches!(self, Self::Saas | Self::Software)
    }
}
