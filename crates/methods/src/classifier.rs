//! Keyword and metric based company classification.

use intrinsic_primitives::{CompanyType, FinancialSnapshot};
use intrinsic_traits::CompanyClassifier;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for [`KeywordClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Gross margin at or above which a software company is treated as SaaS.
    pub saas_gross_margin: f64,
    /// Revenue growth at or above which a software company is treated as SaaS.
    pub saas_growth: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { saas_gross_margin: 0.70, saas_growth: 0.20 }
    }
}

/// Classifies from sector/industry keywords, refined by margin and growth.
///
/// Rules, first match wins:
/// 1. "saas" or "subscription" → SaaS
/// 2. "software" with high gross margin and growth → SaaS
/// 3. "software", or "technology" with "application" → Software
/// 4. "e-commerce", "ecommerce" or "internet" → E-commerce
/// 5. "biotech", "pharmaceutical" or "drug manufacturers" → Biotech
/// 6. otherwise → Default
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    config: ClassifierConfig,
}

impl KeywordClassifier {
    /// Create a classifier with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create a classifier with custom thresholds.
    #[must_use]
    pub const fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn looks_like_saas(&self, snapshot: &FinancialSnapshot) -> bool {
        let margin = snapshot.gross_margin.is_some_and(|m| m >= self.config.saas_gross_margin);
        let growth = snapshot.revenue_growth.is_some_and(|g| g >= self.config.saas_growth);
        margin && growth
    }
}

impl CompanyClassifier for KeywordClassifier {
    fn classify(&self, snapshot: &FinancialSnapshot) -> CompanyType {
        let text = snapshot.classification_text();
        let has = |needle: &str| text.contains(needle);

        let company = if has("saas") || has("subscription") {
            CompanyType::Saas
        } else if has("software") && self.looks_like_saas(snapshot) {
            CompanyType::Saas
        } else if has("software") || (has("technology") && has("application")) {
            CompanyType::Software
        } else if has("e-commerce") || has("ecommerce") || has("internet") {
            CompanyType::Ecommerce
        } else if has("biotech") || has("pharmaceutical") || has("drug manufacturers") {
            CompanyType::Biotech
        } else {
            CompanyType::Default
        };

        debug!(ticker = %snapshot.ticker, %company, classifier = self.name(), "classified company");
        company
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
