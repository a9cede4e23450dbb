//! Company classification trait.

use intrinsic_primitives::{CompanyType, FinancialSnapshot};

/// Maps a snapshot to a business-model category.
///
/// Implementations must be pure: the same snapshot always yields the same type.
pub trait CompanyClassifier: Send + Sync {
    /// Classify the company.
    fn classify(&self, snapshot: &FinancialSnapshot) -> CompanyType;

    /// Returns the name of this classifier.
    fn name(&self) -> &str;
}
