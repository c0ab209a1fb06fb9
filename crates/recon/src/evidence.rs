use crate::model::{ReconDetails, ReconSummary};

/// Compute summary counts from classified lists and raw input sizes.
pub fn compute_summary(
    details: &ReconDetails,
    total_registry: usize,
    total_inventory: usize,
) -> ReconSummary {
    ReconSummary {
        total_registry,
        total_inventory,
        matched: details.matched.len(),
        missing_in_registry: details.missing_in_registry.len(),
        not_deployed: details.not_deployed.len(),
        duplicates: details.duplicates.len(),
    }
}

impl ReconSummary {
    /// True when anything needs a human to look at it.
    pub fn has_discrepancies(&self) -> bool {
        self.missing_in_registry > 0 || self.not_deployed > 0 || self.duplicates > 0
    }
}
