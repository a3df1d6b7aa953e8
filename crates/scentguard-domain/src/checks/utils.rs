use scentguard_types::{ComplianceFinding, ComplianceStatus, Jurisdiction};
use serde_json::Value as JsonValue;

/// Incremental construction of a finding; unset optional fields stay `None`.
pub struct FindingBuilder(ComplianceFinding);

impl FindingBuilder {
    pub fn new(
        check_id: &str,
        code: &str,
        status: ComplianceStatus,
        jurisdiction: Jurisdiction,
    ) -> Self {
        Self(ComplianceFinding {
            check_id: check_id.to_string(),
            code: code.to_string(),
            requirement_label: String::new(),
            status,
            jurisdiction,
            substance_id: None,
            ingredient_name: None,
            observed_value: None,
            limit_value: None,
            reference: String::new(),
            details: String::new(),
            fingerprint: None,
            data: JsonValue::Null,
        })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.0.requirement_label = label.into();
        self
    }

    pub fn substance(mut self, substance_id: &str, ingredient_name: impl Into<String>) -> Self {
        self.0.substance_id = Some(substance_id.to_string());
        self.0.ingredient_name = Some(ingredient_name.into());
        self
    }

    pub fn observed(mut self, value: f64) -> Self {
        self.0.observed_value = Some(value);
        self
    }

    pub fn limit(mut self, value: Option<f64>) -> Self {
        self.0.limit_value = value;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.0.reference = reference.into();
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.0.details = details.into();
        self
    }

    pub fn data(mut self, data: JsonValue) -> Self {
        self.0.data = data;
        self
    }

    pub fn build(self) -> ComplianceFinding {
        self.0
    }
}

pub fn all_compliant(findings: &[ComplianceFinding]) -> bool {
    !findings.iter().any(|f| f.status.is_blocking())
}

/// Relative slack for threshold comparisons, so products like `3.0 * 20.0 / 100.0`
/// land on the limit they were meant to hit.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// `value` is above `limit` by more than rounding noise.
pub fn exceeds(value: f64, limit: f64) -> bool {
    value > limit + limit.abs() * RELATIVE_TOLERANCE
}

/// `value` is at or above `threshold`, allowing for rounding noise.
pub fn reaches(value: f64, threshold: f64) -> bool {
    value >= threshold - threshold.abs() * RELATIVE_TOLERANCE
}
