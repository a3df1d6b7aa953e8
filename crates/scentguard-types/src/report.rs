use crate::market::{Jurisdiction, ProductType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for scentguard reports.
pub const SCHEMA_REPORT_V1: &str = "scentguard.report.v1";

/// Outcome of a single requirement. Only `NonCompliant` blocks certification.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Warning,
    NotApplicable,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::Warning => "warning",
            ComplianceStatus::NotApplicable => "not_applicable",
        }
    }

    pub fn is_blocking(self) -> bool {
        self == ComplianceStatus::NonCompliant
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceFinding {
    pub check_id: String,
    pub code: String,
    pub requirement_label: String,
    pub status: ComplianceStatus,
    pub jurisdiction: Jurisdiction,

    #[serde(default)]
    pub substance_id: Option<String>,
    #[serde(default)]
    pub ingredient_name: Option<String>,

    /// Dilution-adjusted percentage unless the check states otherwise.
    #[serde(default)]
    pub observed_value: Option<f64>,
    #[serde(default)]
    pub limit_value: Option<f64>,

    pub reference: String,
    pub details: String,

    /// Stable identifier intended for dedup and trending across evaluations.
    /// A hash of `check_id + code + jurisdiction + substance_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub compliant: u32,
    pub non_compliant: u32,
    pub warning: u32,
    pub not_applicable: u32,
}

impl StatusCounts {
    pub fn from_findings(findings: &[ComplianceFinding]) -> Self {
        let mut counts = StatusCounts::default();
        for f in findings {
            match f.status {
                ComplianceStatus::Compliant => counts.compliant += 1,
                ComplianceStatus::NonCompliant => counts.non_compliant += 1,
                ComplianceStatus::Warning => counts.warning += 1,
                ComplianceStatus::NotApplicable => counts.not_applicable += 1,
            }
        }
        counts
    }
}

/// The unified verdict for one formula evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    pub schema: String,
    pub formula_name: String,
    pub product_type: ProductType,

    /// Regulatory use category; `null` when the product type has no mapping.
    pub category: Option<String>,
    pub jurisdictions: Vec<Jurisdiction>,
    pub dilution_percent: f64,
    pub leave_on: bool,

    pub findings: Vec<ComplianceFinding>,
    pub is_compliant: bool,
    pub counts: StatusCounts,

    /// Issued only when no finding is `non_compliant`. Serialized as `null` otherwise.
    pub certificate_id: Option<String>,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

impl ComplianceReport {
    pub fn findings_for(&self, check_id: &str) -> impl Iterator<Item = &ComplianceFinding> {
        self.findings.iter().filter(move |f| f.check_id == check_id)
    }
}
