use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_FORMULA_V1: &str = "scentguard.formula.v1";

/// Formula input file as written by formulators. Validation happens when the
/// document is turned into a domain formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormulaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    pub ingredients: Vec<FormulaLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormulaLine {
    /// CAS number or other substance identifier used by the reference tables.
    pub substance_id: String,
    #[serde(default)]
    pub display_name: String,
    /// Weight percent of the concentrate, in `(0, 100]`.
    pub weight_percent: f64,
}
