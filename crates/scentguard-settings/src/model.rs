use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `scentguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and unset values
/// fall through to the selected profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScentguardConfigV1 {
    /// Optional schema string for tooling (`scentguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `full` (default), `restriction-only`, or `market`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Directory holding the reference datasets, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Leading segment of issued certificate ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_prefix: Option<String>,

    #[serde(default)]
    pub incidentals: IncidentalsConfig,

    #[serde(default)]
    pub categories: CategoriesConfig,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IncidentalsConfig {
    /// Count constituents of natural materials toward restriction totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<bool>,

    /// `max` (worst case, default) or `typical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<String>,

    /// `restricted` (default) or `allergen`: which constituent list wins on overlap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precedence: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoriesConfig {
    /// Product types treated as having no IFRA category.
    #[serde(default)]
    pub unmapped: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
