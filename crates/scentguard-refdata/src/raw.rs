//! On-disk dataset shapes. Field names follow the published JSON files; every field
//! the engine does not strictly need is optional.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct RestrictionsFile {
    #[serde(default)]
    pub restrictions: Vec<RawRestriction>,
}

#[derive(Debug, Deserialize)]
pub struct RawRestriction {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_restriction_type")]
    pub restriction_type: String,
    #[serde(default)]
    pub category_limits: BTreeMap<String, f64>,
    #[serde(default)]
    pub general_limit: Option<f64>,
    #[serde(default)]
    pub amendment_number: Option<u32>,
}

fn default_restriction_type() -> String {
    "restriction".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct AllergensFile {
    #[serde(default)]
    pub allergens: Vec<RawAllergen>,
}

#[derive(Debug, Deserialize)]
pub struct RawAllergen {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inci_name: Option<String>,
    #[serde(default)]
    pub eu_26: bool,
    #[serde(default)]
    pub eu_82: bool,
    #[serde(default)]
    pub canada_24: bool,
    #[serde(default)]
    pub canada_81: bool,
    #[serde(default)]
    pub leave_on_threshold: Option<f64>,
    #[serde(default)]
    pub rinse_off_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VolatileIngredientsFile {
    #[serde(default)]
    pub ingredients: Vec<RawVolatileIngredient>,
}

#[derive(Debug, Deserialize)]
pub struct RawVolatileIngredient {
    pub cas_number: String,
    #[serde(default = "default_voc_percent")]
    pub voc_percent: f64,
    #[serde(default)]
    pub is_exempt: bool,
    #[serde(default)]
    pub exempt_reason: Option<String>,
}

fn default_voc_percent() -> f64 {
    100.0
}

#[derive(Debug, Default, Deserialize)]
pub struct VolatileLimitsFile {
    #[serde(default)]
    pub limits: Vec<RawVolatileLimit>,
}

#[derive(Debug, Deserialize)]
pub struct RawVolatileLimit {
    pub regulation: String,
    pub product_category: String,
    pub limit_percent: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DonorsFile {
    #[serde(default)]
    pub formaldehyde_donors: Vec<RawDonor>,
    #[serde(default)]
    pub testing_requirements: TestingRequirements,
}

#[derive(Debug, Default, Deserialize)]
pub struct TestingRequirements {
    #[serde(default)]
    pub labeling_trigger_eu: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawDonor {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub donor_type: Option<String>,
    #[serde(default)]
    pub releases_formaldehyde: bool,
    #[serde(default)]
    pub eu_status: Option<String>,
    #[serde(default)]
    pub eu_limit_percent: Option<f64>,
    #[serde(default)]
    pub labeling_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NaturalsFile {
    #[serde(default)]
    pub naturals: Vec<RawNatural>,
}

#[derive(Debug, Deserialize)]
pub struct RawNatural {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub restricted_constituents: Vec<RawConstituent>,
    #[serde(default)]
    pub allergen_constituents: Vec<RawConstituent>,
}

#[derive(Debug, Deserialize)]
pub struct RawConstituent {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub max_percentage: f64,
    #[serde(default)]
    pub typical_percentage: Option<f64>,
}

/// `prop65.json`, `canada_hotlist.json`, and `reach.json` share this envelope.
#[derive(Debug, Deserialize)]
pub struct SubstancesFile<T> {
    #[serde(default = "Vec::new")]
    pub substances: Vec<T>,
}

impl<T> Default for SubstancesFile<T> {
    fn default() -> Self {
        Self {
            substances: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawProp65 {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub warning_required: bool,
    #[serde(default)]
    pub nsrl_ug_day: Option<f64>,
    #[serde(default)]
    pub listing_mechanism: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RawHotlist {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub restriction_type: Option<String>,
    #[serde(default)]
    pub limit_percent: Option<f64>,
    #[serde(default)]
    pub restriction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawReach {
    pub cas_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub svhc: bool,
    #[serde(default)]
    pub annex_xvii_restriction: Option<RawAnnexRestriction>,
}

#[derive(Debug, Deserialize)]
pub struct RawAnnexRestriction {
    #[serde(default)]
    pub limit_percent: Option<f64>,
}
