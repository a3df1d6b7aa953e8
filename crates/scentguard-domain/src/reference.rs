//! Immutable reference tables keyed by substance identifier.
//!
//! `ReferenceData` is built once (by the refdata adapter, or in memory by tests) and
//! then only read. Every lookup is a hash-map probe.

use scentguard_types::Jurisdiction;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const DEFAULT_VERSION_TAG: &str = "51st";
pub const DEFAULT_LEAVE_ON_THRESHOLD: f64 = 0.001;
pub const DEFAULT_RINSE_OFF_THRESHOLD: f64 = 0.01;
pub const DEFAULT_DONOR_LABELING_THRESHOLD: f64 = 0.05;

// --- Restriction rules ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    Prohibition,
    Restriction,
    Specification,
    Sensitization,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestrictionRule {
    pub substance_id: String,
    pub name: String,
    pub kind: RestrictionKind,
    pub limits_by_category: BTreeMap<String, f64>,
    pub general_limit: Option<f64>,
    /// IFRA amendment the rule comes from.
    pub version_tag: String,
}

impl RestrictionRule {
    pub fn new(substance_id: impl Into<String>, name: impl Into<String>, kind: RestrictionKind) -> Self {
        Self {
            substance_id: substance_id.into(),
            name: name.into(),
            kind,
            limits_by_category: BTreeMap::new(),
            general_limit: None,
            version_tag: DEFAULT_VERSION_TAG.to_string(),
        }
    }

    pub fn with_category_limit(mut self, category: impl Into<String>, limit: f64) -> Self {
        self.limits_by_category.insert(category.into(), limit);
        self
    }

    pub fn with_general_limit(mut self, limit: f64) -> Self {
        self.general_limit = Some(limit);
        self
    }

    /// Prohibitions are always zero; otherwise the category limit, then the general limit.
    pub fn limit_for(&self, category: &str) -> Option<f64> {
        match self.kind {
            RestrictionKind::Prohibition => Some(0.0),
            _ => self
                .limits_by_category
                .get(category)
                .copied()
                .or(self.general_limit),
        }
    }
}

// --- Natural materials ---

#[derive(Clone, Debug, PartialEq)]
pub struct Constituent {
    pub substance_id: String,
    pub name: String,
    pub max_percent: f64,
    pub typical_percent: Option<f64>,
}

impl Constituent {
    pub fn new(substance_id: impl Into<String>, name: impl Into<String>, max_percent: f64) -> Self {
        Self {
            substance_id: substance_id.into(),
            name: name.into(),
            max_percent,
            typical_percent: None,
        }
    }

    pub fn with_typical(mut self, typical_percent: f64) -> Self {
        self.typical_percent = Some(typical_percent);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NaturalMaterial {
    pub substance_id: String,
    pub name: String,
    pub restricted_constituents: Vec<Constituent>,
    pub allergen_constituents: Vec<Constituent>,
}

impl NaturalMaterial {
    pub fn new(substance_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            substance_id: substance_id.into(),
            name: name.into(),
            restricted_constituents: Vec::new(),
            allergen_constituents: Vec::new(),
        }
    }

    pub fn with_restricted(mut self, c: Constituent) -> Self {
        self.restricted_constituents.push(c);
        self
    }

    pub fn with_allergen(mut self, c: Constituent) -> Self {
        self.allergen_constituents.push(c);
        self
    }
}

// --- Allergens ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AllergenRegime {
    #[serde(rename = "eu_26")]
    Eu26,
    #[serde(rename = "eu_82")]
    Eu82,
    #[serde(rename = "ca_24")]
    Ca24,
    #[serde(rename = "ca_81")]
    Ca81,
    #[serde(rename = "us_ifra")]
    UsIfra,
}

impl AllergenRegime {
    pub fn as_str(self) -> &'static str {
        match self {
            AllergenRegime::Eu26 => "eu_26",
            AllergenRegime::Eu82 => "eu_82",
            AllergenRegime::Ca24 => "ca_24",
            AllergenRegime::Ca81 => "ca_81",
            AllergenRegime::UsIfra => "us_ifra",
        }
    }

    pub fn applies_to(self, jurisdiction: Jurisdiction) -> bool {
        matches!(
            (self, jurisdiction),
            (AllergenRegime::Eu26 | AllergenRegime::Eu82, Jurisdiction::Eu | Jurisdiction::Uk)
                | (AllergenRegime::Ca24 | AllergenRegime::Ca81, Jurisdiction::Ca)
                | (AllergenRegime::UsIfra, Jurisdiction::Us)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AllergenRecord {
    pub substance_id: String,
    pub name: String,
    pub inci_name: Option<String>,
    pub leave_on_threshold: f64,
    pub rinse_off_threshold: f64,
    pub regimes: BTreeSet<AllergenRegime>,
}

impl AllergenRecord {
    pub fn new(substance_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            substance_id: substance_id.into(),
            name: name.into(),
            inci_name: None,
            leave_on_threshold: DEFAULT_LEAVE_ON_THRESHOLD,
            rinse_off_threshold: DEFAULT_RINSE_OFF_THRESHOLD,
            regimes: BTreeSet::new(),
        }
    }

    pub fn with_regime(mut self, regime: AllergenRegime) -> Self {
        self.regimes.insert(regime);
        self
    }

    pub fn threshold(&self, leave_on: bool) -> f64 {
        if leave_on {
            self.leave_on_threshold
        } else {
            self.rinse_off_threshold
        }
    }

    pub fn label_name(&self) -> &str {
        self.inci_name.as_deref().unwrap_or(&self.name)
    }
}

// --- Volatile content ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatileRegulation {
    Carb,
    Canada,
    Eu,
}

impl VolatileRegulation {
    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Option<Self> {
        match jurisdiction {
            Jurisdiction::Us => Some(VolatileRegulation::Carb),
            Jurisdiction::Ca => Some(VolatileRegulation::Canada),
            Jurisdiction::Eu => Some(VolatileRegulation::Eu),
            _ => None,
        }
    }

    pub fn jurisdiction(self) -> Jurisdiction {
        match self {
            VolatileRegulation::Carb => Jurisdiction::Us,
            VolatileRegulation::Canada => Jurisdiction::Ca,
            VolatileRegulation::Eu => Jurisdiction::Eu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VolatileRegulation::Carb => "CARB",
            VolatileRegulation::Canada => "CANADA",
            VolatileRegulation::Eu => "EU",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VolatileRecord {
    pub substance_id: String,
    /// Percentage (0-100) of the ingredient that counts as volatile organic content.
    pub volatile_fraction: f64,
    pub is_exempt: bool,
    pub exempt_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VolatileLimit {
    pub regulation: VolatileRegulation,
    pub product_category: String,
    pub limit_percent: f64,
}

// --- Formaldehyde donors ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorKind {
    Direct,
    Donor,
    NonDonor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonorRecord {
    pub substance_id: String,
    pub name: String,
    pub kind: DonorKind,
    pub releases_formaldehyde: bool,
    /// Market whose ban and limit this record carries.
    pub jurisdiction: Jurisdiction,
    pub banned: bool,
    pub limit_percent: Option<f64>,
    pub labeling_threshold: Option<f64>,
}

// --- Jurisdiction substance lists ---

#[derive(Clone, Debug, PartialEq)]
pub struct Prop65Entry {
    pub substance_id: String,
    pub name: String,
    pub warning_required: bool,
    /// No Significant Risk Level, micrograms per day.
    pub nsrl_ug_day: Option<f64>,
    pub listing_mechanism: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HotlistEntry {
    pub substance_id: String,
    pub name: String,
    pub prohibited: bool,
    pub limit_percent: Option<f64>,
    pub restriction: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReachEntry {
    pub substance_id: String,
    pub name: String,
    pub svhc: bool,
    pub annex_xvii_limit: Option<f64>,
}

/// Row counts per table, for logging after a load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub restrictions: usize,
    pub allergens: usize,
    pub volatiles: usize,
    pub volatile_limits: usize,
    pub donors: usize,
    pub naturals: usize,
    pub prop65: usize,
    pub canada_hotlist: usize,
    pub reach: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceData {
    restrictions: HashMap<String, RestrictionRule>,
    allergens: HashMap<String, AllergenRecord>,
    volatiles: HashMap<String, VolatileRecord>,
    volatile_limits: HashMap<(VolatileRegulation, String), f64>,
    donors: HashMap<String, DonorRecord>,
    donor_labeling_threshold: f64,
    naturals: HashMap<String, NaturalMaterial>,
    prop65: HashMap<String, Prop65Entry>,
    canada_hotlist: HashMap<String, HotlistEntry>,
    reach: HashMap<String, ReachEntry>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            restrictions: HashMap::new(),
            allergens: HashMap::new(),
            volatiles: HashMap::new(),
            volatile_limits: HashMap::new(),
            donors: HashMap::new(),
            donor_labeling_threshold: DEFAULT_DONOR_LABELING_THRESHOLD,
            naturals: HashMap::new(),
            prop65: HashMap::new(),
            canada_hotlist: HashMap::new(),
            reach: HashMap::new(),
        }
    }
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    // Lookups

    pub fn restriction(&self, substance_id: &str) -> Option<&RestrictionRule> {
        self.restrictions.get(substance_id)
    }

    pub fn allergen(&self, substance_id: &str) -> Option<&AllergenRecord> {
        self.allergens.get(substance_id)
    }

    pub fn volatile(&self, substance_id: &str) -> Option<&VolatileRecord> {
        self.volatiles.get(substance_id)
    }

    pub fn volatile_limit(&self, regulation: VolatileRegulation, category: &str) -> Option<f64> {
        self.volatile_limits
            .get(&(regulation, category.to_string()))
            .copied()
    }

    pub fn donor(&self, substance_id: &str) -> Option<&DonorRecord> {
        self.donors.get(substance_id)
    }

    pub fn donor_labeling_threshold(&self) -> f64 {
        self.donor_labeling_threshold
    }

    pub fn natural(&self, substance_id: &str) -> Option<&NaturalMaterial> {
        self.naturals.get(substance_id)
    }

    pub fn is_natural(&self, substance_id: &str) -> bool {
        self.naturals.contains_key(substance_id)
    }

    pub fn naturals(&self) -> impl Iterator<Item = &NaturalMaterial> {
        self.naturals.values()
    }

    pub fn prop65(&self, substance_id: &str) -> Option<&Prop65Entry> {
        self.prop65.get(substance_id)
    }

    pub fn canada_hotlist(&self, substance_id: &str) -> Option<&HotlistEntry> {
        self.canada_hotlist.get(substance_id)
    }

    pub fn reach(&self, substance_id: &str) -> Option<&ReachEntry> {
        self.reach.get(substance_id)
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            restrictions: self.restrictions.len(),
            allergens: self.allergens.len(),
            volatiles: self.volatiles.len(),
            volatile_limits: self.volatile_limits.len(),
            donors: self.donors.len(),
            naturals: self.naturals.len(),
            prop65: self.prop65.len(),
            canada_hotlist: self.canada_hotlist.len(),
            reach: self.reach.len(),
        }
    }

    // Population. Later inserts for the same key replace earlier ones.

    pub fn insert_restriction(&mut self, rule: RestrictionRule) {
        self.restrictions.insert(rule.substance_id.clone(), rule);
    }

    pub fn insert_allergen(&mut self, record: AllergenRecord) {
        self.allergens.insert(record.substance_id.clone(), record);
    }

    pub fn insert_volatile(&mut self, record: VolatileRecord) {
        self.volatiles.insert(record.substance_id.clone(), record);
    }

    pub fn insert_volatile_limit(&mut self, limit: VolatileLimit) {
        self.volatile_limits
            .insert((limit.regulation, limit.product_category), limit.limit_percent);
    }

    pub fn insert_donor(&mut self, record: DonorRecord) {
        self.donors.insert(record.substance_id.clone(), record);
    }

    pub fn set_donor_labeling_threshold(&mut self, threshold: f64) {
        self.donor_labeling_threshold = threshold;
    }

    pub fn insert_natural(&mut self, natural: NaturalMaterial) {
        self.naturals.insert(natural.substance_id.clone(), natural);
    }

    pub fn insert_prop65(&mut self, entry: Prop65Entry) {
        self.prop65.insert(entry.substance_id.clone(), entry);
    }

    pub fn insert_canada_hotlist(&mut self, entry: HotlistEntry) {
        self.canada_hotlist.insert(entry.substance_id.clone(), entry);
    }

    pub fn insert_reach(&mut self, entry: ReachEntry) {
        self.reach.insert(entry.substance_id.clone(), entry);
    }

    // Builder-style variants for in-memory construction.

    pub fn with_restriction(mut self, rule: RestrictionRule) -> Self {
        self.insert_restriction(rule);
        self
    }

    pub fn with_allergen(mut self, record: AllergenRecord) -> Self {
        self.insert_allergen(record);
        self
    }

    pub fn with_volatile(mut self, record: VolatileRecord) -> Self {
        self.insert_volatile(record);
        self
    }

    pub fn with_volatile_limit(mut self, limit: VolatileLimit) -> Self {
        self.insert_volatile_limit(limit);
        self
    }

    pub fn with_donor(mut self, record: DonorRecord) -> Self {
        self.insert_donor(record);
        self
    }

    pub fn with_natural(mut self, natural: NaturalMaterial) -> Self {
        self.insert_natural(natural);
        self
    }

    pub fn with_prop65(mut self, entry: Prop65Entry) -> Self {
        self.insert_prop65(entry);
        self
    }

    pub fn with_canada_hotlist(mut self, entry: HotlistEntry) -> Self {
        self.insert_canada_hotlist(entry);
        self
    }

    pub fn with_reach(mut self, entry: ReachEntry) -> Self {
        self.insert_reach(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prohibition_limit_is_zero_regardless_of_table() {
        let rule = RestrictionRule::new("1-1-1", "x", RestrictionKind::Prohibition)
            .with_category_limit("4", 2.0)
            .with_general_limit(1.0);
        assert_eq!(rule.limit_for("4"), Some(0.0));
    }

    #[test]
    fn category_limit_falls_back_to_general() {
        let rule = RestrictionRule::new("1-1-1", "x", RestrictionKind::Restriction)
            .with_category_limit("4", 2.0)
            .with_general_limit(1.0);
        assert_eq!(rule.limit_for("4"), Some(2.0));
        assert_eq!(rule.limit_for("9"), Some(1.0));

        let no_general = RestrictionRule::new("1-1-1", "x", RestrictionKind::Specification);
        assert_eq!(no_general.limit_for("9"), None);
    }

    #[test]
    fn regimes_map_to_jurisdictions() {
        assert!(AllergenRegime::Eu82.applies_to(Jurisdiction::Uk));
        assert!(AllergenRegime::Ca24.applies_to(Jurisdiction::Ca));
        assert!(!AllergenRegime::Ca24.applies_to(Jurisdiction::Eu));
        assert!(AllergenRegime::UsIfra.applies_to(Jurisdiction::Us));
        assert!(!AllergenRegime::Eu26.applies_to(Jurisdiction::Jp));
    }

    #[test]
    fn empty_store_knows_nothing() {
        let data = ReferenceData::new();
        assert!(data.restriction("5392-40-5").is_none());
        assert!(!data.is_natural("8007-02-1"));
        assert_eq!(data.counts(), TableCounts::default());
        assert_eq!(data.donor_labeling_threshold(), DEFAULT_DONOR_LABELING_THRESHOLD);
    }
}
