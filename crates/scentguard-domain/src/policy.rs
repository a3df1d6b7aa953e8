use crate::category;
use scentguard_types::{ProductType, ids};
use std::collections::{BTreeMap, BTreeSet};

/// Share of a limit at which a compliant value becomes a warning.
pub const NEAR_LIMIT_RATIO: f64 = 0.9;

pub const DEFAULT_CERTIFICATE_PREFIX: &str = "COMP";

/// Which constituent percentage feeds the incidental calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IncidentalBasis {
    /// Worst case: the maximum reported constituent percentage.
    #[default]
    Max,
    /// Typical percentage, falling back to the maximum when none is recorded.
    Typical,
}

/// Which constituent list wins when a natural lists a substance in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConstituentPrecedence {
    #[default]
    Restricted,
    Allergen,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentalPolicy {
    pub include: bool,
    pub basis: IncidentalBasis,
    pub precedence: ConstituentPrecedence,
}

impl Default for IncidentalPolicy {
    fn default() -> Self {
        Self {
            include: true,
            basis: IncidentalBasis::Max,
            precedence: ConstituentPrecedence::Restricted,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub certificate_prefix: String,
    pub incidentals: IncidentalPolicy,
    /// Product types treated as having no IFRA category.
    pub unmapped_product_types: BTreeSet<ProductType>,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    /// Every check enabled, worst-case incidentals, default prefix.
    pub fn full() -> Self {
        let checks = all_check_ids()
            .iter()
            .map(|id| (id.to_string(), CheckPolicy::enabled()))
            .collect();
        Self {
            profile: "full".to_string(),
            certificate_prefix: DEFAULT_CERTIFICATE_PREFIX.to_string(),
            incidentals: IncidentalPolicy::default(),
            unmapped_product_types: BTreeSet::new(),
            checks,
        }
    }

    /// The restriction check ignores this; it always runs.
    pub fn check_enabled(&self, check_id: &str) -> bool {
        self.checks.get(check_id).is_some_and(|p| p.enabled)
    }

    pub fn category_for(&self, product_type: ProductType) -> Option<&'static str> {
        if self.unmapped_product_types.contains(&product_type) {
            return None;
        }
        Some(category::ifra_category(product_type))
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::full()
    }
}

pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_RESTRICTION_LIMITS,
        ids::CHECK_ALLERGEN_DISCLOSURE,
        ids::CHECK_VOLATILE_CONTENT,
        ids::CHECK_DONOR_SUBSTANCES,
        ids::CHECK_LISTS_PROP65,
        ids::CHECK_LISTS_CANADA_HOTLIST,
        ids::CHECK_LISTS_REACH,
    ]
}
