//! Indirect substance contributions carried into a formula by natural materials.

use crate::model::Formula;
use crate::policy::{ConstituentPrecedence, IncidentalBasis, IncidentalPolicy};
use crate::reference::{Constituent, NaturalMaterial, ReferenceData};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentalContribution {
    pub substance_id: String,
    pub name: String,
    /// Formula-relative percentage, before dilution.
    pub contributed_percent: f64,
}

/// What one natural ingredient brought into the formula.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentalReport {
    pub material_name: String,
    pub material_id: String,
    pub material_percent: f64,
    pub incidentals: Vec<IncidentalContribution>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Incidentals {
    pub totals: BTreeMap<String, f64>,
    pub reports: Vec<IncidentalReport>,
    #[serde(skip)]
    names: BTreeMap<String, String>,
}

impl Incidentals {
    pub fn total(&self, substance_id: &str) -> f64 {
        self.totals.get(substance_id).copied().unwrap_or(0.0)
    }

    /// Constituent name as first recorded by a contributing natural.
    pub fn name_of(&self, substance_id: &str) -> Option<&str> {
        self.names.get(substance_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// A natural material that lists a given substance among its constituents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentalSource {
    pub material_id: String,
    pub material_name: String,
    pub max_percent: f64,
}

/// Walk every natural ingredient and accumulate its constituents.
///
/// Totals are additive across materials. Only positive contributions are recorded,
/// and a material that contributes nothing produces no report.
pub fn resolve(formula: &Formula, data: &ReferenceData, policy: &IncidentalPolicy) -> Incidentals {
    let mut out = Incidentals::default();
    if !policy.include {
        return out;
    }

    for ing in formula.ingredients() {
        let Some(natural) = data.natural(&ing.substance_id) else {
            continue;
        };

        let mut contributions = Vec::new();
        for c in constituents(natural, policy.precedence) {
            let pct = match policy.basis {
                IncidentalBasis::Max => c.max_percent,
                IncidentalBasis::Typical => c.typical_percent.unwrap_or(c.max_percent),
            };
            let contributed = pct / 100.0 * ing.weight_percent;
            if contributed <= 0.0 {
                continue;
            }

            *out.totals.entry(c.substance_id.clone()).or_insert(0.0) += contributed;
            out.names
                .entry(c.substance_id.clone())
                .or_insert_with(|| c.name.clone());
            contributions.push(IncidentalContribution {
                substance_id: c.substance_id.clone(),
                name: c.name.clone(),
                contributed_percent: contributed,
            });
        }

        if !contributions.is_empty() {
            out.reports.push(IncidentalReport {
                material_name: ing.display_name.clone(),
                material_id: ing.substance_id.clone(),
                material_percent: ing.weight_percent,
                incidentals: contributions,
            });
        }
    }

    out
}

/// Constituents of a natural, each substance once. The preferred list comes first
/// and its entries shadow same-id entries in the other list.
fn constituents(natural: &NaturalMaterial, precedence: ConstituentPrecedence) -> Vec<&Constituent> {
    let (preferred, other) = match precedence {
        ConstituentPrecedence::Restricted => (
            &natural.restricted_constituents,
            &natural.allergen_constituents,
        ),
        ConstituentPrecedence::Allergen => (
            &natural.allergen_constituents,
            &natural.restricted_constituents,
        ),
    };

    let mut out: Vec<&Constituent> = Vec::with_capacity(preferred.len() + other.len());
    for c in preferred.iter().chain(other.iter()) {
        if !out.iter().any(|seen| seen.substance_id == c.substance_id) {
            out.push(c);
        }
    }
    out
}

/// Reverse lookup: natural materials that carry `substance_id`, sorted by material id.
/// A substance listed twice in one material reports the entry `precedence` keeps.
pub fn sources_of(
    data: &ReferenceData,
    substance_id: &str,
    precedence: ConstituentPrecedence,
) -> Vec<IncidentalSource> {
    let mut out: Vec<IncidentalSource> = data
        .naturals()
        .filter_map(|n| {
            let found = constituents(n, precedence)
                .into_iter()
                .find(|c| c.substance_id == substance_id);
            found.map(|c| IncidentalSource {
                material_id: n.substance_id.clone(),
                material_name: n.name.clone(),
                max_percent: c.max_percent,
            })
        })
        .collect();
    out.sort_by(|a, b| a.material_id.cmp(&b.material_id));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{approx, citrus_data, formula};

    #[test]
    fn contributions_from_two_naturals_add_up() {
        let f = formula(&[("8008-56-8", "Lemon Oil", 5.0), ("8007-02-1", "Lemongrass Oil", 2.0)]);
        let inc = resolve(&f, &citrus_data(), &IncidentalPolicy::default());

        assert!(approx(inc.total("5392-40-5"), 1.95));
        assert_eq!(inc.reports.len(), 2);
        assert_eq!(inc.reports[0].material_id, "8008-56-8");
        assert!(approx(inc.reports[0].incidentals[0].contributed_percent, 0.25));
        assert!(approx(inc.reports[1].incidentals[0].contributed_percent, 1.7));
        assert_eq!(inc.name_of("5392-40-5"), Some("Citral"));
    }

    #[test]
    fn restricted_list_shadows_allergen_list_by_default() {
        // Lemongrass lists citral in both lists: 85% restricted, 80% allergen.
        let f = formula(&[("8007-02-1", "Lemongrass Oil", 10.0)]);
        let inc = resolve(&f, &citrus_data(), &IncidentalPolicy::default());
        assert!(approx(inc.total("5392-40-5"), 8.5));
        let citral_entries = inc.reports[0]
            .incidentals
            .iter()
            .filter(|c| c.substance_id == "5392-40-5")
            .count();
        assert_eq!(citral_entries, 1);
    }

    #[test]
    fn allergen_precedence_keeps_the_allergen_entry() {
        let f = formula(&[("8007-02-1", "Lemongrass Oil", 10.0)]);
        let policy = IncidentalPolicy {
            precedence: ConstituentPrecedence::Allergen,
            ..IncidentalPolicy::default()
        };
        let inc = resolve(&f, &citrus_data(), &policy);
        assert!(approx(inc.total("5392-40-5"), 8.0));
    }

    #[test]
    fn typical_basis_falls_back_to_max() {
        let f = formula(&[("8008-56-8", "Lemon Oil", 10.0)]);
        let policy = IncidentalPolicy {
            basis: IncidentalBasis::Typical,
            ..IncidentalPolicy::default()
        };
        let inc = resolve(&f, &citrus_data(), &policy);
        // Citral has a typical value (3%); limonene has none (max 70%).
        assert!(approx(inc.total("5392-40-5"), 0.3));
        assert!(approx(inc.total("5989-27-5"), 7.0));
    }

    #[test]
    fn disabled_policy_yields_nothing() {
        let f = formula(&[("8007-02-1", "Lemongrass Oil", 10.0)]);
        let policy = IncidentalPolicy {
            include: false,
            ..IncidentalPolicy::default()
        };
        let inc = resolve(&f, &citrus_data(), &policy);
        assert!(inc.is_empty());
        assert!(inc.reports.is_empty());
    }

    #[test]
    fn non_natural_ingredients_are_ignored() {
        let f = formula(&[("5392-40-5", "Citral", 1.0)]);
        let inc = resolve(&f, &citrus_data(), &IncidentalPolicy::default());
        assert!(inc.is_empty());
    }

    #[test]
    fn sources_of_lists_both_citrus_oils() {
        let sources = sources_of(&citrus_data(), "5392-40-5", ConstituentPrecedence::Restricted);
        let ids: Vec<&str> = sources.iter().map(|s| s.material_id.as_str()).collect();
        assert_eq!(ids, vec!["8007-02-1", "8008-56-8"]);
        assert!(approx(sources[0].max_percent, 85.0));
        assert!(sources_of(&citrus_data(), "0-0-0", ConstituentPrecedence::Restricted).is_empty());
    }

    #[test]
    fn sources_of_follows_constituent_precedence() {
        // Lemongrass lists citral at 85% (restricted) and 80% (allergen).
        let sources = sources_of(&citrus_data(), "5392-40-5", ConstituentPrecedence::Allergen);
        assert_eq!(sources[0].material_id, "8007-02-1");
        assert!(approx(sources[0].max_percent, 80.0));
    }
}
