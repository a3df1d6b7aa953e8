use super::EvalContext;
use super::utils::{FindingBuilder, reaches};
use crate::reference::AllergenRegime;
use scentguard_types::{ComplianceFinding, ComplianceStatus, Jurisdiction, ids};
use serde::Serialize;
use serde_json::json;

/// Markets that have an allergen labeling regime.
pub const ALLERGEN_MARKETS: [Jurisdiction; 4] = [
    Jurisdiction::Eu,
    Jurisdiction::Uk,
    Jurisdiction::Ca,
    Jurisdiction::Us,
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectedAllergen {
    pub substance_id: String,
    pub name: String,
    pub inci_name: Option<String>,
    /// In-product percentage.
    pub observed_percent: f64,
    pub threshold: f64,
    pub requires_disclosure: bool,
    /// Regimes of this allergen that match a requested jurisdiction.
    pub applicable_regimes: Vec<AllergenRegime>,
}

impl DetectedAllergen {
    fn applies_to(&self, jurisdiction: Jurisdiction) -> bool {
        self.applicable_regimes
            .iter()
            .any(|r| r.applies_to(jurisdiction))
    }

    fn label_name(&self) -> &str {
        self.inci_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AllergenReport {
    pub leave_on: bool,
    pub detected: Vec<DetectedAllergen>,
    pub disclosure_required: Vec<DetectedAllergen>,
    pub findings: Vec<ComplianceFinding>,
}

impl AllergenReport {
    /// Sorted label names that must be declared for one market.
    pub fn disclosure_list(&self, jurisdiction: Jurisdiction) -> Vec<String> {
        let mut names: Vec<String> = self
            .disclosure_required
            .iter()
            .filter(|a| a.applies_to(jurisdiction))
            .map(|a| a.label_name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

pub fn run(ctx: &EvalContext<'_>) -> AllergenReport {
    let leave_on = ctx.request.leave_on();

    let mut detected = Vec::new();
    for ing in ctx.formula.ingredients() {
        let Some(record) = ctx.data.allergen(&ing.substance_id) else {
            continue;
        };
        let observed = ctx.request.in_product(ing.weight_percent);
        let threshold = record.threshold(leave_on);
        let applicable_regimes = record
            .regimes
            .iter()
            .copied()
            .filter(|r| ctx.request.jurisdictions().iter().any(|j| r.applies_to(*j)))
            .collect();

        detected.push(DetectedAllergen {
            substance_id: record.substance_id.clone(),
            name: ing.display_name.clone(),
            inci_name: record.inci_name.clone(),
            observed_percent: observed,
            threshold,
            requires_disclosure: reaches(observed, threshold),
            applicable_regimes,
        });
    }

    let disclosure_required: Vec<DetectedAllergen> = detected
        .iter()
        .filter(|a| a.requires_disclosure)
        .cloned()
        .collect();

    let mut findings = Vec::new();
    for &jurisdiction in ctx.request.jurisdictions() {
        if !ALLERGEN_MARKETS.contains(&jurisdiction) {
            continue;
        }
        for allergen in detected.iter().filter(|a| a.applies_to(jurisdiction)) {
            findings.push(finding(allergen, jurisdiction, leave_on));
        }
    }

    AllergenReport {
        leave_on,
        detected,
        disclosure_required,
        findings,
    }
}

fn finding(allergen: &DetectedAllergen, jurisdiction: Jurisdiction, leave_on: bool) -> ComplianceFinding {
    let (status, code, verb) = if allergen.requires_disclosure {
        (
            ComplianceStatus::Warning,
            ids::CODE_DISCLOSURE_REQUIRED,
            "must be declared on the label",
        )
    } else {
        (
            ComplianceStatus::Compliant,
            ids::CODE_BELOW_DISCLOSURE_THRESHOLD,
            "is below the declaration threshold",
        )
    };
    let exposure = if leave_on { "leave-on" } else { "rinse-off" };
    let regimes: Vec<&str> = allergen
        .applicable_regimes
        .iter()
        .filter(|r| r.applies_to(jurisdiction))
        .map(|r| r.as_str())
        .collect();

    FindingBuilder::new(ids::CHECK_ALLERGEN_DISCLOSURE, code, status, jurisdiction)
        .label(format!(
            "{} Allergen Disclosure",
            jurisdiction.as_str().to_uppercase()
        ))
        .substance(&allergen.substance_id, allergen.name.clone())
        .observed(allergen.observed_percent)
        .limit(Some(allergen.threshold))
        .reference(regime_reference(jurisdiction))
        .details(format!(
            "{} at {:.4}% {verb} ({exposure} threshold {}%)",
            allergen.label_name(),
            allergen.observed_percent,
            allergen.threshold
        ))
        .data(json!({
            "regimes": regimes,
            "leave_on": leave_on,
        }))
        .build()
}

fn regime_reference(jurisdiction: Jurisdiction) -> &'static str {
    match jurisdiction {
        Jurisdiction::Ca => "Cosmetic Regulations (C.R.C., c. 869)",
        Jurisdiction::Us => "IFRA Labelling Manual",
        Jurisdiction::Uk => "UK Cosmetic Products Regulation (Schedule 34)",
        _ => "EC 1223/2009",
    }
}
