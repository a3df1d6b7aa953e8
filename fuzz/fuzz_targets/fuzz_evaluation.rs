//! Fuzz target for the evaluation engine.
//!
//! Goal: any valid formula and request evaluates without panicking, and a
//! certificate is issued exactly when no finding is non-compliant.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scentguard_domain::model::{EvaluationRequest, Formula, Ingredient};
use scentguard_domain::policy::EffectiveConfig;
use scentguard_domain::reference::{
    AllergenRecord, AllergenRegime, Constituent, NaturalMaterial, ReferenceData, RestrictionKind,
    RestrictionRule,
};
use scentguard_types::{ComplianceStatus, Jurisdiction, ProductType};

/// Substance ids drawn by index so lines hit the reference tables often.
const SUBSTANCES: [&str; 6] = [
    "5392-40-5",
    "5989-27-5",
    "8008-56-8",
    "64-17-5",
    "50-00-0",
    "unlisted-1",
];

#[derive(Arbitrary, Debug)]
struct Line {
    substance: u8,
    weight_percent: f64,
}

#[derive(Arbitrary, Debug)]
struct EvalInput {
    lines: Vec<Line>,
    product_type: u8,
    markets: u8,
    dilution_percent: f64,
    leave_on: bool,
}

fn reference_data() -> ReferenceData {
    let mut data = ReferenceData::new();
    data.insert_restriction(
        RestrictionRule::new("5392-40-5", "Citral", RestrictionKind::Restriction)
            .with_category_limit("4", 0.6)
            .with_category_limit("5A", 0.4),
    );
    data.insert_allergen(
        AllergenRecord::new("5989-27-5", "Limonene").with_regime(AllergenRegime::Eu26),
    );
    data.insert_natural(
        NaturalMaterial::new("8008-56-8", "Lemon oil")
            .with_restricted(Constituent::new("5392-40-5", "Citral", 5.0))
            .with_allergen(Constituent::new("5989-27-5", "Limonene", 70.0)),
    );
    data
}

fuzz_target!(|input: EvalInput| {
    if input.lines.len() > 16 {
        return;
    }

    let ingredients: Vec<Ingredient> = input
        .lines
        .iter()
        .map(|l| {
            let id = SUBSTANCES[usize::from(l.substance) % SUBSTANCES.len()];
            Ingredient::new(id, id, l.weight_percent)
        })
        .collect();
    let Ok(formula) = Formula::new("Fuzz Accord", ingredients) else {
        return;
    };

    let product_type = ProductType::ALL[usize::from(input.product_type) % ProductType::ALL.len()];
    let jurisdictions: Vec<Jurisdiction> = Jurisdiction::MARKETS
        .iter()
        .enumerate()
        .filter(|(i, _)| input.markets & (1 << i) != 0)
        .map(|(_, j)| *j)
        .collect();
    let Ok(request) = EvaluationRequest::new(
        product_type,
        jurisdictions,
        input.dilution_percent,
        input.leave_on,
    ) else {
        return;
    };

    let evaluation = scentguard_domain::evaluate(
        &formula,
        &request,
        &reference_data(),
        &EffectiveConfig::default(),
    );
    let report = &evaluation.report;
    let blocked = report
        .findings
        .iter()
        .any(|f| f.status == ComplianceStatus::NonCompliant);
    assert_eq!(report.is_compliant, !blocked);
    assert_eq!(report.certificate_id.is_some(), !blocked);
});
