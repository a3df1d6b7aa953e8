//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Certificate issuance and the pass/fail decision
//! - Additivity of incidental contributions
//! - Monotonicity of restriction violations under dilution
//! - Volatile-content margin sign

use crate::checks::{EvalContext, restriction, volatile};
use crate::engine::evaluate_at;
use crate::incidentals;
use crate::model::{EvaluationRequest, Formula, Ingredient};
use crate::policy::{EffectiveConfig, IncidentalPolicy};
use crate::test_support::*;
use proptest::prelude::*;
use scentguard_types::{ComplianceStatus, Jurisdiction, ProductType};
use time::macros::datetime;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Substances the strategies draw from: known naturals, restricted, allergen,
/// donor, volatile, and one unknown id.
const POOL: [(&str, &str); 9] = [
    (CITRAL, "Citral"),
    (LIMONENE, "Limonene"),
    (LEMON_OIL, "Lemon Oil"),
    (LEMONGRASS_OIL, "Lemongrass Oil"),
    (FORMALDEHYDE, "Formaldehyde"),
    (QUATERNIUM_15, "Quaternium-15"),
    (ETHANOL, "Ethanol"),
    (ACETONE, "Acetone"),
    ("999-99-9", "Unlisted Aroma Chemical"),
];

/// Strategy for formulas: each pool entry is present with some weight, or absent.
fn arb_formula() -> impl Strategy<Value = Formula> {
    prop::collection::vec(prop::option::of(0.01f64..20.0), POOL.len())
        .prop_filter("formula needs an ingredient", |ws| ws.iter().any(Option::is_some))
        .prop_map(|weights| {
            let ingredients = POOL
                .iter()
                .zip(weights)
                .filter_map(|((id, name), w)| w.map(|w| Ingredient::new(*id, *name, w)))
                .collect();
            Formula::new("Generated", ingredients).expect("pool ids are unique")
        })
}

fn arb_product_type() -> impl Strategy<Value = ProductType> {
    prop::sample::select(ProductType::ALL.to_vec())
}

/// Non-empty, duplicate-free market selections.
fn arb_jurisdictions() -> impl Strategy<Value = Vec<Jurisdiction>> {
    prop::sample::subsequence(Jurisdiction::MARKETS.to_vec(), 1..=Jurisdiction::MARKETS.len())
}

fn arb_dilution() -> impl Strategy<Value = f64> {
    prop_oneof![Just(100.0), 0.1f64..=100.0]
}

proptest! {
    #[test]
    fn certificate_iff_no_blocking_finding(
        formula in arb_formula(),
        product_type in arb_product_type(),
        jurisdictions in arb_jurisdictions(),
        dilution in arb_dilution(),
        leave_on in any::<bool>(),
    ) {
        let req = EvaluationRequest::new(product_type, jurisdictions, dilution, leave_on)
            .expect("valid request");
        let eval = evaluate_at(
            &formula,
            &req,
            &citrus_data(),
            &EffectiveConfig::full(),
            datetime!(2024-01-01 0:00 UTC),
        );

        let blocking = eval
            .report
            .findings
            .iter()
            .any(|f| f.status == ComplianceStatus::NonCompliant);
        prop_assert_eq!(eval.report.certificate_id.is_some(), !blocking);
        prop_assert_eq!(eval.report.is_compliant, !blocking);
        prop_assert_eq!(
            eval.report.counts.non_compliant > 0,
            blocking
        );
    }

    #[test]
    fn incidental_totals_are_additive(
        lemon in 0.01f64..=100.0,
        lemongrass in 0.01f64..=100.0,
    ) {
        let f = formula(&[
            (LEMON_OIL, "Lemon Oil", lemon),
            (LEMONGRASS_OIL, "Lemongrass Oil", lemongrass),
        ]);
        let inc = incidentals::resolve(&f, &citrus_data(), &IncidentalPolicy::default());

        let expected = lemon * 5.0 / 100.0 + lemongrass * 85.0 / 100.0;
        prop_assert!((inc.total(CITRAL) - expected).abs() < 1e-9);
        let per_report: f64 = inc
            .reports
            .iter()
            .flat_map(|r| r.incidentals.iter())
            .filter(|c| c.substance_id == CITRAL)
            .map(|c| c.contributed_percent)
            .sum();
        prop_assert!((per_report - inc.total(CITRAL)).abs() < 1e-9);
    }

    #[test]
    fn lower_dilution_never_adds_restriction_violations(
        formula in arb_formula(),
        product_type in arb_product_type(),
        a in 0.1f64..=100.0,
        b in 0.1f64..=100.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let data = citrus_data();
        let cfg = EffectiveConfig::full();
        let violations = |dilution: f64| {
            let req = request(product_type, &[Jurisdiction::Eu], dilution);
            let ctx = EvalContext { formula: &formula, request: &req, data: &data, cfg: &cfg };
            restriction::run(&ctx)
                .findings
                .iter()
                .filter(|f| f.status == ComplianceStatus::NonCompliant)
                .count()
        };

        prop_assert!(violations(low) <= violations(high));
    }

    #[test]
    fn volatile_margin_is_negative_iff_over_limit(
        formula in arb_formula(),
        product_type in arb_product_type(),
    ) {
        let data = citrus_data();
        let cfg = EffectiveConfig::full();
        let req = request(product_type, &[Jurisdiction::Us, Jurisdiction::Ca, Jurisdiction::Eu], 100.0);
        let ctx = EvalContext { formula: &formula, request: &req, data: &data, cfg: &cfg };

        for calc in volatile::run(&ctx).calculations {
            prop_assert_eq!(calc.margin < 0.0, !calc.is_compliant);
        }
    }
}
