use crate::certificate;
use crate::checks::{self, EvalContext};
use crate::fingerprint::fingerprint_for;
use crate::model::{EvaluationRequest, Formula};
use crate::policy::EffectiveConfig;
use crate::reference::ReferenceData;
use crate::report::EvaluationDetails;
use scentguard_types::{ComplianceFinding, ComplianceReport, SCHEMA_REPORT_V1, StatusCounts};
use time::OffsetDateTime;

/// Report plus the intermediate per-domain results it was flattened from.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub report: ComplianceReport,
    pub details: EvaluationDetails,
}

pub fn evaluate(
    formula: &Formula,
    request: &EvaluationRequest,
    data: &ReferenceData,
    cfg: &EffectiveConfig,
) -> Evaluation {
    evaluate_at(formula, request, data, cfg, OffsetDateTime::now_utc())
}

/// Evaluate with an explicit clock. Findings depend only on the inputs; the
/// certificate suffix is the sole random part of the output.
pub fn evaluate_at(
    formula: &Formula,
    request: &EvaluationRequest,
    data: &ReferenceData,
    cfg: &EffectiveConfig,
    now: OffsetDateTime,
) -> Evaluation {
    let ctx = EvalContext {
        formula,
        request,
        data,
        cfg,
    };

    let mut findings: Vec<ComplianceFinding> = Vec::new();
    let details = checks::run_all(&ctx, &mut findings);

    for f in &mut findings {
        f.fingerprint = Some(fingerprint_for(f));
    }

    let is_compliant = !findings.iter().any(|f| f.status.is_blocking());
    let certificate_id = is_compliant.then(|| certificate::mint(&cfg.certificate_prefix, now));
    let counts = StatusCounts::from_findings(&findings);

    let report = ComplianceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        formula_name: formula.name().to_string(),
        product_type: request.product_type(),
        category: details.restriction.category.clone(),
        jurisdictions: request.jurisdictions().to_vec(),
        dilution_percent: request.dilution_percent(),
        leave_on: request.leave_on(),
        findings,
        is_compliant,
        counts,
        certificate_id,
        generated_at: now,
    };

    Evaluation { report, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{citrus_data, formula, request};
    use scentguard_types::{ComplianceStatus, Jurisdiction, ProductType, ids};
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

    #[test]
    fn compliant_formula_gets_a_certificate() {
        let f = formula(&[("8008-56-8", "Lemon Oil", 5.0)]);
        let req = request(ProductType::FineFragrance, &[Jurisdiction::Eu], 20.0);
        let eval = evaluate_at(&f, &req, &citrus_data(), &EffectiveConfig::full(), NOW);

        assert!(eval.report.is_compliant);
        let cert = eval.report.certificate_id.as_deref().expect("certificate");
        assert!(cert.starts_with("COMP-20240601-"), "{cert}");
        assert_eq!(eval.report.schema, SCHEMA_REPORT_V1);
        assert_eq!(eval.report.category.as_deref(), Some("4"));
    }

    #[test]
    fn non_compliant_formula_gets_no_certificate() {
        // Lemongrass at 50% carries 42.5% citral; 8.5% in product against a 0.6% limit.
        let f = formula(&[("8007-02-1", "Lemongrass Oil", 50.0)]);
        let req = request(ProductType::FineFragrance, &[Jurisdiction::Us], 20.0);
        let eval = evaluate_at(&f, &req, &citrus_data(), &EffectiveConfig::full(), NOW);

        assert!(!eval.report.is_compliant);
        assert_eq!(eval.report.certificate_id, None);
        assert!(eval.report.counts.non_compliant >= 1);
    }

    #[test]
    fn findings_are_flattened_in_evaluator_order() {
        let f = formula(&[("5392-40-5", "Citral", 0.1), ("50-00-0", "Formaldehyde", 0.01)]);
        let req = request(
            ProductType::BodyLotion,
            &[Jurisdiction::Eu, Jurisdiction::Us],
            100.0,
        );
        let eval = evaluate_at(&f, &req, &citrus_data(), &EffectiveConfig::full(), NOW);

        let order: Vec<&str> = eval.report.findings.iter().map(|f| f.check_id.as_str()).collect();
        let first_of = |id: &str| order.iter().position(|c| *c == id).expect(id);
        assert!(first_of(ids::CHECK_RESTRICTION_LIMITS) < first_of(ids::CHECK_ALLERGEN_DISCLOSURE));
        assert!(first_of(ids::CHECK_ALLERGEN_DISCLOSURE) < first_of(ids::CHECK_VOLATILE_CONTENT));
        assert!(first_of(ids::CHECK_VOLATILE_CONTENT) < first_of(ids::CHECK_DONOR_SUBSTANCES));
        assert!(first_of(ids::CHECK_DONOR_SUBSTANCES) < first_of(ids::CHECK_LISTS_PROP65));
    }

    #[test]
    fn every_finding_is_fingerprinted() {
        let f = formula(&[("5392-40-5", "Citral", 0.1), ("8008-56-8", "Lemon Oil", 5.0)]);
        let req = request(ProductType::FineFragrance, &[Jurisdiction::Eu], 20.0);
        let eval = evaluate_at(&f, &req, &citrus_data(), &EffectiveConfig::full(), NOW);
        for finding in &eval.report.findings {
            let fp = finding.fingerprint.as_deref().expect("fingerprint");
            assert_eq!(fp.len(), 64);
        }
    }

    #[test]
    fn re_evaluation_is_deterministic_apart_from_certificate() {
        let f = formula(&[("5392-40-5", "Citral", 0.5), ("8007-02-1", "Lemongrass Oil", 1.0)]);
        let req = request(ProductType::BodyLotion, &[Jurisdiction::Eu, Jurisdiction::Ca], 15.0);
        let data = citrus_data();
        let cfg = EffectiveConfig::full();

        let a = evaluate_at(&f, &req, &data, &cfg, NOW);
        let b = evaluate_at(&f, &req, &data, &cfg, NOW);
        assert_eq!(a.report.findings, b.report.findings);
        assert_eq!(a.details, b.details);
        assert_eq!(a.report.is_compliant, b.report.is_compliant);
    }

    #[test]
    fn disabled_checks_do_not_run() {
        let f = formula(&[("5392-40-5", "Citral", 0.5)]);
        let req = request(ProductType::FineFragrance, &[Jurisdiction::Eu], 20.0);
        let mut cfg = EffectiveConfig::full();
        for id in [
            ids::CHECK_ALLERGEN_DISCLOSURE,
            ids::CHECK_VOLATILE_CONTENT,
            ids::CHECK_DONOR_SUBSTANCES,
            ids::CHECK_LISTS_REACH,
        ] {
            cfg.checks.insert(id.to_string(), crate::policy::CheckPolicy::disabled());
        }

        let eval = evaluate_at(&f, &req, &citrus_data(), &cfg, NOW);
        assert!(eval.details.allergen.is_none());
        assert!(eval.details.volatile.is_none());
        assert!(eval.details.donor.is_none());
        assert!(
            eval.report
                .findings
                .iter()
                .all(|f| f.check_id == ids::CHECK_RESTRICTION_LIMITS)
        );
        assert!(
            eval.report
                .findings
                .iter()
                .all(|f| f.status != ComplianceStatus::NotApplicable)
        );
    }
}
