use super::EvalContext;
use super::utils::{FindingBuilder, exceeds, reaches};
use crate::reference::{DonorKind, DonorRecord};
use scentguard_types::{ComplianceFinding, ComplianceStatus, ids};
use serde::Serialize;
use serde_json::json;

/// Share of a releasing donor's concentration counted as potential free formaldehyde.
pub const DONOR_RELEASE_FACTOR: f64 = 0.2;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonorAssessment {
    pub substance_id: String,
    pub name: String,
    pub kind: DonorKind,
    pub observed_percent: f64,
    pub limit_percent: Option<f64>,
    pub labeling_threshold: f64,
    pub banned: bool,
    pub donor_potential: f64,
    /// At or above the labeling threshold, whatever the status.
    pub requires_labeling: bool,
    pub status: ComplianceStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonorReport {
    pub donors: Vec<DonorAssessment>,
    pub total_donor_potential: f64,
    pub requires_labeling: bool,
    pub has_banned_substances: bool,
    pub has_violations: bool,
    pub findings: Vec<ComplianceFinding>,
}

pub fn run(ctx: &EvalContext<'_>) -> DonorReport {
    let mut donors = Vec::new();
    let mut findings = Vec::new();

    for ing in ctx.formula.ingredients() {
        let Some(record) = ctx.data.donor(&ing.substance_id) else {
            continue;
        };
        let observed = ctx.request.in_product(ing.weight_percent);
        let banned = record.banned && ctx.request.requests(record.jurisdiction);
        let labeling_threshold = record
            .labeling_threshold
            .unwrap_or_else(|| ctx.data.donor_labeling_threshold());
        let donor_potential = if record.releases_formaldehyde {
            observed * DONOR_RELEASE_FACTOR
        } else {
            0.0
        };

        let finding = assess(record, &ing.display_name, observed, banned, labeling_threshold);
        donors.push(DonorAssessment {
            substance_id: record.substance_id.clone(),
            name: ing.display_name.clone(),
            kind: record.kind,
            observed_percent: observed,
            limit_percent: record.limit_percent,
            labeling_threshold,
            banned,
            donor_potential,
            requires_labeling: reaches(observed, labeling_threshold),
            status: finding.status,
        });
        findings.push(finding);
    }

    DonorReport {
        total_donor_potential: donors.iter().map(|d| d.donor_potential).sum(),
        requires_labeling: donors.iter().any(|d| d.requires_labeling),
        has_banned_substances: donors.iter().any(|d| d.banned),
        has_violations: donors.iter().any(|d| d.status.is_blocking()),
        donors,
        findings,
    }
}

fn assess(
    record: &DonorRecord,
    name: &str,
    observed: f64,
    banned: bool,
    labeling_threshold: f64,
) -> ComplianceFinding {
    let base = |code: &str, status: ComplianceStatus| {
        FindingBuilder::new(ids::CHECK_DONOR_SUBSTANCES, code, status, record.jurisdiction)
            .substance(&record.substance_id, name.to_string())
            .observed(observed)
            .data(json!({
                "kind": record.kind,
                "releases_formaldehyde": record.releases_formaldehyde,
            }))
    };

    if banned {
        return base(ids::CODE_DONOR_BANNED, ComplianceStatus::NonCompliant)
            .label("EU Formaldehyde Donor Ban")
            .limit(Some(0.0))
            .reference("EC 1223/2009 Annex II")
            .details(format!("{name} is banned in cosmetic products"))
            .build();
    }

    if let Some(limit) = record.limit_percent
        && exceeds(observed, limit)
    {
        return base(ids::CODE_DONOR_OVER_LIMIT, ComplianceStatus::NonCompliant)
            .label("Formaldehyde Donor Limit")
            .limit(Some(limit))
            .reference("EC 1223/2009 Annex V")
            .details(format!("{name} at {observed:.4}% exceeds the {limit}% limit"))
            .build();
    }

    if reaches(observed, labeling_threshold) {
        return base(ids::CODE_DONOR_LABELING_REQUIRED, ComplianceStatus::Warning)
            .label("Formaldehyde Labeling Required")
            .limit(Some(labeling_threshold))
            .reference("EC 1223/2009 Annex V")
            .details(format!(
                "{name} at {observed:.4}% requires the 'contains formaldehyde' warning (threshold {labeling_threshold}%)"
            ))
            .build();
    }

    base(ids::CODE_DONOR_BELOW_LABELING, ComplianceStatus::Compliant)
        .label("Formaldehyde Labeling Required")
        .limit(Some(labeling_threshold))
        .reference("EC 1223/2009 Annex V")
        .details(format!(
            "{name} at {observed:.4}% is below the {labeling_threshold}% labeling threshold"
        ))
        .build()
}
