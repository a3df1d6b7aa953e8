use super::EvalContext;
use super::utils::{FindingBuilder, exceeds};
use crate::model::Ingredient;
use crate::reference::{HotlistEntry, Prop65Entry, ReachEntry};
use scentguard_types::{ComplianceFinding, ComplianceStatus, Jurisdiction, ids};
use serde::Serialize;
use serde_json::json;

/// Concentration above which an SVHC triggers supply-chain communication duties.
pub const SVHC_THRESHOLD: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListHit {
    pub check_id: String,
    pub substance_id: String,
    pub name: String,
    pub status: ComplianceStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListsReport {
    pub hits: Vec<ListHit>,
    pub findings: Vec<ComplianceFinding>,
}

impl ListsReport {
    fn push(&mut self, finding: ComplianceFinding) {
        self.hits.push(ListHit {
            check_id: finding.check_id.clone(),
            substance_id: finding.substance_id.clone().unwrap_or_default(),
            name: finding.ingredient_name.clone().unwrap_or_default(),
            status: finding.status,
        });
        self.findings.push(finding);
    }
}

pub fn run_prop65(ctx: &EvalContext<'_>, out: &mut ListsReport) {
    for ing in ctx.formula.ingredients() {
        if let Some(entry) = ctx.data.prop65(&ing.substance_id) {
            out.push(prop65(entry, ing, ctx.request.in_product(ing.weight_percent)));
        }
    }
}

pub fn run_canada_hotlist(ctx: &EvalContext<'_>, out: &mut ListsReport) {
    for ing in ctx.formula.ingredients() {
        if let Some(entry) = ctx.data.canada_hotlist(&ing.substance_id) {
            out.push(hotlist(entry, ing));
        }
    }
}

/// `jurisdiction` is the REACH market the finding is reported under (EU or UK).
pub fn run_reach(ctx: &EvalContext<'_>, jurisdiction: Jurisdiction, out: &mut ListsReport) {
    for ing in ctx.formula.ingredients() {
        if let Some(entry) = ctx.data.reach(&ing.substance_id) {
            let observed = ctx.request.in_product(ing.weight_percent);
            for finding in reach(entry, ing, observed, jurisdiction) {
                out.push(finding);
            }
        }
    }
}

fn prop65(entry: &Prop65Entry, ing: &Ingredient, observed: f64) -> ComplianceFinding {
    let (status, code, details) = if entry.warning_required {
        (
            ComplianceStatus::Warning,
            ids::CODE_PROP65_WARNING,
            format!("{} is on the Proposition 65 list; a clear and reasonable warning is required", ing.display_name),
        )
    } else {
        (
            ComplianceStatus::Compliant,
            ids::CODE_PROP65_LISTED,
            format!("{} is on the Proposition 65 list without a warning obligation", ing.display_name),
        )
    };

    FindingBuilder::new(ids::CHECK_LISTS_PROP65, code, status, Jurisdiction::Us)
        .label("California Proposition 65")
        .substance(&ing.substance_id, ing.display_name.clone())
        .observed(observed)
        .limit(entry.nsrl_ug_day)
        .reference("California Health & Safety Code Section 25249.6")
        .details(details)
        .data(json!({
            "listing_mechanism": entry.listing_mechanism,
            "nsrl_ug_day": entry.nsrl_ug_day,
        }))
        .build()
}

/// Hotlist limits are compared with the formula-level percentage.
fn hotlist(entry: &HotlistEntry, ing: &Ingredient) -> ComplianceFinding {
    let base = |code: &str, status: ComplianceStatus| {
        FindingBuilder::new(ids::CHECK_LISTS_CANADA_HOTLIST, code, status, Jurisdiction::Ca)
            .label("Health Canada Cosmetic Ingredient Hotlist")
            .substance(&ing.substance_id, ing.display_name.clone())
            .observed(ing.weight_percent)
            .reference("Cosmetic Regulations (C.R.C., c. 869)")
            .data(json!({ "restriction": entry.restriction }))
    };

    if entry.prohibited {
        return base(ids::CODE_HOTLIST_PROHIBITED, ComplianceStatus::NonCompliant)
            .limit(Some(0.0))
            .details(format!("{} is prohibited in cosmetics sold in Canada", ing.display_name))
            .build();
    }

    match entry.limit_percent {
        Some(limit) if exceeds(ing.weight_percent, limit) => {
            base(ids::CODE_HOTLIST_OVER_LIMIT, ComplianceStatus::NonCompliant)
                .limit(Some(limit))
                .details(format!(
                    "{} at {}% exceeds the Hotlist limit of {limit}%",
                    ing.display_name, ing.weight_percent
                ))
                .build()
        }
        limit => base(ids::CODE_HOTLIST_RESTRICTED, ComplianceStatus::Warning)
            .limit(limit)
            .details(format!(
                "{} is restricted on the Hotlist: {}",
                ing.display_name,
                entry.restriction.as_deref().unwrap_or("conditions of use apply")
            ))
            .build(),
    }
}

/// SVHC status and the Annex XVII limit are separate obligations; each yields its own finding.
fn reach(
    entry: &ReachEntry,
    ing: &Ingredient,
    observed: f64,
    jurisdiction: Jurisdiction,
) -> Vec<ComplianceFinding> {
    let base = |code: &str, status: ComplianceStatus| {
        FindingBuilder::new(ids::CHECK_LISTS_REACH, code, status, jurisdiction)
            .substance(&ing.substance_id, ing.display_name.clone())
            .observed(observed)
            .reference("REACH Regulation (EC) No 1907/2006")
            .data(json!({
                "svhc": entry.svhc,
                "annex_xvii_limit": entry.annex_xvii_limit,
            }))
    };

    let mut findings = Vec::new();
    if entry.svhc {
        findings.push(
            base(ids::CODE_REACH_SVHC, ComplianceStatus::Warning)
                .label("REACH SVHC Notification")
                .limit(Some(SVHC_THRESHOLD))
                .details(format!(
                    "{} is a Substance of Very High Concern; communicate above {SVHC_THRESHOLD}%",
                    ing.display_name
                ))
                .build(),
        );
    }

    if let Some(limit) = entry.annex_xvii_limit {
        let finding = if exceeds(observed, limit) {
            base(ids::CODE_REACH_ANNEX_XVII, ComplianceStatus::NonCompliant).details(format!(
                "{} at {observed:.4}% exceeds the Annex XVII restriction of {limit}%",
                ing.display_name
            ))
        } else {
            base(ids::CODE_REACH_ANNEX_XVII, ComplianceStatus::Compliant).details(format!(
                "{} at {observed:.4}% is within the Annex XVII restriction of {limit}%",
                ing.display_name
            ))
        };
        findings.push(
            finding
                .label("REACH Annex XVII Restriction")
                .limit(Some(limit))
                .build(),
        );
    }

    findings
}
