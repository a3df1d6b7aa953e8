use super::EvalContext;
use super::utils::{FindingBuilder, all_compliant, exceeds, reaches};
use crate::incidentals::{self, IncidentalReport};
use crate::policy::NEAR_LIMIT_RATIO;
use crate::reference::{RestrictionKind, RestrictionRule};
use scentguard_types::{ComplianceFinding, ComplianceStatus, Jurisdiction, ids};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RestrictionResult {
    /// `None` when the product type has no IFRA category.
    pub category: Option<String>,
    pub is_compliant: bool,
    pub findings: Vec<ComplianceFinding>,
    pub incidental_reports: Vec<IncidentalReport>,
    pub incidental_totals: BTreeMap<String, f64>,
}

pub fn run(ctx: &EvalContext<'_>) -> RestrictionResult {
    let Some(category) = ctx.cfg.category_for(ctx.request.product_type()) else {
        return not_applicable(ctx);
    };

    let inc = incidentals::resolve(ctx.formula, ctx.data, &ctx.cfg.incidentals);
    let mut findings = Vec::with_capacity(ctx.formula.ingredients().len());

    // Pass 1: everything the formula lists directly.
    for ing in ctx.formula.ingredients() {
        let sid = ing.substance_id.as_str();

        if ctx.data.is_natural(sid) {
            findings.push(
                FindingBuilder::new(
                    ids::CHECK_RESTRICTION_LIMITS,
                    ids::CODE_NATURAL_VIA_INCIDENTALS,
                    ComplianceStatus::Compliant,
                    Jurisdiction::Global,
                )
                .label(format!("IFRA Category {category} - Natural Material"))
                .substance(sid, ing.display_name.clone())
                .reference("IFRA Standards")
                .details(format!(
                    "{} is a natural material; its constituents are assessed as incidentals",
                    ing.display_name
                ))
                .build(),
            );
            continue;
        }

        let Some(rule) = ctx.data.restriction(sid) else {
            findings.push(
                FindingBuilder::new(
                    ids::CHECK_RESTRICTION_LIMITS,
                    ids::CODE_UNRESTRICTED,
                    ComplianceStatus::Compliant,
                    Jurisdiction::Global,
                )
                .label(format!("IFRA Category {category} - Unrestricted"))
                .substance(sid, ing.display_name.clone())
                .reference("IFRA Standards")
                .details(format!("{} has no IFRA restriction", ing.display_name))
                .build(),
            );
            continue;
        };

        let incidental = inc.total(sid);
        let total = ing.weight_percent + incidental;
        let observed = ctx.request.in_product(total);
        findings.push(assess(
            rule,
            category,
            sid,
            &ing.display_name,
            ing.weight_percent,
            incidental,
            observed,
            false,
        ));
    }

    // Pass 2: restricted substances that only arrive through naturals, by id.
    for (sid, &incidental) in &inc.totals {
        if incidental <= 0.0 || ctx.formula.contains(sid) {
            continue;
        }
        let Some(rule) = ctx.data.restriction(sid) else {
            continue;
        };
        let observed = ctx.request.in_product(incidental);
        findings.push(assess(rule, category, sid, &rule.name, 0.0, incidental, observed, true));
    }

    RestrictionResult {
        category: Some(category.to_string()),
        is_compliant: all_compliant(&findings),
        findings,
        incidental_reports: inc.reports,
        incidental_totals: inc.totals,
    }
}

/// Status and code for an observed in-product value against a rule.
pub fn classify(kind: RestrictionKind, observed: f64, limit: Option<f64>) -> (ComplianceStatus, &'static str) {
    if kind == RestrictionKind::Prohibition {
        return (ComplianceStatus::NonCompliant, ids::CODE_PROHIBITED);
    }
    match limit {
        Some(limit) if exceeds(observed, limit) => {
            (ComplianceStatus::NonCompliant, ids::CODE_OVER_LIMIT)
        }
        Some(limit) if reaches(observed, NEAR_LIMIT_RATIO * limit) => {
            (ComplianceStatus::Warning, ids::CODE_NEAR_LIMIT)
        }
        _ => (ComplianceStatus::Compliant, ids::CODE_WITHIN_LIMIT),
    }
}

#[allow(clippy::too_many_arguments)]
fn assess(
    rule: &RestrictionRule,
    category: &str,
    substance_id: &str,
    name: &str,
    direct: f64,
    incidental: f64,
    observed: f64,
    incidental_only: bool,
) -> ComplianceFinding {
    let limit = rule.limit_for(category);
    let (status, code) = classify(rule.kind, observed, limit);

    let mut label = match (rule.kind, limit) {
        (RestrictionKind::Prohibition, _) => format!("IFRA Category {category} - Prohibited"),
        (_, Some(limit)) => format!("IFRA Category {category} - Max {limit}%"),
        (_, None) => format!("IFRA Category {category} - No Category Limit"),
    };
    let mut ingredient_name = name.to_string();
    if incidental_only {
        label.push_str(" (incidental)");
        ingredient_name.push_str(" (incidental)");
    }

    let total = direct + incidental;
    FindingBuilder::new(ids::CHECK_RESTRICTION_LIMITS, code, status, Jurisdiction::Global)
        .label(label)
        .substance(substance_id, ingredient_name)
        .observed(observed)
        .limit(limit)
        .reference(format!("IFRA {} Amendment", rule.version_tag))
        .details(format!(
            "{name}: {direct:.4}% direct + {incidental:.4}% incidentals = {total:.4}% ({observed:.4}% in product)"
        ))
        .data(json!({
            "kind": rule.kind,
            "category": category,
            "direct_percent": direct,
            "incidental_percent": incidental,
            "total_percent": total,
        }))
        .build()
}

fn not_applicable(ctx: &EvalContext<'_>) -> RestrictionResult {
    let product_type = ctx.request.product_type();
    let findings = ctx
        .formula
        .ingredients()
        .iter()
        .map(|ing| {
            FindingBuilder::new(
                ids::CHECK_RESTRICTION_LIMITS,
                ids::CODE_CATEGORY_NOT_APPLICABLE,
                ComplianceStatus::Compliant,
                Jurisdiction::Global,
            )
            .label("IFRA Category - Not Applicable")
            .substance(&ing.substance_id, ing.display_name.clone())
            .reference("IFRA Standards")
            .details(format!("product type {product_type} has no IFRA category"))
            .build()
        })
        .collect();

    RestrictionResult {
        category: None,
        is_compliant: true,
        findings,
        incidental_reports: Vec::new(),
        incidental_totals: BTreeMap::new(),
    }
}
