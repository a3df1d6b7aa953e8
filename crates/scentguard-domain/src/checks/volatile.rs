use super::EvalContext;
use super::utils::FindingBuilder;
use crate::category;
use crate::reference::VolatileRegulation;
use scentguard_types::{ComplianceFinding, ComplianceStatus, Jurisdiction, ProductType, ids};
use serde::Serialize;
use serde_json::json;

/// Applied when neither the data nor the statutory fallback has a limit.
pub const NO_LIMIT: f64 = 100.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolatileContribution {
    pub substance_id: String,
    pub name: String,
    pub weight_percent: f64,
    pub volatile_fraction: f64,
    pub contribution: f64,
    pub exempt: bool,
    pub exempt_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolatileCalculation {
    pub regulation: VolatileRegulation,
    pub jurisdiction: Jurisdiction,
    pub category: String,
    pub limit_percent: f64,
    /// Non-exempt volatile content, formula-relative.
    pub total_percent: f64,
    pub exempt_percent: f64,
    /// Negative when the limit is exceeded.
    pub margin: f64,
    pub is_compliant: bool,
    pub contributions: Vec<VolatileContribution>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolatileReport {
    pub calculations: Vec<VolatileCalculation>,
    pub findings: Vec<ComplianceFinding>,
}

pub fn run(ctx: &EvalContext<'_>) -> VolatileReport {
    let mut calculations = Vec::new();
    let mut findings = Vec::new();

    for &jurisdiction in ctx.request.jurisdictions() {
        let Some(regulation) = VolatileRegulation::for_jurisdiction(jurisdiction) else {
            continue;
        };
        let calc = calculate(ctx, regulation);
        findings.push(finding(&calc));
        calculations.push(calc);
    }

    VolatileReport {
        calculations,
        findings,
    }
}

pub fn category_for(regulation: VolatileRegulation, product_type: ProductType) -> &'static str {
    match regulation {
        VolatileRegulation::Carb | VolatileRegulation::Canada => category::carb_category(product_type),
        VolatileRegulation::Eu => category::EU_VOLATILE_CATEGORY,
    }
}

fn calculate(ctx: &EvalContext<'_>, regulation: VolatileRegulation) -> VolatileCalculation {
    let category = category_for(regulation, ctx.request.product_type());
    let limit = ctx
        .data
        .volatile_limit(regulation, category)
        .or_else(|| match regulation {
            VolatileRegulation::Carb => category::carb_fallback_limit(category),
            _ => None,
        })
        .unwrap_or(NO_LIMIT);

    let mut total = 0.0;
    let mut exempt_total = 0.0;
    let mut contributions = Vec::with_capacity(ctx.formula.ingredients().len());
    for ing in ctx.formula.ingredients() {
        let record = ctx.data.volatile(&ing.substance_id);
        // Unknown ingredients are assumed fully volatile.
        let fraction = record.map_or(100.0, |r| r.volatile_fraction);
        let exempt = record.is_some_and(|r| r.is_exempt);
        let contribution = ing.weight_percent * fraction / 100.0;

        if exempt {
            exempt_total += contribution;
        } else {
            total += contribution;
        }
        contributions.push(VolatileContribution {
            substance_id: ing.substance_id.clone(),
            name: ing.display_name.clone(),
            weight_percent: ing.weight_percent,
            volatile_fraction: fraction,
            contribution,
            exempt,
            exempt_reason: record.and_then(|r| r.exempt_reason.clone()),
        });
    }

    VolatileCalculation {
        regulation,
        jurisdiction: regulation.jurisdiction(),
        category: category.to_string(),
        limit_percent: limit,
        total_percent: total,
        exempt_percent: exempt_total,
        margin: limit - total,
        is_compliant: total <= limit,
        contributions,
    }
}

fn finding(calc: &VolatileCalculation) -> ComplianceFinding {
    let (status, code) = if calc.is_compliant {
        (ComplianceStatus::Compliant, ids::CODE_VOLATILE_WITHIN_LIMIT)
    } else {
        (ComplianceStatus::NonCompliant, ids::CODE_VOLATILE_OVER_LIMIT)
    };
    let label = calc.regulation.label();

    FindingBuilder::new(ids::CHECK_VOLATILE_CONTENT, code, status, calc.jurisdiction)
        .label(format!("VOC {label} Limit"))
        .observed(calc.total_percent)
        .limit(Some(calc.limit_percent))
        .reference(format!("{label} VOC Regulations"))
        .details(format!(
            "{:.2}% volatile content against a {}% limit for {} (margin {:.2}%, {:.2}% exempt)",
            calc.total_percent, calc.limit_percent, calc.category, calc.margin, calc.exempt_percent
        ))
        .data(json!({
            "regulation": calc.regulation,
            "category": calc.category,
            "margin": calc.margin,
            "exempt_percent": calc.exempt_percent,
        }))
        .build()
}
