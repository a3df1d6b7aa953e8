use crate::model::{EvaluationRequest, Formula};
use crate::policy::EffectiveConfig;
use crate::reference::ReferenceData;
use crate::report::EvaluationDetails;
use scentguard_types::{ComplianceFinding, Jurisdiction, ids};

pub mod allergen;
pub mod donor;
pub mod lists;
pub mod restriction;
pub mod volatile;

mod utils;


/// Everything an evaluator may read. Evaluators never see each other's output.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
    pub formula: &'a Formula,
    pub request: &'a EvaluationRequest,
    pub data: &'a ReferenceData,
    pub cfg: &'a EffectiveConfig,
}

impl EvalContext<'_> {
    fn wants(&self, check_id: &str, markets: &[Jurisdiction]) -> bool {
        self.cfg.check_enabled(check_id)
            && self.request.jurisdictions().iter().any(|j| markets.contains(j))
    }
}

/// Run every applicable evaluator in fixed order, appending findings to `out`.
pub fn run_all(ctx: &EvalContext<'_>, out: &mut Vec<ComplianceFinding>) -> EvaluationDetails {
    let restriction = restriction::run(ctx);
    out.extend(restriction.findings.iter().cloned());

    let allergen = ctx
        .wants(ids::CHECK_ALLERGEN_DISCLOSURE, &allergen::ALLERGEN_MARKETS)
        .then(|| allergen::run(ctx));
    if let Some(r) = &allergen {
        out.extend(r.findings.iter().cloned());
    }

    let volatile = ctx
        .wants(
            ids::CHECK_VOLATILE_CONTENT,
            &[Jurisdiction::Us, Jurisdiction::Ca, Jurisdiction::Eu],
        )
        .then(|| volatile::run(ctx));
    if let Some(r) = &volatile {
        out.extend(r.findings.iter().cloned());
    }

    let donor = ctx
        .cfg
        .check_enabled(ids::CHECK_DONOR_SUBSTANCES)
        .then(|| donor::run(ctx));
    if let Some(r) = &donor {
        out.extend(r.findings.iter().cloned());
    }

    let mut lists = lists::ListsReport::default();
    if ctx.wants(ids::CHECK_LISTS_PROP65, &[Jurisdiction::Us]) {
        lists::run_prop65(ctx, &mut lists);
    }
    if ctx.wants(ids::CHECK_LISTS_CANADA_HOTLIST, &[Jurisdiction::Ca]) {
        lists::run_canada_hotlist(ctx, &mut lists);
    }
    if ctx.wants(ids::CHECK_LISTS_REACH, &[Jurisdiction::Eu, Jurisdiction::Uk]) {
        let market = if ctx.request.requests(Jurisdiction::Eu) {
            Jurisdiction::Eu
        } else {
            Jurisdiction::Uk
        };
        lists::run_reach(ctx, market, &mut lists);
    }
    out.extend(lists.findings.iter().cloned());

    EvaluationDetails {
        restriction,
        allergen,
        volatile,
        donor,
        lists,
    }
}
