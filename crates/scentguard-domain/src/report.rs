use crate::checks::allergen::AllergenReport;
use crate::checks::donor::DonorReport;
use crate::checks::lists::ListsReport;
use crate::checks::restriction::RestrictionResult;
use crate::checks::volatile::VolatileReport;
use serde::Serialize;

/// Per-domain intermediate results. A domain that did not run is `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationDetails {
    pub restriction: RestrictionResult,
    pub allergen: Option<AllergenReport>,
    pub volatile: Option<VolatileReport>,
    pub donor: Option<DonorReport>,
    pub lists: ListsReport,
}
