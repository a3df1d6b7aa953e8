use crate::model::{EvaluationRequest, Formula, Ingredient};
use crate::reference::{
    AllergenRecord, AllergenRegime, Constituent, DonorKind, DonorRecord, NaturalMaterial,
    Prop65Entry, ReferenceData, RestrictionKind, RestrictionRule, VolatileRecord,
};
use scentguard_types::{Jurisdiction, ProductType};

pub const CITRAL: &str = "5392-40-5";
pub const LIMONENE: &str = "5989-27-5";
pub const LEMON_OIL: &str = "8008-56-8";
pub const LEMONGRASS_OIL: &str = "8007-02-1";
pub const FORMALDEHYDE: &str = "50-00-0";
pub const QUATERNIUM_15: &str = "51229-78-8";
pub const ETHANOL: &str = "64-17-5";
pub const DPG: &str = "25265-71-8";
pub const ACETONE: &str = "67-64-1";

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn formula(items: &[(&str, &str, f64)]) -> Formula {
    let ingredients = items
        .iter()
        .map(|(id, name, pct)| Ingredient::new(*id, *name, *pct))
        .collect();
    Formula::new("Test Accord", ingredients).expect("valid formula")
}

/// Leave-on request.
pub fn request(product_type: ProductType, jurisdictions: &[Jurisdiction], dilution: f64) -> EvaluationRequest {
    EvaluationRequest::new(product_type, jurisdictions.to_vec(), dilution, true)
        .expect("valid request")
}

pub fn rinse_off_request(
    product_type: ProductType,
    jurisdictions: &[Jurisdiction],
    dilution: f64,
) -> EvaluationRequest {
    EvaluationRequest::new(product_type, jurisdictions.to_vec(), dilution, false)
        .expect("valid request")
}

pub fn rule(substance_id: &str, kind: RestrictionKind, category: &str, limit: f64) -> RestrictionRule {
    RestrictionRule::new(substance_id, substance_id, kind).with_category_limit(category, limit)
}

pub fn donor_record(substance_id: &str, name: &str, kind: DonorKind) -> DonorRecord {
    DonorRecord {
        substance_id: substance_id.to_string(),
        name: name.to_string(),
        kind,
        releases_formaldehyde: true,
        jurisdiction: Jurisdiction::Eu,
        banned: false,
        limit_percent: None,
        labeling_threshold: None,
    }
}

pub fn volatile_record(substance_id: &str, fraction: f64, exempt: bool) -> VolatileRecord {
    VolatileRecord {
        substance_id: substance_id.to_string(),
        volatile_fraction: fraction,
        is_exempt: exempt,
        exempt_reason: exempt.then(|| "exempt compound".to_string()),
    }
}

/// A small dataset built around citral and two citrus oils that carry it.
pub fn citrus_data() -> ReferenceData {
    let mut citral_allergen = AllergenRecord::new(CITRAL, "Citral")
        .with_regime(AllergenRegime::Eu26)
        .with_regime(AllergenRegime::UsIfra);
    citral_allergen.inci_name = Some("CITRAL".to_string());

    let limonene_allergen = AllergenRecord::new(LIMONENE, "Limonene")
        .with_regime(AllergenRegime::Eu26)
        .with_regime(AllergenRegime::Ca24)
        .with_regime(AllergenRegime::UsIfra);

    ReferenceData::new()
        .with_restriction(
            RestrictionRule::new(CITRAL, "Citral", RestrictionKind::Restriction)
                .with_category_limit("4", 0.6)
                .with_category_limit("5A", 0.2),
        )
        .with_allergen(citral_allergen)
        .with_allergen(limonene_allergen)
        .with_natural(
            NaturalMaterial::new(LEMON_OIL, "Lemon Oil")
                .with_restricted(Constituent::new(CITRAL, "Citral", 5.0).with_typical(3.0))
                .with_allergen(Constituent::new(LIMONENE, "Limonene", 70.0)),
        )
        .with_natural(
            NaturalMaterial::new(LEMONGRASS_OIL, "Lemongrass Oil")
                .with_restricted(Constituent::new(CITRAL, "Citral", 85.0))
                .with_allergen(Constituent::new(CITRAL, "Citral", 80.0)),
        )
        .with_donor(DonorRecord {
            limit_percent: Some(0.2),
            ..donor_record(FORMALDEHYDE, "Formaldehyde", DonorKind::Direct)
        })
        .with_donor(DonorRecord {
            banned: true,
            ..donor_record(QUATERNIUM_15, "Quaternium-15", DonorKind::Donor)
        })
        .with_prop65(Prop65Entry {
            substance_id: FORMALDEHYDE.to_string(),
            name: "Formaldehyde (gas)".to_string(),
            warning_required: true,
            nsrl_ug_day: Some(40.0),
            listing_mechanism: Some("Authoritative Bodies".to_string()),
        })
        .with_volatile(volatile_record(ETHANOL, 100.0, false))
        .with_volatile(volatile_record(DPG, 0.0, false))
        .with_volatile(volatile_record(ACETONE, 100.0, true))
}
