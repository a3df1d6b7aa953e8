use crate::raw::*;
use anyhow::bail;
use scentguard_domain::reference::{
    AllergenRecord, AllergenRegime, Constituent, DEFAULT_LEAVE_ON_THRESHOLD,
    DEFAULT_RINSE_OFF_THRESHOLD, DEFAULT_VERSION_TAG, DonorKind, DonorRecord, HotlistEntry,
    NaturalMaterial, Prop65Entry, ReachEntry, RestrictionKind, RestrictionRule, VolatileLimit,
    VolatileRecord, VolatileRegulation,
};
use scentguard_types::Jurisdiction;

pub fn restriction(raw: RawRestriction) -> anyhow::Result<RestrictionRule> {
    let kind = match raw.restriction_type.as_str() {
        "prohibition" => RestrictionKind::Prohibition,
        "restriction" => RestrictionKind::Restriction,
        "specification" => RestrictionKind::Specification,
        "sensitization" => RestrictionKind::Sensitization,
        other => bail!(
            "unknown restriction_type '{other}' for {} (expected prohibition|restriction|specification|sensitization)",
            raw.cas_number
        ),
    };
    Ok(RestrictionRule {
        substance_id: raw.cas_number,
        name: raw.name,
        kind,
        limits_by_category: raw.category_limits,
        general_limit: raw.general_limit,
        version_tag: raw
            .amendment_number
            .map(ordinal)
            .unwrap_or_else(|| DEFAULT_VERSION_TAG.to_string()),
    })
}

/// `51` -> `51st`, `52` -> `52nd`, `11` -> `11th`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Every allergen is also covered by the IFRA labelling guidance used for the US.
pub fn allergen(raw: RawAllergen) -> AllergenRecord {
    let mut record = AllergenRecord::new(raw.cas_number, raw.name).with_regime(AllergenRegime::UsIfra);
    for (flag, regime) in [
        (raw.eu_26, AllergenRegime::Eu26),
        (raw.eu_82, AllergenRegime::Eu82),
        (raw.canada_24, AllergenRegime::Ca24),
        (raw.canada_81, AllergenRegime::Ca81),
    ] {
        if flag {
            record.regimes.insert(regime);
        }
    }
    record.inci_name = raw.inci_name.filter(|s| !s.is_empty());
    record.leave_on_threshold = raw.leave_on_threshold.unwrap_or(DEFAULT_LEAVE_ON_THRESHOLD);
    record.rinse_off_threshold = raw.rinse_off_threshold.unwrap_or(DEFAULT_RINSE_OFF_THRESHOLD);
    record
}

pub fn volatile(raw: RawVolatileIngredient) -> VolatileRecord {
    VolatileRecord {
        substance_id: raw.cas_number,
        volatile_fraction: raw.voc_percent,
        is_exempt: raw.is_exempt,
        exempt_reason: raw.exempt_reason,
    }
}

/// `None` for regulations the engine does not evaluate.
pub fn volatile_limit(raw: RawVolatileLimit) -> Option<VolatileLimit> {
    let regulation = match raw.regulation.as_str() {
        "carb" => VolatileRegulation::Carb,
        "canada" => VolatileRegulation::Canada,
        "eu" => VolatileRegulation::Eu,
        _ => return None,
    };
    Some(VolatileLimit {
        regulation,
        product_category: raw.product_category,
        limit_percent: raw.limit_percent,
    })
}

pub fn donor(raw: RawDonor) -> DonorRecord {
    let kind = match raw.donor_type.as_deref() {
        Some("direct") => DonorKind::Direct,
        Some("donor") => DonorKind::Donor,
        _ => DonorKind::NonDonor,
    };
    DonorRecord {
        substance_id: raw.cas_number,
        name: raw.name,
        kind,
        releases_formaldehyde: raw.releases_formaldehyde,
        jurisdiction: Jurisdiction::Eu,
        banned: raw.eu_status.as_deref() == Some("banned"),
        limit_percent: raw.eu_limit_percent,
        labeling_threshold: raw.labeling_threshold,
    }
}

pub fn natural(raw: RawNatural) -> NaturalMaterial {
    let convert = |c: RawConstituent| Constituent {
        substance_id: c.cas_number,
        name: c.name,
        max_percent: c.max_percentage,
        typical_percent: c.typical_percentage,
    };
    NaturalMaterial {
        substance_id: raw.cas_number,
        name: raw.name,
        restricted_constituents: raw.restricted_constituents.into_iter().map(convert).collect(),
        allergen_constituents: raw.allergen_constituents.into_iter().map(convert).collect(),
    }
}

pub fn prop65(raw: RawProp65) -> Prop65Entry {
    Prop65Entry {
        substance_id: raw.cas_number,
        name: raw.name,
        warning_required: raw.warning_required,
        nsrl_ug_day: raw.nsrl_ug_day,
        listing_mechanism: raw.listing_mechanism,
    }
}

pub fn hotlist(raw: RawHotlist) -> HotlistEntry {
    HotlistEntry {
        substance_id: raw.cas_number,
        name: raw.name,
        prohibited: raw.restriction_type.as_deref() == Some("prohibited"),
        limit_percent: raw.limit_percent,
        restriction: raw.restriction,
    }
}

pub fn reach(raw: RawReach) -> ReachEntry {
    ReachEntry {
        substance_id: raw.cas_number,
        name: raw.name,
        svhc: raw.svhc,
        annex_xvii_limit: raw.annex_xvii_restriction.and_then(|r| r.limit_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(51), "51st");
        assert_eq!(ordinal(52), "52nd");
        assert_eq!(ordinal(43), "43rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(112), "112th");
        assert_eq!(ordinal(49), "49th");
    }

    #[test]
    fn allergen_flags_become_regimes() {
        let raw: RawAllergen = serde_json::from_str(
            r#"{"cas_number": "5989-27-5", "name": "Limonene", "eu_26": true, "canada_81": true}"#,
        )
        .expect("parse");
        let record = allergen(raw);
        let regimes: Vec<_> = record.regimes.iter().copied().collect();
        assert_eq!(
            regimes,
            vec![AllergenRegime::Eu26, AllergenRegime::Ca81, AllergenRegime::UsIfra]
        );
        assert_eq!(record.leave_on_threshold, DEFAULT_LEAVE_ON_THRESHOLD);
    }

    #[test]
    fn unknown_restriction_type_is_an_error() {
        let raw: RawRestriction =
            serde_json::from_str(r#"{"cas_number": "1-1-1", "restriction_type": "ban"}"#)
                .expect("parse");
        let err = restriction(raw).unwrap_err();
        assert!(err.to_string().contains("unknown restriction_type 'ban'"));
    }

    #[test]
    fn otc_limits_are_skipped() {
        let raw: RawVolatileLimit = serde_json::from_str(
            r#"{"regulation": "otc", "product_category": "x", "limit_percent": 1.0}"#,
        )
        .expect("parse");
        assert!(volatile_limit(raw).is_none());
    }
}
