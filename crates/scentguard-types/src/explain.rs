//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check evaluates and which regulation it tracks.
    pub description: &'static str,
    /// How to resolve findings.
    pub remediation: &'static str,
    /// Before/after formula fragments.
    pub examples: ExamplePair,
}

/// Before and after formula fragments.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Formula fragment that would trigger a finding.
    pub before: &'static str,
    /// Formula fragment that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_RESTRICTION_LIMITS => Some(explain_restriction_limits()),
        ids::CHECK_ALLERGEN_DISCLOSURE => Some(explain_allergen_disclosure()),
        ids::CHECK_VOLATILE_CONTENT => Some(explain_volatile_content()),
        ids::CHECK_DONOR_SUBSTANCES => Some(explain_donor_substances()),
        ids::CHECK_LISTS_PROP65 => Some(explain_prop65()),
        ids::CHECK_LISTS_CANADA_HOTLIST => Some(explain_canada_hotlist()),
        ids::CHECK_LISTS_REACH => Some(explain_reach()),

        // Codes
        ids::CODE_PROHIBITED => Some(retitled(explain_restriction_limits(), "Prohibited Substance")),
        ids::CODE_OVER_LIMIT => Some(retitled(explain_restriction_limits(), "Over Category Limit")),
        ids::CODE_NEAR_LIMIT => Some(explain_near_limit()),
        ids::CODE_WITHIN_LIMIT => Some(retitled(explain_restriction_limits(), "Within Category Limit")),
        ids::CODE_UNRESTRICTED => Some(retitled(explain_restriction_limits(), "Unrestricted Substance")),
        ids::CODE_NATURAL_VIA_INCIDENTALS => Some(explain_natural_via_incidentals()),
        ids::CODE_CATEGORY_NOT_APPLICABLE => Some(explain_category_not_applicable()),
        ids::CODE_DISCLOSURE_REQUIRED => {
            Some(retitled(explain_allergen_disclosure(), "Allergen Disclosure Required"))
        }
        ids::CODE_BELOW_DISCLOSURE_THRESHOLD => Some(retitled(
            explain_allergen_disclosure(),
            "Allergen Below Disclosure Threshold",
        )),
        ids::CODE_VOLATILE_OVER_LIMIT => {
            Some(retitled(explain_volatile_content(), "Volatile Content Over Limit"))
        }
        ids::CODE_VOLATILE_WITHIN_LIMIT => {
            Some(retitled(explain_volatile_content(), "Volatile Content Within Limit"))
        }
        ids::CODE_DONOR_BANNED => Some(retitled(explain_donor_substances(), "Banned Donor Substance")),
        ids::CODE_DONOR_OVER_LIMIT => Some(retitled(explain_donor_substances(), "Donor Over Limit")),
        ids::CODE_DONOR_LABELING_REQUIRED => {
            Some(retitled(explain_donor_substances(), "Donor Labeling Required"))
        }
        ids::CODE_DONOR_BELOW_LABELING => {
            Some(retitled(explain_donor_substances(), "Donor Below Labeling Threshold"))
        }
        ids::CODE_PROP65_WARNING => Some(retitled(explain_prop65(), "Prop 65 Warning Required")),
        ids::CODE_PROP65_LISTED => Some(retitled(explain_prop65(), "Prop 65 Listed Substance")),
        ids::CODE_HOTLIST_PROHIBITED => {
            Some(retitled(explain_canada_hotlist(), "Hotlist Prohibited Substance"))
        }
        ids::CODE_HOTLIST_OVER_LIMIT => Some(retitled(explain_canada_hotlist(), "Hotlist Limit Exceeded")),
        ids::CODE_HOTLIST_RESTRICTED => {
            Some(retitled(explain_canada_hotlist(), "Hotlist Restricted Substance"))
        }
        ids::CODE_REACH_SVHC => Some(retitled(explain_reach(), "REACH SVHC Notification")),
        ids::CODE_REACH_ANNEX_XVII => Some(retitled(explain_reach(), "REACH Annex XVII Restriction")),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_RESTRICTION_LIMITS,
        ids::CHECK_ALLERGEN_DISCLOSURE,
        ids::CHECK_VOLATILE_CONTENT,
        ids::CHECK_DONOR_SUBSTANCES,
        ids::CHECK_LISTS_PROP65,
        ids::CHECK_LISTS_CANADA_HOTLIST,
        ids::CHECK_LISTS_REACH,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PROHIBITED,
        ids::CODE_OVER_LIMIT,
        ids::CODE_NEAR_LIMIT,
        ids::CODE_WITHIN_LIMIT,
        ids::CODE_UNRESTRICTED,
        ids::CODE_NATURAL_VIA_INCIDENTALS,
        ids::CODE_CATEGORY_NOT_APPLICABLE,
        ids::CODE_DISCLOSURE_REQUIRED,
        ids::CODE_BELOW_DISCLOSURE_THRESHOLD,
        ids::CODE_VOLATILE_OVER_LIMIT,
        ids::CODE_VOLATILE_WITHIN_LIMIT,
        ids::CODE_DONOR_BANNED,
        ids::CODE_DONOR_OVER_LIMIT,
        ids::CODE_DONOR_LABELING_REQUIRED,
        ids::CODE_DONOR_BELOW_LABELING,
        ids::CODE_PROP65_WARNING,
        ids::CODE_PROP65_LISTED,
        ids::CODE_HOTLIST_PROHIBITED,
        ids::CODE_HOTLIST_OVER_LIMIT,
        ids::CODE_HOTLIST_RESTRICTED,
        ids::CODE_REACH_SVHC,
        ids::CODE_REACH_ANNEX_XVII,
    ]
}

fn retitled(mut exp: Explanation, title: &'static str) -> Explanation {
    exp.title = title;
    exp
}

// --- Check-level explanations ---

fn explain_restriction_limits() -> Explanation {
    Explanation {
        title: "IFRA Restriction Limits",
        description: "\
Compares each restricted substance against the IFRA Standard limit for the
product's use category.

The concentration checked is the substance's direct share of the formula plus
any incidental share carried in by natural materials (essential oils and
similar), scaled by the fragrance dosage in the finished product.

- Prohibited substances are non-compliant at any level.
- Above the category limit is non-compliant.
- At or above 90% of the limit is a warning.",
        remediation: "\
Reduce the substance, or the natural materials that carry it, until the
dilution-adjusted total is below the category limit. Lowering the fragrance
dosage in the finished product scales every restricted substance down.

Prohibited substances must be removed entirely.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "97-53-0", "display_name": "Eugenol", "weight_percent": 12.0 }
// fine fragrance at 20% dosage: 2.4% observed vs 2.0% limit"#,
            after: r#"{ "substance_id": "97-53-0", "display_name": "Eugenol", "weight_percent": 8.0 }
// fine fragrance at 20% dosage: 1.6% observed vs 2.0% limit"#,
        },
    }
}

fn explain_allergen_disclosure() -> Explanation {
    Explanation {
        title: "Allergen Disclosure",
        description: "\
Detects labelled fragrance allergens and decides whether they must appear in
the ingredient declaration.

Disclosure is required when the concentration in the finished product reaches
the threshold: 0.001% for leave-on products and 0.01% for rinse-off products,
unless the reference data states otherwise. Regime membership (EU 26, EU 82,
Canada 24, Canada 81, IFRA transparency in the US) decides which requested
markets are affected.",
        remediation: "\
Add the listed allergens to the product label for each affected market, or
reduce them below the disclosure threshold.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "5989-27-5", "display_name": "Limonene", "weight_percent": 1.0 }
// leave-on at 10% dosage: 0.1% in product, must be declared"#,
            after: r#"// label copy: "... , LIMONENE, ...""#,
        },
    }
}

fn explain_volatile_content() -> Explanation {
    Explanation {
        title: "Volatile Organic Content",
        description: "\
Sums the volatile organic share of every non-exempt ingredient and compares it
with the cap for the product category under each requested market's
regulation (CARB for the US, the Canadian VOC regulations, and the EU).

Ingredients without volatility data are counted as fully volatile. Exempt
compounds are reported separately and excluded from the total.",
        remediation: "\
Replace volatile solvents with exempt or low-volatility alternatives, or
reformulate so the total volatile share is below the category cap.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "64-17-5", "display_name": "Ethanol", "weight_percent": 40.0 }
// air freshener under CARB: 40% volatile vs 15% cap"#,
            after: r#"{ "substance_id": "64-17-5", "display_name": "Ethanol", "weight_percent": 10.0 }"#,
        },
    }
}

fn explain_donor_substances() -> Explanation {
    Explanation {
        title: "Formaldehyde Donors",
        description: "\
Flags formaldehyde and formaldehyde-releasing preservatives.

Banned donors are non-compliant when their regulating market is requested.
Donors above their concentration limit are non-compliant. Donors at or above
the labeling threshold (0.05% by default) require a \"contains formaldehyde\"
warning on the label.",
        remediation: "\
Switch to a non-releasing preservative system, or reduce the donor below its
limit and add the required label warning.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "6440-58-0", "display_name": "DMDM Hydantoin", "weight_percent": 1.0 }"#,
            after: r#"{ "substance_id": "122-99-6", "display_name": "Phenoxyethanol", "weight_percent": 1.0 }"#,
        },
    }
}

fn explain_prop65() -> Explanation {
    Explanation {
        title: "California Proposition 65",
        description: "\
Reports ingredients on the Proposition 65 list when the US market is
requested. Listed substances generally require a clear and reasonable warning;
the reported limit is the No Significant Risk Level where one is published.",
        remediation: "\
Provide the Proposition 65 warning for products sold in California, or remove
the listed substance.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "94-59-7", "display_name": "Safrole", "weight_percent": 0.1 }"#,
            after: r#"// substance removed from the formula"#,
        },
    }
}

fn explain_canada_hotlist() -> Explanation {
    Explanation {
        title: "Health Canada Cosmetic Ingredient Hotlist",
        description: "\
Reports ingredients on the Canadian Hotlist when the Canadian market is
requested. Prohibited entries are non-compliant. Restricted entries are a
warning, or non-compliant when the formula share exceeds the listed limit.",
        remediation: "\
Remove prohibited substances. Keep restricted substances under the Hotlist
limit and meet any labeling conditions attached to the entry.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "50-00-0", "display_name": "Formaldehyde", "weight_percent": 0.5 }"#,
            after: r#"// preservative replaced with a non-listed alternative"#,
        },
    }
}

fn explain_reach() -> Explanation {
    Explanation {
        title: "EU REACH",
        description: "\
Reports Substances of Very High Concern (notification obligations above 0.1%)
and Annex XVII restrictions for products placed on the EU or UK market.",
        remediation: "\
Prepare the SVHC notification where required. Reduce Annex XVII substances
below the restriction limit.",
        examples: ExamplePair {
            before: r#"{ "substance_id": "84-66-2", "display_name": "Diethyl phthalate", "weight_percent": 5.0 }"#,
            after: r#"{ "substance_id": "120-51-4", "display_name": "Benzyl benzoate", "weight_percent": 5.0 }"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_near_limit() -> Explanation {
    let mut exp = explain_restriction_limits();
    exp.title = "Approaching Category Limit";
    exp.remediation = "\
The substance is compliant but within 10% of its limit. Small batch-to-batch
variation in natural materials can push it over. Consider reducing it to leave
headroom.";
    exp
}

fn explain_natural_via_incidentals() -> Explanation {
    let mut exp = explain_restriction_limits();
    exp.title = "Natural Material";
    exp.description = "\
The ingredient is a natural material. It is not checked directly; its
restricted constituents are added to the incidental totals and checked as
their own substances.";
    exp
}

fn explain_category_not_applicable() -> Explanation {
    let mut exp = explain_restriction_limits();
    exp.title = "Category Not Applicable";
    exp.description = "\
The product type has no IFRA use category mapping in the active configuration,
so the restriction limits do not apply and every ingredient is reported
compliant.";
    exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        assert!(lookup_explanation(ids::CHECK_RESTRICTION_LIMITS).is_some());
        assert!(lookup_explanation(ids::CHECK_ALLERGEN_DISCLOSURE).is_some());
        assert!(lookup_explanation(ids::CHECK_VOLATILE_CONTENT).is_some());
        assert!(lookup_explanation(ids::CHECK_DONOR_SUBSTANCES).is_some());
    }

    #[test]
    fn lookup_by_code() {
        let exp = lookup_explanation(ids::CODE_NEAR_LIMIT).expect("near_limit explained");
        assert_eq!(exp.title, "Approaching Category Limit");
        assert!(lookup_explanation(ids::CODE_REACH_SVHC).is_some());
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }

    #[test]
    fn all_check_ids_are_valid() {
        for id in all_check_ids() {
            assert!(
                lookup_explanation(id).is_some(),
                "check_id {} should be in registry",
                id
            );
        }
    }

    #[test]
    fn all_codes_are_valid() {
        for code in all_codes() {
            assert!(
                lookup_explanation(code).is_some(),
                "code {} should be in registry",
                code
            );
        }
    }
}
