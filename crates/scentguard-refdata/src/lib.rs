//! Reference data adapters: read the regulatory JSON datasets into [`ReferenceData`].
//!
//! This crate is allowed to do filesystem IO. A missing dataset file yields an empty
//! table; a file that exists but cannot be parsed is an error naming the file.

#![forbid(unsafe_code)]

mod convert;
mod raw;
mod store;

use anyhow::Context;
use camino::Utf8Path;
use scentguard_domain::reference::{DEFAULT_DONOR_LABELING_THRESHOLD, ReferenceData};
use serde::de::DeserializeOwned;

pub use store::ReferenceStore;

pub const RESTRICTIONS_FILE: &str = "ifra_restrictions.json";
pub const ALLERGENS_FILE: &str = "allergens.json";
pub const VOLATILE_INGREDIENTS_FILE: &str = "voc_ingredients.json";
pub const VOLATILE_LIMITS_FILE: &str = "voc_limits.json";
pub const DONORS_FILE: &str = "formaldehyde_donors.json";
pub const NATURALS_FILE: &str = "naturals.json";
pub const PROP65_FILE: &str = "prop65.json";
pub const CANADA_HOTLIST_FILE: &str = "canada_hotlist.json";
pub const REACH_FILE: &str = "reach.json";

pub const DATASET_FILES: [&str; 9] = [
    RESTRICTIONS_FILE,
    ALLERGENS_FILE,
    VOLATILE_INGREDIENTS_FILE,
    VOLATILE_LIMITS_FILE,
    DONORS_FILE,
    NATURALS_FILE,
    PROP65_FILE,
    CANADA_HOTLIST_FILE,
    REACH_FILE,
];

/// Build the in-memory reference tables from the datasets in `dir`.
pub fn load_reference_data(dir: &Utf8Path) -> anyhow::Result<ReferenceData> {
    let mut data = ReferenceData::new();

    let restrictions: raw::RestrictionsFile = read_dataset(dir, RESTRICTIONS_FILE)?;
    for r in restrictions.restrictions {
        let rule = convert::restriction(r).with_context(|| format!("parse {RESTRICTIONS_FILE}"))?;
        data.insert_restriction(rule);
    }

    let allergens: raw::AllergensFile = read_dataset(dir, ALLERGENS_FILE)?;
    for a in allergens.allergens {
        data.insert_allergen(convert::allergen(a));
    }

    let volatiles: raw::VolatileIngredientsFile = read_dataset(dir, VOLATILE_INGREDIENTS_FILE)?;
    for v in volatiles.ingredients {
        data.insert_volatile(convert::volatile(v));
    }

    let limits: raw::VolatileLimitsFile = read_dataset(dir, VOLATILE_LIMITS_FILE)?;
    for l in limits.limits {
        let regulation = l.regulation.clone();
        match convert::volatile_limit(l) {
            Some(limit) => data.insert_volatile_limit(limit),
            None => tracing::debug!(regulation = %regulation, "skipping volatile limit for unevaluated regulation"),
        }
    }

    let donors: raw::DonorsFile = read_dataset(dir, DONORS_FILE)?;
    data.set_donor_labeling_threshold(
        donors
            .testing_requirements
            .labeling_trigger_eu
            .unwrap_or(DEFAULT_DONOR_LABELING_THRESHOLD),
    );
    for d in donors.formaldehyde_donors {
        data.insert_donor(convert::donor(d));
    }

    let naturals: raw::NaturalsFile = read_dataset(dir, NATURALS_FILE)?;
    for n in naturals.naturals {
        data.insert_natural(convert::natural(n));
    }

    let prop65: raw::SubstancesFile<raw::RawProp65> = read_dataset(dir, PROP65_FILE)?;
    for p in prop65.substances {
        data.insert_prop65(convert::prop65(p));
    }

    let hotlist: raw::SubstancesFile<raw::RawHotlist> = read_dataset(dir, CANADA_HOTLIST_FILE)?;
    for h in hotlist.substances {
        data.insert_canada_hotlist(convert::hotlist(h));
    }

    let reach: raw::SubstancesFile<raw::RawReach> = read_dataset(dir, REACH_FILE)?;
    for r in reach.substances {
        data.insert_reach(convert::reach(r));
    }

    let counts = data.counts();
    tracing::debug!(
        dir = %dir,
        restrictions = counts.restrictions,
        allergens = counts.allergens,
        volatiles = counts.volatiles,
        volatile_limits = counts.volatile_limits,
        donors = counts.donors,
        naturals = counts.naturals,
        prop65 = counts.prop65,
        canada_hotlist = counts.canada_hotlist,
        reach = counts.reach,
        "loaded reference data"
    );

    Ok(data)
}

fn read_dataset<T>(dir: &Utf8Path, name: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(name);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "dataset missing; using empty table");
            return Ok(T::default());
        }
        Err(e) => return Err(e).with_context(|| format!("read {path}")),
    };
    serde_json::from_str(&text).with_context(|| format!("parse {path}"))
}
