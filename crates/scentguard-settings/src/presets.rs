use scentguard_domain::policy::{CheckPolicy, EffectiveConfig, all_check_ids};
use scentguard_types::ids;

pub const PROFILES: [&str; 3] = ["full", "restriction-only", "market"];

/// Preset profiles decide which checks run. Everything else starts from defaults.
///
/// Callers validate the profile name first; unknown names get the full profile.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "restriction-only" => only(profile, &[ids::CHECK_RESTRICTION_LIMITS]),
        // Label and market-entry screening: no volatile budget, no donor assessment.
        "market" => only(
            profile,
            &[
                ids::CHECK_RESTRICTION_LIMITS,
                ids::CHECK_ALLERGEN_DISCLOSURE,
                ids::CHECK_LISTS_PROP65,
                ids::CHECK_LISTS_CANADA_HOTLIST,
                ids::CHECK_LISTS_REACH,
            ],
        ),
        _ => EffectiveConfig::full(),
    }
}

fn only(profile: &str, enabled: &[&str]) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::full();
    cfg.profile = profile.to_string();
    for id in all_check_ids() {
        let policy = if enabled.contains(id) {
            CheckPolicy::enabled()
        } else {
            CheckPolicy::disabled()
        };
        cfg.checks.insert(id.to_string(), policy);
    }
    cfg
}
