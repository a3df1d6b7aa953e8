use crate::{model::ScentguardConfigV1, presets};
use anyhow::Context;
use scentguard_domain::policy::{
    ConstituentPrecedence, EffectiveConfig, IncidentalBasis, all_check_ids,
};
use scentguard_types::{ProductType, ids};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub certificate_prefix: Option<String>,
    pub include_incidentals: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Dataset directory as written in the config; the caller anchors it.
    pub data_dir: Option<String>,
}

pub fn resolve_config(
    cfg: ScentguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "full".to_string());
    validate_profile(&profile)?;

    let mut effective = presets::preset(&profile);

    if let Some(prefix) = overrides
        .certificate_prefix
        .clone()
        .or(cfg.certificate_prefix.clone())
    {
        validate_prefix(&prefix)?;
        effective.certificate_prefix = prefix;
    }

    // incidentals
    if let Some(include) = overrides.include_incidentals.or(cfg.incidentals.include) {
        effective.incidentals.include = include;
    }
    if let Some(basis) = cfg.incidentals.basis.as_deref() {
        effective.incidentals.basis = parse_basis(basis)?;
    }
    if let Some(precedence) = cfg.incidentals.precedence.as_deref() {
        effective.incidentals.precedence = parse_precedence(precedence)?;
    }

    // categories
    for name in &cfg.categories.unmapped {
        let product_type: ProductType = name
            .parse()
            .with_context(|| "invalid entry in categories.unmapped")?;
        effective.unmapped_product_types.insert(product_type);
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        if !all_check_ids().iter().any(|id| *id == check_id.as_str()) {
            anyhow::bail!(
                "unknown check id in [checks]: {check_id} (expected one of {})",
                all_check_ids().join(", ")
            );
        }
        let Some(enabled) = cc.enabled else { continue };
        if check_id == ids::CHECK_RESTRICTION_LIMITS && !enabled {
            anyhow::bail!("{check_id} cannot be disabled");
        }
        if let Some(entry) = effective.checks.get_mut(check_id) {
            entry.enabled = enabled;
        }
    }

    Ok(ResolvedConfig {
        effective,
        data_dir: cfg.data_dir,
    })
}

fn validate_profile(v: &str) -> anyhow::Result<()> {
    if presets::PROFILES.iter().any(|p| *p == v) {
        return Ok(());
    }
    anyhow::bail!(
        "unknown profile: {v} (expected {})",
        presets::PROFILES.join("|")
    )
}

fn validate_prefix(v: &str) -> anyhow::Result<()> {
    if v.is_empty() || !v.chars().all(|c| c.is_ascii_alphanumeric()) {
        anyhow::bail!("invalid certificate_prefix: '{v}' (expected non-empty ASCII letters/digits)");
    }
    Ok(())
}

fn parse_basis(v: &str) -> anyhow::Result<IncidentalBasis> {
    match v {
        "max" => Ok(IncidentalBasis::Max),
        "typical" => Ok(IncidentalBasis::Typical),
        other => anyhow::bail!("unknown incidentals.basis: {other} (expected max|typical)"),
    }
}

fn parse_precedence(v: &str) -> anyhow::Result<ConstituentPrecedence> {
    match v {
        "restricted" => Ok(ConstituentPrecedence::Restricted),
        "allergen" => Ok(ConstituentPrecedence::Allergen),
        other => {
            anyhow::bail!("unknown incidentals.precedence: {other} (expected restricted|allergen)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(input: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(input)?, Overrides::default())
    }

    #[test]
    fn empty_config_is_the_full_profile() {
        let resolved = resolve("").expect("resolve");
        assert_eq!(resolved.effective, EffectiveConfig::full());
        assert_eq!(resolved.data_dir, None);
    }

    #[test]
    fn file_values_apply() {
        let resolved = resolve(
            r#"
profile = "market"
data_dir = "data/regulatory"
certificate_prefix = "ACME"

[incidentals]
basis = "typical"
precedence = "allergen"

[categories]
unmapped = ["candle", "reed-diffuser"]

[checks."volatile.content"]
enabled = true
"#,
        )
        .expect("resolve");

        let eff = resolved.effective;
        assert_eq!(eff.profile, "market");
        assert_eq!(eff.certificate_prefix, "ACME");
        assert_eq!(eff.incidentals.basis, IncidentalBasis::Typical);
        assert_eq!(eff.incidentals.precedence, ConstituentPrecedence::Allergen);
        assert!(eff.unmapped_product_types.contains(&ProductType::Candle));
        assert!(eff.unmapped_product_types.contains(&ProductType::ReedDiffuser));
        assert!(eff.check_enabled(ids::CHECK_VOLATILE_CONTENT));
        assert!(!eff.check_enabled(ids::CHECK_DONOR_SUBSTANCES));
        assert_eq!(resolved.data_dir.as_deref(), Some("data/regulatory"));
    }

    #[test]
    fn overrides_beat_file_values() {
        let cfg = parse_config_toml(
            "profile = \"market\"\ncertificate_prefix = \"ACME\"\n[incidentals]\ninclude = true\n",
        )
        .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("restriction-only".to_string()),
                certificate_prefix: Some("LAB".to_string()),
                include_incidentals: Some(false),
            },
        )
        .expect("resolve");

        let eff = resolved.effective;
        assert_eq!(eff.profile, "restriction-only");
        assert_eq!(eff.certificate_prefix, "LAB");
        assert!(!eff.incidentals.include);
        assert!(eff.check_enabled(ids::CHECK_RESTRICTION_LIMITS));
        assert!(!eff.check_enabled(ids::CHECK_ALLERGEN_DISCLOSURE));
    }

    #[test]
    fn rejects_invalid_values() {
        for input in [
            "profile = \"strict\"",
            "certificate_prefix = \"A-B\"",
            "[incidentals]\nbasis = \"average\"",
            "[incidentals]\nprecedence = \"first\"",
            "[categories]\nunmapped = [\"spaceship\"]",
            "[checks.\"lists.iecsc\"]\nenabled = true",
            "[checks.\"restriction.limits\"]\nenabled = false",
        ] {
            assert!(resolve(input).is_err(), "{input}");
        }
    }

    #[test]
    fn rejects_type_mismatches_at_parse_time() {
        assert!(parse_config_toml("profile = 3").is_err());
        assert!(parse_config_toml("[categories]\nunmapped = \"candle\"").is_err());
    }
}
