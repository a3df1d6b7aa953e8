//! The `check` use case: resolve config, load reference data, evaluate a formula.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use scentguard_domain::model::EvaluationRequest;
use scentguard_domain::report::EvaluationDetails;
use scentguard_refdata::ReferenceStore;
use scentguard_settings::{Overrides, ResolvedConfig};
use scentguard_types::{ComplianceReport, Jurisdiction, ProductType};
use time::OffsetDateTime;

use crate::formula::parse_formula_json;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Directory that relative paths in the config are anchored to.
    pub config_base: &'a Utf8Path,
    /// Dataset directory from the command line; beats `data_dir` in the config.
    pub data_dir: Option<&'a Utf8Path>,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Formula file contents.
    pub formula_text: &'a str,
    pub product_type: ProductType,
    pub jurisdictions: Vec<Jurisdiction>,
    pub dilution_percent: f64,
    pub leave_on: bool,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ComplianceReport,
    /// Per-domain intermediate results behind the report.
    pub details: EvaluationDetails,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Dataset directory the reference data was read from.
    pub data_dir: Utf8PathBuf,
}

/// Run the check use case with a fresh reference store.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let resolved = resolve_check_config(&input)?;
    let data_dir = data_dir_for(&input, &resolved)?;
    let store = ReferenceStore::new(data_dir);
    run_check_with_store(input, resolved, &store)
}

/// Run the check use case against an already opened store, so repeated checks
/// share one loaded snapshot.
pub fn run_check_with_store(
    input: CheckInput<'_>,
    resolved: ResolvedConfig,
    store: &ReferenceStore,
) -> anyhow::Result<CheckOutput> {
    let formula = parse_formula_json(input.formula_text).context("parse formula")?;
    let request = EvaluationRequest::new(
        input.product_type,
        input.jurisdictions.clone(),
        input.dilution_percent,
        input.leave_on,
    )
    .context("build evaluation request")?;

    let data = store
        .load()
        .with_context(|| format!("load reference data from {}", store.dir()))?;

    let evaluation = scentguard_domain::evaluate_at(
        &formula,
        &request,
        &data,
        &resolved.effective,
        OffsetDateTime::now_utc(),
    );

    let report = &evaluation.report;
    tracing::info!(
        formula = %report.formula_name,
        product_type = %report.product_type,
        compliant = report.is_compliant,
        non_compliant = report.counts.non_compliant,
        warnings = report.counts.warning,
        certificate = report.certificate_id.as_deref().unwrap_or("-"),
        "evaluation complete"
    );

    Ok(CheckOutput {
        report: evaluation.report,
        details: evaluation.details,
        resolved_config: resolved,
        data_dir: store.dir().to_owned(),
    })
}

/// Parse and resolve the config text in `input` (empty text means defaults).
pub fn resolve_check_config(input: &CheckInput<'_>) -> anyhow::Result<ResolvedConfig> {
    let cfg = if input.config_text.trim().is_empty() {
        scentguard_settings::ScentguardConfigV1::default()
    } else {
        scentguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    scentguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")
}

fn data_dir_for(input: &CheckInput<'_>, resolved: &ResolvedConfig) -> anyhow::Result<Utf8PathBuf> {
    if let Some(dir) = input.data_dir {
        return Ok(dir.to_owned());
    }
    match resolved.data_dir.as_deref() {
        Some(dir) => Ok(input.config_base.join(dir)),
        None => anyhow::bail!(
            "no reference data directory: pass --data-dir or set data_dir in the config"
        ),
    }
}

/// Map the report to an exit code: 0 = compliant, 2 = non-compliant.
pub fn verdict_exit_code(report: &ComplianceReport) -> i32 {
    if report.is_compliant { 0 } else { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scentguard_types::{ComplianceStatus, ids};
    use tempfile::TempDir;

    const LEMON_FORMULA: &str = r#"{
        "name": "Citrus Splash",
        "ingredients": [
            {"substance_id": "8008-56-8", "display_name": "Lemon oil", "weight_percent": 5.0},
            {"substance_id": "64-17-5", "display_name": "Ethanol", "weight_percent": 80.0}
        ]
    }"#;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn seed_data(dir: &Utf8Path) {
        write_file(
            &dir.join("ifra_restrictions.json"),
            r#"{"restrictions": [{"cas_number": "5392-40-5", "name": "Citral",
                "category_limits": {"4": 0.6}, "amendment_number": 51}]}"#,
        );
        write_file(
            &dir.join("naturals.json"),
            r#"{"naturals": [{"cas_number": "8008-56-8", "name": "Lemon oil",
                "restricted_constituents": [{"cas_number": "5392-40-5", "name": "Citral", "max_percentage": 5.0}]}]}"#,
        );
    }

    fn input<'a>(base: &'a Utf8Path, config_text: &'a str, formula_text: &'a str) -> CheckInput<'a> {
        CheckInput {
            config_text,
            config_base: base,
            data_dir: None,
            overrides: Overrides::default(),
            formula_text,
            product_type: ProductType::FineFragrance,
            jurisdictions: vec![Jurisdiction::Eu],
            dilution_percent: 20.0,
            leave_on: true,
        }
    }

    #[test]
    fn data_dir_from_config_is_anchored_to_config_base() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        seed_data(&root.join("data"));

        let output =
            run_check(input(&root, "data_dir = \"data\"\n", LEMON_FORMULA)).expect("run_check");
        assert_eq!(output.data_dir, root.join("data"));
        assert_eq!(output.resolved_config.effective.profile, "full");

        // 5% lemon oil x 5% citral at 20% dosage = 0.05% against 0.6%.
        let citral: Vec<_> = output
            .report
            .findings_for(ids::CHECK_RESTRICTION_LIMITS)
            .filter(|f| f.substance_id.as_deref() == Some("5392-40-5"))
            .collect();
        assert_eq!(citral.len(), 1);
        assert_eq!(citral[0].status, ComplianceStatus::Compliant);
        assert!(output.report.is_compliant);
        assert_eq!(verdict_exit_code(&output.report), 0);
    }

    #[test]
    fn command_line_data_dir_wins() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let cli_dir = root.join("cli-data");
        seed_data(&cli_dir);

        let mut i = input(&root, "data_dir = \"missing\"\n", LEMON_FORMULA);
        i.data_dir = Some(&cli_dir);
        let output = run_check(i).expect("run_check");
        assert_eq!(output.data_dir, cli_dir);
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = run_check(input(&root, "", LEMON_FORMULA)).unwrap_err();
        assert!(format!("{err:#}").contains("no reference data directory"));
    }

    #[test]
    fn invalid_request_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let mut i = input(&root, "", LEMON_FORMULA);
        i.data_dir = Some(&root);
        i.dilution_percent = 0.0;
        let err = run_check(i).unwrap_err();
        assert!(format!("{err:#}").contains("build evaluation request"));
    }

    #[test]
    fn store_is_shared_across_checks() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        seed_data(&root);
        let store = ReferenceStore::new(root.clone());

        for _ in 0..2 {
            let i = input(&root, "", LEMON_FORMULA);
            let resolved = resolve_check_config(&i).expect("resolve");
            run_check_with_store(i, resolved, &store).expect("run_check");
        }
        assert!(store.is_loaded());
    }

    #[test]
    fn verdict_exit_codes() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        seed_data(&root);
        let formula = r#"{"name": "Hot Citral", "ingredients": [
            {"substance_id": "5392-40-5", "display_name": "Citral", "weight_percent": 10.0}
        ]}"#;
        let mut i = input(&root, "", formula);
        i.data_dir = Some(&root);
        let output = run_check(i).expect("run_check");
        assert!(!output.report.is_compliant);
        assert!(output.report.certificate_id.is_none());
        assert_eq!(verdict_exit_code(&output.report), 2);
    }
}
