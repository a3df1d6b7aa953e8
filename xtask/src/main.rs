//! Developer tasks (schema generation, explain coverage, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use scentguard_test_util::{CERTIFICATE_PLACEHOLDER, finding_keys, normalize_nondeterministic};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        match manifest_dir.parent() {
            Some(parent) => Ok(parent.to_path_buf()),
            None => bail!("xtask has no parent directory"),
        }
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(scentguard_types::ComplianceReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(scentguard_settings::ScentguardConfigV1)
}

fn generate_formula_schema() -> schemars::Schema {
    schema_for!(scentguard_types::FormulaDocument)
}

const REPORT_SCHEMA_FILE: &str = "scentguard.report.v1.json";
const CONFIG_SCHEMA_FILE: &str = "scentguard.config.v1.json";
const FORMULA_SCHEMA_FILE: &str = "scentguard.formula.v1.json";

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: REPORT_SCHEMA_FILE,
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: CONFIG_SCHEMA_FILE,
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: FORMULA_SCHEMA_FILE,
            generate: generate_formula_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run every fixture scenario through the built CLI and validate");
    eprintln!("                    formulas and reports against the generated schemas");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn compile(generate: fn() -> schemars::Schema, name: &str) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(generate()).context("Failed to convert schema to JSON")?;
    jsonschema::validator_for(&value)
        .map_err(|e| anyhow::anyhow!("Failed to compile {name}: {e}"))
}

fn schema_errors(validator: &jsonschema::Validator, instance: &Value) -> Vec<String> {
    validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect()
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The CLI binary to exercise; `SCENTGUARD_BIN` overrides the debug build.
fn scentguard_bin() -> anyhow::Result<PathBuf> {
    let path = match std::env::var_os("SCENTGUARD_BIN") {
        Some(bin) => PathBuf::from(bin),
        None => {
            let exe = if cfg!(windows) {
                "scentguard.exe"
            } else {
                "scentguard"
            };
            project_root()?.join("target").join("debug").join(exe)
        }
    };
    if !path.exists() {
        bail!(
            "scentguard binary not found at {}\n\nRun `cargo build -p scentguard-cli` first.",
            path.display()
        );
    }
    Ok(path)
}

fn scenario_dirs(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))? {
        let path = entry?.path();
        if path.join("expected.json").is_file() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Validate one scenario, returning a list of problems.
fn conform_scenario(
    bin: &Path,
    data_dir: &Path,
    scenario: &Path,
    formula_schema: &jsonschema::Validator,
    report_schema: &jsonschema::Validator,
) -> anyhow::Result<Vec<String>> {
    let mut errors = Vec::new();
    let expected = read_json(&scenario.join("expected.json"))?;

    let formula = read_json(&scenario.join("formula.json"))?;
    for e in schema_errors(formula_schema, &formula) {
        errors.push(format!("formula.json: {e}"));
    }

    let temp = tempfile::tempdir().context("Failed to create temp dir")?;
    let report_path = temp.path().join("report.json");

    let mut cmd = Command::new(bin);
    cmd.current_dir(temp.path()).arg("check");
    if expected["uses_scenario_config"].as_bool().unwrap_or(false) {
        cmd.arg("--config").arg(scenario.join("scentguard.toml"));
    } else {
        cmd.arg("--data-dir").arg(data_dir);
    }
    cmd.arg("--formula")
        .arg(scenario.join("formula.json"))
        .arg("--report-out")
        .arg(&report_path);
    for arg in expected["args"].as_array().into_iter().flatten() {
        if let Some(arg) = arg.as_str() {
            cmd.arg(arg);
        }
    }

    let output = cmd.output().context("Failed to run scentguard")?;
    let exit_code = output.status.code().unwrap_or(-1);
    if Some(i64::from(exit_code)) != expected["exit_code"].as_i64() {
        errors.push(format!(
            "exit code {exit_code}, expected {}; stderr: {}",
            expected["exit_code"],
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    if !report_path.exists() {
        errors.push("no report written".to_string());
        return Ok(errors);
    }

    let report = read_json(&report_path)?;
    for e in schema_errors(report_schema, &report) {
        errors.push(format!("report: {e}"));
    }

    let expected_keys: Vec<String> = expected["findings"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    let actual_keys = finding_keys(&report);
    if actual_keys != expected_keys {
        errors.push(format!(
            "finding keys differ\n    expected: {expected_keys:?}\n    actual:   {actual_keys:?}"
        ));
    }

    let issued = expected["certificate_issued"].as_bool().unwrap_or(false);
    let normalized = normalize_nondeterministic(report);
    let cert = &normalized["certificate_id"];
    match (issued, cert.as_str()) {
        (true, Some(CERTIFICATE_PLACEHOLDER)) | (false, None) => {}
        (true, _) => errors.push("expected a certificate, none issued".to_string()),
        (false, Some(_)) => errors.push("certificate issued for a non-compliant formula".into()),
    }

    Ok(errors)
}

/// Run every fixture scenario through the CLI and check the results.
///
/// This checks:
/// 1. Each scenario `formula.json` validates against the formula schema
/// 2. Each written report validates against the report schema
/// 3. Exit code, finding keys, and certificate issuance match `expected.json`
fn conform() -> anyhow::Result<()> {
    let formula_schema = compile(generate_formula_schema, FORMULA_SCHEMA_FILE)?;
    let report_schema = compile(generate_report_schema, REPORT_SCHEMA_FILE)?;
    println!("✓ formula and report schemas compile");

    let bin = scentguard_bin()?;
    let fixtures = fixtures_dir()?;
    let data_dir = fixtures.join("data");
    let scenarios = scenario_dirs(&fixtures.join("scenarios"))?;
    if scenarios.is_empty() {
        bail!("no scenarios found under {}", fixtures.display());
    }

    let mut failures = 0;
    for scenario in &scenarios {
        let name = scenario
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let errors = conform_scenario(&bin, &data_dir, scenario, &formula_schema, &report_schema)
            .with_context(|| format!("scenario {name}"))?;
        if errors.is_empty() {
            println!("✓ {name}");
        } else {
            failures += 1;
            eprintln!("✗ {name}");
            for e in &errors {
                eprintln!("  - {e}");
            }
        }
    }

    if failures > 0 {
        bail!(
            "Conformance failed for {failures} of {} scenarios",
            scenarios.len()
        );
    }
    println!("\n✓ All {} scenarios conform!", scenarios.len());
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = scentguard_types::explain::all_check_ids();
    let codes = scentguard_types::explain::all_codes();

    let mut errors = Vec::new();
    for (kind, identifiers) in [("Check ID", check_ids), ("Code", codes)] {
        for identifier in identifiers {
            match scentguard_types::explain::lookup_explanation(identifier) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{kind} '{identifier}' has empty title"));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{kind} '{identifier}' has empty description"));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{kind} '{identifier}' has empty remediation"));
                    }
                }
                None => errors.push(format!("{kind} '{identifier}' has no explanation")),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
