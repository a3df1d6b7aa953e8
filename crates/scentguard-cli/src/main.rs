//! CLI entry point for scentguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup,
//! and exit codes. All business logic lives in the `scentguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use scentguard_app::{
    CheckInput, ExplainOutput, run_check, run_explain, serialize_details, serialize_report,
    verdict_exit_code,
};
use scentguard_settings::Overrides;
use scentguard_types::{ComplianceReport, Jurisdiction, ProductType};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCENTGUARD_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "scentguard",
    version,
    about = "Regulatory compliance checks for fragrance formulas"
)]
struct Cli {
    /// Path to scentguard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "scentguard.toml")]
    config: Utf8PathBuf,

    /// Directory holding the reference datasets (overrides `data_dir` in the config).
    #[arg(long, global = true)]
    data_dir: Option<Utf8PathBuf>,

    /// Override profile (full|restriction-only|market).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the leading segment of issued certificate ids.
    #[arg(long, global = true)]
    certificate_prefix: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a formula and write the compliance report.
    Check {
        /// Formula JSON file.
        #[arg(long)]
        formula: Utf8PathBuf,

        /// Product type (e.g. fine_fragrance, body-lotion, candle).
        #[arg(long)]
        product_type: ProductType,

        /// Target market; repeat or comma-separate for several.
        #[arg(long = "jurisdiction", required = true, value_delimiter = ',')]
        jurisdictions: Vec<Jurisdiction>,

        /// Fragrance concentrate percent in the finished product.
        #[arg(long, default_value_t = 100.0)]
        dilution: f64,

        /// Evaluate as a rinse-off product (default is leave-on).
        #[arg(long)]
        rinse_off: bool,

        /// Ignore constituents carried by natural materials.
        #[arg(long)]
        no_incidentals: bool,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/scentguard/report.json")]
        report_out: Utf8PathBuf,

        /// Also write the per-domain intermediate results as JSON.
        #[arg(long)]
        details_out: Option<Utf8PathBuf>,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "restriction.limits") or code (e.g., "over_limit") to explain.
        identifier: String,
    },
}

struct CheckArgs {
    formula: Utf8PathBuf,
    product_type: ProductType,
    jurisdictions: Vec<Jurisdiction>,
    dilution: f64,
    rinse_off: bool,
    no_incidentals: bool,
    report_out: Utf8PathBuf,
    details_out: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref formula,
            product_type,
            ref jurisdictions,
            dilution,
            rinse_off,
            no_incidentals,
            ref report_out,
            ref details_out,
        } => {
            let args = CheckArgs {
                formula: formula.clone(),
                product_type,
                jurisdictions: jurisdictions.clone(),
                dilution,
                rinse_off,
                no_incidentals,
                report_out: report_out.clone(),
                details_out: details_out.clone(),
            };
            cmd_check(&cli, args)
        }
        Commands::Explain { ref identifier } => cmd_explain(identifier),
    }
}

/// `SCENTGUARD_LOG` wins over `-v`; logs go to stderr so stdout stays clean.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(cli: &Cli, args: CheckArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Missing config is allowed (defaults apply).
        let cfg_text = match std::fs::read_to_string(&cli.config) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %cli.config, "no config file; using defaults");
                String::new()
            }
            Err(e) => return Err(e).with_context(|| format!("read config: {}", cli.config)),
        };
        let config_base = config_base(&cli.config);

        let formula_text = std::fs::read_to_string(&args.formula)
            .with_context(|| format!("read formula: {}", args.formula))?;

        let input = CheckInput {
            config_text: &cfg_text,
            config_base: &config_base,
            data_dir: cli.data_dir.as_deref(),
            overrides: Overrides {
                profile: cli.profile.clone(),
                certificate_prefix: cli.certificate_prefix.clone(),
                include_incidentals: args.no_incidentals.then_some(false),
            },
            formula_text: &formula_text,
            product_type: args.product_type,
            jurisdictions: args.jurisdictions.clone(),
            dilution_percent: args.dilution,
            leave_on: !args.rinse_off,
        };

        let output = run_check(input)?;

        write_report_file(&args.report_out, &output.report).context("write report json")?;
        if let Some(path) = &args.details_out {
            let data = serialize_details(&output.details)?;
            write_bytes(path, &data).context("write details json")?;
        }

        println!("{}", summary_line(&output.report));
        Ok(verdict_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("scentguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn config_base(config: &Utf8Path) -> Utf8PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
        _ => Utf8PathBuf::from("."),
    }
}

fn summary_line(report: &ComplianceReport) -> String {
    match &report.certificate_id {
        Some(cert) => format!(
            "{}: compliant ({} warnings), certificate {cert}",
            report.formula_name, report.counts.warning
        ),
        None => format!(
            "{}: NOT compliant ({} non-compliant, {} warnings)",
            report.formula_name, report.counts.non_compliant, report.counts.warning
        ),
    }
}

fn write_report_file(path: &Utf8Path, report: &ComplianceReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_bytes(path, &data)
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {path}"))?;
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", scentguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                scentguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
