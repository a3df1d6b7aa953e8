//! Use case orchestration for scentguard.
//!
//! This crate provides the application layer: use cases that coordinate settings, the
//! reference data adapter, and the pure evaluation engine. It stays thin; the CLI crate
//! depends on it and only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod formula;
mod report;

pub use check::{
    CheckInput, CheckOutput, resolve_check_config, run_check, run_check_with_store,
    verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use formula::{formula_from_document, parse_formula_json};
pub use report::{parse_report_json, serialize_details, serialize_report};
