//! Stable DTOs and IDs used across the scentguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted compliance report and the formula input file
//! - closed enumerations for statuses, jurisdictions, and product types
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod formula;
pub mod ids;
pub mod market;
pub mod report;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use formula::{FormulaDocument, FormulaLine, SCHEMA_FORMULA_V1};
pub use market::{Jurisdiction, ProductType, UnknownJurisdiction, UnknownProductType};
pub use report::{
    ComplianceFinding, ComplianceReport, ComplianceStatus, SCHEMA_REPORT_V1, StatusCounts,
};
