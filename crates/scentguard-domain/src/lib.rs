//! Pure compliance evaluation (no IO).
//!
//! Input: a validated formula, an evaluation request, and a reference data snapshot
//! constructed elsewhere.
//! Output: findings + pass/fail + an optional certificate id, plus the per-domain
//! intermediate reports.

#![forbid(unsafe_code)]

pub mod category;
pub mod certificate;
pub mod checks;
pub mod incidentals;
pub mod model;
pub mod policy;
pub mod reference;
pub mod report;

mod engine;
mod fingerprint;

pub use engine::{Evaluation, evaluate, evaluate_at};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
