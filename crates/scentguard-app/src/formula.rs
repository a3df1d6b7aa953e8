//! Formula input files.

use anyhow::Context;
use scentguard_domain::model::{Formula, Ingredient};
use scentguard_types::{FormulaDocument, SCHEMA_FORMULA_V1};

/// Parse a formula JSON document and validate it into a domain [`Formula`].
pub fn parse_formula_json(text: &str) -> anyhow::Result<Formula> {
    let doc: FormulaDocument = serde_json::from_str(text).context("parse formula json")?;
    formula_from_document(doc)
}

pub fn formula_from_document(doc: FormulaDocument) -> anyhow::Result<Formula> {
    if let Some(schema) = doc.schema.as_deref()
        && schema != SCHEMA_FORMULA_V1
    {
        anyhow::bail!("unsupported formula schema: {schema} (expected {SCHEMA_FORMULA_V1})");
    }

    let ingredients = doc
        .ingredients
        .into_iter()
        .map(|line| Ingredient::new(line.substance_id, line.display_name, line.weight_percent))
        .collect();
    Formula::new(doc.name, ingredients).context("invalid formula")
}
