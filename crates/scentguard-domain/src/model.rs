use scentguard_types::{Jurisdiction, ProductType};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("formula name must not be empty")]
    EmptyName,

    #[error("ingredient substance id must not be empty (display name '{display_name}')")]
    EmptySubstanceId { display_name: String },

    #[error("duplicate substance id {substance_id} in formula")]
    DuplicateSubstance { substance_id: String },

    #[error("ingredient {substance_id} has weight {weight_percent}%, expected a value in (0, 100]")]
    WeightOutOfRange {
        substance_id: String,
        weight_percent: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("dilution {0}% is outside (0, 100]")]
    DilutionOutOfRange(String),

    #[error("at least one jurisdiction must be requested")]
    NoJurisdictions,

    #[error("jurisdiction 'global' cannot be requested directly")]
    GlobalRequested,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ingredient {
    pub substance_id: String,
    pub display_name: String,
    pub weight_percent: f64,
}

impl Ingredient {
    pub fn new(
        substance_id: impl Into<String>,
        display_name: impl Into<String>,
        weight_percent: f64,
    ) -> Self {
        Self {
            substance_id: substance_id.into(),
            display_name: display_name.into(),
            weight_percent,
        }
    }
}

/// A validated formula. Construction is the only way in, so the engine never
/// sees duplicate substances or out-of-range weights.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Formula {
    name: String,
    ingredients: Vec<Ingredient>,
}

impl Formula {
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Result<Self, FormulaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FormulaError::EmptyName);
        }

        let mut seen = BTreeSet::new();
        for ing in &ingredients {
            if ing.substance_id.trim().is_empty() {
                return Err(FormulaError::EmptySubstanceId {
                    display_name: ing.display_name.clone(),
                });
            }
            // NaN fails both comparisons.
            if !(ing.weight_percent > 0.0 && ing.weight_percent <= 100.0) {
                return Err(FormulaError::WeightOutOfRange {
                    substance_id: ing.substance_id.clone(),
                    weight_percent: ing.weight_percent,
                });
            }
            if !seen.insert(ing.substance_id.as_str()) {
                return Err(FormulaError::DuplicateSubstance {
                    substance_id: ing.substance_id.clone(),
                });
            }
        }

        Ok(Self { name, ingredients })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn total_percent(&self) -> f64 {
        self.ingredients.iter().map(|i| i.weight_percent).sum()
    }

    pub fn contains(&self, substance_id: &str) -> bool {
        self.ingredients.iter().any(|i| i.substance_id == substance_id)
    }
}

/// What the formula is evaluated for: product, markets, dosage, and exposure.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationRequest {
    product_type: ProductType,
    jurisdictions: Vec<Jurisdiction>,
    dilution_percent: f64,
    leave_on: bool,
}

impl EvaluationRequest {
    /// Jurisdictions are de-duplicated, keeping first-seen order.
    pub fn new(
        product_type: ProductType,
        jurisdictions: Vec<Jurisdiction>,
        dilution_percent: f64,
        leave_on: bool,
    ) -> Result<Self, RequestError> {
        if !(dilution_percent > 0.0 && dilution_percent <= 100.0) {
            return Err(RequestError::DilutionOutOfRange(dilution_percent.to_string()));
        }
        if jurisdictions.contains(&Jurisdiction::Global) {
            return Err(RequestError::GlobalRequested);
        }

        let mut unique: Vec<Jurisdiction> = Vec::with_capacity(jurisdictions.len());
        for j in jurisdictions {
            if !unique.contains(&j) {
                unique.push(j);
            }
        }
        if unique.is_empty() {
            return Err(RequestError::NoJurisdictions);
        }

        Ok(Self {
            product_type,
            jurisdictions: unique,
            dilution_percent,
            leave_on,
        })
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn jurisdictions(&self) -> &[Jurisdiction] {
        &self.jurisdictions
    }

    pub fn requests(&self, jurisdiction: Jurisdiction) -> bool {
        self.jurisdictions.contains(&jurisdiction)
    }

    pub fn dilution_percent(&self) -> f64 {
        self.dilution_percent
    }

    pub fn leave_on(&self) -> bool {
        self.leave_on
    }

    /// Scale a formula-relative percentage to the finished product.
    pub fn in_product(&self, formula_percent: f64) -> f64 {
        formula_percent * (self.dilution_percent / 100.0)
    }
}
