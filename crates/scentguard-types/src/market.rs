use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A regulatory regime evaluated independently of the others.
///
/// `Global` is never requested by a caller; it tags findings from the
/// international restriction standard, which applies everywhere.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Global,
    Us,
    Eu,
    Ca,
    Uk,
    Jp,
    Cn,
    Au,
    Br,
}

impl Jurisdiction {
    /// Jurisdictions a caller may request, in canonical order.
    pub const MARKETS: [Jurisdiction; 8] = [
        Jurisdiction::Us,
        Jurisdiction::Eu,
        Jurisdiction::Ca,
        Jurisdiction::Uk,
        Jurisdiction::Jp,
        Jurisdiction::Cn,
        Jurisdiction::Au,
        Jurisdiction::Br,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Jurisdiction::Global => "global",
            Jurisdiction::Us => "us",
            Jurisdiction::Eu => "eu",
            Jurisdiction::Ca => "ca",
            Jurisdiction::Uk => "uk",
            Jurisdiction::Jp => "jp",
            Jurisdiction::Cn => "cn",
            Jurisdiction::Au => "au",
            Jurisdiction::Br => "br",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown jurisdiction: {0} (expected us|eu|ca|uk|jp|cn|au|br)")]
pub struct UnknownJurisdiction(pub String);

impl FromStr for Jurisdiction {
    type Err = UnknownJurisdiction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Jurisdiction::MARKETS
            .into_iter()
            .find(|j| j.as_str() == normalized)
            .ok_or_else(|| UnknownJurisdiction(s.to_string()))
    }
}

/// Consumer product types a formula can be evaluated for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    FineFragrance,
    BodyLotion,
    FaceCream,
    HandCream,
    Deodorant,
    Shampoo,
    Conditioner,
    BodyWash,
    Soap,
    Candle,
    ReedDiffuser,
    AirFreshener,
    HouseholdCleaner,
    LaundryDetergent,
    LipProduct,
    BabyProduct,
}

impl ProductType {
    pub const ALL: [ProductType; 16] = [
        ProductType::FineFragrance,
        ProductType::BodyLotion,
        ProductType::FaceCream,
        ProductType::HandCream,
        ProductType::Deodorant,
        ProductType::Shampoo,
        ProductType::Conditioner,
        ProductType::BodyWash,
        ProductType::Soap,
        ProductType::Candle,
        ProductType::ReedDiffuser,
        ProductType::AirFreshener,
        ProductType::HouseholdCleaner,
        ProductType::LaundryDetergent,
        ProductType::LipProduct,
        ProductType::BabyProduct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::FineFragrance => "fine_fragrance",
            ProductType::BodyLotion => "body_lotion",
            ProductType::FaceCream => "face_cream",
            ProductType::HandCream => "hand_cream",
            ProductType::Deodorant => "deodorant",
            ProductType::Shampoo => "shampoo",
            ProductType::Conditioner => "conditioner",
            ProductType::BodyWash => "body_wash",
            ProductType::Soap => "soap",
            ProductType::Candle => "candle",
            ProductType::ReedDiffuser => "reed_diffuser",
            ProductType::AirFreshener => "air_freshener",
            ProductType::HouseholdCleaner => "household_cleaner",
            ProductType::LaundryDetergent => "laundry_detergent",
            ProductType::LipProduct => "lip_product",
            ProductType::BabyProduct => "baby_product",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown product type: {0}")]
pub struct UnknownProductType(pub String);

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ProductType::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jurisdiction_parse_is_case_insensitive() {
        assert_eq!("EU".parse::<Jurisdiction>(), Ok(Jurisdiction::Eu));
        assert_eq!(" us ".parse::<Jurisdiction>(), Ok(Jurisdiction::Us));
    }

    #[test]
    fn global_is_not_requestable() {
        assert!("global".parse::<Jurisdiction>().is_err());
    }

    #[test]
    fn product_type_accepts_kebab_case() {
        assert_eq!(
            "fine-fragrance".parse::<ProductType>(),
            Ok(ProductType::FineFragrance)
        );
        assert!("perfume".parse::<ProductType>().is_err());
    }

    #[test]
    fn as_str_round_trips_for_every_product_type() {
        for p in ProductType::ALL {
            assert_eq!(p.as_str().parse::<ProductType>(), Ok(p));
        }
    }
}
