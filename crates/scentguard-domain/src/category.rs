//! Fixed product-type tables: IFRA use categories and volatile-content categories.

use scentguard_types::ProductType;

/// IFRA Standard use category for a product type.
pub fn ifra_category(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::LipProduct => "1",
        ProductType::Deodorant => "2",
        ProductType::FineFragrance => "4",
        ProductType::BodyLotion => "5A",
        ProductType::FaceCream => "5B",
        ProductType::HandCream => "5C",
        ProductType::BabyProduct => "5D",
        ProductType::Shampoo | ProductType::Conditioner => "7A",
        ProductType::BodyWash | ProductType::Soap => "9",
        ProductType::HouseholdCleaner | ProductType::LaundryDetergent => "10B",
        ProductType::Candle => "11A",
        ProductType::ReedDiffuser => "11B",
        ProductType::AirFreshener => "12",
    }
}

pub const CARB_DEFAULT_CATEGORY: &str = "Personal Fragrance Products";
pub const EU_VOLATILE_CATEGORY: &str = "General";

/// CARB consumer-product category, used by both CARB and the Canadian regulations.
pub fn carb_category(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::AirFreshener => "Air Fresheners",
        ProductType::HouseholdCleaner => "General Purpose Cleaners",
        ProductType::LaundryDetergent => "Laundry Detergents",
        ProductType::Deodorant => "Antiperspirants/Deodorants",
        ProductType::Shampoo => "Hair Styling Products",
        // Fine fragrance, body wash, and everything unlisted.
        _ => CARB_DEFAULT_CATEGORY,
    }
}

/// Statutory CARB limits used when the reference data carries no explicit record.
pub fn carb_fallback_limit(category: &str) -> Option<f64> {
    match category {
        "Air Fresheners" => Some(15.0),
        "General Purpose Cleaners" => Some(4.0),
        "Personal Fragrance Products" => Some(75.0),
        "Antiperspirants/Deodorants" => Some(0.0),
        "Hair Styling Products" => Some(6.0),
        "Laundry Detergents" => Some(0.0),
        _ => None,
    }
}
