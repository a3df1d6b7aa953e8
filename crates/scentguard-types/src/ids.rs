//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_RESTRICTION_LIMITS: &str = "restriction.limits";
pub const CHECK_ALLERGEN_DISCLOSURE: &str = "allergen.disclosure";
pub const CHECK_VOLATILE_CONTENT: &str = "volatile.content";
pub const CHECK_DONOR_SUBSTANCES: &str = "donor.substances";
pub const CHECK_LISTS_PROP65: &str = "lists.prop65";
pub const CHECK_LISTS_CANADA_HOTLIST: &str = "lists.canada_hotlist";
pub const CHECK_LISTS_REACH: &str = "lists.reach";

// Codes: restriction.limits
pub const CODE_PROHIBITED: &str = "prohibited";
pub const CODE_OVER_LIMIT: &str = "over_limit";
pub const CODE_NEAR_LIMIT: &str = "near_limit";
pub const CODE_WITHIN_LIMIT: &str = "within_limit";
pub const CODE_UNRESTRICTED: &str = "unrestricted";
pub const CODE_NATURAL_VIA_INCIDENTALS: &str = "natural_via_incidentals";
pub const CODE_CATEGORY_NOT_APPLICABLE: &str = "category_not_applicable";

// Codes: allergen.disclosure
pub const CODE_DISCLOSURE_REQUIRED: &str = "disclosure_required";
pub const CODE_BELOW_DISCLOSURE_THRESHOLD: &str = "below_disclosure_threshold";

// Codes: volatile.content
pub const CODE_VOLATILE_OVER_LIMIT: &str = "volatile_over_limit";
pub const CODE_VOLATILE_WITHIN_LIMIT: &str = "volatile_within_limit";

// Codes: donor.substances
pub const CODE_DONOR_BANNED: &str = "donor_banned";
pub const CODE_DONOR_OVER_LIMIT: &str = "donor_over_limit";
pub const CODE_DONOR_LABELING_REQUIRED: &str = "donor_labeling_required";
pub const CODE_DONOR_BELOW_LABELING: &str = "donor_below_labeling";

// Codes: lists.prop65
pub const CODE_PROP65_WARNING: &str = "prop65_warning";
pub const CODE_PROP65_LISTED: &str = "prop65_listed";

// Codes: lists.canada_hotlist
pub const CODE_HOTLIST_PROHIBITED: &str = "hotlist_prohibited";
pub const CODE_HOTLIST_OVER_LIMIT: &str = "hotlist_over_limit";
pub const CODE_HOTLIST_RESTRICTED: &str = "hotlist_restricted";

// Codes: lists.reach
pub const CODE_REACH_SVHC: &str = "reach_svhc";
pub const CODE_REACH_ANNEX_XVII: &str = "reach_annex_xvii";
