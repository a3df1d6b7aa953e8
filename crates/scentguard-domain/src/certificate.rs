//! Certificate identifiers: `{PREFIX}-{yyyymmdd}-{8 uppercase hex}`.
//!
//! Uniqueness is probabilistic only. Callers that need a hard guarantee must check
//! against previously issued ids.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const SUFFIX_LEN: usize = 8;

/// Mint a new identifier stamped with the UTC date of `now`.
pub fn mint(prefix: &str, now: OffsetDateTime) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format_id(prefix, now.date(), &hex[..SUFFIX_LEN])
}

pub fn format_id(prefix: &str, date: Date, suffix: &str) -> String {
    format!(
        "{prefix}-{:04}{:02}{:02}-{}",
        date.year(),
        u8::from(date.month()),
        date.day(),
        suffix.to_uppercase()
    )
}

/// Structural check: prefix, eight-digit date, eight uppercase hex characters.
pub fn is_well_formed(id: &str, prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };
    let Some((date, suffix)) = rest.split_once('-') else {
        return false;
    };
    date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}
