//! Fuzz target for formula JSON parsing.
//!
//! Goal: the parser should **never panic**. Bad weights, duplicate substances,
//! and wrong schemas are errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_formula_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = scentguard_app::parse_formula_json(text);
    }
});
