//! Shared test utilities for the scentguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `scentguard-types` would not suffice.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const CERTIFICATE_PLACEHOLDER: &str = "__CERTIFICATE__";

/// Decimal places kept when normalizing floating-point numbers.
pub const FLOAT_DECIMALS: i32 = 6;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// 1. **Root-only**: when the root object looks like a compliance report (has
///    `schema`, `findings`, `is_compliant`), `generated_at` becomes
///    `"__TIMESTAMP__"` and an issued `certificate_id` becomes
///    `"__CERTIFICATE__"`. A `null` certificate stays `null`, so issuance is
///    still compared.
///
/// 2. **Recursive**: every non-integer number is rounded to [`FLOAT_DECIMALS`]
///    places, so products like `5.0 * 0.05` compare equal to the literal `0.25`.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("findings")
            && obj.contains_key("is_compliant");
        if is_report {
            if obj.contains_key("generated_at") {
                obj.insert(
                    "generated_at".to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
            if let Some(cert) = obj.get_mut("certificate_id")
                && cert.is_string()
            {
                *cert = Value::String(CERTIFICATE_PLACEHOLDER.to_string());
            }
        }
    }
    round_floats_recursive(&mut value);
    value
}

fn round_floats_recursive(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64() {
                let scale = 10f64.powi(FLOAT_DECIMALS);
                let rounded = (f * scale).round() / scale;
                if let Some(num) = serde_json::Number::from_f64(rounded) {
                    *n = num;
                }
            }
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                round_floats_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                round_floats_recursive(val);
            }
        }
        _ => {}
    }
}

/// One `check_id|code|status|jurisdiction|substance_id` line per finding, in report order.
///
/// Fixture expectations compare these keys instead of whole findings, whose
/// human-readable text is free to change.
pub fn finding_keys(report: &Value) -> Vec<String> {
    let field = |f: &Value, key: &str| {
        f.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    report
        .get("findings")
        .and_then(Value::as_array)
        .map(|findings| {
            findings
                .iter()
                .map(|f| {
                    format!(
                        "{}|{}|{}|{}|{}",
                        field(f, "check_id"),
                        field(f, "code"),
                        field(f, "status"),
                        field(f, "jurisdiction"),
                        field(f, "substance_id"),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_report_root_fields() {
        let report = json!({
            "schema": "scentguard.report.v1",
            "findings": [],
            "is_compliant": true,
            "generated_at": "2026-03-01T12:00:00Z",
            "certificate_id": "COMP-20260301-0A1B2C3D"
        });
        let normalized = normalize_nondeterministic(report);
        assert_eq!(normalized["generated_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(normalized["certificate_id"], CERTIFICATE_PLACEHOLDER);
    }

    #[test]
    fn null_certificate_stays_null() {
        let report = json!({
            "schema": "scentguard.report.v1",
            "findings": [],
            "is_compliant": false,
            "certificate_id": null
        });
        let normalized = normalize_nondeterministic(report);
        assert!(normalized["certificate_id"].is_null());
    }

    #[test]
    fn nested_objects_are_not_treated_as_reports() {
        let value = json!({
            "data": {
                "schema": "x",
                "findings": [],
                "is_compliant": true,
                "generated_at": "keep"
            }
        });
        let normalized = normalize_nondeterministic(value.clone());
        assert_eq!(normalized, value);
    }

    #[test]
    fn floats_are_rounded() {
        let normalized =
            normalize_nondeterministic(json!({ "a": 0.05 * 5.0, "b": [1.7000000000000002], "c": 3 }));
        assert_eq!(normalized, json!({ "a": 0.25, "b": [1.7], "c": 3 }));
    }

    #[test]
    fn finding_keys_in_order() {
        let report = json!({
            "findings": [
                {"check_id": "restriction.limits", "code": "over_limit", "status": "non_compliant",
                 "jurisdiction": "global", "substance_id": "5392-40-5"},
                {"check_id": "lists.prop65", "code": "prop65_warning", "status": "warning",
                 "jurisdiction": "us", "substance_id": "50-00-0"}
            ]
        });
        assert_eq!(
            finding_keys(&report),
            vec![
                "restriction.limits|over_limit|non_compliant|global|5392-40-5".to_string(),
                "lists.prop65|prop65_warning|warning|us|50-00-0".to_string(),
            ]
        );
    }
}
