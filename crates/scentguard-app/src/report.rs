use anyhow::Context;
use scentguard_domain::report::EvaluationDetails;
use scentguard_types::{ComplianceReport, SCHEMA_REPORT_V1};

pub fn serialize_report(report: &ComplianceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn serialize_details(details: &EvaluationDetails) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(details).context("serialize evaluation details")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<ComplianceReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }
    serde_json::from_value(value).context("parse scentguard v1 report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scentguard_types::{ProductType, StatusCounts};
    use time::macros::datetime;

    fn sample() -> ComplianceReport {
        ComplianceReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            formula_name: "Empty".to_string(),
            product_type: ProductType::Candle,
            category: Some("11A".to_string()),
            jurisdictions: vec![scentguard_types::Jurisdiction::Us],
            dilution_percent: 10.0,
            leave_on: false,
            findings: Vec::new(),
            is_compliant: true,
            counts: StatusCounts::default(),
            certificate_id: None,
            generated_at: datetime!(2026-03-01 12:00 UTC),
        }
    }

    #[test]
    fn serialized_report_parses_back() {
        let report = sample();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"certificate_id\": null"));
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema": "scentguard.report.v0"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }
}
