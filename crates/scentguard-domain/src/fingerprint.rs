use scentguard_types::ComplianceFinding;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - jurisdiction
/// - substance id (empty for formula-level findings)
pub fn fingerprint_for(finding: &ComplianceFinding) -> String {
    let canonical = [
        finding.check_id.as_str(),
        finding.code.as_str(),
        finding.jurisdiction.as_str(),
        finding.substance_id.as_deref().unwrap_or(""),
    ]
    .join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
