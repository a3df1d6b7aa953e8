use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the scentguard binary.
#[allow(deprecated)]
fn scentguard_cmd() -> Command {
    Command::cargo_bin("scentguard").unwrap()
}

#[test]
fn help_works() {
    scentguard_cmd().arg("--help").assert().success();
}

#[test]
fn check_help_lists_request_flags() {
    scentguard_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--product-type"))
        .stdout(predicate::str::contains("--jurisdiction"))
        .stdout(predicate::str::contains("--rinse-off"));
}

#[test]
fn explain_known_check_prints_remediation() {
    scentguard_cmd()
        .args(["explain", "restriction.limits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));
}

#[test]
fn explain_unknown_identifier_exits_1() {
    scentguard_cmd()
        .args(["explain", "lists.iecsc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: lists.iecsc"))
        .stderr(predicate::str::contains("lists.reach"));
}
