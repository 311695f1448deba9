//! End-to-end deploy runs against an in-process JSON-RPC node.

mod common;

use std::collections::HashSet;

use common::*;

#[test]
fn deploys_all_units_in_order() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(node.submitted(), UNITS);
    assert_eq!(env.recorded_units(), UNITS);

    let addresses: HashSet<_> = UNITS
        .iter()
        .filter_map(|u| env.recorded_address(u))
        .collect();
    assert_eq!(addresses.len(), 4);
}

#[test]
fn second_run_is_a_no_op() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());
    assert!(env.run(&["deploy"]).success);
    let before = std::fs::read_to_string(env.manifest_path()).unwrap();

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(node.submitted().len(), 4);
    assert_eq!(std::fs::read_to_string(env.manifest_path()).unwrap(), before);
}

#[test]
fn revert_stops_the_run_and_keeps_earlier_units() {
    let node = FakeNode::with_reverting(&["TrustRegistry"]);
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("TrustRegistry"),
        "stderr should name the failed unit:\n{}",
        result.stderr
    );
    assert_eq!(node.submitted(), ["DIDRegistry", "TrustRegistry"]);
    assert_eq!(env.recorded_units(), ["DIDRegistry"]);
}

#[test]
fn rerun_resumes_after_fix() {
    let node = FakeNode::with_reverting(&["TrustRegistry"]);
    let env = TestEnv::new(node.url());
    assert!(!env.run(&["deploy"]).success);
    let did = env.recorded_address("DIDRegistry").unwrap();

    node.fix("TrustRegistry");
    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        node.submitted(),
        [
            "DIDRegistry",
            "TrustRegistry",
            "TrustRegistry",
            "CredentialAnchor",
            "RevocationRegistry"
        ]
    );
    assert_eq!(env.recorded_address("DIDRegistry").unwrap(), did);
    assert_eq!(env.recorded_units(), UNITS);
}

#[test]
fn force_redeploys_everything() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());
    assert!(env.run(&["deploy"]).success);
    let first = env.recorded_address("DIDRegistry").unwrap();

    let result = env.run(&["deploy", "--force"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(node.submitted().len(), 8);
    assert_ne!(env.recorded_address("DIDRegistry").unwrap(), first);
}

#[test]
fn dry_run_submits_nothing() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(node.submitted().is_empty());
    assert!(!env.manifest_path().exists());
    assert!(result.stdout.contains("Dry run: 4 to deploy"));
}

#[test]
fn unreachable_ledger_fails_without_manifest() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let env = TestEnv::new(&format!("http://127.0.0.1:{port}"));

    let result = env.run(&["deploy"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("cannot reach ledger"),
        "{}",
        result.stderr
    );
    assert!(!env.manifest_path().exists());
}

#[test]
fn unknown_network_is_rejected() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy", "--network", "mainnet"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unknown network 'mainnet'"));
    assert!(node.submitted().is_empty());
}

#[test]
fn rpc_url_override_selects_the_node() {
    let node = FakeNode::start();
    // Config points at a dead port; the environment supplies the real one.
    let env = TestEnv::new("http://127.0.0.1:9");

    let result = env.run_with_env(&["deploy"], &[("PROVISIONER_RPC_URL", node.url())]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(node.submitted().len(), 4);
}

#[test]
fn json_mode_emits_ndjson_events() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.json_lines();
    assert_eq!(events[0]["event"], "start");
    assert_eq!(events[0]["command"], "deploy");
    let confirmed: Vec<_> = events
        .iter()
        .filter(|e| e["event"] == "unit_confirmed")
        .map(|e| e["unit"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(confirmed, UNITS);
    assert_eq!(events.last().unwrap()["event"], "complete");
}

#[test]
fn json_mode_reports_failure_event() {
    let node = FakeNode::with_reverting(&["CredentialAnchor"]);
    let env = TestEnv::new(node.url());

    let result = env.run(&["deploy", "--json"]);

    assert!(!result.success);
    let events = result.json_lines();
    let error = events.last().unwrap();
    assert_eq!(error["event"], "error");
    assert_eq!(error["kind"], "reverted");
    assert_eq!(error["unit"], "CredentialAnchor");
}
