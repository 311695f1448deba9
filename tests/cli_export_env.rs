//! `provisioner export-env` writes recorded addresses into a dotenv file.

mod common;

use std::fs;

use common::*;

#[test]
fn export_writes_every_address() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());
    assert!(env.run(&["deploy"]).success);

    let result = env.run(&["export-env"]);

    assert!(result.success, "{}", result.combined_output());
    let dotenv = fs::read_to_string(env.path(".env")).unwrap();
    let did = env.recorded_address("DIDRegistry").unwrap();
    assert!(dotenv.contains(&format!("DIDREGISTRY_ADDRESS={did}")));
    assert!(dotenv.contains("REVOCATIONREGISTRY_ADDRESS="));
    assert!(dotenv.contains(&format!("BLOCKCHAIN_RPC_URL={}", node.url())));
    assert!(dotenv.contains("BLOCKCHAIN_NETWORK=development"));
}

#[test]
fn export_preserves_unrelated_lines() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());
    assert!(env.run(&["deploy"]).success);
    fs::write(
        env.path(".env"),
        "DATABASE_URL=postgres://localhost/app\nDIDREGISTRY_ADDRESS=0xold\n",
    )
    .unwrap();

    assert!(env.run(&["export-env"]).success);

    let dotenv = fs::read_to_string(env.path(".env")).unwrap();
    let lines: Vec<_> = dotenv.lines().collect();
    assert_eq!(lines[0], "DATABASE_URL=postgres://localhost/app");
    assert!(lines[1].starts_with("DIDREGISTRY_ADDRESS=0x"));
    assert!(!dotenv.contains("0xold"));
    assert_eq!(dotenv.matches("DIDREGISTRY_ADDRESS=").count(), 1);
}

#[test]
fn export_to_custom_file() {
    let node = FakeNode::start();
    let env = TestEnv::new(node.url());
    assert!(env.run(&["deploy"]).success);

    let result = env.run(&["export-env", "--env-file", "config/chain.env"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("config/chain.env").exists());
    assert!(!env.path(".env").exists());
}

#[test]
fn export_without_deployments_fails() {
    let env = TestEnv::new("http://127.0.0.1:9");

    let result = env.run(&["export-env"]);

    assert!(!result.success);
    assert!(result.stderr.contains("no confirmed deployments"));
    assert!(!env.path(".env").exists());
}
