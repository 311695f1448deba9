//! Test environment builder for isolated provisioner runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::node::marker_bytecode;

pub const UNITS: [&str; 4] = [
    "DIDRegistry",
    "TrustRegistry",
    "CredentialAnchor",
    "RevocationRegistry",
];

/// Result of running the provisioner binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l:?}: {e}")))
            .collect()
    }
}

/// Temp project directory with compiled artifacts and a config pointing at
/// `rpc_url`.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new(rpc_url: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let artifacts = root.path().join("build/contracts");
        fs::create_dir_all(&artifacts).unwrap();
        for unit in UNITS {
            fs::write(
                artifacts.join(format!("{unit}.json")),
                format!(
                    r#"{{"contractName":"{unit}","abi":[],"bytecode":"{}"}}"#,
                    marker_bytecode(unit)
                ),
            )
            .unwrap();
        }

        fs::write(
            root.path().join("provisioner.toml"),
            format!(
                r#"default_network = "development"

[networks.development]
rpc_url = "{rpc_url}"
chain_id = 1337
poll_interval_ms = 10
confirmation_timeout_secs = 5
request_timeout_secs = 2

[retry]
max_attempts = 2
initial_backoff_ms = 10
max_backoff_ms = 20
"#
            ),
        )
        .unwrap();

        Self { root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path("deployments.toml")
    }

    /// Address recorded for `unit` on the development network, if any.
    pub fn recorded_address(&self, unit: &str) -> Option<String> {
        let content = fs::read_to_string(self.manifest_path()).ok()?;
        let manifest: toml::Value = toml::from_str(&content).ok()?;
        manifest
            .get("networks")?
            .get("development")?
            .get(unit)?
            .get("address")?
            .as_str()
            .map(str::to_string)
    }

    pub fn recorded_units(&self) -> Vec<String> {
        UNITS
            .iter()
            .filter(|u| self.recorded_address(u).is_some())
            .map(|u| u.to_string())
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        run_in(self.root.path(), args, vars)
    }
}

pub fn run_in(cwd: &Path, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_provisioner"));
    cmd.current_dir(cwd)
        .args(args)
        .env_remove("PROVISIONER_NETWORK")
        .env_remove("PROVISIONER_RPC_URL")
        .env_remove("PROVISIONER_FROM")
        .env_remove("PROVISIONER_MANIFEST")
        .env_remove("RUST_LOG")
        .env("TERM", "dumb");
    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output().unwrap();
    TestResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
