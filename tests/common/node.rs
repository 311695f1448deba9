//! In-process JSON-RPC node.
//!
//! Every creation transaction is mined into its own block immediately.
//! Transactions whose data equals a configured unit's marker bytecode revert.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};

pub const CHAIN_ID: u64 = 1337;
pub const ACCOUNT: &str = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1";

/// Bytecode written to a unit's artifact in tests: the name's bytes.
pub fn marker_bytecode(unit: &str) -> String {
    format!("0x{}", hex::encode(unit.as_bytes()))
}

#[derive(Default)]
struct NodeState {
    block: u64,
    next_contract: u64,
    reverting: HashSet<String>,
    receipts: HashMap<String, Value>,
    /// Units in submission order, decoded from the creation data
    submitted: Vec<String>,
}

pub struct FakeNode {
    url: String,
    state: Arc<Mutex<NodeState>>,
}

impl FakeNode {
    pub fn start() -> Self {
        Self::with_reverting(&[])
    }

    /// Start a node on which creating any of `units` reverts.
    pub fn with_reverting(units: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(Mutex::new(NodeState {
            block: 1,
            reverting: units.iter().map(|u| u.to_string()).collect(),
            ..NodeState::default()
        }));

        let shared = state.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &shared);
            }
        });

        Self { url, state }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn submitted(&self) -> Vec<String> {
        self.state.lock().unwrap().submitted.clone()
    }

    /// Stop reverting `unit` from now on.
    pub fn fix(&self, unit: &str) {
        self.state.lock().unwrap().reverting.remove(unit);
    }
}

fn serve(stream: TcpStream, state: &Mutex<NodeState>) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let response = handle(&request, &mut state.lock().unwrap()).to_string();

    let mut stream = reader.into_inner();
    let _ = write!(
        stream,
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.len(),
        response
    );
    let _ = stream.flush();
}

fn handle(request: &Value, state: &mut NodeState) -> Value {
    let id = request["id"].clone();
    let result = match request["method"].as_str().unwrap_or_default() {
        "eth_chainId" => json!(format!("0x{CHAIN_ID:x}")),
        "eth_accounts" => json!([ACCOUNT]),
        "eth_blockNumber" => json!(format!("0x{:x}", state.block)),
        "eth_sendTransaction" => {
            let data = request["params"][0]["data"].as_str().unwrap_or("0x");
            let bytes = hex::decode(data.trim_start_matches("0x")).unwrap_or_default();
            let unit = String::from_utf8_lossy(&bytes).into_owned();

            state.block += 1;
            state.next_contract += 1;
            let tx_hash = format!("0x{:064x}", 0xd00d_0000 + state.next_contract);
            let receipt = if state.reverting.contains(&unit) {
                json!({
                    "transactionHash": tx_hash,
                    "blockNumber": format!("0x{:x}", state.block),
                    "status": "0x0",
                    "contractAddress": null,
                })
            } else {
                json!({
                    "transactionHash": tx_hash,
                    "blockNumber": format!("0x{:x}", state.block),
                    "status": "0x1",
                    "contractAddress": format!("0x{:040x}", 0xc0de_0000 + state.next_contract),
                })
            };
            state.receipts.insert(tx_hash.clone(), receipt);
            state.submitted.push(unit);
            json!(tx_hash)
        }
        "eth_getTransactionReceipt" => {
            let hash = request["params"][0].as_str().unwrap_or_default();
            state.receipts.get(hash).cloned().unwrap_or(Value::Null)
        }
        other => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {other} not found") },
            })
        }
    };
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}
