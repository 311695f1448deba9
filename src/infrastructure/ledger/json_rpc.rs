//! Ethereum JSON-RPC ledger
//!
//! Talks to a node over HTTP using the node's unlocked accounts for signing
//! (`eth_sendTransaction`), the way a local development chain is driven.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::domain::ports::{CreationTx, LedgerConnection, LedgerError, LedgerResult, Receipt};
use crate::domain::value_objects::{Address, TxHash};

#[derive(Debug, Clone)]
pub struct JsonRpcConfig {
    pub url: String,
    /// Sending account; `None` uses the node's first account
    pub from: Option<Address>,
    pub request_timeout: Duration,
}

impl JsonRpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            from: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Whether repeating a failed call could have side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Query,
    Submit,
}

pub struct JsonRpcLedger {
    config: JsonRpcConfig,
    client: Client,
    next_id: AtomicU64,
    sender: OnceLock<Address>,
}

impl JsonRpcLedger {
    pub fn new(config: JsonRpcConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let sender = OnceLock::new();
        if let Some(from) = &config.from {
            let _ = sender.set(from.clone());
        }
        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
            sender,
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn call(&self, method: &str, params: Value, kind: CallKind) -> LedgerResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request_body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });
        debug!(method, id, "json-rpc call");

        let response = self
            .client
            .post(&self.config.url)
            .json(&request_body)
            .send()
            .map_err(|e| classify_transport(&e, kind))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(unanswered(format!("HTTP {status}"), kind));
        }
        if !status.is_success() {
            return Err(LedgerError::Rejected(format!("HTTP {status}")));
        }

        let response_json: Value = response.json().map_err(|e| {
            if e.is_decode() {
                LedgerError::Malformed(e.to_string())
            } else {
                classify_transport(&e, kind)
            }
        })?;
        trace!(method, id, response = %response_json, "json-rpc response");

        if let Some(error) = response_json.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(LedgerError::Rejected(message.to_string()));
        }

        response_json
            .get("result")
            .cloned()
            .ok_or_else(|| LedgerError::Malformed("response has neither result nor error".into()))
    }

    fn sender(&self) -> LedgerResult<Address> {
        if let Some(sender) = self.sender.get() {
            return Ok(sender.clone());
        }

        let accounts = self.call("eth_accounts", json!([]), CallKind::Query)?;
        let first = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerError::Rejected("node has no unlocked accounts".into()))?;
        let sender = Address::parse(first).map_err(|e| LedgerError::Malformed(e.to_string()))?;

        debug!(sender = %sender, "using node account as sender");
        let _ = self.sender.set(sender.clone());
        Ok(sender)
    }
}

impl LedgerConnection for JsonRpcLedger {
    fn chain_id(&self) -> LedgerResult<u64> {
        let result = self.call("eth_chainId", json!([]), CallKind::Query)?;
        parse_quantity(&result)
    }

    fn submit_creation(&self, tx: &CreationTx) -> LedgerResult<TxHash> {
        let from = self.sender()?;
        let mut params = json!({
            "from": from.as_str(),
            "data": format!("0x{}", hex::encode(&tx.data)),
        });
        if let Some(gas) = tx.gas_limit {
            params["gas"] = json!(format!("0x{gas:x}"));
        }

        let result = self.call("eth_sendTransaction", json!([params]), CallKind::Submit)?;
        let hash = result
            .as_str()
            .ok_or_else(|| LedgerError::Malformed(format!("expected tx hash, got {result}")))?;
        TxHash::parse(hash).map_err(|e| LedgerError::Malformed(e.to_string()))
    }

    fn receipt(&self, tx_hash: &TxHash) -> LedgerResult<Option<Receipt>> {
        let result = self.call(
            "eth_getTransactionReceipt",
            json!([tx_hash.as_str()]),
            CallKind::Query,
        )?;
        receipt_from_value(&result, tx_hash)
    }

    fn block_number(&self) -> LedgerResult<u64> {
        let result = self.call("eth_blockNumber", json!([]), CallKind::Query)?;
        parse_quantity(&result)
    }
}

/// A request that got no usable answer: safe to repeat only for queries.
fn unanswered(message: String, kind: CallKind) -> LedgerError {
    match kind {
        CallKind::Query => LedgerError::Transient(message),
        CallKind::Submit => LedgerError::Indeterminate(message),
    }
}

fn classify_transport(e: &reqwest::Error, kind: CallKind) -> LedgerError {
    // Connect failures never reached the node.
    if e.is_connect() {
        return LedgerError::Transient(e.to_string());
    }
    if e.is_builder() {
        return LedgerError::Rejected(e.to_string());
    }
    unanswered(e.to_string(), kind)
}

/// Decode a `0x`-prefixed hex quantity.
pub(crate) fn parse_quantity(value: &Value) -> LedgerResult<u64> {
    let raw = value
        .as_str()
        .ok_or_else(|| LedgerError::Malformed(format!("expected hex quantity, got {value}")))?;
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| LedgerError::Malformed(format!("quantity '{raw}' lacks 0x prefix")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| LedgerError::Malformed(format!("quantity '{raw}': {e}")))
}

/// `None` for a null receipt or one not yet in a block.
pub(crate) fn receipt_from_value(value: &Value, tx_hash: &TxHash) -> LedgerResult<Option<Receipt>> {
    if value.is_null() {
        return Ok(None);
    }
    if !value.is_object() {
        return Err(LedgerError::Malformed(format!("expected receipt object, got {value}")));
    }

    let block_number = match value.get("blockNumber") {
        None | Some(Value::Null) => return Ok(None),
        Some(raw) => parse_quantity(raw)?,
    };

    let contract_address = match value.get("contractAddress") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            Some(Address::parse(raw).map_err(|e| LedgerError::Malformed(e.to_string()))?)
        }
        Some(other) => {
            return Err(LedgerError::Malformed(format!(
                "contractAddress is not a string: {other}"
            )))
        }
    };

    // Pre-Byzantium receipts carry no status; a created address means success.
    let succeeded = match value.get("status") {
        None | Some(Value::Null) => contract_address.is_some(),
        Some(raw) => parse_quantity(raw)? == 1,
    };

    Ok(Some(Receipt {
        tx_hash: tx_hash.clone(),
        block_number,
        contract_address,
        succeeded,
    }))
}
