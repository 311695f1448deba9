//! LedgerConnection port - the network the units are deployed to
//!
//! Everything the sequencer needs from a ledger: its identity, a way to
//! submit a contract-creation transaction, and a way to observe the
//! transaction until it is final. Signing, nonce assignment and gas
//! estimation are the implementation's (or the node's) business.

use thiserror::Error;

use crate::domain::value_objects::{Address, TxHash};

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger operation errors, classified by whether a retry can help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The request never produced an answer but may be repeated safely
    /// (connection refused, read-only query timed out, HTTP 5xx).
    #[error("{0}")]
    Transient(String),

    /// A submission may or may not have reached the node; repeating it
    /// could create a second contract.
    #[error("outcome unknown: {0}")]
    Indeterminate(String),

    /// The node answered with an error
    #[error("{0}")]
    Rejected(String),

    /// The node answered with something that is not a valid response
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl LedgerError {
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Transient(_))
    }
}

/// A contract-creation transaction: no recipient, code as payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationTx {
    /// Creation bytecode followed by encoded constructor arguments
    pub data: Vec<u8>,
    /// Fixed gas limit; `None` leaves estimation to the node
    pub gas_limit: Option<u64>,
}

/// What the ledger reports once a transaction is included in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub contract_address: Option<Address>,
    /// `false` when execution reverted
    pub succeeded: bool,
}

/// Abstract ledger the deployment sequencer talks to.
///
/// Implementations must be safe to call repeatedly; the sequencer wraps every
/// call in its retry policy and relies on [`LedgerError::is_transient`] to
/// decide whether a repeat is allowed.
pub trait LedgerConnection {
    /// Chain identifier; also serves as the reachability probe
    fn chain_id(&self) -> LedgerResult<u64>;

    /// Submit a contract-creation transaction, returning its hash
    fn submit_creation(&self, tx: &CreationTx) -> LedgerResult<TxHash>;

    /// Receipt for `tx_hash`, or `None` while it is not yet included
    fn receipt(&self, tx_hash: &TxHash) -> LedgerResult<Option<Receipt>>;

    /// Current head block number
    fn block_number(&self) -> LedgerResult<u64>;
}
