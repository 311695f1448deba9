//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::time::Duration;

use crate::domain::value_objects::{Address, TxHash};

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Ledger reached, plan about to be processed
    Started {
        network: String,
        chain_id: u64,
        unit_count: usize,
        force: bool,
        dry_run: bool,
    },

    /// Unit already has a confirmed record for this network
    UnitSkipped {
        index: usize,
        unit: String,
        address: Address,
    },

    /// Dry run: unit would be submitted
    UnitPlanned { index: usize, unit: String },

    /// Creation transaction accepted by the node
    UnitSubmitted {
        index: usize,
        unit: String,
        tx_hash: TxHash,
    },

    /// Unit confirmed and recorded in the manifest
    UnitConfirmed {
        index: usize,
        unit: String,
        address: Address,
        block_number: u64,
    },

    /// Unit failed; the run stops here
    UnitFailed {
        index: usize,
        unit: String,
        error: String,
    },

    /// A transient ledger error is about to be retried
    RetryScheduled {
        unit: Option<String>,
        attempt: u32,
        delay: Duration,
        error: String,
    },

    /// Every unit resolved
    Completed {
        deployed_count: usize,
        skipped_count: usize,
        planned_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
