//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::time::Duration;

use super::retry::RetryPolicy;

/// Floor for the pause between receipt queries.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Options for one sequencer run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Network name; manifest entries are keyed by it
    pub network: String,
    /// Chain id the network must report, if pinned
    pub expected_chain_id: Option<u64>,
    /// Redeploy units that already have a confirmed record
    pub force: bool,
    /// Report what would happen without submitting anything
    pub dry_run: bool,
    /// Blocks on top of (and including) the receipt's block
    pub confirmations: u64,
    /// Upper bound on waiting for one unit's confirmation
    pub confirmation_timeout: Duration,
    /// Pause between receipt queries
    pub poll_interval: Duration,
    /// Fixed gas limit for creation transactions
    pub gas_limit: Option<u64>,
    /// Retry policy for transient ledger errors
    pub retry: RetryPolicy,
}

impl DeployOptions {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            expected_chain_id: None,
            force: false,
            dry_run: false,
            confirmations: 1,
            confirmation_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_millis(500),
            gas_limit: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_expected_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.expected_chain_id = chain_id;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Zero is treated as one: a receipt is at least its own confirmation.
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Clamped to [`MIN_POLL_INTERVAL`] so polling never busy-loops.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: Option<u64>) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
