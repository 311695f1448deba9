//! Deploy Use Case
//!
//! Sequences a deployment plan onto one network:
//! 1. Probe the ledger (chain id); unreachable means nothing is attempted
//! 2. Load the manifest for the idempotence check
//! 3. For each unit, in plan order: skip if already confirmed, otherwise
//!    submit, wait for confirmation, and publish the record at once
//! 4. Stop at the first failure
//!
//! Exactly one transaction is in flight at any time, so the sender's nonce
//! is never contended.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{DeployableUnit, DeploymentPlan, DeploymentRecord};
use crate::domain::ports::{
    ArtifactSource, CreationTx, DeployEvent, DeployEventSink, LedgerConnection, LedgerError,
    ManifestRepository, NoopEventSink, Receipt,
};
use crate::domain::value_objects::TxHash;
use crate::error::{FailureCause, ProvisionError, ProvisionResult};

use super::options::DeployOptions;
use super::result::{DeployReport, UnitOutcome};

/// Deploy use case - the deployment sequencer
///
/// Parameterized by its ports so the sequencing logic can run against a
/// fake ledger and an in-memory manifest.
pub struct DeployUseCase<L, M, A>
where
    L: LedgerConnection,
    M: ManifestRepository,
    A: ArtifactSource,
{
    ledger: L,
    manifest_repo: M,
    artifacts: A,
    event_sink: Arc<dyn DeployEventSink>,
    interrupted: Arc<AtomicBool>,
}

impl<L, M, A> DeployUseCase<L, M, A>
where
    L: LedgerConnection,
    M: ManifestRepository,
    A: ArtifactSource,
{
    pub fn new(ledger: L, manifest_repo: M, artifacts: A) -> Self {
        Self {
            ledger,
            manifest_repo,
            artifacts,
            event_sink: Arc::new(NoopEventSink),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DeployEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Flag checked before each submission and between receipt polls.
    pub fn with_interrupt_flag(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = interrupted;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn manifest_repo(&self) -> &M {
        &self.manifest_repo
    }

    /// Deploy every unit of `plan` that is not yet recorded for the network.
    pub fn run(
        &self,
        plan: &DeploymentPlan,
        options: &DeployOptions,
    ) -> ProvisionResult<DeployReport> {
        let chain_id = self.probe(options)?;
        let manifest = self.manifest_repo.load()?;

        self.event_sink.on_event(DeployEvent::Started {
            network: options.network.clone(),
            chain_id,
            unit_count: plan.len(),
            force: options.force,
            dry_run: options.dry_run,
        });

        let mut report = DeployReport::new(&options.network, chain_id, options.dry_run);

        for (index, unit) in plan.iter().enumerate() {
            if !options.force {
                let recorded = manifest.get(&options.network, unit.name());
                if let Some(stale) = recorded.filter(|r| r.chain_id() != chain_id) {
                    // The contract does not exist on the live chain.
                    warn!(
                        unit = unit.name(),
                        recorded = stale.chain_id(),
                        live = chain_id,
                        "recorded deployment belongs to another chain id, redeploying"
                    );
                }
                if let Some(existing) = recorded.filter(|r| r.chain_id() == chain_id) {
                    if let Some(address) = existing.address() {
                        self.event_sink.on_event(DeployEvent::UnitSkipped {
                            index,
                            unit: unit.name().to_string(),
                            address: address.clone(),
                        });
                    }
                    info!(unit = unit.name(), "already deployed, skipping");
                    report
                        .outcomes
                        .push(UnitOutcome::AlreadyDeployed(existing.clone()));
                    continue;
                }
            }

            if options.dry_run {
                self.event_sink.on_event(DeployEvent::UnitPlanned {
                    index,
                    unit: unit.name().to_string(),
                });
                report.outcomes.push(UnitOutcome::Planned {
                    unit: unit.name().to_string(),
                });
                continue;
            }

            let record = match self.deploy_unit(index, unit, chain_id, options) {
                Ok(record) => record,
                Err(err) => {
                    error!(unit = unit.name(), error = %err, "deployment failed");
                    self.event_sink.on_event(DeployEvent::UnitFailed {
                        index,
                        unit: unit.name().to_string(),
                        error: err.to_string(),
                    });
                    return Err(err);
                }
            };

            if let Err(err) = self.manifest_repo.append(&record) {
                // Contract exists on chain but is not recorded; surface enough
                // to record it by hand.
                error!(
                    unit = unit.name(),
                    address = ?record.address(),
                    tx_hash = %record.tx_hash(),
                    "deployed but could not be recorded in the manifest"
                );
                return Err(err.into());
            }

            if let Some(address) = record.address() {
                self.event_sink.on_event(DeployEvent::UnitConfirmed {
                    index,
                    unit: unit.name().to_string(),
                    address: address.clone(),
                    block_number: record.block_number().unwrap_or_default(),
                });
            }
            report.outcomes.push(UnitOutcome::Deployed(record));
        }

        self.event_sink.on_event(DeployEvent::Completed {
            deployed_count: report.deployed_count(),
            skipped_count: report.skipped_count(),
            planned_count: report.planned_count(),
        });

        Ok(report)
    }

    /// Reachability check; also pins the chain id when configured.
    fn probe(&self, options: &DeployOptions) -> ProvisionResult<u64> {
        let chain_id = options
            .retry
            .run(|| self.ledger.chain_id(), |attempt, delay, err| {
                self.on_retry(None, attempt, delay, err)
            })
            .map_err(|err| ProvisionError::Connection {
                network: options.network.clone(),
                message: err.to_string(),
            })?;

        if let Some(expected) = options.expected_chain_id {
            if expected != chain_id {
                return Err(ProvisionError::Connection {
                    network: options.network.clone(),
                    message: format!("expected chain id {expected}, node reports {chain_id}"),
                });
            }
        }

        debug!(network = %options.network, chain_id, "ledger reachable");
        Ok(chain_id)
    }

    fn deploy_unit(
        &self,
        index: usize,
        unit: &DeployableUnit,
        chain_id: u64,
        options: &DeployOptions,
    ) -> ProvisionResult<DeploymentRecord> {
        let failed = |cause: FailureCause| ProvisionError::DeploymentFailed {
            unit: unit.name().to_string(),
            cause,
        };

        if self.interrupted.load(Ordering::SeqCst) {
            return Err(ProvisionError::Interrupted {
                unit: unit.name().to_string(),
            });
        }

        let artifact = self
            .artifacts
            .load(unit)
            .map_err(|err| failed(FailureCause::Artifact(err.to_string())))?;
        let tx = CreationTx {
            data: artifact.creation_data(unit),
            gas_limit: options.gas_limit,
        };

        let tx_hash = options
            .retry
            .run(|| self.ledger.submit_creation(&tx), |attempt, delay, err| {
                self.on_retry(Some(unit.name()), attempt, delay, err)
            })
            .map_err(|err| failed(submission_cause(err)))?;

        info!(unit = unit.name(), tx_hash = %tx_hash, "creation transaction submitted");
        self.event_sink.on_event(DeployEvent::UnitSubmitted {
            index,
            unit: unit.name().to_string(),
            tx_hash: tx_hash.clone(),
        });

        let mut record = DeploymentRecord::pending(
            unit.name(),
            &options.network,
            chain_id,
            tx_hash.clone(),
            artifact.content_hash(unit),
        );

        let receipt = self.await_confirmation(unit, &tx_hash, options)?;
        if !receipt.succeeded {
            record.fail()?;
            return Err(failed(FailureCause::Reverted { tx_hash }));
        }
        let Some(address) = receipt.contract_address else {
            record.fail()?;
            return Err(failed(FailureCause::NoContractAddress { tx_hash }));
        };

        record.confirm(address, receipt.block_number)?;
        info!(
            unit = unit.name(),
            address = ?record.address(),
            block = receipt.block_number,
            "deployment confirmed"
        );
        Ok(record)
    }

    /// Poll until the receipt is final, reverted, or the window closes.
    fn await_confirmation(
        &self,
        unit: &DeployableUnit,
        tx_hash: &TxHash,
        options: &DeployOptions,
    ) -> ProvisionResult<Receipt> {
        let failed = |cause: FailureCause| ProvisionError::DeploymentFailed {
            unit: unit.name().to_string(),
            cause,
        };
        let on_retry = |attempt, delay, err: &LedgerError| {
            self.on_retry(Some(unit.name()), attempt, delay, err)
        };
        let started = Instant::now();

        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                return Err(ProvisionError::Interrupted {
                    unit: unit.name().to_string(),
                });
            }

            let receipt = options
                .retry
                .run(|| self.ledger.receipt(tx_hash), on_retry)
                .map_err(|err| failed(FailureCause::Transport(err.to_string())))?;

            if let Some(receipt) = receipt {
                if !receipt.succeeded || options.confirmations <= 1 {
                    return Ok(receipt);
                }
                let head = options
                    .retry
                    .run(|| self.ledger.block_number(), on_retry)
                    .map_err(|err| failed(FailureCause::Transport(err.to_string())))?;
                let depth = head.saturating_sub(receipt.block_number) + 1;
                if depth >= options.confirmations {
                    return Ok(receipt);
                }
                debug!(unit = unit.name(), depth, "waiting for more confirmations");
            }

            let waited = started.elapsed();
            if waited >= options.confirmation_timeout {
                return Err(failed(FailureCause::Timeout {
                    tx_hash: tx_hash.clone(),
                    waited,
                }));
            }
            thread::sleep(
                options
                    .poll_interval
                    .min(options.confirmation_timeout - waited),
            );
        }
    }

    fn on_retry(
        &self,
        unit: Option<&str>,
        attempt: u32,
        delay: std::time::Duration,
        err: &LedgerError,
    ) {
        warn!(unit, attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying ledger call");
        self.event_sink.on_event(DeployEvent::RetryScheduled {
            unit: unit.map(str::to_string),
            attempt,
            delay,
            error: err.to_string(),
        });
    }
}

/// Map a submission error to a failure cause; node refusals stay distinct
/// from transport trouble.
fn submission_cause(err: LedgerError) -> FailureCause {
    match err {
        LedgerError::Rejected(message) => FailureCause::Rejected(message),
        other => FailureCause::Transport(other.to_string()),
    }
}
