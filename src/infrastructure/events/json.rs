//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Render one event as a JSON object.
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            network,
            chain_id,
            unit_count,
            force,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "network": network,
            "chain_id": chain_id,
            "unit_count": unit_count,
            "force": force,
            "dry_run": dry_run,
        }),

        DeployEvent::UnitSkipped {
            index,
            unit,
            address,
        } => serde_json::json!({
            "event": "unit_skipped",
            "command": "deploy",
            "index": index,
            "unit": unit,
            "address": address.as_str(),
            "reason": "already_deployed",
        }),

        DeployEvent::UnitPlanned { index, unit } => serde_json::json!({
            "event": "unit_planned",
            "command": "deploy",
            "index": index,
            "unit": unit,
        }),

        DeployEvent::UnitSubmitted {
            index,
            unit,
            tx_hash,
        } => serde_json::json!({
            "event": "unit_submitted",
            "command": "deploy",
            "index": index,
            "unit": unit,
            "tx_hash": tx_hash.as_str(),
        }),

        DeployEvent::UnitConfirmed {
            index,
            unit,
            address,
            block_number,
        } => serde_json::json!({
            "event": "unit_confirmed",
            "command": "deploy",
            "index": index,
            "unit": unit,
            "address": address.as_str(),
            "block_number": block_number,
        }),

        DeployEvent::UnitFailed { index, unit, error } => serde_json::json!({
            "event": "unit_failed",
            "command": "deploy",
            "index": index,
            "unit": unit,
            "error": error,
        }),

        DeployEvent::RetryScheduled {
            unit,
            attempt,
            delay,
            error,
        } => serde_json::json!({
            "event": "retry",
            "command": "deploy",
            "unit": unit,
            "attempt": attempt,
            "delay_ms": delay.as_millis() as u64,
            "error": error,
        }),

        DeployEvent::Completed {
            deployed_count,
            skipped_count,
            planned_count,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "deployed": deployed_count,
            "skipped": skipped_count,
            "planned": planned_count,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }
}
