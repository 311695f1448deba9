//! Console Event Sink
//!
//! One line per unit transition, for people watching a terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

struct Icons {
    success: &'static str,
    error: &'static str,
    warning: &'static str,
    progress: &'static str,
    pending: &'static str,
    skipped: &'static str,
}

const UNICODE: Icons = Icons {
    success: "✓",
    error: "✗",
    warning: "⚠",
    progress: "●",
    pending: "○",
    skipped: "↳",
};

const ASCII: Icons = Icons {
    success: "[OK]",
    error: "[FAIL]",
    warning: "[WARN]",
    progress: "[..]",
    pending: "[ ]",
    skipped: "[SKIP]",
};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    icons: &'static Icons,
}

impl ConsoleEventSink {
    pub fn stdout(unicode: bool) -> Self {
        Self::with_writer(io::stdout(), unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, unicode: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            icons: if unicode { &UNICODE } else { &ASCII },
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{text}");
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let i = self.icons;
        let text = match event {
            DeployEvent::Started {
                network,
                chain_id,
                unit_count,
                force,
                dry_run,
            } => {
                let mut text =
                    format!("Deploying {unit_count} unit(s) to {network} (chain id {chain_id})");
                if force {
                    text.push_str(" [force]");
                }
                if dry_run {
                    text.push_str(" [dry run]");
                }
                text
            }
            DeployEvent::UnitSkipped { unit, address, .. } => {
                format!("  {} {unit} already deployed at {address}", i.skipped)
            }
            DeployEvent::UnitPlanned { unit, .. } => {
                format!("  {} {unit} would be deployed", i.pending)
            }
            DeployEvent::UnitSubmitted { unit, tx_hash, .. } => {
                format!("  {} {unit} submitted ({tx_hash})", i.progress)
            }
            DeployEvent::UnitConfirmed {
                unit,
                address,
                block_number,
                ..
            } => format!("  {} {unit} deployed at {address} (block {block_number})", i.success),
            DeployEvent::UnitFailed { unit, error, .. } => {
                format!("  {} {unit} failed: {error}", i.error)
            }
            DeployEvent::RetryScheduled {
                attempt,
                delay,
                error,
                ..
            } => format!(
                "  {} retrying in {}ms (attempt {attempt} failed: {error})",
                i.warning,
                delay.as_millis()
            ),
            DeployEvent::Completed {
                deployed_count,
                skipped_count,
                planned_count,
            } => {
                if planned_count > 0 {
                    format!("Dry run: {planned_count} to deploy, {skipped_count} already deployed")
                } else {
                    format!("Done: {deployed_count} deployed, {skipped_count} already deployed")
                }
            }
        };
        self.line(text);
    }
}
