//! Deploy Result
//!
//! Result types for deploy operations.

use crate::domain::entities::DeploymentRecord;

/// What happened to one unit of the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Submitted and confirmed during this run
    Deployed(DeploymentRecord),
    /// Confirmed record already present; nothing submitted
    AlreadyDeployed(DeploymentRecord),
    /// Dry run: would have been submitted
    Planned { unit: String },
}

impl UnitOutcome {
    pub fn unit(&self) -> &str {
        match self {
            UnitOutcome::Deployed(record) | UnitOutcome::AlreadyDeployed(record) => record.unit(),
            UnitOutcome::Planned { unit } => unit,
        }
    }

    pub fn record(&self) -> Option<&DeploymentRecord> {
        match self {
            UnitOutcome::Deployed(record) | UnitOutcome::AlreadyDeployed(record) => Some(record),
            UnitOutcome::Planned { .. } => None,
        }
    }
}

/// Result of a successful run, one outcome per unit in plan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub network: String,
    pub chain_id: u64,
    pub dry_run: bool,
    pub outcomes: Vec<UnitOutcome>,
}

impl DeployReport {
    pub fn new(network: impl Into<String>, chain_id: u64, dry_run: bool) -> Self {
        Self {
            network: network.into(),
            chain_id,
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Records in plan order (deployed and already-deployed alike)
    pub fn records(&self) -> impl Iterator<Item = &DeploymentRecord> {
        self.outcomes.iter().filter_map(UnitOutcome::record)
    }

    pub fn deployed_count(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Deployed(_)))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::AlreadyDeployed(_)))
    }

    pub fn planned_count(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Planned { .. }))
    }

    fn count(&self, pred: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}
