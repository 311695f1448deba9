//! Deployment plan entity

use std::collections::HashSet;

use thiserror::Error;

use super::DeployableUnit;

/// The credential ledger modules, in their declared deployment order.
///
/// None of them takes constructor arguments and none depends on another's
/// address.
pub const CREDENTIAL_MODULES: [&str; 4] = [
    "DIDRegistry",
    "TrustRegistry",
    "CredentialAnchor",
    "RevocationRegistry",
];

/// Plan invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("plan contains no units")]
    EmptyPlan,

    #[error("unit '{name}' appears more than once")]
    DuplicateUnit { name: String },

    #[error("unit name '{name}' must be non-empty ASCII letters, digits or '_'")]
    InvalidName { name: String },
}

/// Ordered, non-empty sequence of units with unique names.
///
/// Order is deployment order. Later units may in general rely on earlier
/// ones, which is why a failure stops the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    units: Vec<DeployableUnit>,
}

impl DeploymentPlan {
    pub fn new(units: Vec<DeployableUnit>) -> Result<Self, PlanError> {
        if units.is_empty() {
            return Err(PlanError::EmptyPlan);
        }
        let mut seen = HashSet::new();
        for unit in &units {
            if !seen.insert(unit.name()) {
                return Err(PlanError::DuplicateUnit {
                    name: unit.name().to_string(),
                });
            }
        }
        Ok(Self { units })
    }

    /// Build a plan from bare names (default artifacts, no arguments).
    pub fn from_names<I, S>(names: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let units = names
            .into_iter()
            .map(DeployableUnit::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(units)
    }

    /// DIDRegistry, TrustRegistry, CredentialAnchor, RevocationRegistry.
    pub fn credential_modules() -> Self {
        let units = CREDENTIAL_MODULES
            .iter()
            .filter_map(|name| DeployableUnit::new(*name).ok())
            .collect();
        Self { units }
    }

    pub fn units(&self) -> &[DeployableUnit] {
        &self.units
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeployableUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DeployableUnit> {
        self.units.iter().find(|u| u.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.name())
    }
}
