//! The registry of deployed contracts, and its persistence in the deployments file

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{CHARACTERS_CONTRACT, ORACLE_CONTRACT, TOKEN_CONTRACT},
    errors::ScriptError,
    types::{Deployment, DeploymentState},
};

/// The contracts deployed on a single network, along with the index of
/// the last migration that ran to completion there.
///
/// Entries are only ever added; registering the same contract twice is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRegistry {
    /// The index of the last migration that completed on this network
    #[serde(default)]
    last_completed_migration: u32,
    /// The deployed contracts, keyed by contract name
    #[serde(default)]
    contracts: BTreeMap<String, Deployment>,
}

impl DeploymentRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly deployed contract
    pub fn register(&mut self, name: &str, deployment: Deployment) -> Result<(), ScriptError> {
        if self.contracts.contains_key(name) {
            return Err(ScriptError::DuplicateDeployment(name.to_string()));
        }

        self.contracts.insert(name.to_string(), deployment);
        Ok(())
    }

    /// The deployment of the given contract, if any
    pub fn deployed(&self, name: &str) -> Option<&Deployment> {
        self.contracts.get(name)
    }

    /// The deployment of the given contract, failing if it was never deployed
    pub fn require(&self, name: &str) -> Result<&Deployment, ScriptError> {
        self.deployed(name).ok_or_else(|| {
            ScriptError::MissingDeployment(format!("Expected {} to be set to a contract", name))
        })
    }

    /// All registered contracts, ordered by name
    pub fn contracts(&self) -> impl Iterator<Item = (&str, &Deployment)> {
        self.contracts.iter().map(|(name, d)| (name.as_str(), d))
    }

    /// The number of registered contracts
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether no contract has been registered
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// The index of the last migration that completed
    pub fn last_completed_migration(&self) -> u32 {
        self.last_completed_migration
    }

    /// Mark the migration with the given index as completed
    pub fn complete_migration(&mut self, index: u32) {
        self.last_completed_migration = self.last_completed_migration.max(index);
    }

    /// The position of this network in the deployment sequence
    pub fn state(&self) -> DeploymentState {
        if self.contracts.contains_key(CHARACTERS_CONTRACT) {
            DeploymentState::CharactersDeployed
        } else if self.contracts.contains_key(ORACLE_CONTRACT) {
            DeploymentState::OracleDeployed
        } else if self.contracts.contains_key(TOKEN_CONTRACT) {
            DeploymentState::TokenDeployed
        } else {
            DeploymentState::NotStarted
        }
    }
}

/// The on-disk deployments file, holding one registry per network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentsFile {
    /// The registries, keyed by network identifier
    networks: BTreeMap<String, DeploymentRegistry>,
}

impl DeploymentsFile {
    /// Read the deployments file, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
    }

    /// Write the deployments file
    pub fn save(&self, path: &Path) -> Result<(), ScriptError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
    }

    /// The registry of the given network, empty if nothing was deployed there
    pub fn registry(&self, network: &str) -> DeploymentRegistry {
        self.networks.get(network).cloned().unwrap_or_default()
    }

    /// Replace the registry of the given network
    pub fn set_registry(&mut self, network: &str, registry: DeploymentRegistry) {
        self.networks.insert(network.to_string(), registry);
    }

    /// Drop everything recorded for the given network
    pub fn reset(&mut self, network: &str) {
        self.networks.remove(network);
    }
}

/// Load the deployments file, replace the given network's registry, and write it back
pub fn persist_registry(
    path: &Path,
    network: &str,
    registry: &DeploymentRegistry,
) -> Result<(), ScriptError> {
    let mut file = DeploymentsFile::load(path)?;
    file.set_registry(network, registry.clone());
    file.save(path)
}
