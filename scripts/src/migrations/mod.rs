//! The ordered deployment stages.
//!
//! Each migration receives the run's registry explicitly and records
//! whatever it deploys there; later migrations read earlier deployments
//! from the same registry.

use async_trait::async_trait;

use crate::{
    artifacts::ArtifactStore, deployer::ContractDeployer, errors::ScriptError,
    registry::DeploymentRegistry, types::ExecutionContext,
};

mod characters;
mod token;

pub use characters::CharactersDeployment;
pub use token::TokenDeployment;

/// Everything a migration may use besides the registry
pub struct MigrationEnv<'a> {
    /// The network & accounts of the run
    pub context: &'a ExecutionContext,
    /// The deployer through which the network is reached
    pub deployer: &'a dyn ContractDeployer,
    /// The compiled contracts
    pub artifacts: &'a ArtifactStore,
}

/// A single stage of the deployment sequence
#[async_trait]
pub trait Migration: Send + Sync {
    /// The position of the migration in the sequence, starting at 1
    fn index(&self) -> u32;

    /// A human-readable name for logging
    fn name(&self) -> &'static str;

    /// Run the migration, recording deployed contracts in `registry`
    async fn run(
        &self,
        env: &MigrationEnv<'_>,
        registry: &mut DeploymentRegistry,
    ) -> Result<(), ScriptError>;
}

/// The token deployment followed by the characters deployment
pub fn default_migrations() -> Vec<Box<dyn Migration>> {
    vec![Box::new(TokenDeployment), Box::new(CharactersDeployment)]
}
