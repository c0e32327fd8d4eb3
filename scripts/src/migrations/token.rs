//! Stage 1: deploy the token and grant the initial balance

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    constants::{
        INITIAL_TOKEN_GRANT_AMOUNT, INITIAL_TOKEN_GRANT_DENOMINATION, TOKEN_CONTRACT,
        TOKEN_MIGRATION_INDEX,
    },
    errors::ScriptError,
    registry::DeploymentRegistry,
    types::Deployment,
    units::to_base_units,
};

use super::{Migration, MigrationEnv};

/// Deploys the token contract, then moves 1000 tokens from the token's own
/// address to the first account.
///
/// The transfer only succeeds against token builds that hold or approve
/// their own supply, as local development builds do.
pub struct TokenDeployment;

#[async_trait]
impl Migration for TokenDeployment {
    fn index(&self) -> u32 {
        TOKEN_MIGRATION_INDEX
    }

    fn name(&self) -> &'static str {
        "token_deployment"
    }

    async fn run(
        &self,
        env: &MigrationEnv<'_>,
        registry: &mut DeploymentRegistry,
    ) -> Result<(), ScriptError> {
        let token = match registry.deployed(TOKEN_CONTRACT) {
            Some(deployment) => {
                info!("Reusing {} at {:#x}", TOKEN_CONTRACT, deployment.address);
                deployment.address
            }
            None => {
                let artifact = env.artifacts.require(TOKEN_CONTRACT)?;
                let address = env.deployer.deploy(artifact, &[]).await?;
                registry.register(TOKEN_CONTRACT, Deployment::new(address))?;
                address
            }
        };

        let recipient = env.context.first_account()?;
        let amount = to_base_units(INITIAL_TOKEN_GRANT_AMOUNT, INITIAL_TOKEN_GRANT_DENOMINATION)?;
        env.deployer
            .transfer_from(token, token /* from */, recipient, amount)
            .await?;

        // The grant is already mined at this point, a failed read must not
        // fail the migration or a rerun would transfer again
        match env.deployer.balance_of(token, recipient).await {
            Ok(balance) => info!("Balance of {:#x} now {}", recipient, balance),
            Err(e) => warn!("Could not read balance of {:#x}: {}", recipient, e),
        }

        Ok(())
    }
}
