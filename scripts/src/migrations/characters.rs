//! Stage 2: deploy the price oracle & the characters contract behind proxies

use alloy::dyn_abi::DynSolValue;
use async_trait::async_trait;
use tracing::info;

use crate::{
    constants::{CHARACTERS_CONTRACT, CHARACTERS_MIGRATION_INDEX, ORACLE_CONTRACT, TOKEN_CONTRACT},
    errors::ScriptError,
    proxy::deploy_proxy,
    registry::DeploymentRegistry,
};

use super::{Migration, MigrationEnv};

/// Deploys the price oracle and the characters contract, each behind an
/// upgradeable proxy. The characters contract is initialized with the token
/// and oracle addresses, in that order.
pub struct CharactersDeployment;

#[async_trait]
impl Migration for CharactersDeployment {
    fn index(&self) -> u32 {
        CHARACTERS_MIGRATION_INDEX
    }

    fn name(&self) -> &'static str {
        "characters_deployment"
    }

    async fn run(
        &self,
        env: &MigrationEnv<'_>,
        registry: &mut DeploymentRegistry,
    ) -> Result<(), ScriptError> {
        let token = registry.require(TOKEN_CONTRACT)?.address;
        let owner = env.deployer.deployer_address();

        // An oracle left behind by an interrupted run is picked up again
        let oracle = match registry.deployed(ORACLE_CONTRACT) {
            Some(deployment) => {
                info!("Reusing {} at {:#x}", ORACLE_CONTRACT, deployment.address);
                deployment.address
            }
            None => {
                let artifact = env.artifacts.require(ORACLE_CONTRACT)?;
                let deployment =
                    deploy_proxy(env.deployer, env.artifacts, artifact, &[], owner).await?;
                let address = deployment.address;
                registry.register(ORACLE_CONTRACT, deployment)?;
                address
            }
        };

        let artifact = env.artifacts.require(CHARACTERS_CONTRACT)?;
        let init_args = [DynSolValue::Address(token), DynSolValue::Address(oracle)];
        let deployment =
            deploy_proxy(env.deployer, env.artifacts, artifact, &init_args, owner).await?;
        registry.register(CHARACTERS_CONTRACT, deployment)?;

        let characters = registry.require(CHARACTERS_CONTRACT)?;
        info!("{} ready at {:#x}", CHARACTERS_CONTRACT, characters.address);

        Ok(())
    }
}
