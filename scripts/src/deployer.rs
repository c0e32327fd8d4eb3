//! The interface through which the migrations reach the network, and its RPC implementation

use alloy::{
    dyn_abi::DynSolValue,
    network::TransactionBuilder,
    providers::Provider,
    rpc::types::TransactionRequest,
};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    artifacts::ContractArtifact,
    constants::NUM_DEPLOY_CONFIRMATIONS,
    errors::ScriptError,
    solidity::BattleWagerToken,
    types::ExecutionContext,
    utils::{setup_client, Client},
};

/// The remote operations the migrations need from a network.
///
/// Every call either completes on chain or fails; nothing is retried.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// The address that signs & pays for deployments
    fn deployer_address(&self) -> Address;

    /// Resolve the network identifier and the accounts available on it
    async fn execution_context(&self) -> Result<ExecutionContext, ScriptError>;

    /// Deploy the given contract with the given constructor arguments,
    /// returning its address
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: &[DynSolValue],
    ) -> Result<Address, ScriptError>;

    /// Read a raw storage slot of a contract
    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, ScriptError>;

    /// Call `transferFrom(from, to, amount)` on the given token
    async fn transfer_from(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), ScriptError>;

    /// Read the token balance of `account`
    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, ScriptError>;
}

/// A [`ContractDeployer`] backed by a JSON-RPC node and a local signer
pub struct RpcDeployer {
    /// The signing client
    client: Client,
    /// The address of the signer
    deployer: Address,
    /// A network name to record deployments under instead of the chain ID
    network: Option<String>,
}

impl RpcDeployer {
    /// Connect to the node at `rpc_url`, signing with `priv_key`
    pub fn new(priv_key: &str, rpc_url: &str, network: Option<String>) -> Result<Self, ScriptError> {
        let (client, deployer) = setup_client(priv_key, rpc_url)?;
        Ok(Self {
            client,
            deployer,
            network,
        })
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    fn deployer_address(&self) -> Address {
        self.deployer
    }

    async fn execution_context(&self) -> Result<ExecutionContext, ScriptError> {
        let chain_id = self
            .client
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let network = self
            .network
            .clone()
            .unwrap_or_else(|| chain_id.to_string());

        let mut accounts = self
            .client
            .get_accounts()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        if accounts.is_empty() {
            warn!("Node exposes no accounts, falling back to the deployer {:#x}", self.deployer);
            accounts.push(self.deployer);
        }

        debug!("Chain ID {}, {} accounts available", chain_id, accounts.len());
        Ok(ExecutionContext { network, accounts })
    }

    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: &[DynSolValue],
    ) -> Result<Address, ScriptError> {
        let code = artifact.deploy_code(constructor_args)?;
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(code);

        let receipt = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .with_required_confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment of {} reverted in tx {:#x}",
                artifact.contract_name, receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in receipt of tx {:#x}",
                receipt.transaction_hash
            ))
        })?;

        info!("{} deployed at {:#x}", artifact.contract_name, address);
        Ok(address)
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, ScriptError> {
        let value = self
            .client
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    async fn transfer_from(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), ScriptError> {
        let token = BattleWagerToken::new(token, self.client.clone());

        let receipt = token
            .transferFrom(from, to, amount)
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractInteraction(format!(
                "transferFrom reverted in tx {:#x}",
                receipt.transaction_hash
            )));
        }

        info!("Transferred {} base units to {:#x}", amount, to);
        Ok(())
    }

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, ScriptError> {
        BattleWagerToken::new(token, self.client.clone())
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
