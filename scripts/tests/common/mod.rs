//! An in-memory network & artifact fixtures for exercising the migrations

#![allow(dead_code)]

use std::{collections::HashMap, fs, path::Path, sync::Mutex};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use bw_scripts::{
    artifacts::{ArtifactStore, ContractArtifact},
    constants::{
        CHARACTERS_CONTRACT, ORACLE_CONTRACT, PROXY_ADMIN_STORAGE_SLOT, PROXY_CONTRACT,
        TOKEN_CONTRACT,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    migrations::MigrationEnv,
    registry::DeploymentRegistry,
    runner::MigrationRunner,
    types::ExecutionContext,
};

/// The network identifier reported by the mock chain
pub const NETWORK: &str = "1337";

/// The address signing deployments on the mock chain
pub fn deployer() -> Address {
    Address::repeat_byte(0xde)
}

/// The admin every mock proxy reports in its EIP1967 admin slot
pub fn proxy_admin() -> Address {
    Address::repeat_byte(0xad)
}

/// The `i`th account exposed by the mock chain
pub fn account(i: u8) -> Address {
    Address::repeat_byte(0xa0 + i)
}

/// A deployment as seen by the mock chain
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDeploy {
    pub contract: String,
    pub address: Address,
    pub args: Vec<DynSolValue>,
}

/// A `transferFrom` call as seen by the mock chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

#[derive(Default)]
struct ChainState {
    deploys: Vec<RecordedDeploy>,
    transfers: Vec<RecordedTransfer>,
    storage: HashMap<(Address, B256), B256>,
    failing_contract: Option<String>,
    failing_balance_reads: bool,
}

/// A chain that hands out sequential addresses and records every call
pub struct MockChain {
    accounts: Mutex<Vec<Address>>,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(vec![account(0), account(1)]),
            state: Mutex::default(),
        }
    }

    pub fn without_accounts() -> Self {
        Self {
            accounts: Mutex::default(),
            state: Mutex::default(),
        }
    }

    /// Make every deployment of the given contract fail
    pub fn fail_deployments_of(&self, contract: &str) {
        self.state.lock().unwrap().failing_contract = Some(contract.to_string());
    }

    /// Make every `balanceOf` read fail, as a flaky node would
    pub fn fail_balance_reads(&self) {
        self.state.lock().unwrap().failing_balance_reads = true;
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.failing_contract = None;
        state.failing_balance_reads = false;
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    pub fn deploys(&self) -> Vec<RecordedDeploy> {
        self.state.lock().unwrap().deploys.clone()
    }

    pub fn deploys_of(&self, contract: &str) -> Vec<RecordedDeploy> {
        self.deploys()
            .into_iter()
            .filter(|d| d.contract == contract)
            .collect()
    }

    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.state.lock().unwrap().transfers.clone()
    }
}

#[async_trait]
impl ContractDeployer for MockChain {
    fn deployer_address(&self) -> Address {
        deployer()
    }

    async fn execution_context(&self) -> Result<ExecutionContext, ScriptError> {
        Ok(ExecutionContext {
            network: NETWORK.to_string(),
            accounts: self.accounts.lock().unwrap().clone(),
        })
    }

    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: &[DynSolValue],
    ) -> Result<Address, ScriptError> {
        // Fails the same way a node would on malformed constructor args
        artifact.deploy_code(constructor_args)?;

        let mut state = self.state.lock().unwrap();
        if state.failing_contract.as_deref() == Some(artifact.contract_name.as_str()) {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment of {} reverted",
                artifact.contract_name
            )));
        }

        let address = Address::with_last_byte(state.deploys.len() as u8 + 1);
        if artifact.contract_name == PROXY_CONTRACT {
            state
                .storage
                .insert((address, PROXY_ADMIN_STORAGE_SLOT), proxy_admin().into_word());
        }

        state.deploys.push(RecordedDeploy {
            contract: artifact.contract_name.clone(),
            address,
            args: constructor_args.to_vec(),
        });
        Ok(address)
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, ScriptError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .storage
            .get(&(address, slot))
            .copied()
            .unwrap_or_default())
    }

    async fn transfer_from(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), ScriptError> {
        self.state.lock().unwrap().transfers.push(RecordedTransfer {
            token,
            from,
            to,
            amount,
        });
        Ok(())
    }

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256, ScriptError> {
        let state = self.state.lock().unwrap();
        if state.failing_balance_reads {
            return Err(ScriptError::ContractInteraction(
                "balanceOf: connection reset".to_string(),
            ));
        }

        Ok(state
            .transfers
            .iter()
            .filter(|t| t.token == token && t.to == account)
            .map(|t| t.amount)
            .sum())
    }
}

const TOKEN_ARTIFACT: &str = r#"{
    "contractName": "BattleWagerToken",
    "abi": [
        {
            "type": "function",
            "name": "transferFrom",
            "inputs": [
                { "name": "from", "type": "address", "internalType": "address" },
                { "name": "to", "type": "address", "internalType": "address" },
                { "name": "value", "type": "uint256", "internalType": "uint256" }
            ],
            "outputs": [{ "name": "", "type": "bool", "internalType": "bool" }],
            "stateMutability": "nonpayable"
        }
    ],
    "bytecode": "0x608060405201"
}"#;

const ORACLE_ARTIFACT: &str = r#"{
    "contractName": "BasicPriceOracle",
    "abi": [
        {
            "type": "function",
            "name": "initialize",
            "inputs": [],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ],
    "bytecode": "0x608060405202"
}"#;

const CHARACTERS_ARTIFACT: &str = r#"{
    "contractName": "Characters",
    "abi": [
        {
            "type": "function",
            "name": "initialize",
            "inputs": [
                { "name": "_token", "type": "address", "internalType": "contract IERC20" },
                { "name": "_priceOracle", "type": "address", "internalType": "contract IPriceOracle" }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ],
    "bytecode": "0x608060405203"
}"#;

const PROXY_ARTIFACT: &str = r#"{
    "contractName": "TransparentUpgradeableProxy",
    "abi": [
        {
            "type": "constructor",
            "inputs": [
                { "name": "_logic", "type": "address", "internalType": "address" },
                { "name": "initialOwner", "type": "address", "internalType": "address" },
                { "name": "_data", "type": "bytes", "internalType": "bytes" }
            ],
            "stateMutability": "payable"
        }
    ],
    "bytecode": "0x608060405204"
}"#;

/// The artifacts of every contract the migrations deploy
pub fn artifacts() -> ArtifactStore {
    let mut store = ArtifactStore::default();
    for json in [TOKEN_ARTIFACT, ORACLE_ARTIFACT, CHARACTERS_ARTIFACT, PROXY_ARTIFACT] {
        store.insert(ContractArtifact::from_json(json).unwrap());
    }

    assert!(store.require(TOKEN_CONTRACT).is_ok());
    assert!(store.require(ORACLE_CONTRACT).is_ok());
    assert!(store.require(CHARACTERS_CONTRACT).is_ok());
    assert!(store.require(PROXY_CONTRACT).is_ok());
    store
}

/// Write the artifacts of every contract the migrations deploy into `dir`,
/// one `<contractName>.json` per contract
pub fn write_artifacts(dir: &Path) {
    for (name, json) in [
        (TOKEN_CONTRACT, TOKEN_ARTIFACT),
        (ORACLE_CONTRACT, ORACLE_ARTIFACT),
        (CHARACTERS_CONTRACT, CHARACTERS_ARTIFACT),
        (PROXY_CONTRACT, PROXY_ARTIFACT),
    ] {
        fs::write(dir.join(format!("{name}.json")), json).unwrap();
    }
}

/// Run the default migrations against the mock chain, without persisting
pub async fn run_migrations(
    chain: &MockChain,
    registry: &mut DeploymentRegistry,
    to: Option<u32>,
) -> Result<usize, ScriptError> {
    let context = chain.execution_context().await?;
    let artifacts = artifacts();
    let env = MigrationEnv {
        context: &context,
        deployer: chain,
        artifacts: &artifacts,
    };

    MigrationRunner::default()
        .run(&env, registry, to, |_| Ok(()))
        .await
}
