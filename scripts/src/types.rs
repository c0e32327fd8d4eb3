//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// The network a run targets and the accounts available on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// The network identifier under which deployments are recorded
    pub network: String,
    /// The accounts available on the network
    pub accounts: Vec<Address>,
}

impl ExecutionContext {
    /// The first available account
    pub fn first_account(&self) -> Result<Address, ScriptError> {
        self.accounts
            .first()
            .copied()
            .ok_or(ScriptError::MissingAccount)
    }
}

/// A handle to a contract deployed on a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// The address at which the contract is reachable. For proxied
    /// contracts this is the proxy's address.
    pub address: Address,
    /// The implementation contract behind the proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    /// The admin contract of the proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_admin: Option<Address>,
    /// The calldata with which the proxy initialized the implementation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_calldata: Option<Bytes>,
}

impl Deployment {
    /// A contract deployed directly, without a proxy
    pub fn new(address: Address) -> Self {
        Self {
            address,
            implementation: None,
            proxy_admin: None,
            init_calldata: None,
        }
    }

    /// Whether the contract sits behind an upgradeable proxy
    pub fn is_proxy(&self) -> bool {
        self.implementation.is_some()
    }
}

/// How far the deployment sequence has progressed on a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeploymentState {
    /// Nothing has been deployed
    NotStarted,
    /// The token contract is deployed
    TokenDeployed,
    /// The price oracle is deployed
    OracleDeployed,
    /// The characters contract is deployed, the sequence is complete
    CharactersDeployed,
}

impl Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentState::NotStarted => write!(f, "not started"),
            DeploymentState::TokenDeployed => write!(f, "token deployed"),
            DeploymentState::OracleDeployed => write!(f, "oracle deployed"),
            DeploymentState::CharactersDeployed => write!(f, "characters deployed"),
        }
    }
}
