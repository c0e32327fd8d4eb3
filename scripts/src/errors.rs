//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// Error parsing a contract compilation artifact
    ArtifactParsing(String),
    /// No artifact was found for the requested contract
    ArtifactNotFound(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// The execution context does not expose any accounts
    MissingAccount,
    /// Error constructing calldata for a constructor or contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error converting a quantity into base units
    UnitConversion(String),
    /// A deployment required by a later stage has not been registered
    MissingDeployment(String),
    /// A contract was registered twice on the same network
    DuplicateDeployment(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ArtifactNotFound(s) => write!(f, "no artifact found for contract {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::MissingAccount => write!(f, "no accounts available on the network"),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::UnitConversion(s) => write!(f, "error converting units: {}", s),
            ScriptError::MissingDeployment(s) => write!(f, "assertion failed: {}", s),
            ScriptError::DuplicateDeployment(s) => {
                write!(f, "contract {} is already registered", s)
            }
        }
    }
}

impl Error for ScriptError {}
