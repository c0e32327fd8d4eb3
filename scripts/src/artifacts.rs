//! Loading of compiled contract artifacts & construction of deployment calldata

use std::{collections::BTreeMap, fs, path::Path};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
};
use alloy_primitives::Bytes;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    constants::{ARTIFACT_EXTENSION, INITIALIZER_FUNCTION},
    errors::ScriptError,
};

/// A compiled contract, in the JSON artifact format emitted by Truffle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The contract's JSON ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }

    /// The creation code of the contract with the ABI-encoded
    /// constructor arguments appended
    pub fn deploy_code(&self, constructor_args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        if self.bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no creation bytecode",
                self.contract_name
            )));
        }

        let mut code = self.bytecode.to_vec();
        match self.abi.constructor() {
            Some(constructor) => {
                let encoded_args = constructor
                    .abi_encode_input(constructor_args)
                    .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
                code.extend(encoded_args);
            }
            None if constructor_args.is_empty() => {}
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{} has no constructor but was given {} arguments",
                    self.contract_name,
                    constructor_args.len()
                )))
            }
        }

        Ok(code.into())
    }

    /// Calldata for the contract's `initialize` method, picking the overload
    /// whose arity matches `init_args`.
    ///
    /// A contract without an initializer can only be proxied with no
    /// arguments, in which case the calldata is empty.
    pub fn initializer_calldata(&self, init_args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let initializer = self
            .abi
            .function(INITIALIZER_FUNCTION)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == init_args.len()));

        match initializer {
            Some(function) => function
                .abi_encode_input(init_args)
                .map(Bytes::from)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string())),
            None if init_args.is_empty() => Ok(Bytes::new()),
            None => Err(ScriptError::CalldataConstruction(format!(
                "{} has no `{}` method taking {} arguments",
                self.contract_name,
                INITIALIZER_FUNCTION,
                init_args.len()
            ))),
        }
    }
}

/// The set of artifacts available to the migrations, keyed by contract name
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    /// The artifacts, keyed by contract name
    artifacts: BTreeMap<String, ContractArtifact>,
}

impl ArtifactStore {
    /// Load every JSON artifact in the given directory.
    ///
    /// Artifacts that fail to parse, e.g. those with unlinked library
    /// placeholders in their bytecode, are skipped with a warning.
    pub fn load_dir(dir: &Path) -> Result<Self, ScriptError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            ScriptError::ArtifactParsing(format!("{}: {}", dir.display(), e))
        })?;

        let mut store = ArtifactStore::default();
        for entry in entries {
            let path = entry
                .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
                .path();
            if !path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION) {
                continue;
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
            let artifact = match ContractArtifact::from_json(&json) {
                Ok(artifact) => artifact,
                Err(e) => {
                    warn!("Skipping artifact {}: {}", path.display(), e);
                    continue;
                }
            };

            debug!("Loaded artifact for {}", artifact.contract_name);
            store.insert(artifact);
        }

        Ok(store)
    }

    /// Add an artifact to the store, replacing any artifact of the same name
    pub fn insert(&mut self, artifact: ContractArtifact) {
        self.artifacts
            .insert(artifact.contract_name.clone(), artifact);
    }

    /// Look up the artifact for the given contract
    pub fn require(&self, contract_name: &str) -> Result<&ContractArtifact, ScriptError> {
        self.artifacts
            .get(contract_name)
            .ok_or_else(|| ScriptError::ArtifactNotFound(contract_name.to_string()))
    }

    /// The number of artifacts in the store
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the store holds no artifacts
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
