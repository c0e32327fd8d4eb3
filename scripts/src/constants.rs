//! Constants used in the deploy scripts

use alloy_primitives::{b256, B256};

/// The name of the token contract artifact & registry entry
pub const TOKEN_CONTRACT: &str = "BattleWagerToken";

/// The name of the price oracle contract artifact & registry entry
pub const ORACLE_CONTRACT: &str = "BasicPriceOracle";

/// The name of the characters contract artifact & registry entry
pub const CHARACTERS_CONTRACT: &str = "Characters";

/// The name of the upgradeable proxy contract artifact
///
/// Compiled from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/transparent/TransparentUpgradeableProxy.sol
pub const PROXY_CONTRACT: &str = "TransparentUpgradeableProxy";

/// The name of the function called on an implementation contract when
/// initializing it through its proxy
pub const INITIALIZER_FUNCTION: &str = "initialize";

/// The storage slot containing the proxy admin contract address in the upgradeable proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: B256 =
    b256!("b53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103");

/// The number of bytes stored in a single storage slot
pub const NUM_BYTES_STORAGE_SLOT: usize = 32;

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The number of confirmations to wait for on each deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The quantity of tokens granted to the first account after the token is deployed
pub const INITIAL_TOKEN_GRANT_AMOUNT: &str = "1";

/// The denomination of [`INITIAL_TOKEN_GRANT_AMOUNT`], i.e. 1 kether = 1000 tokens
pub const INITIAL_TOKEN_GRANT_DENOMINATION: &str = "kether";

/// The default RPC URL, pointing at a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// The extension of contract artifact files
pub const ARTIFACT_EXTENSION: &str = "json";

/// The index of the token deployment migration
pub const TOKEN_MIGRATION_INDEX: u32 = 1;

/// The index of the characters deployment migration
pub const CHARACTERS_MIGRATION_INDEX: u32 = 2;
