//! Deployment of contracts behind a transparent upgradeable proxy.
//!
//! Concretely, this is a [`TransparentUpgradeableProxy`](https://docs.openzeppelin.com/contracts/5.x/api/proxy#transparent_proxy),
//! which itself deploys a `ProxyAdmin` contract.
//!
//! Calls made directly to the `TransparentUpgradeableProxy` contract will be forwarded to the implementation contract.
//! Upgrade calls can only be made to the `TransparentUpgradeableProxy` through the `ProxyAdmin`.

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;
use tracing::info;

use crate::{
    artifacts::{ArtifactStore, ContractArtifact},
    constants::{
        NUM_BYTES_ADDRESS, NUM_BYTES_STORAGE_SLOT, PROXY_ADMIN_STORAGE_SLOT, PROXY_CONTRACT,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    types::Deployment,
};

/// Deploy `artifact` as an implementation contract and put it behind a new
/// proxy owned by `owner`, initializing it with `init_args`
pub async fn deploy_proxy<D: ContractDeployer + ?Sized>(
    deployer: &D,
    artifacts: &ArtifactStore,
    artifact: &ContractArtifact,
    init_args: &[DynSolValue],
    owner: Address,
) -> Result<Deployment, ScriptError> {
    // Encode the initializer before touching the network, so that bad
    // arguments don't leave an orphaned implementation behind
    let init_calldata = artifact.initializer_calldata(init_args)?;
    let proxy_artifact = artifacts.require(PROXY_CONTRACT)?;

    let implementation = deployer.deploy(artifact, &[] /* constructor_args */).await?;

    let proxy_address = deployer
        .deploy(
            proxy_artifact,
            &[
                DynSolValue::Address(implementation),
                DynSolValue::Address(owner),
                DynSolValue::Bytes(init_calldata.to_vec()),
            ],
        )
        .await?;

    // This is the recommended way to get the proxy admin address:
    // https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/ERC1967/ERC1967Utils.sol#L104-L106
    let admin_slot = deployer
        .storage_at(proxy_address, PROXY_ADMIN_STORAGE_SLOT)
        .await?;
    let proxy_admin = Address::from_slice(
        &admin_slot[NUM_BYTES_STORAGE_SLOT - NUM_BYTES_ADDRESS..NUM_BYTES_STORAGE_SLOT],
    );

    info!(
        "{} proxy deployed at {:#x} (implementation {:#x}, admin {:#x})",
        artifact.contract_name, proxy_address, implementation, proxy_admin
    );

    Ok(Deployment {
        address: proxy_address,
        implementation: Some(implementation),
        proxy_admin: Some(proxy_admin),
        init_calldata: Some(init_calldata),
    })
}
