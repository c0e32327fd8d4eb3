//! Utilities for the deploy scripts.

use std::str::FromStr;

use alloy::{
    network::Ethereum,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;

use crate::errors::ScriptError;

/// The provider type used to talk to the network
pub type Client = DynProvider<Ethereum>;

/// Sets up the client with which to deploy contracts, signing transactions
/// with the given private key.
///
/// Returns the client along with the address of the deployer.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(Client, Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let deployer = signer.address();
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok((DynProvider::new(provider), deployer))
}
