// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network selection.
//!
//! A run targets exactly one network, picked by name from the deployment manifest. The
//! `localhost` network is always available and points at a local development node unless the
//! manifest overrides it.

use alloy::providers::Provider;

use crate::{core::manifest::DeployManifest, utils::color::Color};

/// Network used when none is selected.
pub const DEFAULT_NETWORK: &str = "localhost";

/// Endpoint of a local development node (Hardhat, Anvil).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("unknown network {}, known networks: {}", .name.red(), .known.join(", "))]
    UnknownNetwork { name: String, known: Vec<String> },
    #[error(
        "network {name} expects chain id {}, but the node reports {}",
        .expected.red(),
        .actual.red()
    )]
    ChainIdMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub endpoint: String,
    pub chain_id: Option<u64>,
}

impl Network {
    /// Looks up a network by name, with an optional endpoint override.
    pub fn resolve(
        manifest: &DeployManifest,
        name: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, NetworkError> {
        let mut network = match manifest.networks.get(name) {
            Some(toml) => Self {
                name: name.to_owned(),
                endpoint: toml.endpoint.clone(),
                chain_id: toml.chain_id,
            },
            None if name == DEFAULT_NETWORK => Self {
                name: name.to_owned(),
                endpoint: DEFAULT_ENDPOINT.to_owned(),
                chain_id: None,
            },
            None => {
                let mut known: Vec<_> = manifest.networks.keys().cloned().collect();
                if !known.iter().any(|n| n == DEFAULT_NETWORK) {
                    known.push(DEFAULT_NETWORK.to_owned());
                }
                known.sort();
                return Err(NetworkError::UnknownNetwork {
                    name: name.to_owned(),
                    known,
                });
            }
        };
        if let Some(endpoint) = endpoint {
            network.endpoint = endpoint.to_owned();
        }
        Ok(network)
    }

    /// Confirms the connected node serves the configured chain, returning its chain id.
    pub async fn check_chain_id(&self, provider: &impl Provider) -> Result<u64, NetworkError> {
        let actual = provider.get_chain_id().await?;
        debug!(@grey, "connected to {} (chain id {actual})", self.endpoint);
        match self.chain_id {
            Some(expected) if expected != actual => Err(NetworkError::ChainIdMismatch {
                name: self.name.clone(),
                expected,
                actual,
            }),
            _ => Ok(actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::TomlNetwork;

    fn manifest() -> DeployManifest {
        let mut manifest = DeployManifest::default();
        manifest.networks.insert(
            "sepolia".to_owned(),
            TomlNetwork {
                endpoint: "https://rpc.sepolia.org".to_owned(),
                chain_id: Some(11155111),
            },
        );
        manifest
    }

    #[test]
    fn localhost_is_built_in() {
        let network = Network::resolve(&DeployManifest::default(), DEFAULT_NETWORK, None).unwrap();
        assert_eq!(network.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(network.chain_id, None);
    }

    #[test]
    fn endpoint_override_keeps_chain_id() {
        let network =
            Network::resolve(&manifest(), "sepolia", Some("http://10.0.0.2:8545")).unwrap();
        assert_eq!(network.endpoint, "http://10.0.0.2:8545");
        assert_eq!(network.chain_id, Some(11155111));
    }

    #[test]
    fn unknown_network_lists_known_ones() {
        match Network::resolve(&manifest(), "mainnet", None) {
            Err(NetworkError::UnknownNetwork { name, known }) => {
                assert_eq!(name, "mainnet");
                assert_eq!(known, ["localhost", "sepolia"]);
            }
            other => panic!("expected unknown network, got {other:?}"),
        }
    }
}
