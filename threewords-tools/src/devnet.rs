// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::local::PrivateKeySigner,
};
use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// First prefunded account of an Anvil dev node.
pub const DEVNET_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Chain id Anvil reports by default.
pub const DEVNET_CHAIN_ID: u64 = 31337;

const ANVIL_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const ANVIL_IMAGE_TAG: &str = "v1.2.3";
const ANVIL_PORT: u16 = 8545;

/// Manage a devnet node for deploying contracts.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new Anvil node in the background, mining a block per transaction.
    /// This node will be shutdown when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"net_version","params":[],"id":1}"#)
            .with_response_matcher_async(anvil_response_matcher);
        let container = GenericImage::new(ANVIL_IMAGE_NAME, ANVIL_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_entrypoint("anvil")
            .with_cmd(vec!["--host", "0.0.0.0", "--port", "8545"])
            .start()
            .await
            .wrap_err("failed to start Anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get Anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the Anvil node RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Create a provider signing with the prefunded devnet key.
    pub async fn create_provider(&self) -> Result<impl Provider + WalletProvider> {
        let signer: PrivateKeySigner = DEVNET_PRIVATE_KEY.parse()?;
        self.create_provider_with_signer(signer).await
    }

    /// Create a provider signing with an arbitrary key, funded or not.
    pub async fn create_provider_with_signer(
        &self,
        signer: PrivateKeySigner,
    ) -> Result<impl Provider + WalletProvider> {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(self.rpc())
            .await?;
        Ok(provider)
    }
}

async fn anvil_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
