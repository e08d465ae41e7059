// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::{
    network::EthereumWallet,
    primitives::U256,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::local::PrivateKeySigner,
};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::{Artifact, ArtifactRegistry, DEFAULT_ARTIFACTS_DIR},
        deployment::{self, Deployment, DeploymentConfig, GasEstimate},
    },
    Result, DEFAULT_CONTRACT,
};

/// Defines the configuration for deploying a compiled contract.
/// After setting the parameters, call `Deployer::deploy` to perform the deployment.
#[derive(TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct Deployer {
    #[builder(!default)]
    rpc: String,

    #[cfg_attr(
        feature = "integration-tests",
        builder(default = crate::devnet::DEVNET_PRIVATE_KEY.to_owned())
    )]
    #[cfg_attr(not(feature = "integration-tests"), builder(!default))]
    private_key: String,

    #[builder(default = PathBuf::from(DEFAULT_ARTIFACTS_DIR))]
    artifacts_dir: PathBuf,

    #[builder(default = DEFAULT_CONTRACT.to_owned())]
    contract: String,

    constructor_args: Vec<String>,

    constructor_value: U256,
}

impl Deployer {
    pub async fn estimate_gas(&self) -> Result<GasEstimate> {
        let (artifact, config) = self.prepare()?;
        let provider = self.provider().await?;
        Ok(deployment::estimate(&artifact, &config, &provider).await?)
    }

    /// Deploys the contract, returning the confirmed deployment.
    pub async fn deploy(&self) -> Result<Deployment> {
        let (artifact, config) = self.prepare()?;
        let provider = self.provider().await?;
        Ok(deployment::deploy(&artifact, &config, &provider).await?)
    }

    fn prepare(&self) -> Result<(Artifact, DeploymentConfig)> {
        let artifact = ArtifactRegistry::new(&self.artifacts_dir).resolve(&self.contract)?;
        let config = DeploymentConfig {
            constructor_args: self.constructor_args.clone(),
            constructor_value: self.constructor_value,
            ..Default::default()
        };
        Ok((artifact, config))
    }

    async fn provider(&self) -> Result<impl Provider + WalletProvider> {
        let signer: PrivateKeySigner = self.private_key.trim().parse()?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(&self.rpc)
            .await?;
        Ok(provider)
    }
}
