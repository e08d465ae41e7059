// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf, time::Duration};

use alloy::{
    network::EthereumWallet,
    primitives::{utils::parse_ether, FixedBytes, U256},
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{bail, eyre, Context};
use threewords_tools::{
    core::{
        artifact::{ArtifactRegistry, DEFAULT_ARTIFACTS_DIR},
        deployment::DeploymentConfig,
        manifest,
        network::{Network, DEFAULT_NETWORK},
    },
    DEFAULT_CONTRACT,
};

use crate::{
    constants::PRIVATE_KEY_ENV,
    utils::{convert_gwei_to_wei, decode0x},
};

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Name of the contract to deploy, bare or fully qualified (`path/File.sol:Name`)
    #[arg(long, default_value = DEFAULT_CONTRACT)]
    pub contract: String,
    /// Directory holding compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,
}

impl ArtifactArgs {
    pub fn registry(&self) -> ArtifactRegistry {
        ArtifactRegistry::new(&self.artifacts_dir)
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    pub fn build_signer(&self) -> eyre::Result<PrivateKeySigner> {
        if let Some(key) = &self.private_key {
            return signer_from_hex(key);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return signer_from_hex(key);
        }

        let keystore = self.keystore_path.as_ref().ok_or(eyre!(
            "no signer configured: pass --private-key, --private-key-path or --keystore-path"
        ))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        Ok(LocalSigner::decrypt_keystore(keystore, password.trim_end())?)
    }
}

fn signer_from_hex(key: impl AsRef<str>) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key)?;
    if bytes.len() != 32 {
        bail!("private key must be 32 bytes, got {}", bytes.len());
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    Ok(PrivateKeySigner::from_bytes(&priv_key_bytes)?)
}

#[derive(Debug, clap::Args)]
pub struct DeployArgs {
    /// Number of confirmations to wait for after the deployment is mined.
    #[arg(long, default_value = "1")]
    confirmations: u64,
    /// Give up waiting for the receipt after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Vec<String>,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether, default_value = "0")]
    constructor_value: U256,
}

impl DeployArgs {
    pub fn config(&self) -> eyre::Result<DeploymentConfig> {
        let max_fee_per_gas_wei = self
            .max_fee_per_gas_gwei
            .as_deref()
            .map(convert_gwei_to_wei)
            .transpose()?;
        Ok(DeploymentConfig {
            max_fee_per_gas_wei,
            constructor_args: self.constructor_args.clone(),
            constructor_value: self.constructor_value,
            confirmations: self.confirmations,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Network to deploy to, as named in the deployment manifest
    #[arg(long, default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// RPC endpoint, overriding the one configured for the network
    #[arg(short, long)]
    pub endpoint: Option<String>,
    /// Path to the deployment manifest
    #[arg(long, default_value = manifest::FILENAME)]
    pub manifest: PathBuf,
}

impl ProviderArgs {
    pub async fn build_provider(&self, network: &Network) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&network.endpoint).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        network: &Network,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let signer = auth.build_signer()?;
        let provider = self.build_provider(network).await?;
        let chain_id = network.check_chain_id(&provider).await?;
        let wallet = EthereumWallet::new(signer.with_chain_id(Some(chain_id)));
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&network.endpoint)
            .await?;
        Ok(provider)
    }
}
