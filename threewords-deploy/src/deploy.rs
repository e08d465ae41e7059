// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use threewords_tools::{
    core::{manifest::DeployManifest, network::Network},
    ops,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, DeployArgs, ProviderArgs},
    error::DeployCliResult,
};

#[derive(Debug, clap::Args)]
pub struct DeployCommand {
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,

    #[command(flatten)]
    artifact: ArtifactArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    deploy: DeployArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: DeployCommand) -> DeployCliResult {
    let artifact = args.artifact.registry().resolve(&args.artifact.contract)?;
    log::debug!("resolved {}", artifact.fully_qualified_name());

    let manifest = DeployManifest::load(&args.provider.manifest)?;
    let network = Network::resolve(
        &manifest,
        &args.provider.network,
        args.provider.endpoint.as_deref(),
    )?;
    log::debug!("using network {} at {}", network.name, network.endpoint);

    let config = args.deploy.config()?;
    let provider = args
        .provider
        .build_provider_with_wallet(&network, &args.auth)
        .await?;

    if args.estimate_gas {
        ops::estimate_gas(&artifact, &config, &provider).await?;
    } else {
        ops::deploy(&artifact, &config, &provider).await?;
    }
    Ok(())
}
