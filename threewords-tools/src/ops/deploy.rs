// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::{
    primitives::{utils::format_units, Address},
    providers::{Provider, WalletProvider},
};

use crate::{
    core::{
        artifact::Artifact,
        deployment::{self, Deployment, DeploymentConfig, GasEstimate},
    },
    utils::color::DebugColor,
};

/// The line reporting a deployed address to the operator.
pub fn deployed_line(address: Address) -> String {
    format!("Contract deployed to: {address}")
}

/// Deploys the contract and reports its address on stdout.
pub async fn deploy(
    artifact: &Artifact,
    config: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> eyre::Result<Deployment> {
    let deployment = deployment::deploy(artifact, config, provider).await?;
    println!("{}", deployed_line(deployment.address));
    Ok(deployment)
}

pub async fn estimate_gas(
    artifact: &Artifact,
    config: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> eyre::Result<GasEstimate> {
    let estimate = deployment::estimate(artifact, config, provider).await?;

    greyln!("estimates");
    greyln!("deployment tx gas: {}", estimate.gas.debug_lavender());
    greyln!(
        "max fee per gas: {} gwei",
        format_units(estimate.fees.max_fee_per_gas(), "gwei")?.lavender()
    );
    greyln!(
        "deployment tx total cost: {} ETH",
        format_units(estimate.total_cost(), "ether")?.lavender()
    );
    greyln!(
        "{} would be deployed to: {}",
        artifact.contract_name,
        estimate.predicted_address.lavender()
    );

    Ok(estimate)
}
