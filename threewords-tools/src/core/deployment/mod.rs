// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::{Provider, WalletProvider},
    rpc::types::TransactionReceipt,
};

use crate::{
    core::artifact::{Artifact, ArtifactError},
    utils::{
        color::{Color, DebugColor},
        format_eth, format_gas,
    },
};

pub use request::{DeploymentRequest, Fees};

pub mod request;

#[derive(Debug)]
pub struct DeploymentConfig {
    pub max_fee_per_gas_wei: Option<u128>,
    pub constructor_args: Vec<String>,
    pub constructor_value: U256,
    pub confirmations: u64,
    pub timeout: Option<Duration>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            max_fee_per_gas_wei: None,
            constructor_args: Vec::new(),
            constructor_value: U256::ZERO,
            confirmations: 1,
            timeout: None,
        }
    }
}

/// A confirmed contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

/// Projected cost of a deployment that has not been sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub fees: Fees,
    pub value: U256,
    pub predicted_address: Address,
}

impl GasEstimate {
    /// Upper bound on what the sender pays: gas at the max fee plus any value sent.
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.fees.max_fee_per_gas()) + self.value
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("deployment failed during gas estimation: {0}")]
    GasEstimation(alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error(
        "not enough funds in account {} to deploy\nbalance {} < {}",
        .from_address.red(),
        format!("{} wei", .balance).red(),
        format!("{} wei", .cost).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        cost: U256,
    },
    #[error("attempting to send Ether to the non-payable constructor of {0}")]
    NonPayableConstructor(String),
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .tx_hash.debug_red())]
    MissingContractAddress { tx_hash: TxHash },
}

fn request(
    artifact: &Artifact,
    config: &DeploymentConfig,
    sender: Address,
) -> Result<DeploymentRequest, DeploymentError> {
    if !config.constructor_value.is_zero() && !artifact.is_payable() {
        return Err(DeploymentError::NonPayableConstructor(
            artifact.contract_name.clone(),
        ));
    }
    let init_code = artifact.init_code(&config.constructor_args)?;
    Ok(DeploymentRequest::new(sender, init_code, config))
}

/// Estimates a deployment without sending it.
pub async fn estimate(
    artifact: &Artifact,
    config: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> Result<GasEstimate, DeploymentError> {
    let from_address = provider.default_signer_address();
    let req = request(artifact, config, from_address)?;
    let gas = req.estimate_gas(provider).await?;
    let fees = req.fees(provider).await?;
    let nonce = provider.get_transaction_count(from_address).await?;
    Ok(GasEstimate {
        gas,
        fees,
        value: req.value(),
        predicted_address: from_address.create(nonce),
    })
}

/// Deploys a contract from the provider's default signer and waits for confirmation.
pub async fn deploy(
    artifact: &Artifact,
    config: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> Result<Deployment, DeploymentError> {
    let from_address = provider.default_signer_address();
    debug!(@grey, "sender address: {}", from_address.lavender());
    debug!(@grey, "deploying {}", artifact.fully_qualified_name());

    let req = request(artifact, config, from_address)?;
    let gas = req.estimate_gas(provider).await?;
    let fees = req.fees(provider).await?;

    // check balance early
    let cost = U256::from(gas) * U256::from(fees.max_fee_per_gas()) + req.value();
    let balance = provider.get_balance(from_address).await?;
    if balance < cost {
        return Err(DeploymentError::NotEnoughFunds {
            from_address,
            balance,
            cost,
        });
    }
    debug!(@grey, "estimated cost: {}", format_eth(cost));

    let receipt = req.exec(gas, fees, provider).await?;
    let deployment = confirmed(&receipt)?;

    info!(@grey, "deployment tx hash: {}", deployment.tx_hash.debug_lavender());
    debug!(@grey, "gas used: {}", format_gas(deployment.gas_used));
    if let Some(block) = deployment.block_number {
        debug!(@grey, "included in block {block}");
    }

    Ok(deployment)
}

/// Reads the created contract out of a mined receipt.
pub fn confirmed(receipt: &TransactionReceipt) -> Result<Deployment, DeploymentError> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeploymentError::Reverted { tx_hash });
    }
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::MissingContractAddress { tx_hash })?;
    Ok(Deployment {
        address,
        tx_hash,
        gas_used: receipt.gas_used,
        block_number: receipt.block_number,
    })
}
