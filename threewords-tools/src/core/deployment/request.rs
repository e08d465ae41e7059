// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract creation transaction

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::{DeploymentConfig, DeploymentError};
use crate::utils::color::DebugColor;

/// Fee parameters for the deployment transaction, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fees {
    Eip1559 {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
    /// Chains without a base fee only take a gas price.
    Legacy { gas_price: u128 },
}

impl Fees {
    /// Most the sender can be charged per unit of gas.
    pub fn max_fee_per_gas(&self) -> u128 {
        match *self {
            Self::Eip1559 { max_fee_per_gas, .. } => max_fee_per_gas,
            Self::Legacy { gas_price } => gas_price,
        }
    }
}

/// Deployment transaction request for a compiled contract
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl DeploymentRequest {
    pub fn new(sender: Address, init_code: Bytes, config: &DeploymentConfig) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(init_code)
                .with_value(config.constructor_value),
            max_fee_per_gas_wei: config.max_fee_per_gas_wei,
            confirmations: config.confirmations.max(1),
            timeout: config.timeout,
        }
    }

    pub fn value(&self) -> U256 {
        self.tx.value.unwrap_or_default()
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        provider
            .estimate_gas(self.tx.clone())
            .await
            .map_err(DeploymentError::GasEstimation)
    }

    /// Fees the node suggests, capped by the configured max fee when there is one.
    ///
    /// Falls back to the legacy gas price when the node cannot estimate EIP-1559 fees.
    pub async fn fees(&self, provider: &impl Provider) -> Result<Fees, DeploymentError> {
        if let Some(max_fee_per_gas) = self.max_fee_per_gas_wei {
            let tip = provider.get_max_priority_fee_per_gas().await?;
            return Ok(Fees::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas: tip.min(max_fee_per_gas),
            });
        }
        match provider.estimate_eip1559_fees().await {
            Ok(estimate) => Ok(Fees::Eip1559 {
                max_fee_per_gas: estimate.max_fee_per_gas,
                max_priority_fee_per_gas: estimate.max_priority_fee_per_gas,
            }),
            Err(err) => {
                debug!(@grey, "no eip-1559 fee estimate ({err}), using gas price");
                let gas_price = provider.get_gas_price().await?;
                Ok(Fees::Legacy { gas_price })
            }
        }
    }

    /// Sends the transaction and waits for its receipt.
    pub async fn exec(
        self,
        gas: u64,
        fees: Fees,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let mut tx = self.tx;
        tx.gas = Some(gas);
        match fees {
            Fees::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                tx.max_fee_per_gas = Some(max_fee_per_gas);
                tx.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
            }
            Fees::Legacy { gas_price } => tx.gas_price = Some(gas_price),
        }

        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        debug!(@grey, "waiting for {} confirmation(s)", self.confirmations);

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.timeout)
            .get_receipt()
            .await?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        primitives::{address, TxKind},
        providers::ProviderBuilder,
        transports::mock::Asserter,
    };

    const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn request(config: &DeploymentConfig) -> DeploymentRequest {
        DeploymentRequest::new(SENDER, Bytes::from_static(&[0x60, 0x00]), config)
    }

    #[test]
    fn builds_create_transaction() {
        let config = DeploymentConfig {
            constructor_value: U256::from(7),
            confirmations: 0,
            timeout: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let req = request(&config);

        assert_eq!(req.tx.from, Some(SENDER));
        assert_eq!(req.tx.to, Some(TxKind::Create));
        assert_eq!(req.tx.input.input(), Some(&Bytes::from_static(&[0x60, 0x00])));
        assert_eq!(req.value(), U256::from(7));
        assert_eq!(req.confirmations, 1);
        assert_eq!(req.max_fee_per_gas_wei, None);
        assert_eq!(req.timeout, Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn max_fee_caps_priority_fee() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_success(&U256::from(3_000_000_000u64));

        let config = DeploymentConfig {
            max_fee_per_gas_wei: Some(2_000_000_000),
            ..Default::default()
        };
        let fees = request(&config).fees(&provider).await.unwrap();
        assert_eq!(
            fees,
            Fees::Eip1559 {
                max_fee_per_gas: 2_000_000_000,
                max_priority_fee_per_gas: 2_000_000_000,
            }
        );
    }

    #[tokio::test]
    async fn max_fee_keeps_lower_priority_fee() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_success(&U256::from(1_000_000_000u64));

        let config = DeploymentConfig {
            max_fee_per_gas_wei: Some(2_000_000_000),
            ..Default::default()
        };
        let fees = request(&config).fees(&provider).await.unwrap();
        assert_eq!(
            fees,
            Fees::Eip1559 {
                max_fee_per_gas: 2_000_000_000,
                max_priority_fee_per_gas: 1_000_000_000,
            }
        );
    }

    #[tokio::test]
    async fn falls_back_to_gas_price_without_fee_history() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_failure_msg("the method eth_feeHistory does not exist/is not available");
        asserter.push_success(&U256::from(1_500_000_000u64));

        let fees = request(&DeploymentConfig::default())
            .fees(&provider)
            .await
            .unwrap();
        assert_eq!(
            fees,
            Fees::Legacy {
                gas_price: 1_500_000_000
            }
        );
        assert_eq!(fees.max_fee_per_gas(), 1_500_000_000);
    }

    #[tokio::test]
    async fn gas_estimation_failure_is_reported() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_failure_msg("execution reverted");

        let err = request(&DeploymentConfig::default())
            .estimate_gas(&provider)
            .await
            .unwrap_err();
        assert!(matches!(err, DeploymentError::GasEstimation(_)), "{err:?}");
    }
}
