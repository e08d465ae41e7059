// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_ether, U256};
use color::Color;

pub mod color;

/// Pretty-prints a gas amount, colored by how heavy the deployment is.
pub fn format_gas(gas: u64) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Pretty-prints a wei amount in ETH.
pub fn format_eth(wei: U256) -> String {
    let text = format!("{} ETH", format_ether(wei));
    if wei <= U256::from(5e15 as u64) {
        text.mint()
    } else if wei <= U256::from(5e16 as u64) {
        text.yellow()
    } else {
        text.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::{MINT, PINK, RED, YELLOW};

    #[test]
    fn gas_is_colored_by_weight() {
        assert!(format_gas(21_000).starts_with(MINT));
        assert!(format_gas(5_000_000).starts_with(YELLOW));
        assert!(format_gas(30_000_000).starts_with(PINK));
    }

    #[test]
    fn eth_amounts_are_formatted() {
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        let text = format_eth(one_eth);
        assert!(text.starts_with(RED));
        assert!(text.contains("1.000000000000000000 ETH"));
        assert!(format_eth(U256::from(1)).starts_with(MINT));
    }
}
