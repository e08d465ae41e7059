// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying ThreeWordsNFT contracts from compiled Hardhat artifacts.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub mod deployer;
#[cfg(feature = "integration-tests")]
pub mod devnet;
pub use deployer::*;

pub use error::{Error, Result};

/// Contract deployed when no name is given.
pub const DEFAULT_CONTRACT: &str = "ThreeWordsNFT";
