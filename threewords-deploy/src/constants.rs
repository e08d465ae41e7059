// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Environment variable holding the deployer's hex-encoded private key.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";
