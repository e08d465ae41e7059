// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

/// Filename for the deployment manifest, looked up in the working directory.
pub const FILENAME: &str = "Deploy.toml";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
pub struct DeployManifest {
    #[serde(default)]
    pub networks: HashMap<String, TomlNetwork>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlNetwork {
    pub endpoint: String,
    pub chain_id: Option<u64>,
}

impl DeployManifest {
    /// Loads a manifest, treating a missing file as an empty one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(@grey, "no {} found, using built-in networks", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let manifest = toml::from_str(&contents)?;
        Ok(manifest)
    }
}
