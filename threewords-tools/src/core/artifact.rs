// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts follow the Hardhat layout: one JSON file per contract at
//! `<root>/<source name>/<contract name>.json`, carrying the ABI and the creation bytecode.
//! Contracts are looked up either by bare name (`ThreeWordsNFT`) or by fully qualified name
//! (`contracts/ThreeWordsNFT.sol:ThreeWordsNFT`).

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, JsonAbi, StateMutability},
    primitives::Bytes,
};
use serde::Deserialize;

/// Directory Hardhat writes artifacts to, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Hardhat keeps compiler inputs and outputs here, never contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("artifacts directory {} does not exist, compile the contracts first", .0.display())]
    MissingRoot(PathBuf),
    #[error("artifact for {0} not found")]
    NotFound(String),
    #[error(
        "multiple artifacts match {name}, use a fully qualified name instead: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("malformed artifact {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{0} has no bytecode, abstract contracts and interfaces cannot be deployed")]
    Abstract(String),
    #[error("{name} must be linked against libraries before deployment: {}", .libraries.join(", "))]
    UnlinkedLibraries {
        name: String,
        libraries: Vec<String>,
    },
    #[error("invalid bytecode for {name}: {source}")]
    InvalidBytecode {
        name: String,
        source: hex::FromHexError,
    },
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
}

/// Lookup of compiled artifacts under a single root directory.
#[derive(Debug, Clone)]
pub struct ArtifactRegistry {
    root: PathBuf,
}

impl ArtifactRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds and loads the artifact for a bare or fully qualified contract name.
    pub fn resolve(&self, name: &str) -> Result<Artifact, ArtifactError> {
        if !self.root.is_dir() {
            return Err(ArtifactError::MissingRoot(self.root.clone()));
        }

        match name.rsplit_once(':') {
            Some((source, contract)) => {
                let path = self.root.join(source).join(format!("{contract}.json"));
                if !path.is_file() {
                    return Err(ArtifactError::NotFound(name.to_owned()));
                }
                let artifact = Artifact::load(&path)?;
                if artifact.source_name != source || artifact.contract_name != contract {
                    return Err(ArtifactError::NotFound(name.to_owned()));
                }
                Ok(artifact)
            }
            None => {
                let mut candidates = self.candidates(name)?;
                match candidates.len() {
                    0 => Err(ArtifactError::NotFound(name.to_owned())),
                    1 => Artifact::load(&candidates.remove(0)),
                    _ => Err(ArtifactError::Ambiguous {
                        name: name.to_owned(),
                        candidates: candidates
                            .iter()
                            .map(|path| self.qualified_name(path))
                            .collect(),
                    }),
                }
            }
        }
    }

    fn candidates(&self, name: &str) -> Result<Vec<PathBuf>, ArtifactError> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{root}/**/{}.json", glob::Pattern::escape(name));
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(std::io::Error::from)?;
            if path.is_file() && !self.is_build_info(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn is_build_info(&self, path: &Path) -> bool {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .any(|c| c.as_os_str() == BUILD_INFO_DIR)
    }

    /// Maps `<root>/contracts/Foo.sol/Foo.json` to `contracts/Foo.sol:Foo`.
    fn qualified_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let contract = relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        format!("{source}:{contract}")
    }
}

/// Hardhat artifact file, as written by the compiler pipeline.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: String,
    source_name: String,
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// A deployable contract: ABI plus creation bytecode.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    bytecode: Bytes,
}

impl Artifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let file: ArtifactFile =
            serde_json::from_str(&contents).map_err(|source| ArtifactError::Malformed {
                path: path.to_owned(),
                source,
            })?;
        file.try_into()
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }

    pub fn is_payable(&self) -> bool {
        self.constructor()
            .is_some_and(|c| c.state_mutability == StateMutability::Payable)
    }

    /// Creation code: bytecode followed by the ABI-encoded constructor arguments.
    pub fn init_code(&self, args: &[String]) -> Result<Bytes, ArtifactError> {
        let Some(constructor) = self.constructor() else {
            if !args.is_empty() {
                return Err(ArtifactError::InvalidConstructor(format!(
                    "{} takes no constructor arguments (got {})",
                    self.contract_name,
                    args.len()
                )));
            }
            return Ok(self.bytecode.clone());
        };

        if args.len() != constructor.inputs.len() {
            return Err(ArtifactError::InvalidConstructor(format!(
                "mismatch number of constructor arguments (want {}; got {})",
                constructor.inputs.len(),
                args.len(),
            )));
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let ty = param.resolve().map_err(|err| {
                ArtifactError::InvalidConstructor(format!("could not resolve {param}: {err}"))
            })?;
            let value = ty.coerce_str(arg).map_err(|err| {
                ArtifactError::InvalidConstructor(format!("could not parse {param}: {err}"))
            })?;
            values.push(value);
        }
        let encoded = constructor
            .abi_encode_input_raw(&values)
            .map_err(|err| ArtifactError::InvalidConstructor(err.to_string()))?;

        let mut code = self.bytecode.to_vec();
        code.extend(encoded);
        Ok(code.into())
    }
}

impl TryFrom<ArtifactFile> for Artifact {
    type Error = ArtifactError;

    fn try_from(file: ArtifactFile) -> Result<Self, Self::Error> {
        let libraries: Vec<String> = file
            .link_references
            .iter()
            .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
            .collect();
        if !libraries.is_empty() {
            return Err(ArtifactError::UnlinkedLibraries {
                name: file.contract_name,
                libraries,
            });
        }

        let hex_code = file.bytecode.trim();
        let hex_code = hex_code.strip_prefix("0x").unwrap_or(hex_code);
        if hex_code.is_empty() {
            return Err(ArtifactError::Abstract(file.contract_name));
        }
        let bytecode = match hex::decode(hex_code) {
            Ok(code) => code.into(),
            Err(source) => {
                return Err(ArtifactError::InvalidBytecode {
                    name: file.contract_name,
                    source,
                })
            }
        };

        Ok(Self {
            contract_name: file.contract_name,
            source_name: file.source_name,
            abi: file.abi,
            bytecode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const CODE: &str = "0x600a600c600039600a6000f3602a60005260206000f3";

    fn write_artifact(root: &Path, source: &str, name: &str, body: serde_json::Value) {
        let dir = root.join(source);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
    }

    fn hardhat_artifact(
        source: &str,
        name: &str,
        abi: serde_json::Value,
        code: &str,
    ) -> serde_json::Value {
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": source,
            "abi": abi,
            "bytecode": code,
            "deployedBytecode": "0x602a60005260206000f3",
            "linkReferences": {},
            "deployedLinkReferences": {}
        })
    }

    #[test]
    fn resolves_bare_name() {
        let dir = TempDir::new().unwrap();
        let source = "contracts/ThreeWordsNFT.sol";
        write_artifact(
            dir.path(),
            source,
            "ThreeWordsNFT",
            hardhat_artifact(source, "ThreeWordsNFT", json!([]), CODE),
        );
        // Debug files sit next to every artifact and must not be picked up.
        fs::write(
            dir.path().join(source).join("ThreeWordsNFT.dbg.json"),
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/abc.json"}"#,
        )
        .unwrap();
        // Nor is anything written under build-info.
        write_artifact(
            dir.path(),
            BUILD_INFO_DIR,
            "ThreeWordsNFT",
            json!({ "_format": "hh-sol-build-info-1", "solcVersion": "0.8.24" }),
        );

        let registry = ArtifactRegistry::new(dir.path());
        let artifact = registry.resolve("ThreeWordsNFT").unwrap();
        assert_eq!(artifact.contract_name, "ThreeWordsNFT");
        assert_eq!(
            artifact.fully_qualified_name(),
            "contracts/ThreeWordsNFT.sol:ThreeWordsNFT"
        );
        assert_eq!(artifact.bytecode().len(), 22);
        assert_eq!(artifact.init_code(&[]).unwrap(), *artifact.bytecode());
    }

    #[test]
    fn resolves_fully_qualified_name() {
        let dir = TempDir::new().unwrap();
        for source in ["contracts/A.sol", "contracts/B.sol"] {
            write_artifact(
                dir.path(),
                source,
                "Token",
                hardhat_artifact(source, "Token", json!([]), CODE),
            );
        }

        let registry = ArtifactRegistry::new(dir.path());
        let artifact = registry.resolve("contracts/B.sol:Token").unwrap();
        assert_eq!(artifact.source_name, "contracts/B.sol");

        match registry.resolve("Token") {
            Err(ArtifactError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates, ["contracts/A.sol:Token", "contracts/B.sol:Token"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn missing_artifacts() {
        let dir = TempDir::new().unwrap();
        let registry = ArtifactRegistry::new(dir.path().join("artifacts"));
        assert!(matches!(
            registry.resolve("ThreeWordsNFT"),
            Err(ArtifactError::MissingRoot(_))
        ));

        let registry = ArtifactRegistry::new(dir.path());
        assert!(matches!(
            registry.resolve("ThreeWordsNFT"),
            Err(ArtifactError::NotFound(_))
        ));
        assert!(matches!(
            registry.resolve("contracts/ThreeWordsNFT.sol:ThreeWordsNFT"),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_undeployable_artifacts() {
        let dir = TempDir::new().unwrap();
        let source = "contracts/IWords.sol";
        write_artifact(
            dir.path(),
            source,
            "IWords",
            hardhat_artifact(source, "IWords", json!([]), "0x"),
        );
        let mut linked = hardhat_artifact("contracts/Lib.sol", "UsesLib", json!([]), CODE);
        linked["linkReferences"] = json!({
            "contracts/Words.sol": { "Words": [{ "length": 20, "start": 180 }] }
        });
        write_artifact(dir.path(), "contracts/Lib.sol", "UsesLib", linked);
        write_artifact(
            dir.path(),
            "contracts/Bad.sol",
            "Bad",
            hardhat_artifact("contracts/Bad.sol", "Bad", json!([]), "0xzz"),
        );
        fs::write(dir.path().join("contracts/Bad.sol/Broken.json"), "{ not json").unwrap();

        let registry = ArtifactRegistry::new(dir.path());
        assert!(matches!(
            registry.resolve("IWords"),
            Err(ArtifactError::Abstract(_))
        ));
        match registry.resolve("UsesLib") {
            Err(ArtifactError::UnlinkedLibraries { libraries, .. }) => {
                assert_eq!(libraries, ["contracts/Words.sol:Words"]);
            }
            other => panic!("expected unlinked libraries, got {other:?}"),
        }
        assert!(matches!(
            registry.resolve("Bad"),
            Err(ArtifactError::InvalidBytecode { .. })
        ));
        assert!(matches!(
            registry.resolve("Broken"),
            Err(ArtifactError::Malformed { .. })
        ));
    }

    #[test]
    fn encodes_constructor_arguments() {
        let dir = TempDir::new().unwrap();
        let source = "contracts/Named.sol";
        let abi = json!([{
            "type": "constructor",
            "stateMutability": "payable",
            "inputs": [
                { "name": "supply", "type": "uint256", "internalType": "uint256" },
                { "name": "owner", "type": "address", "internalType": "address" }
            ]
        }]);
        write_artifact(
            dir.path(),
            source,
            "Named",
            hardhat_artifact(source, "Named", abi, CODE),
        );

        let artifact = ArtifactRegistry::new(dir.path()).resolve("Named").unwrap();
        assert!(artifact.is_payable());

        let args = vec![
            "3".to_owned(),
            "0x00000000000000000000000000000000000000ff".to_owned(),
        ];
        let code = artifact.init_code(&args).unwrap();
        assert_eq!(code.len(), artifact.bytecode().len() + 64);
        assert_eq!(code[artifact.bytecode().len() + 31], 3);
        assert_eq!(code[code.len() - 1], 0xff);

        assert!(matches!(
            artifact.init_code(&args[..1]),
            Err(ArtifactError::InvalidConstructor(_))
        ));
        assert!(matches!(
            artifact.init_code(&["three".to_owned(), args[1].clone()]),
            Err(ArtifactError::InvalidConstructor(_))
        ));
    }

    #[test]
    fn no_constructor_takes_no_arguments() {
        let dir = TempDir::new().unwrap();
        let source = "contracts/ThreeWordsNFT.sol";
        write_artifact(
            dir.path(),
            source,
            "ThreeWordsNFT",
            hardhat_artifact(source, "ThreeWordsNFT", json!([]), CODE),
        );
        let artifact = ArtifactRegistry::new(dir.path())
            .resolve("ThreeWordsNFT")
            .unwrap();
        assert!(!artifact.is_payable());
        assert!(matches!(
            artifact.init_code(&["1".to_owned()]),
            Err(ArtifactError::InvalidConstructor(_))
        ));
    }
}
