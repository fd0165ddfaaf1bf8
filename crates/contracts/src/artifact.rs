use {
    alloy::primitives::Bytes,
    serde::Deserialize,
    std::path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {path:?} contains no creation bytecode (abstract contract or interface?)")]
    EmptyBytecode { path: PathBuf },
    #[error("artifact {path:?} references libraries that were not linked")]
    Unlinked { path: PathBuf },
    #[error("artifact {path:?} contains malformed bytecode: {source}")]
    Hex {
        path: PathBuf,
        #[source]
        source: const_hex::FromHexError,
    },
}

/// A compiled contract as far as deploying it is concerned.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: Option<String>,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    bytecode: RawBytecode,
}

/// Hardhat stores the bytecode as a plain hex string, Foundry wraps it in an
/// object next to its source map.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hardhat(String),
    Foundry { object: String },
}

impl RawBytecode {
    fn into_hex(self) -> String {
        match self {
            Self::Hardhat(hex) | Self::Foundry { object: hex } => hex,
        }
    }
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    /// Parses an artifact. `path` is only used for error reporting.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(json).map_err(|source| ArtifactError::Json {
            path: path.to_owned(),
            source,
        })?;
        let hex = raw.bytecode.into_hex();

        // Unlinked library references are `__$<hash>$__` placeholders which are
        // never valid hex.
        if hex.contains('_') {
            return Err(ArtifactError::Unlinked {
                path: path.to_owned(),
            });
        }
        let bytecode = const_hex::decode(&hex).map_err(|source| ArtifactError::Hex {
            path: path.to_owned(),
            source,
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode {
                path: path.to_owned(),
            });
        }

        Ok(Self {
            name: raw.contract_name,
            bytecode: bytecode.into(),
        })
    }

    /// Creation bytecode followed by the ABI encoded constructor arguments.
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        [self.bytecode.as_ref(), constructor_args].concat().into()
    }
}
