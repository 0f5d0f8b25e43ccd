use {
    alloy::{
        json_abi::{Function, JsonAbi},
        primitives::Bytes,
    },
    serde::Deserialize,
    std::path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("contract {0} has no creation code, is it abstract or an interface?")]
    EmptyBytecode(String),
    #[error("contract {0} references libraries that were not linked")]
    UnlinkedLibraries(String),
    #[error("contract {contract} has malformed creation code")]
    InvalidBytecode {
        contract: String,
        #[source]
        source: alloy::primitives::hex::FromHexError,
    },
    #[error("contract {contract} does not declare {expected}, found [{found}]")]
    FunctionMismatch {
        contract: String,
        expected: String,
        found: String,
    },
}

/// Compiler output for a single contract in the layout Hardhat writes to
/// `artifacts/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub abi: JsonAbi,
    /// Hex encoded creation code. Kept as text because unlinked library
    /// references are placeholders that are not valid hex.
    #[serde(default)]
    pub bytecode: String,
    #[serde(default)]
    pub deployed_bytecode: String,
}

impl Artifact {
    pub async fn load(path: &Path) -> Result<Self, ArtifactError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| ArtifactError::Io {
                path: path.to_owned(),
                source,
            })?;
        let artifact: Self =
            serde_json::from_slice(&data).map_err(|source| ArtifactError::Json {
                path: path.to_owned(),
                source,
            })?;
        tracing::debug!(
            ?path,
            contract = %artifact.contract_name,
            "loaded artifact"
        );
        Ok(artifact)
    }

    /// Where Hardhat puts the artifact of `contract` defined in
    /// `contracts/<contract>.sol`.
    pub fn hardhat_path(artifacts: &Path, contract: &str) -> PathBuf {
        artifacts
            .join("contracts")
            .join(format!("{contract}.sol"))
            .join(format!("{contract}.json"))
    }

    /// Decoded creation code, ready to be sent in a deployment transaction.
    pub fn creation_code(&self) -> Result<Bytes, ArtifactError> {
        let code = self.bytecode.trim();
        let code = code.strip_prefix("0x").unwrap_or(code);
        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode(self.contract_name.clone()));
        }
        // solc marks link references with `__$<hash>$__`.
        if code.contains("__") {
            return Err(ArtifactError::UnlinkedLibraries(
                self.contract_name.clone(),
            ));
        }
        alloy::primitives::hex::decode(code)
            .map(Bytes::from)
            .map_err(|source| ArtifactError::InvalidBytecode {
                contract: self.contract_name.clone(),
                source,
            })
    }

    /// Checks that the ABI declares a function with the given signature,
    /// including its outputs (`name(inputs)(outputs)`). Artifacts compiled
    /// without ABI output have an empty ABI and pass unchecked.
    pub fn ensure_function(&self, signature: &str) -> Result<(), ArtifactError> {
        if self.abi.is_empty() {
            tracing::debug!(contract = %self.contract_name, "artifact has no ABI to check");
            return Ok(());
        }
        let name = signature.split('(').next().unwrap_or_default();
        let found = self
            .abi
            .function(name)
            .map(|overloads| {
                overloads
                    .iter()
                    .map(Function::signature_with_outputs)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if found.iter().any(|candidate| candidate == signature) {
            return Ok(());
        }
        Err(ArtifactError::FunctionMismatch {
            contract: self.contract_name.clone(),
            expected: signature.to_string(),
            found: found.join(", "),
        })
    }
}
