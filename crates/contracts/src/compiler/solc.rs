use {
    super::CompilerSettings,
    crate::Artifact,
    alloy::json_abi::JsonAbi,
    anyhow::{Context, Result, anyhow, bail},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
        process::Stdio,
    },
    tokio::{io::AsyncWriteExt, process::Command},
};

/// Handle to a `solc` executable.
#[derive(Debug, Clone)]
pub struct Solc {
    binary: PathBuf,
}

impl Solc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Version reported by `solc --version`, without the commit suffix.
    pub async fn version(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .with_context(|| format!("failed to run {:?}", self.binary))?;
        if !output.status.success() {
            bail!("{:?} --version exited with {}", self.binary, output.status);
        }
        parse_version(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("unexpected {:?} --version output", self.binary))
    }

    /// Compiles the Solidity file at `source` with `settings` and returns the
    /// artifact of `contract`.
    ///
    /// Imports are resolved relative to the directory of `source`.
    pub async fn compile(
        &self,
        settings: &CompilerSettings,
        source: &Path,
        contract: &str,
    ) -> Result<Artifact> {
        match self.version().await {
            Ok(version) if version != settings.version => tracing::warn!(
                found = %version,
                configured = %settings.version,
                "solc version mismatch"
            ),
            Ok(_) => (),
            Err(err) => tracing::warn!(?err, "could not determine solc version"),
        }

        let content = tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read source {source:?}"))?;
        let source_name = source
            .file_name()
            .with_context(|| format!("{source:?} is not a file"))?
            .to_string_lossy()
            .into_owned();
        let base_path = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let input = settings
            .standard_json_input(&BTreeMap::from([(source_name.clone(), content)]));

        tracing::info!(?source, contract, "compiling with solc");
        let mut child = Command::new(&self.binary)
            .arg("--standard-json")
            .arg("--base-path")
            .arg(base_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {:?}", self.binary))?;
        let mut stdin = child
            .stdin
            .take()
            .context("solc stdin is not captured")?;
        stdin
            .write_all(input.to_string().as_bytes())
            .await
            .context("failed to write solc input")?;
        // Closing stdin signals the end of the input.
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("failed to wait for solc")?;
        if !output.status.success() {
            bail!(
                "solc exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        let output: StandardJsonOutput =
            serde_json::from_slice(&output.stdout).context("malformed solc output")?;
        output.into_artifact(&source_name, contract)
    }
}

fn parse_version(stdout: &str) -> Option<String> {
    let version = stdout
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))?
        .trim();
    let version = version.split(['+', '-']).next()?;
    (!version.is_empty()).then(|| version.to_string())
}

/// The parts of `solc --standard-json` output the deployer needs.
#[derive(Debug, Default, Deserialize)]
pub struct StandardJsonOutput {
    #[serde(default)]
    errors: Vec<Diagnostic>,
    /// Source unit name -> contract name -> output.
    #[serde(default)]
    contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Diagnostic {
    severity: String,
    message: String,
    formatted_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContractOutput {
    #[serde(default)]
    abi: JsonAbi,
    #[serde(default)]
    evm: EvmOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvmOutput {
    bytecode: Option<BytecodeOutput>,
    deployed_bytecode: Option<BytecodeOutput>,
}

#[derive(Debug, Deserialize)]
struct BytecodeOutput {
    object: String,
}

impl StandardJsonOutput {
    /// Fails on compiler errors, logs warnings, and extracts `contract`
    /// defined in `source_name`.
    pub fn into_artifact(mut self, source_name: &str, contract: &str) -> Result<Artifact> {
        let mut errors = Vec::new();
        for diagnostic in &self.errors {
            let message = diagnostic
                .formatted_message
                .as_deref()
                .unwrap_or(&diagnostic.message);
            if diagnostic.severity == "error" {
                errors.push(message.trim().to_string());
            } else {
                tracing::warn!(severity = %diagnostic.severity, "{}", message.trim());
            }
        }
        if !errors.is_empty() {
            bail!("compilation failed:\n{}", errors.join("\n"));
        }

        let output = self
            .contracts
            .get_mut(source_name)
            .and_then(|contracts| contracts.remove(contract))
            .ok_or_else(|| anyhow!("contract {contract} not found in {source_name}"))?;
        let hex = |code: Option<BytecodeOutput>| {
            code.map(|code| format!("0x{}", code.object))
                .unwrap_or_default()
        };
        Ok(Artifact {
            contract_name: contract.to_string(),
            source_name: source_name.to_string(),
            abi: output.abi,
            bytecode: hex(output.evm.bytecode),
            deployed_bytecode: hex(output.evm.deployed_bytecode),
        })
    }
}
