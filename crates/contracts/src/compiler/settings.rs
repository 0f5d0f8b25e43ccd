use {
    serde::{Deserialize, Serialize},
    serde_json::{Value, json},
    std::collections::BTreeMap,
};

/// Compiler settings as found in the `[compiler]` table of the deployer
/// configuration. Defaults reproduce the settings the `Healthcare` contract
/// is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompilerSettings {
    /// Exact `solc` version, e.g. `0.8.28`.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub optimizer: Optimizer,
    /// Compile through the Yul intermediate representation.
    #[serde(default = "default_via_ir")]
    pub via_ir: bool,
    #[serde(default = "default_evm_version")]
    pub evm_version: String,
    /// Outputs requested for every contract of every source.
    #[serde(default = "default_output_selection")]
    pub output_selection: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Optimizer {
    pub enabled: bool,
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Metadata {
    /// Embed source contents instead of their hashes in the metadata.
    pub use_literal_content: bool,
    pub bytecode_hash: BytecodeHash,
}

/// Hash of the metadata appended to the runtime code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytecodeHash {
    None,
    Ipfs,
    Bzzr1,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            optimizer: Default::default(),
            via_ir: default_via_ir(),
            evm_version: default_evm_version(),
            output_selection: default_output_selection(),
            metadata: Default::default(),
        }
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: 200,
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            use_literal_content: true,
            bytecode_hash: BytecodeHash::None,
        }
    }
}

fn default_version() -> String {
    "0.8.28".to_string()
}

fn default_via_ir() -> bool {
    true
}

fn default_evm_version() -> String {
    "paris".to_string()
}

fn default_output_selection() -> Vec<String> {
    vec![
        "abi".to_string(),
        "evm.bytecode".to_string(),
        "evm.deployedBytecode".to_string(),
    ]
}

impl CompilerSettings {
    /// Builds the standard JSON input for compiling `sources`, a map from
    /// source unit name to source text.
    pub fn standard_json_input(&self, sources: &BTreeMap<String, String>) -> Value {
        let sources: serde_json::Map<String, Value> = sources
            .iter()
            .map(|(name, content)| (name.clone(), json!({ "content": content })))
            .collect();
        json!({
            "language": "Solidity",
            "sources": sources,
            "settings": {
                "optimizer": {
                    "enabled": self.optimizer.enabled,
                    "runs": self.optimizer.runs,
                },
                "viaIR": self.via_ir,
                "evmVersion": self.evm_version,
                "metadata": {
                    "useLiteralContent": self.metadata.use_literal_content,
                    "bytecodeHash": self.metadata.bytecode_hash,
                },
                "outputSelection": {
                    "*": {
                        "*": self.output_selection,
                    },
                },
            },
        })
    }
}
