use {
    anyhow::{Context, Result, anyhow},
    contracts::compiler::CompilerSettings,
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
    },
    url::Url,
};

/// Deployer configuration.
///
/// Private keys are deliberately not part of it: a network profile that
/// lists `accounts` is rejected as an unknown field. Keys are provided
/// through the environment instead (see [`crate::arguments::Arguments`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory Hardhat writes its artifacts to.
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,

    #[serde(default)]
    pub compiler: CompilerSettings,

    #[serde(default = "default_networks")]
    pub networks: BTreeMap<String, Network>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Network {
    /// JSON-RPC endpoint of the node.
    pub url: Url,

    /// When set, the connected node must report this chain ID.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
            compiler: Default::default(),
            networks: default_networks(),
        }
    }
}

fn default_artifacts() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_networks() -> BTreeMap<String, Network> {
    BTreeMap::from([(
        "ganache".to_string(),
        Network {
            url: Url::parse("http://127.0.0.1:7545").expect("valid url"),
            chain_id: None,
        },
    )])
}

impl Config {
    pub fn from_toml(data: &str) -> Result<Self> {
        // Only the message is reported, the source snippet could contain a
        // private key someone pasted into the file.
        toml::from_str(data).map_err(|err| anyhow!("{}", err.message().trim()))
    }

    pub fn network(&self, name: &str) -> Result<&Network> {
        self.networks.get(name).with_context(|| {
            let known = self
                .networks
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            format!("unknown network {name:?}, configured networks: [{known}]")
        })
    }
}

/// Loads the configuration from a TOML file.
pub async fn load(path: &Path) -> Result<Config> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    let config = Config::from_toml(&data)
        .with_context(|| format!("TOML syntax error while reading {path:?}"))?;
    tracing::debug!(?path, networks = ?config.networks.keys(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use {super::*, contracts::compiler::BytecodeHash};

    #[test]
    fn defaults_target_local_ganache() {
        let config = Config::default();
        let network = config.network("ganache").unwrap();
        assert_eq!(network.url.as_str(), "http://127.0.0.1:7545/");
        assert_eq!(network.chain_id, None);
        assert_eq!(config.artifacts, Path::new("artifacts"));
        assert_eq!(config.compiler, CompilerSettings::default());
    }

    #[test]
    fn empty_file_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(
            config.network("ganache").unwrap(),
            Config::default().network("ganache").unwrap()
        );
    }

    #[test]
    fn parses_shipped_configuration() {
        let config = Config::from_toml(include_str!("../config/ganache.toml")).unwrap();
        assert_eq!(config.compiler.version, "0.8.28");
        assert!(config.compiler.via_ir);
        assert_eq!(config.compiler.evm_version, "paris");
        assert_eq!(config.compiler.optimizer.runs, 200);
        assert!(config.compiler.metadata.use_literal_content);
        assert_eq!(config.compiler.metadata.bytecode_hash, BytecodeHash::None);
        assert_eq!(
            config.network("ganache").unwrap().url.as_str(),
            "http://127.0.0.1:7545/"
        );
    }

    #[test]
    fn parses_network_profiles() {
        let config = Config::from_toml(
            r#"
            [networks.ganache]
            url = "http://127.0.0.1:7545"
            chain-id = 1337

            [networks.sepolia]
            url = "https://rpc.sepolia.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.network("ganache").unwrap().chain_id, Some(1337));
        assert_eq!(config.network("sepolia").unwrap().chain_id, None);
    }

    #[test]
    fn rejects_committed_private_keys() {
        let secret = "c45cfeced46202990343c0906daf91d338e48fec6df502559882032fe663d316";
        let err = Config::from_toml(&format!(
            r#"
            [networks.ganache]
            url = "http://127.0.0.1:7545"
            accounts = ["0x{secret}"]
            "#
        ))
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("accounts"));
        assert!(!message.contains(secret));
    }

    #[test]
    fn unknown_network_lists_known_ones() {
        let err = Config::default().network("mainnet").unwrap_err();
        assert!(err.to_string().contains("[ganache]"));
    }

    #[tokio::test]
    async fn missing_file_names_path() {
        let err = load(Path::new("does/not/exist.toml")).await.unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
