use {
    anyhow::{Result, bail},
    ethrpc::Accounts,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    url::Url,
};

#[derive(clap::Parser)]
#[clap(about = "Deploys the Healthcare contract and reads back the deployer's user record")]
pub struct Arguments {
    #[clap(long, env, default_value = "warn,deployer=info,ethrpc=info,contracts=info")]
    pub log_filter: String,

    /// Emit log events as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,

    /// Path to the TOML configuration file. Built-in defaults are used when
    /// omitted.
    #[clap(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Network profile of the configuration to deploy to.
    #[clap(long, env, default_value = "ganache")]
    pub network: String,

    /// Overrides the node url of the selected network profile.
    #[clap(long, env)]
    pub node_url: Option<Url>,

    /// Comma separated, hex encoded private keys. The first one deploys.
    #[clap(
        long,
        env = "DEPLOYER_PRIVATE_KEYS",
        value_delimiter = ',',
        hide_env_values = true,
        conflicts_with = "mnemonic"
    )]
    pub private_keys: Vec<String>,

    /// BIP-39 mnemonic to derive the accounts from. Account 0 deploys.
    #[clap(long, env = "DEPLOYER_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Number of accounts derived from the mnemonic.
    #[clap(long, env = "DEPLOYER_MNEMONIC_ACCOUNTS", default_value = "10")]
    pub mnemonic_accounts: u32,

    /// Name of the contract to deploy.
    #[clap(long, env, default_value = contracts::alloy::Healthcare::NAME)]
    pub contract: String,

    /// Hardhat artifact to deploy. Defaults to
    /// `<artifacts>/contracts/<contract>.sol/<contract>.json`.
    #[clap(long, env, conflicts_with = "source")]
    pub artifact: Option<PathBuf>,

    /// Solidity file to compile with the configured compiler settings
    /// instead of reading an artifact.
    #[clap(long, env)]
    pub source: Option<PathBuf>,

    /// The `solc` executable used with `--source`.
    #[clap(long, env, default_value = "solc")]
    pub solc: PathBuf,
}

impl Arguments {
    pub fn log_config(&self) -> observe::Config {
        let config = observe::Config::default().with_env_filter(&self.log_filter);
        if self.use_json_logs {
            config.with_json_format()
        } else {
            config
        }
    }

    /// The configured accounts in order. Exactly one key source must be set.
    pub fn accounts(&self) -> Result<Accounts> {
        match (&self.private_keys[..], &self.mnemonic) {
            ([], None) => bail!(
                "no deployer account configured, set DEPLOYER_PRIVATE_KEYS or DEPLOYER_MNEMONIC"
            ),
            (keys, None) => Accounts::from_private_keys(keys),
            ([], Some(mnemonic)) => Accounts::from_mnemonic(mnemonic, self.mnemonic_accounts),
            (_, Some(_)) => bail!("private keys and mnemonic are mutually exclusive"),
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            use_json_logs,
            config,
            network,
            node_url,
            private_keys,
            mnemonic,
            mnemonic_accounts,
            contract,
            artifact,
            source,
            solc,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        display_option(f, "config", &config.as_ref().map(|path| path.display()))?;
        writeln!(f, "network: {network}")?;
        display_option(f, "node_url", node_url)?;
        writeln!(f, "private_keys: {} SECRET", private_keys.len())?;
        display_secret_option(f, "mnemonic", mnemonic)?;
        writeln!(f, "mnemonic_accounts: {mnemonic_accounts}")?;
        writeln!(f, "contract: {contract}")?;
        display_option(f, "artifact", &artifact.as_ref().map(|path| path.display()))?;
        display_option(f, "source", &source.as_ref().map(|path| path.display()))?;
        writeln!(f, "solc: {}", solc.display())?;
        Ok(())
    }
}

fn display_secret_option<T>(f: &mut Formatter<'_>, name: &str, option: &Option<T>) -> fmt::Result {
    display_option(f, name, &option.as_ref().map(|_| "SECRET"))
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    match option {
        Some(display) => writeln!(f, "{name}: {display}"),
        None => writeln!(f, "{name}: None"),
    }
}
