pub mod arguments;
pub mod chain;
pub mod config;
pub mod procedure;

use {
    crate::{
        arguments::Arguments,
        chain::Onchain,
        config::Config,
        procedure::Report,
    },
    alloy::primitives::Bytes,
    anyhow::{Context, Result},
    contracts::{Artifact, alloy::Healthcare, compiler::Solc},
    ethrpc::Web3,
    std::{io::Write, process::ExitCode},
};

/// Runs the deployer and maps the outcome to the process exit code.
pub async fn main(args: Arguments) -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match run(&args, &mut stdout).await {
        Ok(report) => {
            tracing::info!(
                contract = %report.deployment.address,
                deployer = %report.deployer,
                "deployment verified"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(?err, "deployment failed");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

/// Deploys the configured contract and reads back the deployer's record,
/// writing the report to `out`.
pub async fn run<W: Write>(args: &Arguments, out: &mut W) -> Result<Report> {
    let config = match &args.config {
        Some(path) => config::load(path).await?,
        None => Config::default(),
    };
    let network = config.network(&args.network)?;
    let url = args.node_url.as_ref().unwrap_or(&network.url);
    tracing::info!(network = %args.network, %url, "selected network");

    let creation_code = load_creation_code(args, &config).await?;
    writeln!(out, "Deploying contract...")?;

    let accounts = args.accounts()?;
    tracing::debug!(addresses = ?accounts.addresses().collect::<Vec<_>>(), "loaded accounts");
    let web3 = Web3::new(url, accounts)?;
    let chain = Onchain::connect(web3, network.chain_id).await?;

    procedure::deploy_and_verify(&chain, creation_code, out).await
}

async fn load_creation_code(args: &Arguments, config: &Config) -> Result<Bytes> {
    let artifact = match (&args.source, &args.artifact) {
        (Some(source), _) => Solc::new(&args.solc)
            .compile(&config.compiler, source, &args.contract)
            .await
            .with_context(|| format!("failed to compile {source:?}"))?,
        (None, Some(path)) => Artifact::load(path).await?,
        (None, None) => {
            Artifact::load(&Artifact::hardhat_path(&config.artifacts, &args.contract)).await?
        }
    };
    artifact.ensure_function(&Healthcare::get_user_signature())?;
    Ok(artifact.creation_code()?)
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser, serde_json::json, std::path::Path};

    const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn write_artifact(dir: &Path, abi: serde_json::Value) -> std::path::PathBuf {
        let path = dir.join("Healthcare.json");
        let content = json!({
            "contractName": "Healthcare",
            "sourceName": "contracts/Healthcare.sol",
            "abi": abi,
            "bytecode": "0x6080604052",
            "deployedBytecode": "0x6080",
        });
        std::fs::write(&path, content.to_string()).unwrap();
        path
    }

    fn args(extra: &[&str]) -> Arguments {
        Arguments::try_parse_from(
            ["deployer", "--private-keys", KEY_0]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn unreachable_node_fails_without_contract_address() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = write_artifact(dir.path(), json!([]));
        let args = args(&[
            "--node-url",
            "http://127.0.0.1:1",
            "--artifact",
            artifact.to_str().unwrap(),
        ]);

        let mut out = Vec::new();
        let result = run(&args, &mut out).await;

        assert!(result.is_err());
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "Deploying contract...\n");
    }

    #[tokio::test]
    async fn rejects_artifact_without_get_user() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = write_artifact(
            dir.path(),
            json!([{
                "type": "function",
                "name": "owner",
                "stateMutability": "view",
                "inputs": [],
                "outputs": [{ "name": "", "type": "address", "internalType": "address" }]
            }]),
        );
        let args = args(&["--artifact", artifact.to_str().unwrap()]);

        let err = load_creation_code(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not declare getUser"));
    }

    #[tokio::test]
    async fn rejects_get_user_returning_a_struct() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = write_artifact(
            dir.path(),
            json!([{
                "type": "function",
                "name": "getUser",
                "stateMutability": "view",
                "inputs": [{ "name": "user", "type": "address" }],
                "outputs": [{
                    "name": "",
                    "type": "tuple",
                    "components": [
                        { "name": "fullName", "type": "string" },
                        { "name": "email", "type": "string" },
                        { "name": "role", "type": "uint8" },
                        { "name": "isVerified", "type": "bool" },
                        { "name": "ipfsHash", "type": "string" }
                    ]
                }]
            }]),
        );
        let args = args(&["--artifact", artifact.to_str().unwrap()]);

        let err = load_creation_code(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("does not declare getUser(address)(string,string,uint8,bool,string)")
        );
    }

    #[tokio::test]
    async fn accepts_get_user_with_flat_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = write_artifact(
            dir.path(),
            json!([{
                "type": "function",
                "name": "getUser",
                "stateMutability": "view",
                "inputs": [{ "name": "user", "type": "address" }],
                "outputs": [
                    { "name": "", "type": "string" },
                    { "name": "", "type": "string" },
                    { "name": "", "type": "uint8", "internalType": "enum Healthcare.Role" },
                    { "name": "", "type": "bool" },
                    { "name": "", "type": "string" }
                ]
            }]),
        );
        let args = args(&["--artifact", artifact.to_str().unwrap()]);

        let code = load_creation_code(&args, &Config::default()).await.unwrap();
        assert_eq!(code.len(), 5);
    }

    #[tokio::test]
    async fn reads_artifact_from_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = dir.path().join("artifacts");
        let contract_dir = artifacts.join("contracts").join("Healthcare.sol");
        std::fs::create_dir_all(&contract_dir).unwrap();
        write_artifact(&contract_dir, json!([]));
        let config = Config {
            artifacts,
            ..Default::default()
        };

        let code = load_creation_code(&args(&[]), &config).await.unwrap();
        assert_eq!(code.len(), 5);
    }

    #[tokio::test]
    async fn unknown_network_is_an_error() {
        let err = run(&args(&["--network", "mainnet"]), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown network \"mainnet\""));
    }
}
