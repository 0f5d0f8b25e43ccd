//! The network side of a deployment, behind a single interface so the
//! procedure does not depend on a particular client library.
use {
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, Bytes, TxHash},
        providers::Provider,
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, ensure},
    contracts::{UserRecord, alloy::Healthcare},
    ethrpc::{ContractErrorExt, Web3},
};

/// A confirmed contract deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Address that authorizes the deployment.
    fn deployer(&self) -> Address;

    /// Sends a contract creation transaction and waits until it is included
    /// in a block. There is no timeout: this returns once the node reports a
    /// receipt or fails.
    async fn deploy(&self, creation_code: Bytes) -> Result<Deployment>;

    /// Reads the user record of `user` from the contract at `contract`.
    async fn get_user(&self, contract: Address, user: Address) -> Result<UserRecord>;
}

/// [`Chain`] backed by a JSON-RPC node.
pub struct Onchain {
    web3: Web3,
}

impl Onchain {
    /// Connects to the node and, when `expected_chain_id` is given, makes
    /// sure it serves that chain before anything is sent.
    pub async fn connect(web3: Web3, expected_chain_id: Option<u64>) -> Result<Self> {
        let chain_id = web3
            .alloy
            .get_chain_id()
            .await
            .context("could not fetch current chain id")?;
        if let Some(expected) = expected_chain_id {
            ensure!(
                chain_id == expected,
                "connected node serves chain {chain_id}, the network profile expects {expected}"
            );
        }
        tracing::info!(chain_id, deployer = %web3.deployer(), "connected to node");
        Ok(Self { web3 })
    }
}

#[async_trait::async_trait]
impl Chain for Onchain {
    fn deployer(&self) -> Address {
        self.web3.deployer()
    }

    async fn deploy(&self, creation_code: Bytes) -> Result<Deployment> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer())
            .with_deploy_code(creation_code);
        let pending = self
            .web3
            .alloy
            .send_transaction(tx)
            .await
            .context("failed to send deployment transaction")?;
        let hash = *pending.tx_hash();
        tracing::info!(?hash, "deployment transaction sent, waiting for confirmation");

        let receipt = pending
            .get_receipt()
            .await
            .with_context(|| format!("failed to confirm deployment transaction {hash}"))?;
        confirmed_deployment(&receipt)
    }

    async fn get_user(&self, contract: Address, user: Address) -> Result<UserRecord> {
        let instance = Healthcare::Instance::new(contract, self.web3.alloy.clone());
        let record = instance
            .getUser(user)
            .from(self.deployer())
            .call()
            .await
            .map_err(|err| {
                let context = if err.is_node_error() {
                    format!("node failed to answer getUser({user})")
                } else {
                    format!("contract {contract} rejected getUser({user}) or returned undecodable data")
                };
                anyhow::Error::new(err).context(context)
            })?;
        Ok(record.into())
    }
}

/// Reads the deployment out of the receipt of a contract creation
/// transaction.
fn confirmed_deployment(receipt: &impl ReceiptResponse) -> Result<Deployment> {
    let hash = receipt.transaction_hash();
    ensure!(receipt.status(), "deployment transaction {hash} reverted");
    let address = receipt
        .contract_address()
        .with_context(|| format!("receipt of {hash} carries no contract address"))?;
    Ok(Deployment {
        address,
        transaction_hash: hash,
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}
