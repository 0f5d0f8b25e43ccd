pub mod alloy;

pub use self::alloy::{errors::ContractErrorExt, wallet::Accounts};
use {
    ::alloy::{primitives::Address, providers::DynProvider},
    anyhow::Result,
    url::Url,
};

pub type AlloyProvider = DynProvider;

/// A provider together with the ordered accounts it signs transactions
/// with. Transactions sent through [`Web3::alloy`] without an explicit
/// sender are signed by the primary account.
#[derive(Debug, Clone)]
pub struct Web3 {
    pub alloy: AlloyProvider,
    pub accounts: Accounts,
}

impl Web3 {
    /// Connects to the node at `url`. No request is sent until the provider
    /// is first used.
    pub fn new(url: &Url, accounts: Accounts) -> Result<Self> {
        let alloy = self::alloy::provider_with_wallet(url, "main", accounts.wallet())?;
        Ok(Self { alloy, accounts })
    }

    /// Address of the account used to deploy contracts.
    pub fn deployer(&self) -> Address {
        self.accounts.address()
    }
}
