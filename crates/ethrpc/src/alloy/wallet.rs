use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result, ensure},
};

/// An ordered, non-empty list of local signers. The first signer is the
/// primary one: it is the deployer and the default sender of every
/// transaction.
#[derive(Debug, Clone)]
pub struct Accounts {
    signers: Vec<PrivateKeySigner>,
}

impl Accounts {
    pub fn new(signers: Vec<PrivateKeySigner>) -> Result<Self> {
        ensure!(!signers.is_empty(), "at least one account is required");
        Ok(Self { signers })
    }

    /// Builds the accounts from hex encoded private keys, keeping their
    /// order. Keys may carry a `0x` prefix.
    pub fn from_private_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self> {
        let signers = keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                // Not printing the key itself because that would leak it
                // into the logs.
                key.as_ref()
                    .trim()
                    .parse::<PrivateKeySigner>()
                    .with_context(|| format!("invalid private key at position {index}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(signers)
    }

    /// Derives `count` accounts from a BIP-39 mnemonic using the standard
    /// Ethereum derivation path `m/44'/60'/0'/0/{index}`.
    pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Self> {
        let signers = (0..count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(phrase.trim())
                    .index(index)
                    .and_then(|builder| builder.build())
                    .with_context(|| format!("failed to derive mnemonic account {index}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(signers)
    }

    /// The signer every deployment is authorized with.
    pub fn primary(&self) -> &PrivateKeySigner {
        &self.signers[0]
    }

    pub fn address(&self) -> Address {
        self.primary().address()
    }

    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.signers.iter().map(|signer| signer.address())
    }

    /// Wallet holding all accounts with the primary one as default signer.
    pub fn wallet(&self) -> EthereumWallet {
        let mut wallet = EthereumWallet::new(self.primary().clone());
        for signer in &self.signers[1..] {
            wallet.register_signer(signer.clone());
        }
        wallet
    }
}
