pub mod errors;
mod instrumentation;
pub mod wallet;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock::Asserter;
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    anyhow::Result,
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Provider that fills nonce, gas and chain id of outgoing transactions and
/// signs them locally with `wallet`.
pub fn provider_with_wallet(
    url: &Url,
    label: &str,
    wallet: EthereumWallet,
) -> Result<AlloyProvider> {
    // Local signing only makes sense against a node we can reach over http(s).
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "unsupported node url scheme {:?}",
        url.scheme()
    );
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer {
            label: label.into(),
        })
        .http(url.clone());
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased();
    Ok(provider)
}

/// Provider answering from a queue of canned responses.
#[cfg(any(test, feature = "test-util"))]
pub fn dummy_provider() -> (AlloyProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}
