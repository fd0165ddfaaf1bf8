pub mod errors;
pub mod extensions;
mod instrumentation;
pub mod wallet;

use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::{ClientBuilder, RpcClient},
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

fn client(url: &Url) -> RpcClient {
    ClientBuilder::default()
        .layer(InstrumentationLayer)
        .http(url.clone())
}

/// Creates a provider for a node that manages the signing accounts itself
/// (e.g. a local dev node with unlocked accounts). Transactions are submitted
/// with `eth_sendTransaction`.
pub fn provider(url: &Url) -> AlloyProvider {
    ProviderBuilder::new().connect_client(client(url)).erased()
}

/// Creates a provider that signs transactions locally with the signers of the
/// given wallet and submits them with `eth_sendRawTransaction`.
pub fn provider_with_wallet(url: &Url, wallet: EthereumWallet) -> AlloyProvider {
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(client(url))
        .erased()
}
