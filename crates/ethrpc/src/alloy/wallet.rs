use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result, ensure},
};

/// Mnemonic used by the Hardhat and Anvil dev nodes for their prefunded
/// accounts.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Locally held signers together with their addresses in derivation order.
#[derive(Debug, Clone)]
pub struct LocalAccounts {
    pub wallet: EthereumWallet,
    pub addresses: Vec<Address>,
}

impl LocalAccounts {
    /// Derives the signers at indices `0..count` of the standard Ethereum
    /// derivation path of `phrase`.
    pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Self> {
        ensure!(count > 0, "at least one account must be derived");

        let signers = (0..count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(phrase)
                    .index(index)
                    .and_then(|builder| builder.build())
                    .with_context(|| format!("failed to derive account {index} from mnemonic"))
            })
            .collect::<Result<Vec<PrivateKeySigner>>>()?;

        let addresses = signers.iter().map(|signer| signer.address()).collect();
        let mut signers = signers.into_iter();
        let mut wallet = EthereumWallet::new(signers.next().context("no signer derived")?);
        for signer in signers {
            wallet.register_signer(signer);
        }

        Ok(Self { wallet, addresses })
    }
}
