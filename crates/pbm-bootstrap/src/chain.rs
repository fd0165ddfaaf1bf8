//! Trait definitions for the chain boundary and their implementation on top
//! of an alloy provider.
//!
//! The traits exist so the bootstrap workflow can be tested against mocks.

use {
    alloy::{
        primitives::{Address, TxHash, U256},
        providers::Provider,
    },
    anyhow::Result,
    contracts::{
        Artifacts,
        alloy::{PBM, Token},
    },
    ethrpc::{AlloyProvider, CallBuilderExt, LocalAccounts, ProviderExt, SubmissionError},
    url::Url,
};

/// Read-only queries against the token contract and the chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainRead: Send + Sync {
    /// Returns the size of the runtime code stored at `address`.
    async fn code_size(&self, address: Address) -> Result<usize, SubmissionError>;

    async fn total_supply(&self, token: Address) -> Result<U256, SubmissionError>;

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, SubmissionError>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, SubmissionError>;
}

/// State changing operations. Every method returns once its transaction is
/// mined and fails if it was rejected or reverted.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainWrite: Send + Sync {
    /// Addresses of the accounts transactions can be sent from, in order.
    async fn signers(&self) -> Result<Vec<Address>, SubmissionError>;

    async fn deploy_token(&self, deployer: Address) -> Result<Address, SubmissionError>;

    async fn add_minter(
        &self,
        token: Address,
        from: Address,
        minter: Address,
    ) -> Result<TxHash, SubmissionError>;

    /// Mints `amount` to the balance of `from`.
    async fn mint(&self, token: Address, from: Address, amount: U256)
    -> Result<TxHash, SubmissionError>;

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError>;

    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError>;

    /// Deploys a PBM contract bound to `token`.
    async fn deploy_pbm(&self, deployer: Address, token: Address)
    -> Result<Address, SubmissionError>;

    async fn add_admin(
        &self,
        pbm: Address,
        from: Address,
        admin: Address,
    ) -> Result<TxHash, SubmissionError>;

    async fn add_whitelist(
        &self,
        pbm: Address,
        from: Address,
        account: Address,
    ) -> Result<TxHash, SubmissionError>;

    async fn add_user(
        &self,
        pbm: Address,
        from: Address,
        user: Address,
    ) -> Result<TxHash, SubmissionError>;

    /// Has the PBM contract pull `amount` from `from` and credit `user`.
    async fn fund_user(
        &self,
        pbm: Address,
        from: Address,
        user: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError>;

    async fn pay(
        &self,
        pbm: Address,
        from: Address,
        receiver: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError>;
}

pub struct AlloyChain {
    provider: AlloyProvider,
    /// Set when transactions are signed locally. Otherwise the node's own
    /// accounts are used.
    local_signers: Option<Vec<Address>>,
    artifacts: Artifacts,
}

impl AlloyChain {
    /// Number of accounts derived when signing locally.
    const LOCAL_SIGNERS: u32 = 3;

    pub fn new(
        provider: AlloyProvider,
        local_signers: Option<Vec<Address>>,
        artifacts: Artifacts,
    ) -> Self {
        Self {
            provider,
            local_signers,
            artifacts,
        }
    }

    /// Connects to the node at `url`. With a mnemonic the signing accounts
    /// are derived from it, otherwise the node's accounts are used.
    pub fn connect(url: &Url, mnemonic: Option<&str>, artifacts: Artifacts) -> Result<Self> {
        Ok(match mnemonic {
            Some(phrase) => {
                let accounts = LocalAccounts::from_mnemonic(phrase, Self::LOCAL_SIGNERS)?;
                Self::new(
                    ethrpc::provider_with_wallet(url, accounts.wallet),
                    Some(accounts.addresses),
                    artifacts,
                )
            }
            None => Self::new(ethrpc::provider(url), None, artifacts),
        })
    }

    fn token(&self, address: Address) -> Token::Instance {
        Token::Instance::new(address, self.provider.clone())
    }

    fn pbm(&self, address: Address) -> PBM::Instance {
        PBM::Instance::new(address, self.provider.clone())
    }
}

#[async_trait::async_trait]
impl ChainRead for AlloyChain {
    async fn code_size(&self, address: Address) -> Result<usize, SubmissionError> {
        Ok(self.provider.get_code_at(address).await?.len())
    }

    async fn total_supply(&self, token: Address) -> Result<U256, SubmissionError> {
        Ok(self.token(token).totalSupply().call().await?)
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, SubmissionError> {
        Ok(self.token(token).balanceOf(owner).call().await?)
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, SubmissionError> {
        Ok(self.token(token).allowance(owner, spender).call().await?)
    }
}

#[async_trait::async_trait]
impl ChainWrite for AlloyChain {
    async fn signers(&self) -> Result<Vec<Address>, SubmissionError> {
        match &self.local_signers {
            Some(signers) => Ok(signers.clone()),
            None => Ok(self.provider.get_accounts().await?),
        }
    }

    async fn deploy_token(&self, deployer: Address) -> Result<Address, SubmissionError> {
        self.provider
            .deploy_and_watch(deployer, self.artifacts.token_deploy_code())
            .await
    }

    async fn add_minter(
        &self,
        token: Address,
        from: Address,
        minter: Address,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .token(token)
            .addMinter(minter)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn mint(
        &self,
        token: Address,
        from: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .token(token)
            .mint(amount)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .token(token)
            .transfer(to, amount)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn approve(
        &self,
        token: Address,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .token(token)
            .approve(spender, amount)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn deploy_pbm(
        &self,
        deployer: Address,
        token: Address,
    ) -> Result<Address, SubmissionError> {
        self.provider
            .deploy_and_watch(deployer, self.artifacts.pbm_deploy_code(token))
            .await
    }

    async fn add_admin(
        &self,
        pbm: Address,
        from: Address,
        admin: Address,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .pbm(pbm)
            .addAdmin(admin)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn add_whitelist(
        &self,
        pbm: Address,
        from: Address,
        account: Address,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .pbm(pbm)
            .addWhiteList(account)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn add_user(
        &self,
        pbm: Address,
        from: Address,
        user: Address,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .pbm(pbm)
            .addUser(user)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn fund_user(
        &self,
        pbm: Address,
        from: Address,
        user: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .pbm(pbm)
            .fundUser(user, amount)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }

    async fn pay(
        &self,
        pbm: Address,
        from: Address,
        receiver: Address,
        amount: U256,
    ) -> Result<TxHash, SubmissionError> {
        let receipt = self
            .pbm(pbm)
            .pay(receiver, amount)
            .from(from)
            .send_and_watch()
            .await?;
        Ok(receipt.transaction_hash)
    }
}
