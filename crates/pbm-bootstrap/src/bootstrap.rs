//! The deployment workflow. Every step waits for its transaction to be mined
//! before the next one is sent, and the first failing step aborts the rest.

use {
    crate::chain::ChainWrite,
    alloy::primitives::{Address, TxHash, U256},
    anyhow::ensure,
    ethrpc::SubmissionError,
};

/// A single transaction (or account lookup) of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    FetchAccounts,
    DeployToken,
    AddMinter,
    Mint,
    Transfer,
    DeployPbm,
    AddAdmin,
    AddWhitelist,
    AddUser,
    Approve,
    FundUser,
    Pay,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("3 accounts are required but only {0} are available")]
    NotEnoughAccounts(usize),
    #[error("step `{step}` failed")]
    Step {
        step: Step,
        #[source]
        source: SubmissionError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The transaction was rejected or reverted by contract execution.
    Reverted,
    /// The node could not be reached or failed to process the request.
    Node,
    /// The connected network does not provide what the workflow needs.
    Setup,
}

impl BootstrapError {
    pub fn step(&self) -> Step {
        match self {
            Self::NotEnoughAccounts(_) => Step::FetchAccounts,
            Self::Step { step, .. } => *step,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotEnoughAccounts(_) => FailureKind::Setup,
            Self::Step { source, .. } if source.is_node_error() => FailureKind::Node,
            Self::Step { .. } => FailureKind::Reverted,
        }
    }
}

/// Token quantities in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amounts {
    /// Minted to the owner and transferred in full to the funding account.
    pub mint: U256,
    /// Approved to and pulled by the PBM contract.
    pub fund: U256,
    /// Paid by the funded user through the PBM contract.
    pub pay: Option<U256>,
}

impl Default for Amounts {
    fn default() -> Self {
        let unit = U256::from(10).pow(U256::from(18));
        Self {
            mint: U256::from(1_000_000) * unit,
            fund: U256::from(1_000) * unit,
            pay: None,
        }
    }
}

impl Amounts {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.fund <= self.mint,
            "fund amount {} exceeds mint amount {}",
            self.fund,
            self.mint
        );
        if let Some(pay) = self.pay {
            ensure!(
                pay <= self.fund,
                "pay amount {pay} exceeds fund amount {}",
                self.fund
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounts {
    /// Deploys both contracts and holds the minter, admin and whitelist roles.
    pub owner: Address,
    /// Receives the minted supply and funds the PBM user.
    pub user_b: Address,
    /// Registered PBM user that gets funded.
    pub user_c: Address,
}

impl Accounts {
    pub const REQUIRED: usize = 3;

    /// Uses the first three signing accounts of the network.
    pub async fn fetch(chain: &dyn ChainWrite) -> Result<Self, BootstrapError> {
        let signers = chain
            .signers()
            .await
            .map_err(|source| BootstrapError::Step {
                step: Step::FetchAccounts,
                source,
            })?;
        match signers[..] {
            [owner, user_b, user_c, ..] => Ok(Self {
                owner,
                user_b,
                user_c,
            }),
            _ => Err(BootstrapError::NotEnoughAccounts(signers.len())),
        }
    }

    pub fn contains(&self, address: Address) -> bool {
        [self.owner, self.user_b, self.user_c].contains(&address)
    }
}

/// Everything the workflow leaves behind on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub accounts: Accounts,
    pub token: Address,
    pub pbm: Address,
}

/// Fetches the accounts, deploys and distributes the token and then deploys,
/// configures and funds the PBM contract.
pub async fn run(chain: &dyn ChainWrite, amounts: &Amounts) -> Result<Deployment, BootstrapError> {
    let accounts = Accounts::fetch(chain).await?;
    tracing::debug!(?accounts, "using accounts");

    let token = deploy_token_and_mint(chain, accounts.owner, accounts.user_b, amounts).await?;
    let pbm = deploy_pbm_and_fund(
        chain,
        token,
        accounts.owner,
        accounts.user_b,
        accounts.user_c,
        amounts,
    )
    .await?;

    Ok(Deployment {
        accounts,
        token,
        pbm,
    })
}

/// Deploys the token as `owner`, mints `amounts.mint` to the owner and
/// transfers all of it to `recipient`. Returns the token address.
pub async fn deploy_token_and_mint(
    chain: &dyn ChainWrite,
    owner: Address,
    recipient: Address,
    amounts: &Amounts,
) -> Result<Address, BootstrapError> {
    let token = deployed(Step::DeployToken, chain.deploy_token(owner).await)?;
    tracing::info!("Token deployed to {token}");

    confirmed(Step::AddMinter, chain.add_minter(token, owner, owner).await)?;
    confirmed(Step::Mint, chain.mint(token, owner, amounts.mint).await)?;
    confirmed(
        Step::Transfer,
        chain.transfer(token, owner, recipient, amounts.mint).await,
    )?;

    Ok(token)
}

/// Deploys a PBM contract bound to `token`, makes `owner` admin and
/// whitelisted payee, registers `fund_to` as user and lets the contract move
/// `amounts.fund` from `fund_from` to `fund_to`. Returns the PBM address.
pub async fn deploy_pbm_and_fund(
    chain: &dyn ChainWrite,
    token: Address,
    owner: Address,
    fund_from: Address,
    fund_to: Address,
    amounts: &Amounts,
) -> Result<Address, BootstrapError> {
    let pbm = deployed(Step::DeployPbm, chain.deploy_pbm(owner, token).await)?;
    tracing::info!("PBM deployed to {pbm}");

    confirmed(Step::AddAdmin, chain.add_admin(pbm, owner, owner).await)?;
    // The owner is the pay-to address of the PBM contract.
    confirmed(Step::AddWhitelist, chain.add_whitelist(pbm, owner, owner).await)?;
    confirmed(Step::AddUser, chain.add_user(pbm, owner, fund_to).await)?;
    confirmed(
        Step::Approve,
        chain.approve(token, fund_from, pbm, amounts.fund).await,
    )?;
    confirmed(
        Step::FundUser,
        chain.fund_user(pbm, fund_from, fund_to, amounts.fund).await,
    )?;

    Ok(pbm)
}

/// Has `payer` pay `amount` to the whitelisted `receiver` through the PBM
/// contract.
pub async fn pay(
    chain: &dyn ChainWrite,
    pbm: Address,
    payer: Address,
    receiver: Address,
    amount: U256,
) -> Result<(), BootstrapError> {
    confirmed(Step::Pay, chain.pay(pbm, payer, receiver, amount).await)?;
    tracing::info!(%payer, %receiver, %amount, "paid through PBM");
    Ok(())
}

fn deployed(
    step: Step,
    result: Result<Address, SubmissionError>,
) -> Result<Address, BootstrapError> {
    result.map_err(|source| BootstrapError::Step { step, source })
}

fn confirmed(step: Step, result: Result<TxHash, SubmissionError>) -> Result<(), BootstrapError> {
    let tx_hash = result.map_err(|source| BootstrapError::Step { step, source })?;
    tracing::debug!(%step, ?tx_hash, "transaction confirmed");
    Ok(())
}
