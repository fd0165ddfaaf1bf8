pub mod arguments;
pub mod bootstrap;
pub mod chain;
pub mod verify;

use {
    anyhow::{Context, Result},
    chain::AlloyChain,
    contracts::Artifacts,
};

/// Deploys and configures the token and PBM contracts, then optionally
/// verifies the resulting on-chain state and makes a payment through the PBM
/// contract. The first failure aborts the run. Transactions confirmed before
/// it stay on chain.
pub async fn run(args: arguments::Arguments) -> Result<()> {
    let amounts = args.amounts()?;
    let artifacts = Artifacts::load(&args.token_artifact, &args.pbm_artifact)
        .context("failed to load contract artifacts")?;
    tracing::debug!(
        token = ?artifacts.token.name,
        pbm = ?artifacts.pbm.name,
        "loaded contract artifacts"
    );
    let chain = AlloyChain::connect(&args.node_url, args.mnemonic.as_deref(), artifacts)?;

    let deployment = bootstrap::run(&chain, &amounts).await?;

    if args.verify {
        verify::deployment(&chain, &deployment, &amounts).await?;
        tracing::info!("on-chain state matches the bootstrap configuration");
    }

    if let Some(amount) = amounts.pay {
        bootstrap::pay(
            &chain,
            deployment.pbm,
            deployment.accounts.user_c,
            deployment.accounts.owner,
            amount,
        )
        .await?;
    }

    Ok(())
}
