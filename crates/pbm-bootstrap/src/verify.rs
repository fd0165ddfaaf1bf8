//! Read-only checks of the state a successful bootstrap leaves behind.

use {
    crate::{
        bootstrap::{Amounts, Deployment},
        chain::ChainRead,
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result, ensure},
};

/// Checks the deployed contracts and the resulting token balances and
/// allowance. Expects freshly deployed contracts, so no balances other than
/// the ones created by the bootstrap exist.
pub async fn deployment(
    chain: &dyn ChainRead,
    deployment: &Deployment,
    amounts: &Amounts,
) -> Result<()> {
    amounts.validate()?;
    let Deployment {
        accounts,
        token,
        pbm,
    } = *deployment;

    ensure!(token != pbm, "token and PBM share the address {token}");
    for (name, address) in [("token", token), ("PBM", pbm)] {
        ensure!(address != Address::ZERO, "{name} address is zero");
        ensure!(
            !accounts.contains(address),
            "{name} address {address} is one of the accounts"
        );
        let code_size = chain
            .code_size(address)
            .await
            .with_context(|| format!("failed to fetch code of {name} at {address}"))?;
        ensure!(code_size > 0, "no code deployed at {name} address {address}");
    }

    let total_supply = chain
        .total_supply(token)
        .await
        .context("failed to fetch total supply")?;
    expect("total supply", total_supply, amounts.mint)?;

    for (name, account, expected) in [
        ("owner", accounts.owner, U256::ZERO),
        ("user B", accounts.user_b, amounts.mint - amounts.fund),
        ("user C", accounts.user_c, amounts.fund),
    ] {
        let balance = chain
            .balance_of(token, account)
            .await
            .with_context(|| format!("failed to fetch balance of {name}"))?;
        expect(&format!("{name} balance"), balance, expected)?;
    }

    // The approval covered exactly the funded amount.
    let allowance = chain
        .allowance(token, accounts.user_b, pbm)
        .await
        .context("failed to fetch PBM allowance")?;
    expect("PBM allowance of user B", allowance, U256::ZERO)?;

    Ok(())
}

fn expect(property: &str, actual: U256, expected: U256) -> Result<()> {
    ensure!(
        actual == expected,
        "unexpected {property}: expected {expected}, got {actual}"
    );
    tracing::debug!(property, %actual, "verified");
    Ok(())
}
