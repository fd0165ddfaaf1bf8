//! Runs the bootstrap against a local dev node (Hardhat or Anvil) with the
//! compiled contracts.
//!
//! Requires `TOKEN_ARTIFACT` and `PBM_ARTIFACT` to point at the compiled
//! artifacts. `NODE_URL` defaults to `http://localhost:8545`. If `MNEMONIC`
//! is set transactions are signed locally, otherwise the node's accounts are
//! used.

use {
    alloy::primitives::U256,
    contracts::Artifacts,
    pbm_bootstrap::{
        bootstrap::{self, Amounts, FailureKind, Step},
        chain::{AlloyChain, ChainRead, ChainWrite},
        verify,
    },
    std::path::PathBuf,
};

fn env_path(name: &str) -> PathBuf {
    std::env::var(name)
        .unwrap_or_else(|_| panic!("{name} must be set"))
        .into()
}

fn chain() -> AlloyChain {
    let url = std::env::var("NODE_URL")
        .unwrap_or_else(|_| "http://localhost:8545".to_string())
        .parse()
        .unwrap();
    let artifacts =
        Artifacts::load(&env_path("TOKEN_ARTIFACT"), &env_path("PBM_ARTIFACT")).unwrap();
    let mnemonic = std::env::var("MNEMONIC").ok();
    AlloyChain::connect(&url, mnemonic.as_deref(), artifacts).unwrap()
}

#[tokio::test]
#[ignore]
async fn local_node_bootstrap() {
    observe::tracing::initialize_reentrant("pbm_bootstrap=debug,ethrpc=debug");
    let chain = chain();
    let amounts = Amounts::default();

    let deployment = bootstrap::run(&chain, &amounts).await.unwrap();
    verify::deployment(&chain, &deployment, &amounts)
        .await
        .unwrap();

    // Running again deploys new, independent instances.
    let rerun = bootstrap::run(&chain, &amounts).await.unwrap();
    assert_ne!(deployment.token, rerun.token);
    assert_ne!(deployment.pbm, rerun.pbm);
    verify::deployment(&chain, &rerun, &amounts).await.unwrap();

    // The first deployment is unaffected by the second one.
    let supply = chain.total_supply(deployment.token).await.unwrap();
    assert_eq!(supply, amounts.mint);
}

#[tokio::test]
#[ignore]
async fn local_node_mint_without_minter_role_reverts() {
    observe::tracing::initialize_reentrant("pbm_bootstrap=debug,ethrpc=debug");
    let chain = chain();
    let accounts = bootstrap::Accounts::fetch(&chain).await.unwrap();

    let token = chain.deploy_token(accounts.owner).await.unwrap();
    let err = chain
        .mint(token, accounts.user_b, U256::from(1))
        .await
        .unwrap_err();

    assert!(!err.is_node_error());
    let supply = chain.total_supply(token).await.unwrap();
    assert_eq!(supply, U256::ZERO);

    let err = bootstrap::BootstrapError::Step {
        step: Step::Mint,
        source: err,
    };
    assert_eq!(err.kind(), FailureKind::Reverted);
}
