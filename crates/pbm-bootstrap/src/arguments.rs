use {
    crate::bootstrap::Amounts,
    alloy::primitives::{
        U256,
        utils::{ParseUnits, parse_units},
    },
    anyhow::{Context, Result, bail},
    clap::{ArgAction, Parser},
    std::{fmt, path::PathBuf},
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,pbm_bootstrap=debug,ethrpc=debug")]
    pub log_filter: String,

    /// Events at or above this level are written to stderr.
    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Emit log events as JSON objects.
    #[clap(long, env)]
    pub log_json: bool,
}

impl LoggingArguments {
    pub fn config(&self) -> observe::Config {
        observe::Config::new(
            &self.log_filter,
            self.log_stderr_threshold.into_level(),
            self.log_json,
        )
    }
}

#[derive(Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Mnemonic to derive the owner, funding and funded accounts from
    /// (indices 0, 1 and 2). Transactions are then signed locally. If unset,
    /// the first three accounts managed by the node are used.
    #[clap(long, env)]
    pub mnemonic: Option<String>,

    /// Path to the compiled token contract artifact (Hardhat or Foundry JSON).
    #[clap(long, env)]
    pub token_artifact: PathBuf,

    /// Path to the compiled PBM contract artifact (Hardhat or Foundry JSON).
    #[clap(long, env)]
    pub pbm_artifact: PathBuf,

    /// Number of whole tokens minted to the owner and transferred to the
    /// funding account.
    #[clap(long, env, default_value = "1000000")]
    pub mint_amount: String,

    /// Number of whole tokens the PBM contract moves from the funding account
    /// to the funded user.
    #[clap(long, env, default_value = "1000")]
    pub fund_amount: String,

    /// If set, the funded user pays this many whole tokens to the owner
    /// through the PBM contract after funding.
    #[clap(long, env)]
    pub pay_amount: Option<String>,

    /// Decimals of the token contract.
    #[clap(long, env, default_value = "18")]
    pub decimals: u8,

    /// Check the resulting on-chain balances and allowance after funding.
    #[clap(long, env, default_value = "true", action = ArgAction::Set)]
    pub verify: bool,
}

impl Arguments {
    /// Converts the configured token amounts into base units and validates
    /// them against each other.
    pub fn amounts(&self) -> Result<Amounts> {
        let mint = token_amount(&self.mint_amount, self.decimals).context("invalid mint amount")?;
        let fund = token_amount(&self.fund_amount, self.decimals).context("invalid fund amount")?;
        let pay = self
            .pay_amount
            .as_deref()
            .map(|amount| token_amount(amount, self.decimals))
            .transpose()
            .context("invalid pay amount")?;

        let amounts = Amounts { mint, fund, pay };
        amounts.validate()?;
        Ok(amounts)
    }
}

fn token_amount(amount: &str, decimals: u8) -> Result<U256> {
    match parse_units(amount, decimals)? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => bail!("amount must not be negative: {amount}"),
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            mnemonic,
            token_artifact,
            pbm_artifact,
            mint_amount,
            fund_amount,
            pay_amount,
            decimals,
            verify,
        } = self;

        writeln!(f, "log_filter: {}", logging.log_filter)?;
        writeln!(f, "log_stderr_threshold: {}", logging.log_stderr_threshold)?;
        writeln!(f, "log_json: {}", logging.log_json)?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(
            f,
            "mnemonic: {}",
            mnemonic.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "token_artifact: {}", token_artifact.display())?;
        writeln!(f, "pbm_artifact: {}", pbm_artifact.display())?;
        writeln!(f, "mint_amount: {mint_amount}")?;
        writeln!(f, "fund_amount: {fund_amount}")?;
        writeln!(f, "pay_amount: {pay_amount:?}")?;
        writeln!(f, "decimals: {decimals}")?;
        writeln!(f, "verify: {verify}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 5] = [
        "pbm-bootstrap",
        "--token-artifact",
        "artifacts/Token.json",
        "--pbm-artifact",
        "artifacts/PBM.json",
    ];

    fn parse(extra: &[&str]) -> Arguments {
        Arguments::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn default_amounts_match_fixed_quantities() {
        let amounts = parse(&[]).amounts().unwrap();

        assert_eq!(amounts, Amounts::default());
        assert_eq!(amounts.mint, U256::from(10).pow(U256::from(24)));
        assert_eq!(amounts.fund, U256::from(10).pow(U256::from(21)));
        assert_eq!(amounts.pay, None);
    }

    #[test]
    fn amounts_respect_decimals() {
        let amounts = parse(&[
            "--decimals",
            "6",
            "--mint-amount",
            "2.5",
            "--fund-amount",
            "1",
            "--pay-amount",
            "0.25",
        ])
        .amounts()
        .unwrap();

        assert_eq!(amounts.mint, U256::from(2_500_000));
        assert_eq!(amounts.fund, U256::from(1_000_000));
        assert_eq!(amounts.pay, Some(U256::from(250_000)));
    }

    #[test]
    fn rejects_funding_more_than_minted() {
        let args = parse(&["--mint-amount", "10", "--fund-amount", "11"]);
        assert!(args.amounts().is_err());
    }

    #[test]
    fn rejects_malformed_amount() {
        let args = parse(&["--fund-amount", "a lot"]);
        assert!(args.amounts().is_err());
    }

    #[test]
    fn verification_can_be_disabled() {
        assert!(parse(&[]).verify);
        assert!(!parse(&["--verify", "false"]).verify);
    }

    #[test]
    fn display_hides_mnemonic() {
        let phrase = "test test test test test test test test test test test junk";
        let args = parse(&["--mnemonic", phrase]);

        let printed = args.to_string();

        assert!(printed.contains("mnemonic: SECRET"));
        assert!(!printed.contains(phrase));
    }
}
