pub mod alloy;

pub use self::alloy::{
    errors::{ContractErrorExt, SubmissionError},
    extensions::{CallBuilderExt, ProviderExt},
    provider,
    provider_with_wallet,
    wallet::LocalAccounts,
};

pub type AlloyProvider = ::alloy::providers::DynProvider;
