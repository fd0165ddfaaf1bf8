use alloy::{
    contract::Error as ContractError,
    primitives::B256,
    providers::PendingTransactionError,
    transports::{RpcError, TransportError},
};

/// Everything that can go wrong between handing a transaction to the node
/// and observing its successful inclusion.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("contract call was rejected: {0}")]
    Rejected(#[from] ContractError),
    #[error("node request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("failed to watch pending transaction: {0}")]
    Receipt(#[from] PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(B256),
    #[error("transaction {0} did not create a contract")]
    NoContractAddress(B256),
}

impl SubmissionError {
    /// Returns whether the failure originates from the node or the connection
    /// to it rather than from contract execution.
    pub fn is_node_error(&self) -> bool {
        match self {
            Self::Rejected(err) => err.is_node_error(),
            Self::Transport(err) => is_node_rpc_error(err),
            Self::Receipt(_) => true,
            Self::Reverted(_) | Self::NoContractAddress(_) => false,
        }
    }
}

pub trait ContractErrorExt {
    /// Returns whether a given error is a contract error, this is considered to
    /// be all errors except the transport error where there is no revert data.
    fn is_contract_error(&self) -> bool;

    /// Returns whether a given error is a node error.
    fn is_node_error(&self) -> bool;
}

impl ContractErrorExt for ContractError {
    fn is_contract_error(&self) -> bool {
        !self.is_node_error()
    }

    fn is_node_error(&self) -> bool {
        match self {
            ContractError::TransportError(err) => is_node_rpc_error(err),
            _ => false,
        }
    }
}

/// Dev nodes report reverts that happen during gas estimation as JSON-RPC
/// error responses. Those carry revert data (possibly empty) and are contract
/// errors. Every other transport failure is attributed to the node.
fn is_node_rpc_error(err: &TransportError) -> bool {
    match err {
        RpcError::ErrorResp(payload) => {
            let no_revert_data = payload.as_revert_data().is_none();
            tracing::debug!(?payload, %no_revert_data, "transport rpc error");
            no_revert_data
        }
        _ => true,
    }
}

/// Create an arbitrary alloy error that will convert into a "contract" error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_contract_error() -> ContractError {
    ContractError::NotADeploymentTransaction
}

/// Create an arbitrary alloy error that will convert into a "node" error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_node_error() -> ContractError {
    ContractError::TransportError(TransportError::ErrorResp(
        alloy::rpc::json_rpc::ErrorPayload::internal_error(),
    ))
}
