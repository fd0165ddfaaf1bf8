//! Extension traits for submitting transactions and waiting for them to be
//! mined.

use {
    crate::{AlloyProvider, alloy::errors::SubmissionError},
    alloy::{
        contract::{CallBuilder, CallDecoder},
        network::{Ethereum, TransactionBuilder},
        primitives::{Address, Bytes},
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
};

pub trait CallBuilderExt {
    /// Submits the call as a transaction and waits for its receipt. A mined
    /// transaction whose execution failed is reported as
    /// [`SubmissionError::Reverted`].
    fn send_and_watch(
        &self,
    ) -> impl Future<Output = Result<TransactionReceipt, SubmissionError>> + Send;
}

impl<P, D> CallBuilderExt for CallBuilder<P, D>
where
    P: Provider + Send + Sync,
    D: CallDecoder + Send + Sync,
{
    async fn send_and_watch(&self) -> Result<TransactionReceipt, SubmissionError> {
        let pending = self.send().await?;
        watch(pending).await
    }
}

pub trait ProviderExt {
    /// Sends a contract creation transaction from `from` and returns the
    /// address of the created contract once the transaction is mined.
    fn deploy_and_watch(
        &self,
        from: Address,
        code: Bytes,
    ) -> impl Future<Output = Result<Address, SubmissionError>> + Send;
}

impl ProviderExt for AlloyProvider {
    async fn deploy_and_watch(&self, from: Address, code: Bytes) -> Result<Address, SubmissionError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);
        let pending = self.send_transaction(tx).await?;
        let receipt = watch(pending).await?;
        receipt
            .contract_address
            .ok_or(SubmissionError::NoContractAddress(receipt.transaction_hash))
    }
}

async fn watch(
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TransactionReceipt, SubmissionError> {
    let tx_hash = *pending.tx_hash();
    tracing::trace!(?tx_hash, "waiting for transaction receipt");
    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(SubmissionError::Reverted(tx_hash));
    }
    tracing::trace!(?tx_hash, block = ?receipt.block_number, "transaction mined");
    Ok(receipt)
}
