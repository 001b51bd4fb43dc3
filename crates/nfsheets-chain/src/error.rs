use alloy::primitives::U256;
use thiserror::Error;

/// Failures while talking to the contract.
///
/// Everything here is fatal for the current cycle; retries happen at
/// cycle granularity under the external scheduler.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("rpc request failed: {0}")]
    Rpc(#[from] alloy::transports::TransportError),

    #[error("transaction dropped before inclusion: {0}")]
    Pending(#[from] alloy::providers::PendingTransactionError),

    /// `getValuesRange` returned arrays of different lengths.
    #[error("token id / value arrays disagree: {token_ids} ids vs {values} values")]
    LengthMismatch { token_ids: usize, values: usize },

    /// The contract reported a token id that cannot name a cell.
    #[error("token id {0} does not fit in 64 bits")]
    TokenIdOverflow(U256),

    #[error("total supply {0} does not fit in 64 bits")]
    SupplyOverflow(U256),
}
