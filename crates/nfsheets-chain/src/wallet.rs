//! Signer-backed mint and update transactions.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;

use nfsheets_common::{CellCoord, TokenId};

use crate::bindings::INFSheets::{self, INFSheetsInstance};
use crate::error::ChainError;

/// Mutating access to the contract through a wallet-equipped provider.
///
/// The provider must carry a signer (see `ProviderBuilder::wallet`);
/// both calls submit a transaction and wait for it to land.
pub struct CellWallet<P> {
    contract: INFSheetsInstance<P>,
}

impl<P: Provider> CellWallet<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            contract: INFSheets::new(address, provider),
        }
    }

    /// Mint an unowned cell with an initial value, paying `payment` wei.
    pub async fn mint(
        &self,
        coord: CellCoord,
        value: &str,
        payment: U256,
    ) -> Result<TxHash, ChainError> {
        let pending = self
            .contract
            .mint(
                U256::from(coord.column()),
                U256::from(coord.row()),
                value.to_string(),
            )
            .value(payment)
            .send()
            .await?;
        let hash = pending.watch().await?;
        tracing::info!(cell = %coord, tx = %hash, "cell minted");
        Ok(hash)
    }

    /// Update the stored value of a cell the signer owns.
    pub async fn set_value(&self, token: TokenId, value: &str) -> Result<TxHash, ChainError> {
        let pending = self
            .contract
            .setValue(U256::from(token.raw()), value.to_string())
            .send()
            .await?;
        let hash = pending.watch().await?;
        tracing::info!(token = %token, tx = %hash, "cell updated");
        Ok(hash)
    }
}
