//! Block-pinned snapshot reads of the assigned cell set.

use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use nfsheets_common::TokenId;

use crate::bindings::INFSheets::{self, INFSheetsInstance};
use crate::error::ChainError;

/// One assigned cell as read from the contract.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellRecord {
    pub token_id: TokenId,
    pub value: String,
}

/// All assigned cells as of a single block height.
///
/// Empty is a valid state: nothing has been minted yet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CellSnapshot {
    pub block: u64,
    pub records: Vec<CellRecord>,
}

/// Read-only view of the contract.
///
/// Every read inside [`ChainReader::snapshot`] is pinned to the block
/// number observed at the start of the call, so a snapshot is never torn
/// across two chain heights.
pub struct ChainReader<P> {
    contract: INFSheetsInstance<P>,
    page_size: Option<u64>,
}

impl<P: Provider> ChainReader<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            contract: INFSheets::new(address, provider),
            page_size: None,
        }
    }

    /// Split the range fetch into pages of at most `page_size` ids, for
    /// providers that cap response sizes. All pages stay pinned to the
    /// same block.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        assert!(page_size > 0, "page size must be positive");
        self.page_size = Some(page_size);
        self
    }

    /// Fetch the full `(token id, value)` set at the latest block.
    pub async fn snapshot(&self) -> Result<CellSnapshot, ChainError> {
        let block = self.contract.provider().get_block_number().await?;
        let pin = BlockId::from(block);

        let total = self.contract.totalSupply().block(pin).call().await?;
        let total = u64::try_from(total).map_err(|_| ChainError::SupplyOverflow(total))?;
        if total == 0 {
            tracing::debug!(block, "no cells assigned");
            return Ok(CellSnapshot {
                block,
                records: Vec::new(),
            });
        }

        let mut records = Vec::with_capacity(total as usize);
        for (from, to) in page_bounds(total, self.page_size) {
            let range = self
                .contract
                .getValuesRange(U256::from(from), U256::from(to))
                .block(pin)
                .call()
                .await?;
            if range.tokenIds.len() != range.values.len() {
                return Err(ChainError::LengthMismatch {
                    token_ids: range.tokenIds.len(),
                    values: range.values.len(),
                });
            }
            for (id, value) in range.tokenIds.into_iter().zip(range.values) {
                let raw = u64::try_from(id).map_err(|_| ChainError::TokenIdOverflow(id))?;
                records.push(CellRecord {
                    token_id: TokenId::new(raw),
                    value,
                });
            }
        }

        tracing::debug!(block, cells = records.len(), "chain snapshot read");
        Ok(CellSnapshot { block, records })
    }

    /// Current mint price in wei.
    pub async fn price(&self) -> Result<U256, ChainError> {
        Ok(self.contract.getPrice().call().await?)
    }

    /// Owner of a token, or `None` when the cell is unminted.
    ///
    /// ERC-721 reverts on `ownerOf` for a nonexistent token; that revert
    /// is deliberately mapped to "unminted" rather than surfaced, the one
    /// swallowed error in the system. The zero address is folded into the
    /// same sentinel.
    pub async fn owner_of(&self, token: TokenId) -> Result<Option<Address>, ChainError> {
        match self.contract.ownerOf(U256::from(token.raw())).call().await {
            Ok(owner) if owner == Address::ZERO => Ok(None),
            Ok(owner) => Ok(Some(owner)),
            Err(err) if is_nonexistent_token(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Stored value of an assigned cell.
    pub async fn value_of(&self, token: TokenId) -> Result<String, ChainError> {
        Ok(self
            .contract
            .getValue(U256::from(token.raw()))
            .call()
            .await?)
    }
}

fn is_nonexistent_token(err: &alloy::contract::Error) -> bool {
    let text = err.to_string();
    text.contains("nonexistent token") || text.contains("NonexistentToken")
}

/// Half-open `[from, to)` page bounds covering `[0, total)`.
pub(crate) fn page_bounds(total: u64, page_size: Option<u64>) -> Vec<(u64, u64)> {
    let page = match page_size {
        Some(page) if page < total => page,
        _ => return vec![(0, total)],
    };
    let mut bounds = Vec::with_capacity(total.div_ceil(page) as usize);
    let mut from = 0;
    while from < total {
        bounds.push((from, total.min(from + page)));
        from += page;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_without_limit() {
        assert_eq!(page_bounds(42, None), vec![(0, 42)]);
        assert_eq!(page_bounds(42, Some(100)), vec![(0, 42)]);
    }

    #[test]
    fn pages_cover_range_exactly() {
        assert_eq!(page_bounds(10, Some(4)), vec![(0, 4), (4, 8), (8, 10)]);
        assert_eq!(page_bounds(8, Some(4)), vec![(0, 4), (4, 8)]);
        assert_eq!(page_bounds(1, Some(1)), vec![(0, 1)]);
    }

    #[test]
    fn pages_are_contiguous() {
        let bounds = page_bounds(1000, Some(7));
        assert_eq!(bounds.first().unwrap().0, 0);
        assert_eq!(bounds.last().unwrap().1, 1000);
        for pair in bounds.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }
}
