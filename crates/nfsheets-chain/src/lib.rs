//! Read and write access to the NFSheets contract.
//!
//! [`ChainReader`] produces block-consistent snapshots of every assigned
//! cell; [`CellWallet`] submits the mint / set-value transactions used by
//! the interactive CLI. Both sit on top of the same `sol!`-generated
//! bindings.

pub mod bindings;
pub mod error;
pub mod reader;
pub mod wallet;

pub use bindings::INFSheets;
pub use error::ChainError;
pub use reader::{CellRecord, CellSnapshot, ChainReader};
pub use wallet::CellWallet;
