//! Read → project → write: one idempotent synchronization cycle.
//!
//! The cycle is a full resync. Every run snapshots the entire assigned
//! cell set, projects it into value and format writes, and reapplies the
//! lot; nothing is diffed against a previous run and no state survives
//! between cycles. The same chain state therefore always produces the
//! same target document, at the cost of resubmitting unchanged cells.
//!
//! Overlapping runs are not coordinated here. The scheduler that invokes
//! `nfsheets-sync` must enforce at-most-one-concurrent-run (a cron lock
//! is enough); two interleaved cycles could race on the document.

pub mod adapters;
pub mod config;
pub mod orchestrator;
pub mod projection;

pub use config::{ConfigError, SyncConfig};
pub use orchestrator::{ChainRead, SheetApply, SyncCycle, SyncError, SyncOutcome, SyncPhase};
pub use projection::{FormatWrite, Projection, Rgb, SheetTarget, ValueWrite, PURCHASED_FILL};
