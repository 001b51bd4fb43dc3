//! The per-invocation cycle:
//! `START → READING → PROJECTING → (SKIP | WRITING) → DONE`, with
//! `FAILED` reachable from every non-terminal phase. Configuration is
//! validated before a cycle is constructed, so `START` has already
//! happened by the time [`SyncCycle::run`] is called.

use core::fmt;
use std::time::Duration;

use thiserror::Error;

use nfsheets_chain::{CellSnapshot, ChainError};
use nfsheets_common::{CoordError, GridDims};
use nfsheets_sheets::SheetsError;

use crate::projection::{FormatWrite, Projection, SheetTarget, ValueWrite};

/// Snapshot source, injectable for tests.
#[allow(async_fn_in_trait)]
pub trait ChainRead {
    async fn read_all_cells(&self) -> Result<CellSnapshot, ChainError>;
}

/// Write sink, injectable for tests.
///
/// Implementations must treat an empty slice as a no-op and make no
/// external call for it.
#[allow(async_fn_in_trait)]
pub trait SheetApply {
    async fn apply_formats(&self, formats: &[FormatWrite]) -> Result<(), SheetsError>;
    async fn apply_values(&self, values: &[ValueWrite]) -> Result<(), SheetsError>;
}

/// Phase a deadline expired in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SyncPhase {
    Reading,
    Writing,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncPhase::Reading => "read",
            SyncPhase::Writing => "write",
        })
    }
}

/// Why a cycle failed. Every variant aborts the cycle; retries happen by
/// re-running the whole cycle under the external scheduler.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("chain read failed: {0}")]
    Read(#[from] ChainError),

    /// The chain emitted a token id the grid cannot address.
    #[error("addressing invariant violated: {0}")]
    Codec(#[from] CoordError),

    #[error("sheet write failed: {0}")]
    Write(#[from] SheetsError),

    #[error("{phase} phase exceeded the configured deadline")]
    Deadline { phase: SyncPhase },
}

/// How a successful cycle ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncOutcome {
    /// Nothing has ever been minted; no writer call was made.
    Skipped,
    /// The full projection was applied.
    Synced { cells: usize, block: u64 },
}

/// One configured synchronization cycle.
pub struct SyncCycle {
    target: SheetTarget,
    grid: GridDims,
    phase_timeout: Option<Duration>,
}

impl SyncCycle {
    pub fn new(target: SheetTarget, grid: GridDims) -> Self {
        Self {
            target,
            grid,
            phase_timeout: None,
        }
    }

    /// Bound each network phase; expiry fails the cycle without running
    /// the remaining phases.
    pub fn with_phase_timeout(mut self, timeout: Duration) -> Self {
        self.phase_timeout = Some(timeout);
        self
    }

    /// Run one read → project → write cycle.
    ///
    /// No write is issued before the read and projection have fully
    /// succeeded, so a failed cycle leaves the document untouched.
    /// Format writes are best-effort; value writes decide success.
    pub async fn run<R, W>(&self, reader: &R, writer: &W) -> Result<SyncOutcome, SyncError>
    where
        R: ChainRead,
        W: SheetApply,
    {
        let snapshot = self
            .bounded(SyncPhase::Reading, reader.read_all_cells())
            .await??;
        tracing::debug!(block = snapshot.block, records = snapshot.records.len(), "read phase done");

        let projection = Projection::from_records(&snapshot.records, &self.target, self.grid)?;
        if projection.is_empty() {
            tracing::info!("nothing to sync");
            return Ok(SyncOutcome::Skipped);
        }

        match self
            .bounded(SyncPhase::Writing, writer.apply_formats(&projection.formats))
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "format batch failed; value batch still runs");
            }
            Err(deadline) => return Err(deadline),
        }

        self.bounded(SyncPhase::Writing, writer.apply_values(&projection.values))
            .await??;

        Ok(SyncOutcome::Synced {
            cells: projection.cell_count(),
            block: snapshot.block,
        })
    }

    async fn bounded<T>(
        &self,
        phase: SyncPhase,
        work: impl Future<Output = T>,
    ) -> Result<T, SyncError> {
        match self.phase_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| SyncError::Deadline { phase }),
            None => Ok(work.await),
        }
    }
}
