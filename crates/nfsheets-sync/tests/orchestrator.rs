use std::sync::Mutex;
use std::time::Duration;

use nfsheets_chain::{CellRecord, CellSnapshot, ChainError};
use nfsheets_common::{GridDims, TokenId};
use nfsheets_sheets::SheetsError;
use nfsheets_sync::{
    ChainRead, FormatWrite, SheetApply, SheetTarget, SyncCycle, SyncError, SyncOutcome,
    SyncPhase, ValueWrite,
};

struct FakeReader {
    snapshot: Option<CellSnapshot>,
}

impl FakeReader {
    fn with_records(records: Vec<CellRecord>) -> Self {
        Self {
            snapshot: Some(CellSnapshot { block: 42, records }),
        }
    }

    fn failing() -> Self {
        Self { snapshot: None }
    }
}

impl ChainRead for FakeReader {
    async fn read_all_cells(&self) -> Result<CellSnapshot, ChainError> {
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Err(ChainError::LengthMismatch {
                token_ids: 0,
                values: 1,
            }),
        }
    }
}

struct SlowReader;

impl ChainRead for SlowReader {
    async fn read_all_cells(&self) -> Result<CellSnapshot, ChainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(CellSnapshot::default())
    }
}

#[derive(Default)]
struct FakeWriter {
    calls: Mutex<Vec<&'static str>>,
    fail_formats: bool,
    fail_values: bool,
}

impl FakeWriter {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl SheetApply for FakeWriter {
    async fn apply_formats(&self, _formats: &[FormatWrite]) -> Result<(), SheetsError> {
        self.calls.lock().unwrap().push("formats");
        if self.fail_formats {
            return Err(SheetsError::Api {
                status: 500,
                message: "format backend down".to_string(),
            });
        }
        Ok(())
    }

    async fn apply_values(&self, _values: &[ValueWrite]) -> Result<(), SheetsError> {
        self.calls.lock().unwrap().push("values");
        if self.fail_values {
            return Err(SheetsError::Api {
                status: 500,
                message: "value backend down".to_string(),
            });
        }
        Ok(())
    }
}

fn cycle() -> SyncCycle {
    SyncCycle::new(
        SheetTarget {
            sheet_name: "Sheet1".to_string(),
            sheet_id: 0,
        },
        GridDims::DEPLOYED,
    )
}

fn record(token_id: u64, value: &str) -> CellRecord {
    CellRecord {
        token_id: TokenId::new(token_id),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn empty_snapshot_skips_without_writer_calls() {
    let reader = FakeReader::with_records(Vec::new());
    let writer = FakeWriter::default();

    let outcome = cycle().run(&reader, &writer).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Skipped);
    assert!(writer.calls().is_empty());
}

#[tokio::test]
async fn formats_are_applied_before_values() {
    let reader = FakeReader::with_records(vec![record(1, "hello"), record(1001, "world")]);
    let writer = FakeWriter::default();

    let outcome = cycle().run(&reader, &writer).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Synced { cells: 2, block: 42 });
    assert_eq!(writer.calls(), vec!["formats", "values"]);
}

#[tokio::test]
async fn format_failure_is_best_effort() {
    let reader = FakeReader::with_records(vec![record(1, "hello")]);
    let writer = FakeWriter {
        fail_formats: true,
        ..FakeWriter::default()
    };

    let outcome = cycle().run(&reader, &writer).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Synced { cells: 1, block: 42 });
    assert_eq!(writer.calls(), vec!["formats", "values"]);
}

#[tokio::test]
async fn value_failure_fails_the_cycle() {
    let reader = FakeReader::with_records(vec![record(1, "hello")]);
    let writer = FakeWriter {
        fail_values: true,
        ..FakeWriter::default()
    };

    let err = cycle().run(&reader, &writer).await.unwrap_err();

    assert!(matches!(err, SyncError::Write(_)));
    assert_eq!(writer.calls(), vec!["formats", "values"]);
}

#[tokio::test]
async fn read_failure_never_reaches_the_writer() {
    let reader = FakeReader::failing();
    let writer = FakeWriter::default();

    let err = cycle().run(&reader, &writer).await.unwrap_err();

    assert!(matches!(err, SyncError::Read(_)));
    assert!(writer.calls().is_empty());
}

#[tokio::test]
async fn out_of_grid_token_fails_before_any_write() {
    let reader = FakeReader::with_records(vec![record(26_001, "bad id")]);
    let writer = FakeWriter::default();

    let err = cycle().run(&reader, &writer).await.unwrap_err();

    assert!(matches!(err, SyncError::Codec(_)));
    assert!(writer.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn read_deadline_aborts_the_cycle() {
    let writer = FakeWriter::default();
    let err = cycle()
        .with_phase_timeout(Duration::from_secs(10))
        .run(&SlowReader, &writer)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Deadline {
            phase: SyncPhase::Reading
        }
    ));
    assert!(writer.calls().is_empty());
}
