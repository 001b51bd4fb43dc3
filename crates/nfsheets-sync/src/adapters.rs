//! Production implementations of the orchestrator ports.

use alloy::providers::Provider;

use nfsheets_chain::{CellSnapshot, ChainError, ChainReader};
use nfsheets_sheets::{
    Color, GridRange, RepeatCellRequest, Request, SheetsClient, SheetsError, ValueRange,
};

use crate::orchestrator::{ChainRead, SheetApply};
use crate::projection::{FormatWrite, ValueWrite};

impl<P: Provider> ChainRead for ChainReader<P> {
    async fn read_all_cells(&self) -> Result<CellSnapshot, ChainError> {
        self.snapshot().await
    }
}

impl SheetApply for SheetsClient {
    async fn apply_formats(&self, formats: &[FormatWrite]) -> Result<(), SheetsError> {
        if formats.is_empty() {
            return Ok(());
        }
        let requests = formats.iter().map(format_request).collect();
        self.batch_format(requests).await
    }

    async fn apply_values(&self, values: &[ValueWrite]) -> Result<(), SheetsError> {
        if values.is_empty() {
            return Ok(());
        }
        let data = values.iter().map(value_range).collect();
        self.batch_update_values(data).await
    }
}

fn value_range(write: &ValueWrite) -> ValueRange {
    ValueRange {
        range: write.range.clone(),
        values: write.rows.clone(),
    }
}

fn format_request(write: &FormatWrite) -> Request {
    Request::RepeatCell(RepeatCellRequest::background(
        GridRange {
            sheet_id: write.sheet_id,
            start_row_index: write.start_row,
            end_row_index: write.end_row,
            start_column_index: write.start_column,
            end_column_index: write.end_column,
        },
        Color::rgb(write.style.red, write.style.green, write.style.blue),
    ))
}
