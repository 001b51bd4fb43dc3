//! Snapshot → pending-write projection.
//!
//! A projection is a derived view of one snapshot. It is built, applied,
//! and discarded within a single cycle; it carries no identity across
//! cycles.

use nfsheets_common::{CoordError, GridDims};

use nfsheets_chain::CellRecord;

/// Fill marking a purchased cell, in unit-range RGB.
pub const PURCHASED_FILL: Rgb = Rgb {
    red: 0.85,
    green: 0.92,
    blue: 0.85,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// Where the writes land: tab name for A1 value ranges, numeric tab id
/// for format rectangles.
#[derive(Clone, Debug)]
pub struct SheetTarget {
    pub sheet_name: String,
    pub sheet_id: i64,
}

/// One cell-value write in A1 notation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueWrite {
    pub range: String,
    pub rows: Vec<Vec<String>>,
}

/// One cell-format write as a zero-indexed half-open rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatWrite {
    pub sheet_id: i64,
    pub start_row: u32,
    pub end_row: u32,
    pub start_column: u32,
    pub end_column: u32,
    pub style: Rgb,
}

/// The pending writes derived from one snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    pub values: Vec<ValueWrite>,
    pub formats: Vec<FormatWrite>,
}

impl Projection {
    /// Project every record into one value write and one format write.
    ///
    /// Value writes carry the cell content; format writes mark occupancy
    /// and depend only on which token ids exist, not on their values.
    /// Both lists keep source order, so equal record sets always produce
    /// identical projections.
    ///
    /// A token id outside the grid aborts the projection: the chain
    /// violated the addressing invariant and the cycle must fail rather
    /// than skip the record.
    pub fn from_records(
        records: &[CellRecord],
        target: &SheetTarget,
        grid: GridDims,
    ) -> Result<Self, CoordError> {
        let mut values = Vec::with_capacity(records.len());
        let mut formats = Vec::with_capacity(records.len());
        for record in records {
            let coord = record.token_id.coordinate(grid)?;
            values.push(ValueWrite {
                range: format!("{}!{}", target.sheet_name, coord),
                rows: vec![vec![record.value.clone()]],
            });
            formats.push(FormatWrite {
                sheet_id: target.sheet_id,
                start_row: coord.row() - 1,
                end_row: coord.row(),
                start_column: coord.column() - 1,
                end_column: coord.column(),
                style: PURCHASED_FILL,
            });
        }
        Ok(Self { values, formats })
    }

    /// True when there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.formats.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }
}
