//! Wire types for the two batch endpoints the sync pipeline uses.

use serde::Serialize;

/// Value input option making the target document evaluate formulas
/// (`=1+1` becomes `2`) instead of storing them literally.
pub const USER_ENTERED: &str = "USER_ENTERED";

/// One contiguous run of cell values, addressed in A1 notation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// `SheetName!<Col><Row>` target range.
    pub range: String,
    /// Row-major cell values.
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchUpdateValuesRequest {
    pub value_input_option: &'static str,
    pub data: Vec<ValueRange>,
}

/// Zero-indexed, half-open cell rectangle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

/// RGB color with components clamped to the unit range the API expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
}

impl Color {
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
        }
    }

    pub fn red(self) -> f32 {
        self.red
    }

    pub fn green(self) -> f32 {
        self.green
    }

    pub fn blue(self) -> f32 {
        self.blue
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub background_color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellData {
    pub user_entered_format: CellFormat,
}

/// A `repeatCell` request applying one format to every cell in a range.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCellRequest {
    pub range: GridRange,
    pub(crate) cell: CellData,
    /// Field mask restricting the update to the carried format.
    pub fields: &'static str,
}

impl RepeatCellRequest {
    pub fn background(range: GridRange, color: Color) -> Self {
        Self {
            range,
            cell: CellData {
                user_entered_format: CellFormat {
                    background_color: color,
                },
            },
            fields: "userEnteredFormat.backgroundColor",
        }
    }
}

/// Entry in a `spreadsheets.batchUpdate` request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Request {
    #[serde(rename = "repeatCell")]
    RepeatCell(RepeatCellRequest),
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}
