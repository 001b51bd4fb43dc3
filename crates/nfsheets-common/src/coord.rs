//! Cell coordinates and the linear token identifier codec.
//!
//! Token ids run down each column before moving to the next: with 1000 rows,
//! `A1`..`A1000` map to ids `1..=1000` and `B1` to `1001`. The mapping is a
//! pure function of the coordinate and [`GridDims`]; nothing is stored.

use core::fmt;
use std::error::Error;

use crate::grid::GridDims;

/// Errors from converting between cell coordinates and token ids.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoordError {
    /// Column letters outside `A`..`Z` style uppercase ASCII, or a column
    /// beyond the grid's column count.
    InvalidColumn(String),
    /// Row outside `1..=num_rows`.
    InvalidRow { row: u32, num_rows: u32 },
    /// Token id zero or beyond the grid capacity.
    InvalidToken { token: u64, capacity: u64 },
    /// Cell reference text that does not split into letters then digits.
    MalformedReference(String),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidColumn(letters) => {
                write!(f, "invalid column {letters:?}")
            }
            CoordError::InvalidRow { row, num_rows } => {
                write!(f, "row {row} outside 1..={num_rows}")
            }
            CoordError::InvalidToken { token, capacity } => {
                write!(f, "token id {token} outside 1..={capacity}")
            }
            CoordError::MalformedReference(text) => {
                write!(f, "malformed cell reference {text:?}")
            }
        }
    }
}

impl Error for CoordError {}

/// Convert column letters to a 1-based column number (`A` -> 1, `Z` -> 26,
/// `AA` -> 27). The grid bound is applied by the callers that know it.
pub fn column_number(letters: &str) -> Result<u32, CoordError> {
    if letters.is_empty() {
        return Err(CoordError::InvalidColumn(letters.to_string()));
    }
    let mut column: u32 = 0;
    for ch in letters.bytes() {
        if !ch.is_ascii_uppercase() {
            return Err(CoordError::InvalidColumn(letters.to_string()));
        }
        column = column
            .checked_mul(26)
            .and_then(|c| c.checked_add((ch - b'A') as u32 + 1))
            .ok_or_else(|| CoordError::InvalidColumn(letters.to_string()))?;
    }
    Ok(column)
}

/// Convert a 1-based column number to letters (`1` -> `A`, `27` -> `AA`).
pub fn column_letters(mut column: u32) -> String {
    assert!(column >= 1, "column numbers are 1-based");
    let mut buf = Vec::new();
    while column > 0 {
        column -= 1;
        buf.push(b'A' + (column % 26) as u8);
        column /= 26;
    }
    buf.reverse();
    String::from_utf8(buf).expect("only ASCII A-Z")
}

/// Human-facing cell address: 1-based column and row.
///
/// Constructed only through the validating constructors, so a value always
/// lies inside the grid it was checked against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Construct from a 1-based column and row, bounds-checked against `grid`.
    pub fn new(column: u32, row: u32, grid: GridDims) -> Result<Self, CoordError> {
        if column < 1 || column > grid.num_columns() {
            return Err(CoordError::InvalidColumn(if column >= 1 {
                column_letters(column)
            } else {
                String::new()
            }));
        }
        if row < 1 || row > grid.num_rows() {
            return Err(CoordError::InvalidRow {
                row,
                num_rows: grid.num_rows(),
            });
        }
        Ok(Self { column, row })
    }

    /// Construct from column letters and a row number.
    pub fn from_letters(letters: &str, row: u32, grid: GridDims) -> Result<Self, CoordError> {
        let column = column_number(letters)?;
        if column > grid.num_columns() {
            return Err(CoordError::InvalidColumn(letters.to_string()));
        }
        Self::new(column, row, grid)
    }

    /// Parse an A1-style reference such as `B5`.
    pub fn parse(reference: &str, grid: GridDims) -> Result<Self, CoordError> {
        let split = reference
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .unwrap_or(reference.len());
        let (letters, digits) = reference.split_at(split);
        if letters.is_empty() || digits.is_empty() {
            return Err(CoordError::MalformedReference(reference.to_string()));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| CoordError::MalformedReference(reference.to_string()))?;
        Self::from_letters(letters, row, grid)
    }

    #[inline(always)]
    pub fn column(self) -> u32 {
        self.column
    }

    #[inline(always)]
    pub fn row(self) -> u32 {
        self.row
    }

    pub fn column_letters(self) -> String {
        column_letters(self.column)
    }

    /// The token id naming this cell on-chain.
    ///
    /// `grid` must be the same dimensions the coordinate was validated
    /// against; the formula is `num_rows * (column - 1) + row`.
    pub fn token_id(self, grid: GridDims) -> TokenId {
        TokenId::new(grid.num_rows() as u64 * (self.column as u64 - 1) + self.row as u64)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row)
    }
}

/// On-chain token identifier naming exactly one cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TokenId(u64);

impl TokenId {
    #[inline(always)]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Invert the token formula back to a coordinate.
    ///
    /// Fails with [`CoordError::InvalidToken`] for id zero or ids beyond the
    /// grid capacity; a chain emitting such an id has violated the
    /// addressing invariant.
    pub fn coordinate(self, grid: GridDims) -> Result<CellCoord, CoordError> {
        if self.0 == 0 || self.0 > grid.capacity() {
            return Err(CoordError::InvalidToken {
                token: self.0,
                capacity: grid.capacity(),
            });
        }
        let zero_based = self.0 - 1;
        let row = (zero_based % grid.num_rows() as u64) as u32 + 1;
        let column = (zero_based / grid.num_rows() as u64) as u32 + 1;
        Ok(CellCoord { column, row })
    }
}

impl From<u64> for TokenId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: GridDims = GridDims::DEPLOYED;

    #[test]
    fn column_codec_roundtrip() {
        assert_eq!(column_number("A").unwrap(), 1);
        assert_eq!(column_number("Z").unwrap(), 26);
        assert_eq!(column_number("AA").unwrap(), 27);
        for column in 1..=26 * 27 {
            let letters = column_letters(column);
            assert_eq!(column_number(&letters).unwrap(), column, "{letters}");
        }
    }

    #[test]
    fn column_codec_rejects_non_letters() {
        assert_eq!(
            column_number("1"),
            Err(CoordError::InvalidColumn("1".into()))
        );
        assert_eq!(column_number("a"), Err(CoordError::InvalidColumn("a".into())));
        assert_eq!(column_number(""), Err(CoordError::InvalidColumn("".into())));
    }

    #[test]
    fn token_formula_boundaries() {
        let id = |letters, row| {
            CellCoord::from_letters(letters, row, GRID)
                .unwrap()
                .token_id(GRID)
                .raw()
        };
        assert_eq!(id("A", 1), 1);
        assert_eq!(id("A", 1000), 1000);
        assert_eq!(id("B", 1), 1001);
        assert_eq!(id("Z", 1000), 26_000);
    }

    #[test]
    fn token_ids_are_monotonic() {
        for row in 1..1000 {
            let below = CellCoord::from_letters("C", row, GRID).unwrap();
            let above = CellCoord::from_letters("C", row + 1, GRID).unwrap();
            assert_eq!(below.token_id(GRID).raw() + 1, above.token_id(GRID).raw());
        }
        let last_a = CellCoord::from_letters("A", 1000, GRID).unwrap();
        let first_b = CellCoord::from_letters("B", 1, GRID).unwrap();
        assert_eq!(last_a.token_id(GRID).raw() + 1, first_b.token_id(GRID).raw());
    }

    #[test]
    fn roundtrip_every_column() {
        for column in 1..=26 {
            for row in [1u32, 2, 499, 999, 1000] {
                let coord = CellCoord::new(column, row, GRID).unwrap();
                let back = coord.token_id(GRID).coordinate(GRID).unwrap();
                assert_eq!(coord, back);
            }
        }
    }

    #[test]
    fn roundtrip_every_token_id() {
        for raw in 1..=GRID.capacity() {
            let coord = TokenId::new(raw).coordinate(GRID).unwrap();
            assert_eq!(coord.token_id(GRID).raw(), raw);
        }
    }

    #[test]
    fn out_of_domain_rejected() {
        assert_eq!(
            CellCoord::from_letters("A", 0, GRID),
            Err(CoordError::InvalidRow { row: 0, num_rows: 1000 })
        );
        assert_eq!(
            CellCoord::from_letters("A", 1001, GRID),
            Err(CoordError::InvalidRow { row: 1001, num_rows: 1000 })
        );
        assert_eq!(
            CellCoord::from_letters("AA", 1, GRID),
            Err(CoordError::InvalidColumn("AA".into()))
        );
        assert_eq!(
            TokenId::new(0).coordinate(GRID),
            Err(CoordError::InvalidToken { token: 0, capacity: 26_000 })
        );
        assert_eq!(
            TokenId::new(26_001).coordinate(GRID),
            Err(CoordError::InvalidToken { token: 26_001, capacity: 26_000 })
        );
    }

    #[test]
    fn parse_a1_references() {
        let coord = CellCoord::parse("B5", GRID).unwrap();
        assert_eq!((coord.column(), coord.row()), (2, 5));
        assert_eq!(coord.to_string(), "B5");

        assert_eq!(
            CellCoord::parse("5B", GRID),
            Err(CoordError::MalformedReference("5B".into()))
        );
        assert_eq!(
            CellCoord::parse("B", GRID),
            Err(CoordError::MalformedReference("B".into()))
        );
        assert_eq!(
            CellCoord::parse("b5", GRID),
            Err(CoordError::MalformedReference("b5".into()))
        );
    }

    #[test]
    fn wider_grids_accept_multi_letter_columns() {
        let grid = GridDims::new(100, 40);
        let coord = CellCoord::from_letters("AB", 1, grid).unwrap();
        assert_eq!(coord.column(), 28);
        assert_eq!(coord.token_id(grid).raw(), 2701);
        assert_eq!(coord.token_id(grid).coordinate(grid).unwrap(), coord);
    }
}
