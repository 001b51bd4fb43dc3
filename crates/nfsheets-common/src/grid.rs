use core::fmt;

/// Dimensions of the on-chain cell grid.
///
/// The deployed contract fixes the grid at 1000 rows by 26 columns (`A`-`Z`);
/// both bounds participate in the token identifier formula, so every crate
/// that touches token ids threads the same `GridDims` through.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GridDims {
    num_rows: u32,
    num_columns: u32,
}

impl GridDims {
    /// Grid used by the deployed contract.
    pub const DEPLOYED: Self = Self {
        num_rows: 1000,
        num_columns: 26,
    };

    /// Construct grid dimensions, panicking on empty axes.
    pub fn new(num_rows: u32, num_columns: u32) -> Self {
        assert!(num_rows > 0, "grid must have at least one row");
        assert!(num_columns > 0, "grid must have at least one column");
        Self {
            num_rows,
            num_columns,
        }
    }

    #[inline(always)]
    pub fn num_rows(self) -> u32 {
        self.num_rows
    }

    #[inline(always)]
    pub fn num_columns(self) -> u32 {
        self.num_columns
    }

    /// Highest token id this grid can address.
    #[inline(always)]
    pub fn capacity(self) -> u64 {
        self.num_rows as u64 * self.num_columns as u64
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::DEPLOYED
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.num_rows, self.num_columns)
    }
}
