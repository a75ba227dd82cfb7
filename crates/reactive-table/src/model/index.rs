//! Index path for addressing rows in a sectioned grid.
//!
//! The `IndexPath` type is how the widget and the binding refer to a row:
//! a section number plus a row number within that section. Paths are plain
//! values; whether one is valid depends on the grid it is resolved against.

use std::fmt;

/// Represents a position within a sectioned grid.
///
/// Paths are produced by the widget and resolved by the binding against the
/// grid that is current at resolution time.
///
/// # Index Validity
///
/// Index paths should be used immediately and not stored long-term. After a
/// new grid is committed a previously valid path may point past the end of a
/// section, or at a different item.
///
/// # Example
///
/// ```
/// use reactive_table::model::IndexPath;
///
/// let path = IndexPath::new(1, 4);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.row(), 4);
/// assert_eq!(path.next_row(), IndexPath::new(1, 5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// The section number. Declared first so ordering is section-major.
    section: usize,
    /// The row within the section.
    row: usize,
}

impl IndexPath {
    /// Creates a path from a section and a row.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Creates a path to a row of the first section.
    ///
    /// This is the addressing used by flat (single-section) tables.
    #[inline]
    pub const fn for_row(row: usize) -> Self {
        Self::new(0, row)
    }

    /// Returns the section number.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns a path in the same section at a different row.
    #[inline]
    pub const fn with_row(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }

    /// Returns a path at the same row of a different section.
    #[inline]
    pub const fn with_section(&self, section: usize) -> Self {
        Self::new(section, self.row)
    }

    /// Returns the path of the following row in the same section.
    #[inline]
    pub const fn next_row(&self) -> Self {
        self.with_row(self.row + 1)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}
