//! Immutable sectioned grid of items.
//!
//! A `Grid` is the arranged form of one emission of the item source: an
//! ordered list of sections, each an ordered list of items. Grids are never
//! mutated after construction; the store replaces them wholesale.

use std::fmt;

use reactive_table_core::{SectionTreeDebug, TreeFormatOptions};

use super::index::IndexPath;
use crate::error::{GridError, Result};

/// An immutable two-dimensional (section × row) view over items.
///
/// # Example
///
/// ```
/// use reactive_table::model::{Grid, IndexPath};
///
/// let grid = Grid::new(vec![vec!["x1", "x2"], vec!["y1"]]);
///
/// assert_eq!(grid.section_count(), 2);
/// assert_eq!(grid.item(1, 0), Ok(&"y1"));
/// assert!(!grid.is_within_bounds(IndexPath::new(1, 1)));
/// assert_eq!(grid.find_first(|item| item.starts_with('y')), Some(IndexPath::new(1, 0)));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    sections: Vec<Vec<T>>,
}

impl<T> Grid<T> {
    /// Creates a grid from already-partitioned sections.
    pub fn new(sections: Vec<Vec<T>>) -> Self {
        Self { sections }
    }

    /// Creates the grid of an empty source: exactly one section with no rows.
    pub fn empty() -> Self {
        Self::new(vec![Vec::new()])
    }

    /// Creates a grid holding every item in one section.
    pub fn single_section(items: Vec<T>) -> Self {
        Self::new(vec![items])
    }

    /// Returns the number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the rows of a section.
    pub fn rows(&self, section: usize) -> Result<&[T]> {
        self.sections
            .get(section)
            .map(Vec::as_slice)
            .ok_or_else(|| GridError::section_out_of_range(section, self.sections.len()))
    }

    /// Returns the number of rows in a section.
    pub fn row_count(&self, section: usize) -> Result<usize> {
        self.rows(section).map(<[T]>::len)
    }

    /// Returns the item at `row` of `section`.
    pub fn item(&self, section: usize, row: usize) -> Result<&T> {
        let rows = self.rows(section)?;
        rows.get(row)
            .ok_or_else(|| GridError::row_out_of_range(section, row, rows.len()))
    }

    /// Returns the item at a path.
    pub fn item_at(&self, path: IndexPath) -> Result<&T> {
        self.item(path.section(), path.row())
    }

    /// Returns the item at a path, or `None` when the path is out of bounds.
    pub fn get(&self, path: IndexPath) -> Option<&T> {
        self.sections.get(path.section())?.get(path.row())
    }

    /// Returns `true` if the path addresses an item of this grid.
    pub fn is_within_bounds(&self, path: IndexPath) -> bool {
        self.get(path).is_some()
    }

    /// Returns the first section, or an empty slice when there are no sections.
    pub fn first_section(&self) -> &[T] {
        self.sections.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of items across all sections.
    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no section holds any item.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Returns the path of the first item matching `predicate`.
    ///
    /// Sections are scanned in order, and rows in order within a section.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<IndexPath>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .find(|(_, item)| predicate(item))
            .map(|(path, _)| path)
    }

    /// Folds over the sections in order.
    pub fn fold<U, F>(&self, init: U, f: F) -> U
    where
        F: FnMut(U, &[T]) -> U,
    {
        self.sections().fold(init, f)
    }

    /// Iterates over the sections in order.
    pub fn sections(&self) -> impl Iterator<Item = &[T]> {
        self.sections.iter().map(Vec::as_slice)
    }

    /// Iterates over every item together with its path.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, &T)> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, rows)| {
                rows.iter()
                    .enumerate()
                    .map(move |(row, item)| (IndexPath::new(section, row), item))
            })
    }

    /// Consumes the grid, returning its sections.
    pub fn into_sections(self) -> Vec<Vec<T>> {
        self.sections
    }
}

impl<T: PartialEq> Grid<T> {
    /// Returns the path of the first item equal to `item`.
    pub fn find(&self, item: &T) -> Option<IndexPath> {
        self.find_first(|candidate| candidate == item)
    }

    /// Returns `true` if any section holds an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }
}

impl<T: fmt::Debug> Grid<T> {
    /// Renders the grid as a tree for logging.
    pub fn debug_tree(&self, options: TreeFormatOptions) -> String {
        SectionTreeDebug::with_options(options).format_sections(
            self.sections
                .iter()
                .map(|rows| rows.iter().map(|item| format!("{item:?}"))),
        )
    }
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<Vec<T>>> for Grid<T> {
    fn from(sections: Vec<Vec<T>>) -> Self {
        Self::new(sections)
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("section_count", &self.section_count())
            .field("sections", &self.sections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped() -> Grid<&'static str> {
        Grid::new(vec![vec!["x1", "x2"], vec!["y1"]])
    }

    #[test]
    fn test_empty_grid_has_one_empty_section() {
        let grid: Grid<i32> = Grid::empty();
        assert_eq!(grid.section_count(), 1);
        assert_eq!(grid.row_count(0), Ok(0));
        assert!(grid.is_empty());
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn test_rows_and_items() {
        let grid = grouped();
        assert_eq!(grid.rows(0), Ok(&["x1", "x2"][..]));
        assert_eq!(grid.item(0, 1), Ok(&"x2"));
        assert_eq!(grid.item_at(IndexPath::new(1, 0)), Ok(&"y1"));
        assert_eq!(grid.total_rows(), 3);
    }

    #[test]
    fn test_out_of_range() {
        let grid = grouped();
        assert_eq!(grid.rows(2), Err(GridError::section_out_of_range(2, 2)));
        assert_eq!(grid.item(1, 1), Err(GridError::row_out_of_range(1, 1, 1)));
        assert_eq!(grid.get(IndexPath::new(5, 0)), None);
    }

    #[test]
    fn test_out_of_bounds_paths_fail_lookup() {
        let grid = grouped();
        for section in 0..4 {
            for row in 0..4 {
                let path = IndexPath::new(section, row);
                assert_eq!(grid.is_within_bounds(path), grid.item_at(path).is_ok());
            }
        }
    }

    #[test]
    fn test_grid_without_sections() {
        let grid: Grid<u8> = Grid::new(Vec::new());
        assert_eq!(grid.section_count(), 0);
        assert!(grid.first_section().is_empty());
        assert!(!grid.is_within_bounds(IndexPath::new(0, 0)));
    }

    #[test]
    fn test_find() {
        let grid = grouped();
        assert_eq!(grid.find(&"x2"), Some(IndexPath::new(0, 1)));
        assert_eq!(grid.find(&"z"), None);
        assert!(grid.contains(&"y1"));

        let grid = Grid::new(vec![vec![1, 2], vec![2, 3]]);
        assert_eq!(grid.find_first(|n| *n == 2), Some(IndexPath::new(0, 1)));
        assert_eq!(grid.find_first(|n| *n > 2), Some(IndexPath::new(1, 1)));
    }

    #[test]
    fn test_fold_and_iter() {
        let grid = Grid::new(vec![vec![1, 2], vec![], vec![3]]);
        let widths = grid.fold(Vec::new(), |mut acc, rows| {
            acc.push(rows.len());
            acc
        });
        assert_eq!(widths, vec![2, 0, 1]);

        let paths: Vec<_> = grid.iter().map(|(path, item)| (path, *item)).collect();
        assert_eq!(
            paths,
            vec![
                (IndexPath::new(0, 0), 1),
                (IndexPath::new(0, 1), 2),
                (IndexPath::new(2, 0), 3)
            ]
        );
    }

    #[test]
    fn test_debug_tree() {
        let output = grouped().debug_tree(TreeFormatOptions::default());
        assert!(output.starts_with("Grid (2 sections, 3 rows):"));
        assert!(output.contains("\"y1\""));
    }
}
