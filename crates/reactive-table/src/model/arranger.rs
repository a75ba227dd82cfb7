//! Section partitioning policies.
//!
//! An [`Arranger`] turns one flat emission of the item source into a
//! [`Grid`]. Arrangers are pure: the same input always produces the same
//! grid, and the relative order of items inside a section follows the input.
//!
//! Every built-in arranger maps an empty input to a grid with exactly one
//! empty section, the same shape the store starts from.

use std::collections::HashMap;
use std::hash::Hash;

use super::grid::Grid;

/// Maps a flat item sequence to a sectioned grid.
///
/// Any `Fn(Vec<T>) -> Vec<Vec<T>>` closure is an arranger:
///
/// ```
/// use reactive_table::model::Arranger;
///
/// let evens_first = |items: Vec<u32>| {
///     let (even, odd): (Vec<u32>, Vec<u32>) = items.into_iter().partition(|n| n % 2 == 0);
///     vec![even, odd]
/// };
///
/// let grid = evens_first.arrange(vec![1, 2, 3, 4]);
/// assert_eq!(grid.rows(0), Ok(&[2, 4][..]));
/// ```
pub trait Arranger<T>: Send + Sync {
    /// Arrange `items` into sections.
    fn arrange(&self, items: Vec<T>) -> Grid<T>;
}

impl<T, F> Arranger<T> for F
where
    F: Fn(Vec<T>) -> Vec<Vec<T>> + Send + Sync,
{
    fn arrange(&self, items: Vec<T>) -> Grid<T> {
        Grid::new(self(items))
    }
}

/// Places every item in one section.
///
/// This is the arrangement used by flat tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSection;

impl<T> Arranger<T> for SingleSection {
    fn arrange(&self, items: Vec<T>) -> Grid<T> {
        Grid::single_section(items)
    }
}

/// Groups items by a key.
///
/// Sections appear in the order their key is first seen in the input.
///
/// ```
/// use reactive_table::model::{Arranger, GroupBy};
///
/// let by_letter = GroupBy::new(|item: &&str| item.chars().next());
/// let grid = by_letter.arrange(vec!["x1", "y1", "x2"]);
///
/// assert_eq!(grid.rows(0), Ok(&["x1", "x2"][..]));
/// assert_eq!(grid.rows(1), Ok(&["y1"][..]));
/// ```
#[derive(Clone)]
pub struct GroupBy<F> {
    key: F,
}

impl<F> GroupBy<F> {
    /// Creates an arranger grouping by the key `key` extracts.
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> Arranger<T> for GroupBy<F>
where
    F: Fn(&T) -> K + Send + Sync,
    K: Eq + Hash,
{
    fn arrange(&self, items: Vec<T>) -> Grid<T> {
        if items.is_empty() {
            return Grid::empty();
        }

        let mut positions: HashMap<K, usize> = HashMap::new();
        let mut sections: Vec<Vec<T>> = Vec::new();
        for item in items {
            let section = *positions.entry((self.key)(&item)).or_insert_with(|| {
                sections.push(Vec::new());
                sections.len() - 1
            });
            sections[section].push(item);
        }
        Grid::new(sections)
    }
}

impl<F> std::fmt::Debug for GroupBy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupBy").finish_non_exhaustive()
    }
}

/// Splits items into sections of at most `size` rows.
#[derive(Debug, Clone, Copy)]
pub struct Chunked {
    size: usize,
}

impl Chunked {
    /// Creates a chunking arranger. A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Returns the maximum number of rows per section.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<T> Arranger<T> for Chunked {
    fn arrange(&self, items: Vec<T>) -> Grid<T> {
        if items.is_empty() {
            return Grid::empty();
        }

        let mut sections = Vec::with_capacity(items.len().div_ceil(self.size));
        let mut current = Vec::with_capacity(self.size);
        for item in items {
            current.push(item);
            if current.len() == self.size {
                sections.push(std::mem::replace(
                    &mut current,
                    Vec::with_capacity(self.size),
                ));
            }
        }
        if !current.is_empty() {
            sections.push(current);
        }
        Grid::new(sections)
    }
}
