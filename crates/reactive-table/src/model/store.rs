//! The single source of truth for the current grid.
//!
//! A [`GridStore`] holds one `Arc<Grid<T>>`. Readers take a cheap handle to
//! whatever grid is current; the binding replaces it wholesale when a new
//! arrangement is committed. Replacement is a handle swap, so a reader sees
//! the old grid or the new one, never a mix.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reactive_table_core::logging::targets;
use reactive_table_core::{Property, Signal, ThreadAffinity};

use super::grid::Grid;

/// A committed grid change: `(previous, next)`.
pub type GridChange<T> = (Arc<Grid<T>>, Arc<Grid<T>>);

/// Single-slot holder of the current grid.
///
/// The store starts from [`Grid::empty`]. Every [`replace`](Self::replace)
/// bumps the generation and emits [`grid_changed`](Self::grid_changed)
/// with the previous and the new grid.
///
/// # Thread Safety
///
/// Reads are allowed from any thread. Writes are only allowed from the thread
/// that created the store; this is checked in debug builds.
///
/// # Example
///
/// ```
/// use reactive_table::model::{Grid, GridStore};
///
/// let store = GridStore::new();
/// assert_eq!(store.current().section_count(), 1);
///
/// let previous = store.replace(Grid::single_section(vec![1, 2, 3]));
/// assert!(previous.is_empty());
/// assert_eq!(store.current().total_rows(), 3);
/// assert_eq!(store.generation(), 1);
/// ```
pub struct GridStore<T> {
    current: Property<Arc<Grid<T>>>,
    generation: AtomicU64,
    writer: ThreadAffinity,
    grid_changed: Signal<GridChange<T>>,
}

impl<T: Send + Sync + 'static> GridStore<T> {
    /// Creates a store holding the empty grid, owned by the current thread.
    pub fn new() -> Self {
        Self::with_grid(Grid::empty())
    }

    /// Creates a store holding `grid`, owned by the current thread.
    pub fn with_grid(grid: Grid<T>) -> Self {
        Self {
            current: Property::new(Arc::new(grid)),
            generation: AtomicU64::new(0),
            writer: ThreadAffinity::current(),
            grid_changed: Signal::new(),
        }
    }

    /// Returns a handle to the current grid.
    ///
    /// The handle stays valid after later replacements.
    pub fn current(&self) -> Arc<Grid<T>> {
        self.current.get()
    }

    /// Access the current grid through a closure without cloning the handle.
    ///
    /// The store is read-locked for the duration of `f`; do not replace the
    /// grid from inside it.
    pub fn with_current<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Grid<T>) -> R,
    {
        self.current.with(|grid| f(grid))
    }

    /// Replaces the current grid, returning the previous one.
    ///
    /// Emits [`grid_changed`](Self::grid_changed) after the swap, with no
    /// lock held.
    pub fn replace(&self, grid: Grid<T>) -> Arc<Grid<T>> {
        self.writer.debug_assert_same_thread();

        let next = Arc::new(grid);
        let previous = self.current.swap(Arc::clone(&next));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(
            target: targets::BINDING,
            generation,
            sections = next.section_count(),
            rows = next.total_rows(),
            "grid replaced"
        );

        self.grid_changed.emit((Arc::clone(&previous), next));
        previous
    }
}

impl<T> GridStore<T> {
    /// Returns the number of replacements so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Signal emitted after every replacement with `(previous, next)`.
    pub fn grid_changed(&self) -> &Signal<GridChange<T>> {
        &self.grid_changed
    }
}

impl<T: Send + Sync + 'static> Default for GridStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug + Send + Sync + 'static> std::fmt::Debug for GridStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridStore")
            .field("generation", &self.generation())
            .field("current", &self.current())
            .finish()
    }
}

static_assertions::assert_impl_all!(GridStore<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_initial_grid_is_empty() {
        let store: GridStore<&str> = GridStore::new();
        assert_eq!(*store.current(), Grid::empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_read_after_write() {
        let store = GridStore::new();
        for n in 1..=5 {
            store.replace(Grid::single_section((0..n).collect::<Vec<u32>>()));
            assert_eq!(store.current().total_rows(), n as usize);
            assert_eq!(store.generation(), u64::from(n));
        }
    }

    #[test]
    fn test_replace_returns_previous() {
        let store = GridStore::with_grid(Grid::single_section(vec!["a"]));
        let first = store.current();

        let previous = store.replace(Grid::single_section(vec!["b"]));
        assert!(Arc::ptr_eq(&previous, &first));
        assert_eq!(store.with_current(|grid| grid.item(0, 0).copied()), Ok("b"));
    }

    #[test]
    fn test_old_handles_survive_replacement() {
        let store = GridStore::with_grid(Grid::single_section(vec![1, 2, 3]));
        let held = store.current();
        store.replace(Grid::empty());

        assert_eq!(held.total_rows(), 3);
        assert_eq!(store.current().total_rows(), 0);
    }

    #[test]
    fn test_grid_changed_carries_previous_and_next() {
        let store = GridStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        store.grid_changed().connect(move |(previous, next)| {
            seen_clone
                .lock()
                .push((previous.total_rows(), next.total_rows()));
        });

        store.replace(Grid::single_section(vec!['a', 'b']));
        store.replace(Grid::single_section(vec!['c']));

        assert_eq!(*seen.lock(), vec![(0, 2), (2, 1)]);
    }

    #[test]
    fn test_readers_on_other_threads() {
        let store = Arc::new(GridStore::with_grid(Grid::single_section(vec![1u8, 2])));
        let reader = store.clone();
        let rows = std::thread::spawn(move || reader.current().total_rows())
            .join()
            .unwrap();
        assert_eq!(rows, 2);
    }
}
