//! Flat row counts and cell content.

use std::sync::Arc;

use reactive_table_core::logging::targets;

use super::index::IndexPath;
use super::store::GridStore;
use super::traits::{CellContent, CellProvider};
use crate::widget::TableWidget;

/// Answers "how many rows" and "which cell" against the current grid.
///
/// The layout adapter treats the grid as flat: its row count is the size of
/// the first section. Sectioned tables take their per-section counts from
/// [`SectionAdapter`](super::SectionAdapter) instead.
pub struct LayoutAdapter<T, C> {
    store: Arc<GridStore<T>>,
    cells: Arc<dyn CellProvider<T, C>>,
}

impl<T: Send + Sync + 'static, C> LayoutAdapter<T, C> {
    /// Creates an adapter reading from `store` and rendering with `cells`.
    pub fn new(store: Arc<GridStore<T>>, cells: Arc<dyn CellProvider<T, C>>) -> Self {
        Self { store, cells }
    }

    /// The number of rows in the first section, or 0 when there is none.
    pub fn row_count(&self) -> usize {
        self.store.with_current(|grid| grid.first_section().len())
    }

    /// Renders the cell for `path`.
    ///
    /// Returns [`CellContent::Stale`] when the path does not exist in the
    /// current grid. Otherwise the provider picks an identifier, the widget
    /// is asked for a reusable cell with that identifier, and the provider
    /// populates it.
    pub fn cell_content<W>(&self, table: &W, path: IndexPath) -> CellContent<C>
    where
        W: TableWidget<Cell = C>,
    {
        let grid = self.store.current();
        let Some(item) = grid.get(path) else {
            tracing::debug!(
                target: targets::LAYOUT,
                %path,
                sections = grid.section_count(),
                "cell requested for stale path"
            );
            return CellContent::Stale(path);
        };

        let identifier = self.cells.identifier_for(item);
        let reusable = table.dequeue_reusable_cell(&identifier, path);
        let cell = self.cells.populate(reusable, item);
        CellContent::Rendered { identifier, cell }
    }

    /// The store this adapter reads.
    pub fn store(&self) -> &Arc<GridStore<T>> {
        &self.store
    }
}
