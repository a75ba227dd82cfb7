//! An in-memory widget for tests.
//!
//! [`RecordingTable`] implements [`TableWidget`] without drawing anything. It
//! records what the binding asks of it (reloads, deselections, delegate
//! registration) and offers helpers that play the widget's side of the
//! conversation: pulling cells, reporting display and selection events, and
//! being destroyed.
//!
//! ```
//! use reactive_table::testing::RecordingTable;
//! use reactive_table::widget::TableWidget;
//!
//! let table = RecordingTable::new();
//! table.reload_data();
//! assert_eq!(table.reload_count(), 1);
//! assert!(!table.has_delegate());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use reactive_table_core::Signal;

use crate::model::IndexPath;
use crate::widget::{TableDelegate, TableWidget};

/// Height reported per character of a header view.
const VIEW_HEIGHT_PER_CHAR: f32 = 8.0;

/// A cell of [`RecordingTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCell {
    /// The identifier the cell was last dequeued with; empty for fresh cells.
    pub identifier: String,
    /// The text shown in the cell.
    pub text: String,
    /// Whether the cell came from the reuse pool.
    pub reused: bool,
}

impl TestCell {
    /// Creates a fresh cell.
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
            reused: false,
        }
    }

    /// Populates a reusable cell, or a fresh one, with `text`.
    pub fn fill(reusable: Option<TestCell>, text: &str) -> Self {
        match reusable {
            Some(mut cell) => {
                cell.text = text.to_string();
                cell.reused = true;
                cell
            }
            None => Self::new("", text),
        }
    }
}

/// A [`TableWidget`] that records every interaction.
///
/// Header and footer views are strings; their height is eight units per
/// character.
pub struct RecordingTable {
    delegate: Mutex<Option<Arc<dyn TableDelegate<Self>>>>,
    delegate_history: Mutex<Vec<bool>>,
    reloads: AtomicUsize,
    row_counts: Mutex<Vec<usize>>,
    deselected: Mutex<Vec<IndexPath>>,
    reusable: Mutex<Vec<TestCell>>,
    destroyed: Signal<()>,
}

impl RecordingTable {
    /// Creates a table with no delegate.
    pub fn new() -> Self {
        Self {
            delegate: Mutex::new(None),
            delegate_history: Mutex::new(Vec::new()),
            reloads: AtomicUsize::new(0),
            row_counts: Mutex::new(Vec::new()),
            deselected: Mutex::new(Vec::new()),
            reusable: Mutex::new(Vec::new()),
            destroyed: Signal::new(),
        }
    }

    /// The registered delegate.
    pub fn delegate(&self) -> Option<Arc<dyn TableDelegate<Self>>> {
        self.delegate.lock().clone()
    }

    /// Returns `true` if a delegate is registered.
    pub fn has_delegate(&self) -> bool {
        self.delegate.lock().is_some()
    }

    /// Every `set_delegate` call so far: `true` for a registration, `false`
    /// for a clear.
    pub fn delegate_history(&self) -> Vec<bool> {
        self.delegate_history.lock().clone()
    }

    /// Number of `reload_data` calls so far.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Rows per section as pulled from the delegate at the last reload.
    pub fn row_counts(&self) -> Vec<usize> {
        self.row_counts.lock().clone()
    }

    /// Rows deselected so far, in order.
    pub fn deselected(&self) -> Vec<IndexPath> {
        self.deselected.lock().clone()
    }

    /// Puts `cell` in the reuse pool under `identifier`.
    pub fn enqueue_reusable(&self, identifier: &str, mut cell: TestCell) {
        cell.identifier = identifier.to_string();
        self.reusable.lock().push(cell);
    }

    /// Asks the delegate for the cell at `path`.
    pub fn cell_at(&self, path: IndexPath) -> Option<TestCell> {
        let delegate = self.delegate()?;
        Some(delegate.cell_for_row(self, path))
    }

    /// Pulls the cell at `path` and reports it as about to be displayed.
    pub fn display(&self, path: IndexPath) -> Option<TestCell> {
        let delegate = self.delegate()?;
        let cell = delegate.cell_for_row(self, path);
        delegate.will_display_cell(self, cell.clone(), path);
        Some(cell)
    }

    /// Reports `cell` at `path` as displayed without pulling it first.
    pub fn will_display(&self, cell: TestCell, path: IndexPath) {
        if let Some(delegate) = self.delegate() {
            delegate.will_display_cell(self, cell, path);
        }
    }

    /// Reports `cell` at `path` as no longer displayed.
    pub fn end_display(&self, cell: TestCell, path: IndexPath) {
        if let Some(delegate) = self.delegate() {
            delegate.did_end_displaying_cell(self, cell, path);
        }
    }

    /// Reports a selection of the row at `path`.
    pub fn select(&self, path: IndexPath) {
        if let Some(delegate) = self.delegate() {
            delegate.did_select_row(self, path);
        }
    }

    /// Asks the delegate for the header title of `section`.
    pub fn header_title(&self, section: usize) -> Option<String> {
        self.delegate()?.header_title(self, section)
    }

    /// Asks the delegate for the footer title of `section`.
    pub fn footer_title(&self, section: usize) -> Option<String> {
        self.delegate()?.footer_title(self, section)
    }

    /// Tears the widget down, emitting [`destroyed`](TableWidget::destroyed).
    pub fn destroy(&self) {
        self.destroyed.emit(());
    }
}

impl Default for RecordingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWidget for RecordingTable {
    type Cell = TestCell;
    type View = String;

    fn reload_data(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);

        let counts = match self.delegate() {
            Some(delegate) => (0..delegate.number_of_sections(self))
                .map(|section| delegate.number_of_rows(self, section))
                .collect(),
            None => Vec::new(),
        };
        *self.row_counts.lock() = counts;
    }

    fn set_delegate(&self, delegate: Option<Arc<dyn TableDelegate<Self>>>) {
        self.delegate_history.lock().push(delegate.is_some());
        *self.delegate.lock() = delegate;
    }

    fn dequeue_reusable_cell(&self, identifier: &str, _path: IndexPath) -> Option<TestCell> {
        let mut pool = self.reusable.lock();
        let position = pool.iter().position(|cell| cell.identifier == identifier)?;
        Some(pool.remove(position))
    }

    fn placeholder_cell(&self) -> TestCell {
        TestCell::new("placeholder", "")
    }

    fn deselect_row(&self, path: IndexPath) {
        self.deselected.lock().push(path);
    }

    fn view_height(&self, view: &String) -> f32 {
        view.chars().count() as f32 * VIEW_HEIGHT_PER_CHAR
    }

    fn destroyed(&self) -> &Signal<()> {
        &self.destroyed
    }
}

static_assertions::assert_impl_all!(RecordingTable: Send, Sync);
