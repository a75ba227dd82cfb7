//! The boundary between the binding and a concrete list widget.
//!
//! A toolkit integrates by implementing [`TableWidget`] for its list view.
//! The binding registers a [`TableDelegate`] on the widget; from then on the
//! widget pulls counts and cells from the delegate and reports display and
//! selection events to it.
//!
//! ```text
//!  ┌──────────────┐  set_delegate / reload_data   ┌──────────────┐
//!  │   Binding    │──────────────────────────────>│ TableWidget  │
//!  │              │                               │              │
//!  │ TableManager │<──────────────────────────────│              │
//!  └──────────────┘  counts, cells, events        └──────────────┘
//! ```
//!
//! All calls in both directions happen on the widget's thread.

use std::sync::Arc;

use reactive_table_core::Signal;

use crate::model::IndexPath;

/// A sectioned list widget the binding can drive.
///
/// Only [`reload_data`](Self::reload_data),
/// [`set_delegate`](Self::set_delegate),
/// [`placeholder_cell`](Self::placeholder_cell) and
/// [`destroyed`](Self::destroyed) are required; the rest have conservative
/// defaults.
pub trait TableWidget: Send + Sync + Sized + 'static {
    /// The widget's cell type.
    type Cell: Clone + Send + Sync + 'static;

    /// The widget's header/footer view type.
    type View: Send + Sync + 'static;

    /// Discard all cached layout and pull everything again from the delegate.
    fn reload_data(&self);

    /// Register (or with `None`, clear) the delegate.
    fn set_delegate(&self, delegate: Option<Arc<dyn TableDelegate<Self>>>);

    /// Hand out a cell previously used with `identifier`, if one is free.
    fn dequeue_reusable_cell(&self, _identifier: &str, _path: IndexPath) -> Option<Self::Cell> {
        None
    }

    /// A blank cell shown while the widget is out of date.
    fn placeholder_cell(&self) -> Self::Cell;

    /// Clear the selection highlight of a row.
    fn deselect_row(&self, _path: IndexPath) {}

    /// The height a header or footer view wants.
    fn view_height(&self, _view: &Self::View) -> f32 {
        0.0
    }

    /// Signal emitted once when the widget is torn down.
    fn destroyed(&self) -> &Signal<()>;
}

/// The object a [`TableWidget`] talks to.
///
/// Methods are grouped the way the widget uses them: layout (counts and
/// cells), sections (headers and footers) and actions (display and
/// selection events). Every method must return promptly and must never fail;
/// out-of-date requests are answered with a safe value.
pub trait TableDelegate<W: TableWidget>: Send + Sync {
    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Number of rows in `section`.
    fn number_of_rows(&self, table: &W, section: usize) -> usize;

    /// The cell to show at `path`.
    fn cell_for_row(&self, table: &W, path: IndexPath) -> W::Cell;

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Number of sections.
    fn number_of_sections(&self, table: &W) -> usize;

    /// Custom header view for `section`.
    fn header_view(&self, table: &W, section: usize) -> Option<W::View>;

    /// Custom footer view for `section`.
    fn footer_view(&self, table: &W, section: usize) -> Option<W::View>;

    /// Header title for `section`.
    fn header_title(&self, table: &W, section: usize) -> Option<String>;

    /// Footer title for `section`.
    fn footer_title(&self, table: &W, section: usize) -> Option<String>;

    /// Height of the header of `section`.
    fn header_height(&self, table: &W, section: usize) -> f32;

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// A cell is about to be shown at `path`.
    fn will_display_cell(&self, table: &W, cell: W::Cell, path: IndexPath);

    /// A cell at `path` went off screen.
    fn did_end_displaying_cell(&self, table: &W, cell: W::Cell, path: IndexPath);

    /// The user selected the row at `path`.
    fn did_select_row(&self, table: &W, path: IndexPath);
}
