//! The delegate registered on the widget.
//!
//! [`TableManager`] composes the three optional capability sets into one
//! [`TableDelegate`]:
//!
//! - **Layout** ([`LayoutAdapter`]): flat row counts and cells. Always present.
//! - **Sections** ([`SectionAdapter`]): section counts, per-section row
//!   counts and headers/footers.
//! - **Actions** ([`EventRouter`]): display and selection events.
//!
//! The widget may ask about paths or sections that no longer exist, because
//! a new grid was committed since it last reloaded. Such requests are
//! answered with a safe value and the widget is told to reload.

use reactive_table_core::table_trace;

use super::index::IndexPath;
use super::layout::LayoutAdapter;
use super::router::{EventRouter, LifecycleEvent};
use super::section::SectionAdapter;
use super::traits::CellContent;
use crate::error::GridError;
use crate::widget::{TableDelegate, TableWidget};

/// Dispatches widget requests to the configured adapters.
pub struct TableManager<W: TableWidget, T> {
    layout: LayoutAdapter<T, W::Cell>,
    sections: Option<SectionAdapter<T, W::View>>,
    actions: Option<EventRouter<T, W::Cell>>,
    deselect_on_select: bool,
}

impl<W, T> TableManager<W, T>
where
    W: TableWidget,
    T: Clone + Send + Sync + 'static,
{
    /// Creates a manager with only the layout capability.
    pub fn new(layout: LayoutAdapter<T, W::Cell>) -> Self {
        Self {
            layout,
            sections: None,
            actions: None,
            deselect_on_select: true,
        }
    }

    /// Adds the section capability.
    pub fn with_sections(mut self, sections: SectionAdapter<T, W::View>) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Adds the action capability.
    pub fn with_actions(mut self, actions: EventRouter<T, W::Cell>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Sets whether a selected row is deselected before the selection is routed.
    pub fn with_deselect_on_select(mut self, deselect: bool) -> Self {
        self.deselect_on_select = deselect;
        self
    }

    /// The layout capability.
    pub fn layout(&self) -> &LayoutAdapter<T, W::Cell> {
        &self.layout
    }

    /// The section capability, if configured.
    pub fn sections(&self) -> Option<&SectionAdapter<T, W::View>> {
        self.sections.as_ref()
    }

    /// The action capability, if configured.
    pub fn actions(&self) -> Option<&EventRouter<T, W::Cell>> {
        self.actions.as_ref()
    }

    /// Resolves a lookup error by asking the widget to reload.
    fn recover<R>(&self, table: &W, result: Result<R, GridError>, fallback: R) -> R {
        result.unwrap_or_else(|err| {
            table_trace!(error = %err, "stale section request, reloading");
            table.reload_data();
            fallback
        })
    }

    fn route(&self, event: LifecycleEvent<W::Cell>) {
        if let Some(actions) = &self.actions {
            actions.route(event);
        }
    }
}

impl<W, T> TableDelegate<W> for TableManager<W, T>
where
    W: TableWidget,
    T: Clone + Send + Sync + 'static,
{
    fn number_of_rows(&self, table: &W, section: usize) -> usize {
        match &self.sections {
            Some(sections) => self.recover(table, sections.row_count(section), 0),
            None => self.layout.row_count(),
        }
    }

    fn cell_for_row(&self, table: &W, path: IndexPath) -> W::Cell {
        match self.layout.cell_content(table, path) {
            CellContent::Rendered { cell, .. } => cell,
            CellContent::Stale(_) => {
                table.reload_data();
                table.placeholder_cell()
            }
        }
    }

    fn number_of_sections(&self, _table: &W) -> usize {
        self.sections
            .as_ref()
            .map_or(1, |sections| sections.section_count())
    }

    fn header_view(&self, table: &W, section: usize) -> Option<W::View> {
        let sections = self.sections.as_ref()?;
        self.recover(table, sections.header_view(section), None)
    }

    fn footer_view(&self, table: &W, section: usize) -> Option<W::View> {
        let sections = self.sections.as_ref()?;
        self.recover(table, sections.footer_view(section), None)
    }

    fn header_title(&self, table: &W, section: usize) -> Option<String> {
        let sections = self.sections.as_ref()?;
        self.recover(table, sections.header_title(section), None)
    }

    fn footer_title(&self, table: &W, section: usize) -> Option<String> {
        let sections = self.sections.as_ref()?;
        self.recover(table, sections.footer_title(section), None)
    }

    fn header_height(&self, table: &W, section: usize) -> f32 {
        match &self.sections {
            Some(sections) => self.recover(table, sections.header_height(table, section), 0.0),
            None => 0.0,
        }
    }

    fn will_display_cell(&self, _table: &W, cell: W::Cell, path: IndexPath) {
        self.route(LifecycleEvent::WillDisplay { cell, path });
    }

    fn did_end_displaying_cell(&self, _table: &W, cell: W::Cell, path: IndexPath) {
        self.route(LifecycleEvent::DidEndDisplay { cell, path });
    }

    fn did_select_row(&self, table: &W, path: IndexPath) {
        if self.deselect_on_select {
            table.deselect_row(path);
        }
        self.route(LifecycleEvent::DidSelect { path });
    }
}
