//! Section counts and supplementary (header/footer) content.

use std::sync::Arc;

use super::store::GridStore;
use super::traits::{SectionProvider, SupplementaryContent};
use crate::error::Result;
use crate::widget::TableWidget;

/// Answers section-level questions against the current grid.
///
/// Every lookup is bounds-checked against the grid that is current when the
/// question is asked; an invalid section yields
/// [`GridError::SectionOutOfRange`](crate::GridError::SectionOutOfRange).
/// The provider only ever sees the items of the section in question.
pub struct SectionAdapter<T, V> {
    store: Arc<GridStore<T>>,
    sections: Arc<dyn SectionProvider<T, V>>,
}

impl<T: Send + Sync + 'static, V> SectionAdapter<T, V> {
    /// Creates an adapter reading from `store` with header/footer content
    /// from `sections`.
    pub fn new(store: Arc<GridStore<T>>, sections: Arc<dyn SectionProvider<T, V>>) -> Self {
        Self { store, sections }
    }

    /// The number of sections in the current grid.
    pub fn section_count(&self) -> usize {
        self.store.with_current(|grid| grid.section_count())
    }

    /// The number of rows in `section`.
    pub fn row_count(&self, section: usize) -> Result<usize> {
        self.store.with_current(|grid| grid.row_count(section))
    }

    /// The custom header view of `section`.
    pub fn header_view(&self, section: usize) -> Result<Option<V>> {
        self.with_section(section, |items| self.sections.header_view(items))
    }

    /// The custom footer view of `section`.
    pub fn footer_view(&self, section: usize) -> Result<Option<V>> {
        self.with_section(section, |items| self.sections.footer_view(items))
    }

    /// The header title of `section`.
    pub fn header_title(&self, section: usize) -> Result<Option<String>> {
        self.with_section(section, |items| self.sections.header_title(items))
    }

    /// The footer title of `section`.
    pub fn footer_title(&self, section: usize) -> Result<Option<String>> {
        self.with_section(section, |items| self.sections.footer_title(items))
    }

    /// The header of `section`: its view if the provider has one, else its title.
    pub fn header_content(&self, section: usize) -> Result<Option<SupplementaryContent<V>>> {
        self.with_section(section, |items| {
            self.sections
                .header_view(items)
                .map(SupplementaryContent::View)
                .or_else(|| {
                    self.sections
                        .header_title(items)
                        .map(SupplementaryContent::Title)
                })
        })
    }

    /// The footer of `section`: its view if the provider has one, else its title.
    pub fn footer_content(&self, section: usize) -> Result<Option<SupplementaryContent<V>>> {
        self.with_section(section, |items| {
            self.sections
                .footer_view(items)
                .map(SupplementaryContent::View)
                .or_else(|| {
                    self.sections
                        .footer_title(items)
                        .map(SupplementaryContent::Title)
                })
        })
    }

    /// The height of the header view of `section`, measured by the widget.
    ///
    /// Sections without a header view have height 0.
    pub fn header_height<W>(&self, table: &W, section: usize) -> Result<f32>
    where
        W: TableWidget<View = V>,
    {
        Ok(self
            .header_view(section)?
            .map_or(0.0, |view| table.view_height(&view)))
    }

    /// Runs `f` on the items of `section` of the current grid.
    ///
    /// The grid handle is taken first, so the provider runs without the
    /// store locked.
    fn with_section<R>(&self, section: usize, f: impl FnOnce(&[T]) -> R) -> Result<R> {
        let grid = self.store.current();
        let items = grid.rows(section)?;
        Ok(f(items))
    }
}
