//! Per-item-type strategies consumed by the adapters.
//!
//! The binding never knows how to render an item. It asks a
//! [`CellProvider`] for a reuse identifier and for a populated cell, and a
//! [`SectionProvider`] for header and footer content. Both can be
//! implemented on a type, or built from closures with
//! [`ExtractorCellProvider`] and [`ExtractorSectionProvider`].

use std::sync::Arc;

use super::index::IndexPath;

/// Renders items into widget cells.
///
/// # Example
///
/// ```
/// use reactive_table::model::CellProvider;
///
/// struct Labels;
///
/// impl CellProvider<u32, String> for Labels {
///     fn identifier_for(&self, _item: &u32) -> String {
///         "label".into()
///     }
///
///     fn populate(&self, _reusable: Option<String>, item: &u32) -> String {
///         format!("#{item}")
///     }
/// }
///
/// assert_eq!(Labels.populate(None, &7), "#7");
/// ```
pub trait CellProvider<T, C>: Send + Sync {
    /// Returns the reuse identifier for `item`.
    ///
    /// Cells are only reused between items sharing an identifier.
    fn identifier_for(&self, item: &T) -> String;

    /// Returns a cell showing `item`.
    ///
    /// `reusable` is a cell the widget handed back for the item's identifier,
    /// if it had one.
    fn populate(&self, reusable: Option<C>, item: &T) -> C;
}

/// Type alias for a reuse identifier function.
pub type IdentifierExtractor<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Type alias for a cell population function.
pub type CellExtractor<T, C> = Arc<dyn Fn(Option<C>, &T) -> C + Send + Sync>;

/// A [`CellProvider`] built from closures.
///
/// # Example
///
/// ```
/// use reactive_table::model::{CellProvider, ExtractorCellProvider};
///
/// let cells = ExtractorCellProvider::new(
///     |_item: &String| "text".to_string(),
///     |_reusable: Option<String>, item: &String| item.to_uppercase(),
/// );
///
/// assert_eq!(cells.identifier_for(&"a".to_string()), "text");
/// assert_eq!(cells.populate(None, &"a".to_string()), "A");
/// ```
pub struct ExtractorCellProvider<T, C> {
    identifier: IdentifierExtractor<T>,
    populate: CellExtractor<T, C>,
}

impl<T, C> ExtractorCellProvider<T, C> {
    /// Creates a provider from an identifier function and a population function.
    pub fn new<I, P>(identifier: I, populate: P) -> Self
    where
        I: Fn(&T) -> String + Send + Sync + 'static,
        P: Fn(Option<C>, &T) -> C + Send + Sync + 'static,
    {
        Self {
            identifier: Arc::new(identifier),
            populate: Arc::new(populate),
        }
    }

    /// Creates a provider that uses one identifier for every item.
    pub fn uniform<P>(identifier: impl Into<String>, populate: P) -> Self
    where
        P: Fn(Option<C>, &T) -> C + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        Self::new(move |_| identifier.clone(), populate)
    }
}

impl<T, C> CellProvider<T, C> for ExtractorCellProvider<T, C> {
    fn identifier_for(&self, item: &T) -> String {
        (self.identifier)(item)
    }

    fn populate(&self, reusable: Option<C>, item: &T) -> C {
        (self.populate)(reusable, item)
    }
}

/// Supplies header and footer content for sections.
///
/// Every method receives only the items of the section being asked about.
/// All methods default to "no content".
pub trait SectionProvider<T, V>: Send + Sync {
    /// Returns a custom header view for a section.
    fn header_view(&self, _items: &[T]) -> Option<V> {
        None
    }

    /// Returns a custom footer view for a section.
    fn footer_view(&self, _items: &[T]) -> Option<V> {
        None
    }

    /// Returns a header title for a section.
    fn header_title(&self, _items: &[T]) -> Option<String> {
        None
    }

    /// Returns a footer title for a section.
    fn footer_title(&self, _items: &[T]) -> Option<String> {
        None
    }
}

/// Type alias for a supplementary view function.
pub type ViewExtractor<T, V> = Arc<dyn Fn(&[T]) -> Option<V> + Send + Sync>;

/// Type alias for a supplementary title function.
pub type TitleExtractor<T> = Arc<dyn Fn(&[T]) -> Option<String> + Send + Sync>;

/// A [`SectionProvider`] built from closures.
///
/// # Example
///
/// ```
/// use reactive_table::model::{ExtractorSectionProvider, SectionProvider};
///
/// let sections = ExtractorSectionProvider::<&str, ()>::new()
///     .with_header_title(|items: &[&str]| items.first().map(|s| s[..1].to_uppercase()));
///
/// assert_eq!(sections.header_title(&["y1"]), Some("Y".to_string()));
/// assert_eq!(sections.footer_title(&["y1"]), None);
/// ```
pub struct ExtractorSectionProvider<T, V> {
    header_view: Option<ViewExtractor<T, V>>,
    footer_view: Option<ViewExtractor<T, V>>,
    header_title: Option<TitleExtractor<T>>,
    footer_title: Option<TitleExtractor<T>>,
}

impl<T, V> ExtractorSectionProvider<T, V> {
    /// Creates a provider with no content.
    pub fn new() -> Self {
        Self {
            header_view: None,
            footer_view: None,
            header_title: None,
            footer_title: None,
        }
    }

    /// Sets the header view function.
    pub fn with_header_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) -> Option<V> + Send + Sync + 'static,
    {
        self.header_view = Some(Arc::new(f));
        self
    }

    /// Sets the footer view function.
    pub fn with_footer_view<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) -> Option<V> + Send + Sync + 'static,
    {
        self.footer_view = Some(Arc::new(f));
        self
    }

    /// Sets the header title function.
    pub fn with_header_title<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) -> Option<String> + Send + Sync + 'static,
    {
        self.header_title = Some(Arc::new(f));
        self
    }

    /// Sets the footer title function.
    pub fn with_footer_title<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) -> Option<String> + Send + Sync + 'static,
    {
        self.footer_title = Some(Arc::new(f));
        self
    }
}

impl<T, V> Default for ExtractorSectionProvider<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> SectionProvider<T, V> for ExtractorSectionProvider<T, V> {
    fn header_view(&self, items: &[T]) -> Option<V> {
        self.header_view.as_ref().and_then(|f| f(items))
    }

    fn footer_view(&self, items: &[T]) -> Option<V> {
        self.footer_view.as_ref().and_then(|f| f(items))
    }

    fn header_title(&self, items: &[T]) -> Option<String> {
        self.header_title.as_ref().and_then(|f| f(items))
    }

    fn footer_title(&self, items: &[T]) -> Option<String> {
        self.footer_title.as_ref().and_then(|f| f(items))
    }
}

/// Header or footer content for a section.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplementaryContent<V> {
    /// A custom view.
    View(V),
    /// A plain title.
    Title(String),
}

impl<V> SupplementaryContent<V> {
    /// Returns the view, if this is view content.
    pub fn as_view(&self) -> Option<&V> {
        match self {
            Self::View(view) => Some(view),
            Self::Title(_) => None,
        }
    }

    /// Returns the title, if this is title content.
    pub fn as_title(&self) -> Option<&str> {
        match self {
            Self::View(_) => None,
            Self::Title(title) => Some(title),
        }
    }
}

/// The answer to a cell request.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent<C> {
    /// The path resolved and the provider rendered a cell.
    Rendered {
        /// The reuse identifier the provider chose.
        identifier: String,
        /// The populated cell.
        cell: C,
    },
    /// The path is out of bounds for the current grid.
    ///
    /// The widget is out of date; it should reload and show a placeholder.
    Stale(IndexPath),
}

impl<C> CellContent<C> {
    /// Returns `true` for [`CellContent::Stale`].
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }

    /// Returns the rendered cell, if any.
    pub fn into_cell(self) -> Option<C> {
        match self {
            Self::Rendered { cell, .. } => Some(cell),
            Self::Stale(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl SectionProvider<u8, ()> for Plain {}

    #[test]
    fn test_section_provider_defaults() {
        assert_eq!(Plain.header_view(&[1]), None);
        assert_eq!(Plain.footer_title(&[1]), None);
    }

    #[test]
    fn test_uniform_cell_provider_reuses() {
        let populate = |reusable: Option<Vec<u8>>, item: &u8| {
            let mut cell = reusable.unwrap_or_default();
            cell.clear();
            cell.push(*item);
            cell
        };
        let cells = ExtractorCellProvider::uniform("row", populate);

        assert_eq!(cells.identifier_for(&1), "row");
        assert_eq!(cells.populate(Some(vec![9, 9]), &4), vec![4]);
    }

    #[test]
    fn test_extractor_section_provider_sees_section_items() {
        let sections = ExtractorSectionProvider::new()
            .with_header_view(|items: &[i32]| Some(items.len()))
            .with_footer_title(|items: &[i32]| Some(format!("sum {}", items.iter().sum::<i32>())));

        assert_eq!(sections.header_view(&[1, 2, 3]), Some(3));
        assert_eq!(sections.footer_title(&[1, 2, 3]), Some("sum 6".into()));
        assert_eq!(sections.header_title(&[1]), None);
    }

    #[test]
    fn test_supplementary_content_accessors() {
        let view: SupplementaryContent<u8> = SupplementaryContent::View(3);
        let title: SupplementaryContent<u8> = SupplementaryContent::Title("T".into());
        assert_eq!(view.as_view(), Some(&3));
        assert_eq!(title.as_title(), Some("T"));
        assert_eq!(title.as_view(), None);
    }

    #[test]
    fn test_cell_content() {
        let stale: CellContent<u8> = CellContent::Stale(IndexPath::new(0, 4));
        assert!(stale.is_stale());
        assert_eq!(stale.into_cell(), None);

        let rendered = CellContent::Rendered {
            identifier: "id".into(),
            cell: 5u8,
        };
        assert_eq!(rendered.into_cell(), Some(5));
    }
}
