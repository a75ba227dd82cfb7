//! Reactive Table - reactive data binding for sectioned table widgets.
//!
//! A program publishes a stream of item sequences; a binding keeps a table
//! widget's sections, rows, headers, footers and cells in sync with the
//! latest sequence, and republishes the widget's display and selection
//! events as signals carrying domain items.
//!
//! The crate does not draw anything. A toolkit plugs in by implementing
//! [`TableWidget`](widget::TableWidget) for its list view.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use reactive_table::prelude::*;
//! use reactive_table::testing::{RecordingTable, TestCell};
//!
//! let context = MainContext::new();
//! let table = Arc::new(RecordingTable::new());
//! let source = Signal::<Vec<&'static str>>::new();
//!
//! let binding = TableBinder::new(
//!     &table,
//!     &context,
//!     ExtractorCellProvider::uniform("row", |reusable, item: &&str| {
//!         TestCell::fill(reusable, item)
//!     }),
//! )
//! .sections(
//!     GroupBy::new(|item: &&str| item.chars().next()),
//!     ExtractorSectionProvider::new().with_header_title(|items: &[&str]| {
//!         Some(format!("{} items", items.len()))
//!     }),
//! )
//! .bind(&source);
//!
//! let selected = Arc::new(Mutex::new(None));
//! let selected_clone = selected.clone();
//! binding.did_select().connect(move |item| *selected_clone.lock() = Some(*item));
//!
//! source.emit(vec!["x1", "x2", "y1"]);
//! context.process_pending();
//!
//! assert_eq!(table.row_counts(), vec![2, 1]);
//! assert_eq!(table.header_title(1), Some("1 items".to_string()));
//!
//! table.select(IndexPath::new(0, 1));
//! assert_eq!(*selected.lock(), Some("x2"));
//! ```

pub mod binding;
pub mod config;
mod error;
pub mod model;
pub mod prelude;
pub mod testing;
pub mod widget;

pub use binding::{TableBinder, TableBinding, UpdateCallback, full_reload};
pub use config::BindingConfig;
pub use error::{BindingError, GridError, Result};
pub use widget::{TableDelegate, TableWidget};
