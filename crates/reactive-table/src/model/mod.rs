//! The list-state model behind a table binding.
//!
//! This module holds everything between the item source and the widget:
//!
//! - [`Grid`]: an immutable section × row view over items
//! - [`Arranger`]: partitions a flat item sequence into a grid
//! - [`GridStore`]: the single slot holding the current grid
//! - [`LayoutAdapter`] and [`SectionAdapter`]: answer the widget's count,
//!   cell and header/footer questions against the current grid
//! - [`EventRouter`]: resolves widget events back into items
//! - [`TableManager`]: the delegate composing the three adapters
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reactive_table::model::{Arranger, GridStore, GroupBy, IndexPath};
//!
//! let store = GridStore::new();
//! let by_prefix = GroupBy::new(|item: &&str| item.chars().next());
//! store.replace(by_prefix.arrange(vec!["x1", "x2", "y1"]));
//!
//! let grid = store.current();
//! assert_eq!(grid.section_count(), 2);
//! assert_eq!(grid.item_at(IndexPath::new(1, 0)), Ok(&"y1"));
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │  Arranger   │────>│  GridStore  │<────│  LayoutAdapter   │
//! │             │     │             │<────│  SectionAdapter  │
//! └─────────────┘     └─────────────┘<────│  EventRouter     │
//!                                         └──────────────────┘
//!                                                  │
//!                                           ┌──────────────┐
//!                                           │ TableManager │
//!                                           └──────────────┘
//! ```

mod arranger;
mod grid;
mod index;
mod layout;
mod manager;
mod router;
mod section;
mod store;
mod traits;

pub use arranger::{Arranger, Chunked, GroupBy, SingleSection};
pub use grid::Grid;
pub use index::IndexPath;
pub use layout::LayoutAdapter;
pub use manager::TableManager;
pub use router::{EventKind, EventRouter, LifecycleEvent, RouteOutcome, TableEvents};
pub use section::SectionAdapter;
pub use store::{GridChange, GridStore};
pub use traits::{
    CellContent, CellExtractor, CellProvider, ExtractorCellProvider, ExtractorSectionProvider,
    IdentifierExtractor, SectionProvider, SupplementaryContent, TitleExtractor, ViewExtractor,
};
