//! Prelude module for Reactive Table.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use reactive_table::prelude::*;
//! ```
//!
//! This provides access to:
//! - Execution context and signals (`MainContext`, `Signal`)
//! - Binding setup (`TableBinder`, `TableBinding`, `BindingConfig`)
//! - Item strategies (`CellProvider`, `SectionProvider`, `Arranger`)
//! - Grid types (`Grid`, `IndexPath`)
//! - The widget boundary (`TableWidget`, `TableDelegate`)

// ============================================================================
// Core primitives
// ============================================================================

pub use reactive_table_core::{ConnectionId, ContextHandle, MainContext, Property, Signal};

// ============================================================================
// Binding
// ============================================================================

pub use crate::binding::{TableBinder, TableBinding};
pub use crate::config::BindingConfig;
pub use crate::error::{BindingError, GridError};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    Arranger, CellProvider, Chunked, ExtractorCellProvider, ExtractorSectionProvider, Grid,
    GroupBy, IndexPath, SectionProvider, SingleSection, SupplementaryContent,
};

// ============================================================================
// Widget boundary
// ============================================================================

pub use crate::widget::{TableDelegate, TableWidget};
