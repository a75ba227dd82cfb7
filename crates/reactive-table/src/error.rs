//! Error types for grid lookups and bindings.

use reactive_table_core::ContextError;

/// Result type alias for grid lookups.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors returned by bounds-checked grid lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The section index is past the last section.
    #[error("section {section} out of range (grid has {section_count} sections)")]
    SectionOutOfRange {
        section: usize,
        section_count: usize,
    },

    /// The row index is past the last row of an existing section.
    #[error("row {row} out of range in section {section} ({row_count} rows)")]
    RowOutOfRange {
        section: usize,
        row: usize,
        row_count: usize,
    },
}

impl GridError {
    /// Create a section error.
    pub fn section_out_of_range(section: usize, section_count: usize) -> Self {
        Self::SectionOutOfRange {
            section,
            section_count,
        }
    }

    /// Create a row error.
    pub fn row_out_of_range(section: usize, row: usize, row_count: usize) -> Self {
        Self::RowOutOfRange {
            section,
            row,
            row_count,
        }
    }

    /// The section the failed lookup asked for.
    pub fn section(&self) -> usize {
        match self {
            Self::SectionOutOfRange { section, .. } | Self::RowOutOfRange { section, .. } => {
                *section
            }
        }
    }
}

/// Errors raised while feeding a binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The binding was torn down before the items could be committed.
    #[error("binding '{0}' has been disposed")]
    Disposed(String),

    /// The execution context that owns the widget is gone.
    #[error("execution context unavailable: {0}")]
    Context(#[from] ContextError),
}
