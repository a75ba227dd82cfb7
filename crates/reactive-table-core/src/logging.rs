//! Logging and debugging facilities for Reactive Table.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for sectioned data
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Reactive Table uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("reactive_table=debug")
//!         .init();
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`SectionTreeDebug`] to render sectioned data as a tree:
//!
//! ```
//! use reactive_table_core::logging::{SectionTreeDebug, TreeFormatOptions, TreeStyle};
//!
//! let sections = vec![vec!["x1", "x2"], vec!["y1"]];
//! let debug = SectionTreeDebug::with_options(TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..Default::default()
//! });
//! let output = debug.format_sections(sections);
//! assert!(output.contains("section 1 (1 row)"));
//! ```

use std::fmt::{Display, Write as FmtWrite};

/// Span names used throughout Reactive Table for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Grid commit span (arrangement applied to the store).
    pub const COMMIT: &str = "reactive_table::commit";
    /// Event routing span.
    pub const ROUTE: &str = "reactive_table::route";
    /// Binding teardown span.
    pub const TEARDOWN: &str = "reactive_table::teardown";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "reactive_table_core::signal";
    /// Execution context target.
    pub const CONTEXT: &str = "reactive_table_core::context";
    /// Binding lifecycle target.
    pub const BINDING: &str = "reactive_table::binding";
    /// Event routing target.
    pub const ROUTER: &str = "reactive_table::router";
    /// Layout and section adapters target.
    pub const LAYOUT: &str = "reactive_table::layout";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to prefix rows with their index.
    pub show_indices: bool,
    /// Maximum rows printed per section (None for unlimited).
    pub max_rows: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_indices: true,
            max_rows: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for minimal output: counts only, no rows.
    pub fn minimal() -> Self {
        Self {
            show_indices: false,
            max_rows: Some(0),
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing sectioned data.
#[derive(Debug, Clone, Default)]
pub struct SectionTreeDebug {
    options: TreeFormatOptions,
}

impl SectionTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format sections of displayable rows.
    pub fn format_sections<S, R, D>(&self, sections: S) -> String
    where
        S: IntoIterator<Item = R>,
        R: IntoIterator<Item = D>,
        D: Display,
    {
        let sections: Vec<Vec<D>> = sections
            .into_iter()
            .map(|rows| rows.into_iter().collect())
            .collect();
        let total: usize = sections.iter().map(Vec::len).sum();

        let mut output = String::new();
        let _ = writeln!(
            output,
            "Grid ({} {}, {} {}):",
            sections.len(),
            plural(sections.len(), "section", "sections"),
            total,
            plural(total, "row", "rows")
        );

        if self.options.style == TreeStyle::Compact {
            for (index, rows) in sections.iter().enumerate() {
                let _ = write!(output, "- section {index} [");
                for (row, item) in self.visible(rows).enumerate() {
                    if row > 0 {
                        output.push_str(", ");
                    }
                    let _ = write!(output, "{item}");
                }
                output.push_str("]\n");
            }
            return output;
        }

        let (tee, corner, pipe) = self.glyphs();
        for (index, rows) in sections.iter().enumerate() {
            let last_section = index + 1 == sections.len();
            let _ = writeln!(
                output,
                "{} section {index} ({} {})",
                if last_section { corner } else { tee },
                rows.len(),
                plural(rows.len(), "row", "rows")
            );

            let indent = if last_section { "    " } else { pipe };
            let shown: Vec<&D> = self.visible(rows).collect();
            let hidden = rows.len() - shown.len();
            for (row, item) in shown.iter().enumerate() {
                let last_row = row + 1 == shown.len() && hidden == 0;
                let _ = write!(output, "{indent}{} ", if last_row { corner } else { tee });
                if self.options.show_indices {
                    let _ = write!(output, "[{row}] ");
                }
                let _ = writeln!(output, "{item}");
            }
            if hidden > 0 && self.options.max_rows != Some(0) {
                let _ = writeln!(output, "{indent}{corner} ... {hidden} more");
            }
        }

        output
    }

    fn visible<'a, D>(&self, rows: &'a [D]) -> impl Iterator<Item = &'a D> {
        rows.iter()
            .take(self.options.max_rows.unwrap_or(usize::MAX))
    }

    fn glyphs(&self) -> (&'static str, &'static str, &'static str) {
        match self.options.style {
            TreeStyle::Ascii => ("+--", "`--", "|   "),
            _ => (
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
                "\u{2502}   ",
            ),
        }
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "reactive_table::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Trace event under the crate-wide `reactive_table` target.
#[macro_export]
macro_rules! table_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "reactive_table", $($arg)*)
    };
}
