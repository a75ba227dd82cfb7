//! Binding configuration.

/// Configuration for a [`TableBinding`](crate::TableBinding).
///
/// # Example
///
/// ```
/// use reactive_table::BindingConfig;
///
/// let config = BindingConfig::default()
///     .with_name("contacts")
///     .with_deselect_on_select(false);
///
/// assert_eq!(config.name, "contacts");
/// assert!(config.reload_on_first_commit);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// Label used in log events and spans.
    pub name: String,
    /// Whether the first committed grid always triggers a full reload,
    /// bypassing the update callback.
    pub reload_on_first_commit: bool,
    /// Whether a selected row is deselected before the selection is routed.
    pub deselect_on_select: bool,
    /// Whether events for out-of-bounds paths are logged when dropped.
    pub log_dropped_events: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            name: "table".to_string(),
            reload_on_first_commit: true,
            deselect_on_select: true,
            log_dropped_events: true,
        }
    }
}

impl BindingConfig {
    /// Sets the binding's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether the first commit always reloads.
    pub fn with_reload_on_first_commit(mut self, reload: bool) -> Self {
        self.reload_on_first_commit = reload;
        self
    }

    /// Sets whether selected rows are deselected.
    pub fn with_deselect_on_select(mut self, deselect: bool) -> Self {
        self.deselect_on_select = deselect;
        self
    }

    /// Sets whether dropped events are logged.
    pub fn with_log_dropped_events(mut self, log: bool) -> Self {
        self.log_dropped_events = log;
        self
    }
}
