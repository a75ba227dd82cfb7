//! Resolution of widget events into domain items.
//!
//! The widget reports display and selection events by path. The router looks
//! each path up in the grid that is current at that moment and republishes
//! the item on the matching output signal. A path that no longer exists is
//! dropped: nothing is emitted and nothing is retried.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reactive_table_core::logging::{span_names, targets};
use reactive_table_core::{PerfSpan, Signal};

use super::index::IndexPath;
use super::store::GridStore;

/// A discrete event reported by the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent<C> {
    /// `cell` is about to be shown at `path`.
    WillDisplay { cell: C, path: IndexPath },
    /// `cell` at `path` went off screen.
    DidEndDisplay { cell: C, path: IndexPath },
    /// The row at `path` was selected.
    DidSelect { path: IndexPath },
}

impl<C> LifecycleEvent<C> {
    /// The path the event refers to.
    pub fn path(&self) -> IndexPath {
        match self {
            Self::WillDisplay { path, .. }
            | Self::DidEndDisplay { path, .. }
            | Self::DidSelect { path } => *path,
        }
    }

    /// The kind of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WillDisplay { .. } => EventKind::WillDisplay,
            Self::DidEndDisplay { .. } => EventKind::DidEndDisplay,
            Self::DidSelect { .. } => EventKind::DidSelect,
        }
    }
}

/// The kind of a [`LifecycleEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WillDisplay,
    DidEndDisplay,
    DidSelect,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WillDisplay => "will_display",
            Self::DidEndDisplay => "did_end_display",
            Self::DidSelect => "did_select",
        };
        f.write_str(name)
    }
}

/// What happened to a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The path resolved and the item was emitted.
    Resolved,
    /// The path was out of bounds; nothing was emitted.
    Dropped,
}

/// The output signals of a binding.
///
/// Display events carry the widget's cell together with the item; selection
/// carries the item alone.
pub struct TableEvents<T, C> {
    /// Emitted when a cell showing an item is about to be displayed.
    pub will_display: Signal<(C, T)>,
    /// Emitted when a cell showing an item went off screen.
    pub did_end_display: Signal<(C, T)>,
    /// Emitted when an item is selected.
    pub did_select: Signal<T>,
}

impl<T, C> TableEvents<T, C>
where
    T: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    /// Creates a set of unconnected output signals.
    pub fn new() -> Self {
        Self {
            will_display: Signal::new(),
            did_end_display: Signal::new(),
            did_select: Signal::new(),
        }
    }

    /// Disconnects every slot from every output signal.
    pub fn disconnect_all(&self) {
        self.will_display.disconnect_all();
        self.did_end_display.disconnect_all();
        self.did_select.disconnect_all();
    }
}

impl<T, C> Clone for TableEvents<T, C> {
    fn clone(&self) -> Self {
        Self {
            will_display: self.will_display.clone(),
            did_end_display: self.did_end_display.clone(),
            did_select: self.did_select.clone(),
        }
    }
}

impl<T, C> Default for TableEvents<T, C>
where
    T: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves widget events against the current grid.
pub struct EventRouter<T, C> {
    store: Arc<GridStore<T>>,
    events: TableEvents<T, C>,
    log_dropped: bool,
    resolved: AtomicU64,
    dropped: AtomicU64,
}

impl<T, C> EventRouter<T, C>
where
    T: Clone + Send + Sync + 'static,
    C: Clone + Send + 'static,
{
    /// Creates a router resolving against `store` and emitting on `events`.
    pub fn new(store: Arc<GridStore<T>>, events: TableEvents<T, C>) -> Self {
        Self {
            store,
            events,
            log_dropped: true,
            resolved: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Sets whether dropped events are logged.
    pub fn with_log_dropped(mut self, log_dropped: bool) -> Self {
        self.log_dropped = log_dropped;
        self
    }

    /// Resolves `event` and emits the item on the matching output signal.
    pub fn route(&self, event: LifecycleEvent<C>) -> RouteOutcome {
        let _span = PerfSpan::new(span_names::ROUTE);

        let path = event.path();
        let item = self.store.with_current(|grid| grid.get(path).cloned());
        let Some(item) = item else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            if self.log_dropped {
                tracing::trace!(
                    target: targets::ROUTER,
                    kind = %event.kind(),
                    %path,
                    "dropping event for out-of-bounds path"
                );
            }
            return RouteOutcome::Dropped;
        };

        self.resolved.fetch_add(1, Ordering::Relaxed);
        match event {
            LifecycleEvent::WillDisplay { cell, .. } => self.events.will_display.emit((cell, item)),
            LifecycleEvent::DidEndDisplay { cell, .. } => {
                self.events.did_end_display.emit((cell, item))
            }
            LifecycleEvent::DidSelect { .. } => self.events.did_select.emit(item),
        }
        RouteOutcome::Resolved
    }

    /// The output signals.
    pub fn events(&self) -> &TableEvents<T, C> {
        &self.events
    }

    /// Number of events resolved so far.
    pub fn resolved_count(&self) -> u64 {
        self.resolved.load(Ordering::Relaxed)
    }

    /// Number of events dropped so far.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
