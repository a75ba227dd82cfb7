//! Binding an item source to a table widget.
//!
//! [`TableBinder`] wires everything together:
//!
//! ```text
//!  item source ──> Arranger ──> GridStore ──> LayoutAdapter  ─┐
//!  (any thread)    (context thread)      └──> SectionAdapter ─┼─> TableManager ──> widget
//!                                        └──> EventRouter ────┘        │
//!                                                  ^                   │
//!                                                  └── widget events ──┘
//! ```
//!
//! Items may be emitted from any thread. Each emission is posted to the
//! [`MainContext`] that owns the widget and is arranged and committed there,
//! in emission order. The widget only ever sees grid changes on its own
//! thread.
//!
//! # Lifetime
//!
//! The binding lives as long as the widget: it is owned by the slot
//! connected to the widget's [`destroyed`](TableWidget::destroyed) signal.
//! When that signal fires, or [`TableBinding::dispose`] is called, the
//! binding disconnects from its source, clears the widget's delegate and
//! disconnects its output signals. Dropping a [`TableBinding`] handle does
//! not tear the binding down.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reactive_table::prelude::*;
//! use reactive_table::testing::{RecordingTable, TestCell};
//!
//! let context = MainContext::new();
//! let table = Arc::new(RecordingTable::new());
//! let source = Signal::<Vec<String>>::new();
//!
//! let binding = TableBinder::new(
//!     &table,
//!     &context,
//!     ExtractorCellProvider::uniform("text", |reusable, item: &String| {
//!         TestCell::fill(reusable, item)
//!     }),
//! )
//! .bind(&source);
//!
//! source.emit(vec!["a".into(), "b".into()]);
//! context.process_pending();
//! assert_eq!(table.row_counts(), vec![2]);
//!
//! table.destroy();
//! assert!(binding.is_disposed());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures_util::{Stream, StreamExt};
use parking_lot::Mutex;
use reactive_table_core::logging::{span_names, targets};
use reactive_table_core::{
    ConnectionGuard, ConnectionId, ContextHandle, MainContext, PerfSpan, Signal,
};

use crate::config::BindingConfig;
use crate::error::BindingError;
use crate::model::{
    Arranger, CellProvider, EventRouter, Grid, GridChange, GridStore, LayoutAdapter,
    SectionAdapter, SectionProvider, SingleSection, TableEvents, TableManager,
};
use crate::widget::{TableDelegate, TableWidget};

/// Type alias for the callback applying a committed grid to the widget.
///
/// Called with the widget, the previous grid and the new grid.
pub type UpdateCallback<W, T> = Arc<dyn Fn(&W, &Grid<T>, &Grid<T>) + Send + Sync>;

/// The default update: reload everything.
pub fn full_reload<W: TableWidget, T>(table: &W, _previous: &Grid<T>, _next: &Grid<T>) {
    table.reload_data();
}

/// Builder for a [`TableBinding`].
///
/// Only the widget, its context and a cell provider are required. Without
/// [`sections`](Self::sections) the table is flat: every item goes into one
/// section.
pub struct TableBinder<W: TableWidget, T> {
    widget: Arc<W>,
    context: ContextHandle,
    cells: Arc<dyn CellProvider<T, W::Cell>>,
    sections: Option<SectionSetup<T, W::View>>,
    update: Option<UpdateCallback<W, T>>,
    config: BindingConfig,
}

impl<W, T> TableBinder<W, T>
where
    W: TableWidget,
    T: Clone + Send + Sync + 'static,
{
    /// Create a builder for `widget`, owned by `context`.
    pub fn new<P>(widget: &Arc<W>, context: &MainContext, cells: P) -> Self
    where
        P: CellProvider<T, W::Cell> + 'static,
    {
        Self {
            widget: Arc::clone(widget),
            context: context.handle(),
            cells: Arc::new(cells),
            sections: None,
            update: None,
            config: BindingConfig::default(),
        }
    }

    /// Make the table sectioned.
    ///
    /// `arranger` partitions every emission into sections and `sections`
    /// supplies their headers and footers. The widget sees exactly the
    /// sections the arranger produced.
    pub fn sections<A, S>(mut self, arranger: A, sections: S) -> Self
    where
        A: Arranger<T> + 'static,
        S: SectionProvider<T, W::View> + 'static,
    {
        self.sections = Some(SectionSetup {
            arranger: Arc::new(arranger),
            provider: Arc::new(sections),
        });
        self
    }

    /// Set the callback applying later grids to the widget.
    ///
    /// Defaults to [`full_reload`].
    pub fn update<F>(mut self, update: F) -> Self
    where
        F: Fn(&W, &Grid<T>, &Grid<T>) + Send + Sync + 'static,
    {
        self.update = Some(Arc::new(update));
        self
    }

    /// Set the binding configuration.
    pub fn config(mut self, config: BindingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the binding's name used in logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Attach to the widget without a source.
    ///
    /// Registers the delegate, reloads the widget against the empty grid
    /// and ties the binding's lifetime to the widget. Items can then be
    /// pushed with [`TableBinding::submit`] or [`TableBinding::drive`].
    ///
    /// Must be called on the context's owning thread.
    pub fn attach(self) -> TableBinding<W, T> {
        self.context.affinity().debug_assert_same_thread();

        let store = Arc::new(GridStore::new());
        let events = TableEvents::new();
        let router = EventRouter::new(Arc::clone(&store), events.clone())
            .with_log_dropped(self.config.log_dropped_events);
        let mut manager = TableManager::new(LayoutAdapter::new(Arc::clone(&store), self.cells))
            .with_actions(router)
            .with_deselect_on_select(self.config.deselect_on_select);
        let arranger: Arc<dyn Arranger<T>> = match self.sections {
            Some(SectionSetup { arranger, provider }) => {
                manager = manager.with_sections(SectionAdapter::new(Arc::clone(&store), provider));
                arranger
            }
            None => Arc::new(SingleSection),
        };
        let manager = Arc::new(manager);

        let inner = Arc::new(BindingInner {
            widget: Arc::downgrade(&self.widget),
            context: self.context,
            store,
            arranger,
            manager: Arc::clone(&manager),
            events,
            update: self.update,
            config: self.config,
            disposed: AtomicBool::new(false),
            commits: AtomicU64::new(0),
            connections: Mutex::new(Connections::default()),
        });

        let delegate: Arc<dyn TableDelegate<W>> = manager;
        self.widget.set_delegate(Some(delegate));
        self.widget.reload_data();

        // The widget's destroyed signal owns the binding from here on.
        let holder = Arc::clone(&inner);
        let guard = self.widget.destroyed().connect_scoped(move |_| {
            holder.teardown("widget destroyed");
        });
        inner.connections.lock().destroyed = Some(guard);

        tracing::debug!(
            target: targets::BINDING,
            binding = %inner.config.name,
            "binding attached"
        );
        TableBinding { inner }
    }

    /// Attach to the widget and follow `source`.
    ///
    /// Every emission of `source` is arranged and committed on the context
    /// thread, in emission order.
    pub fn bind(self, source: &Signal<Vec<T>>) -> TableBinding<W, T> {
        let binding = self.attach();
        binding.inner.connect_source(source);
        binding
    }
}

impl<W: TableWidget, T> fmt::Debug for TableBinder<W, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBinder")
            .field("config", &self.config)
            .field("sectioned", &self.sections.is_some())
            .field("custom_update", &self.update.is_some())
            .finish_non_exhaustive()
    }
}

/// The arranger and section provider of a sectioned table.
struct SectionSetup<T, V> {
    arranger: Arc<dyn Arranger<T>>,
    provider: Arc<dyn SectionProvider<T, V>>,
}

/// Connections owned by a binding, released at teardown.
struct Connections<T> {
    source: Option<(Signal<Vec<T>>, ConnectionId)>,
    destroyed: Option<ConnectionGuard<()>>,
}

impl<T> Default for Connections<T> {
    fn default() -> Self {
        Self {
            source: None,
            destroyed: None,
        }
    }
}

struct BindingInner<W: TableWidget, T> {
    widget: Weak<W>,
    context: ContextHandle,
    store: Arc<GridStore<T>>,
    arranger: Arc<dyn Arranger<T>>,
    manager: Arc<TableManager<W, T>>,
    events: TableEvents<T, W::Cell>,
    update: Option<UpdateCallback<W, T>>,
    config: BindingConfig,
    disposed: AtomicBool,
    commits: AtomicU64,
    connections: Mutex<Connections<T>>,
}

impl<W, T> BindingInner<W, T>
where
    W: TableWidget,
    T: Clone + Send + Sync + 'static,
{
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn connect_source(self: &Arc<Self>, source: &Signal<Vec<T>>) {
        let weak = Arc::downgrade(self);
        let id = source.connect_queued_owned(&self.context, move |items: Vec<T>| {
            if let Some(inner) = weak.upgrade() {
                inner.commit(items);
            }
        });
        self.connections.lock().source = Some((source.clone(), id));
    }

    fn submit(self: &Arc<Self>, items: Vec<T>) -> Result<(), BindingError> {
        if self.is_disposed() {
            return Err(BindingError::Disposed(self.config.name.clone()));
        }
        let weak = Arc::downgrade(self);
        self.context.post(move || {
            if let Some(inner) = weak.upgrade() {
                inner.commit(items);
            }
        })?;
        Ok(())
    }

    /// Arranges `items` and applies the result. Runs on the context thread.
    fn commit(&self, items: Vec<T>) {
        if self.is_disposed() {
            tracing::trace!(
                target: targets::BINDING,
                binding = %self.config.name,
                "discarding items queued before teardown"
            );
            return;
        }
        let Some(widget) = self.widget.upgrade() else {
            return;
        };

        let _span = PerfSpan::new(span_names::COMMIT);
        let previous = self.store.replace(self.arranger.arrange(items));
        let next = self.store.current();
        let commit = self.commits.fetch_add(1, Ordering::AcqRel) + 1;

        if commit == 1 && self.config.reload_on_first_commit {
            widget.reload_data();
        } else {
            match &self.update {
                Some(update) => update(&*widget, &*previous, &*next),
                None => full_reload(&*widget, &*previous, &*next),
            }
        }

        tracing::debug!(
            target: targets::BINDING,
            binding = %self.config.name,
            commit,
            sections = next.section_count(),
            rows = next.total_rows(),
            "grid committed"
        );
    }

    /// Releases everything the binding holds. Returns `false` if it was
    /// already torn down.
    fn teardown(&self, reason: &'static str) -> bool {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.context.affinity().debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::TEARDOWN);

        let connections = std::mem::take(&mut *self.connections.lock());
        if let Some((source, id)) = &connections.source {
            source.disconnect(*id);
        }
        if let Some(widget) = self.widget.upgrade() {
            widget.set_delegate(None);
        }
        self.events.disconnect_all();
        drop(connections);

        tracing::debug!(
            target: targets::BINDING,
            binding = %self.config.name,
            reason,
            "binding torn down"
        );
        true
    }
}

impl<W: TableWidget, T> Drop for BindingInner<W, T> {
    fn drop(&mut self) {
        // Reached without teardown when the widget is dropped without
        // emitting `destroyed`.
        if let Some((source, id)) = self.connections.get_mut().source.take() {
            source.disconnect(id);
        }
    }
}

/// A live binding between an item source and a widget.
///
/// Handles are cheap to clone. All clones refer to the same binding.
pub struct TableBinding<W: TableWidget, T> {
    inner: Arc<BindingInner<W, T>>,
}

impl<W, T> TableBinding<W, T>
where
    W: TableWidget,
    T: Clone + Send + Sync + 'static,
{
    /// The binding's name.
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    /// The binding's configuration.
    pub fn config(&self) -> &BindingConfig {
        &self.inner.config
    }

    /// All output signals.
    pub fn events(&self) -> &TableEvents<T, W::Cell> {
        &self.inner.events
    }

    /// Emitted with `(cell, item)` when a cell is about to be displayed.
    pub fn will_display(&self) -> &Signal<(W::Cell, T)> {
        &self.inner.events.will_display
    }

    /// Emitted with `(cell, item)` when a cell went off screen.
    pub fn did_end_display(&self) -> &Signal<(W::Cell, T)> {
        &self.inner.events.did_end_display
    }

    /// Emitted with the item when a row is selected.
    pub fn did_select(&self) -> &Signal<T> {
        &self.inner.events.did_select
    }

    /// The current grid.
    pub fn grid(&self) -> Arc<Grid<T>> {
        self.inner.store.current()
    }

    /// Number of grids committed so far.
    pub fn generation(&self) -> u64 {
        self.inner.store.generation()
    }

    /// Emitted on the context thread after every commit with
    /// `(previous, next)`.
    pub fn grid_changed(&self) -> &Signal<GridChange<T>> {
        self.inner.store.grid_changed()
    }

    /// The delegate registered on the widget.
    pub fn delegate(&self) -> Arc<dyn TableDelegate<W>> {
        self.inner.manager.clone()
    }

    /// Queue `items` for arrangement and commit on the context thread.
    ///
    /// Safe to call from any thread.
    pub fn submit(&self, items: Vec<T>) -> Result<(), BindingError> {
        self.inner.submit(items)
    }

    /// Feed every item of `stream` into the binding.
    ///
    /// Each item is queued like a [`submit`](Self::submit). The stream
    /// ending leaves the binding in place, still showing the last grid.
    /// Fails as soon as the binding is disposed or its context is gone.
    pub async fn drive<S>(&self, stream: S) -> Result<(), BindingError>
    where
        S: Stream<Item = Vec<T>>,
    {
        futures_util::pin_mut!(stream);
        while let Some(items) = stream.next().await {
            self.submit(items)?;
        }
        tracing::debug!(
            target: targets::BINDING,
            binding = %self.name(),
            "item stream completed"
        );
        Ok(())
    }

    /// Tear the binding down now. Returns `false` if it was already torn down.
    ///
    /// Must be called on the context's owning thread.
    pub fn dispose(&self) -> bool {
        self.inner.teardown("disposed")
    }

    /// Returns `true` once the binding has been torn down.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

impl<W: TableWidget, T> Clone for TableBinding<W, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: TableWidget, T> fmt::Debug for TableBinding<W, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBinding")
            .field("name", &self.inner.config.name)
            .field("generation", &self.inner.store.generation())
            .field("disposed", &self.inner.disposed.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractorCellProvider, IndexPath};
    use crate::testing::{RecordingTable, TestCell};

    fn cells() -> ExtractorCellProvider<&'static str, TestCell> {
        ExtractorCellProvider::uniform("row", |reusable, item: &&str| {
            TestCell::fill(reusable, item)
        })
    }

    #[test]
    fn test_attach_registers_and_reloads_empty_grid() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());

        let binding = TableBinder::new(&table, &context, cells()).attach();

        assert!(table.has_delegate());
        assert_eq!(table.reload_count(), 1);
        assert_eq!(table.row_counts(), vec![0]);
        assert_eq!(binding.generation(), 0);
    }

    #[test]
    fn test_submit_commits_on_drain() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());
        let binding = TableBinder::new(&table, &context, cells()).attach();

        binding.submit(vec!["a", "b"]).unwrap();
        assert_eq!(binding.generation(), 0);

        context.process_pending();
        assert_eq!(binding.generation(), 1);
        assert_eq!(table.row_counts(), vec![2]);
        assert_eq!(table.cell_at(IndexPath::new(0, 1)).unwrap().text, "b");
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());
        let binding = TableBinder::new(&table, &context, cells()).attach();

        assert!(binding.dispose());
        assert!(!binding.dispose());
        assert_eq!(table.delegate_history(), vec![true, false]);
        assert_eq!(
            binding.submit(vec!["a"]),
            Err(BindingError::Disposed("table".into()))
        );
    }

    #[test]
    fn test_queued_commit_discarded_after_dispose() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());
        let binding = TableBinder::new(&table, &context, cells()).attach();

        binding.submit(vec!["a"]).unwrap();
        binding.dispose();
        context.process_pending();

        assert_eq!(binding.generation(), 0);
        assert_eq!(table.reload_count(), 1);
    }

    #[test]
    fn test_custom_update_after_first_commit() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());
        let updates = Arc::new(Mutex::new(Vec::new()));
        let updates_clone = updates.clone();

        let binding = TableBinder::new(&table, &context, cells())
            .update(move |_table: &RecordingTable, previous, next| {
                updates_clone
                    .lock()
                    .push((previous.total_rows(), next.total_rows()));
            })
            .attach();

        binding.submit(vec!["a", "b", "c"]).unwrap();
        binding.submit(vec!["a"]).unwrap();
        context.process_pending();

        // attach + first commit
        assert_eq!(table.reload_count(), 2);
        assert_eq!(*updates.lock(), vec![(3, 1)]);
    }

    #[test]
    fn test_debug_reports_name_and_generation() {
        let context = MainContext::new();
        let table = Arc::new(RecordingTable::new());
        let binding = TableBinder::new(&table, &context, cells())
            .name("contacts")
            .attach();

        binding.submit(vec!["a"]).unwrap();
        context.process_pending();

        let debug = format!("{binding:?}");
        assert!(debug.contains("\"contacts\""));
        assert!(debug.contains("generation: 1"));
        assert!(debug.contains("disposed: false"));
    }

    #[test]
    fn test_full_reload_is_idempotent() {
        let table = RecordingTable::new();
        let grid = Grid::single_section(vec![1, 2]);
        full_reload(&table, &grid, &grid);
        let first = table.row_counts();
        full_reload(&table, &grid, &grid);
        assert_eq!(table.row_counts(), first);
        assert_eq!(table.reload_count(), 2);
    }
}
