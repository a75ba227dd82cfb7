//! Integration tests for bindings driven by a signal source.

use std::sync::Arc;

use parking_lot::Mutex;
use reactive_table::prelude::*;
use reactive_table::testing::{RecordingTable, TestCell};

type Binding = TableBinding<RecordingTable, &'static str>;

fn cells() -> ExtractorCellProvider<&'static str, TestCell> {
    ExtractorCellProvider::uniform("row", |reusable, item: &&str| {
        TestCell::fill(reusable, item)
    })
}

fn flat_binding(
    context: &MainContext,
    source: &Signal<Vec<&'static str>>,
) -> (Arc<RecordingTable>, Binding) {
    let table = Arc::new(RecordingTable::new());
    let binding = TableBinder::new(&table, context, cells()).bind(source);
    (table, binding)
}

fn record<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    signal.connect(move |value: &T| seen_clone.lock().push(value.clone()));
    seen
}

#[test]
fn shrinking_source_drops_stale_display_events() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    let displayed = record(binding.will_display());

    source.emit(vec!["a", "b", "c"]);
    context.process_pending();
    assert_eq!(table.row_counts(), vec![3]);

    source.emit(vec!["a", "b"]);
    context.process_pending();
    assert_eq!(table.row_counts(), vec![2]);

    table.will_display(TestCell::new("row", "c"), IndexPath::new(0, 2));
    assert!(displayed.lock().is_empty());

    table.display(IndexPath::new(0, 1));
    let displayed = displayed.lock();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].1, "b");
}

#[test]
fn grouped_sections_feed_headers() {
    let context = MainContext::new();
    let source = Signal::new();
    let table = Arc::new(RecordingTable::new());
    let header_inputs = Arc::new(Mutex::new(Vec::new()));
    let header_inputs_clone = header_inputs.clone();

    let _binding = TableBinder::new(&table, &context, cells())
        .sections(
            GroupBy::new(|item: &&str| item.chars().next()),
            ExtractorSectionProvider::new().with_header_title(move |items: &[&str]| {
                header_inputs_clone.lock().push(items.to_vec());
                items.first().map(|item| item[..1].to_uppercase())
            }),
        )
        .bind(&source);

    source.emit(vec!["x1", "x2", "y1"]);
    context.process_pending();

    let delegate = table.delegate().unwrap();
    assert_eq!(delegate.number_of_sections(&table), 2);
    assert_eq!(delegate.number_of_rows(&table, 1), 1);

    header_inputs.lock().clear();
    assert_eq!(table.header_title(1), Some("Y".to_string()));
    assert_eq!(*header_inputs.lock(), vec![vec!["y1"]]);
}

#[test]
fn sectioned_widget_reaches_every_committed_item() {
    let context = MainContext::new();
    let source = Signal::new();
    let table = Arc::new(RecordingTable::new());
    let binding = TableBinder::new(&table, &context, cells())
        .sections(
            GroupBy::new(|item: &&str| item.chars().next()),
            ExtractorSectionProvider::new(),
        )
        .bind(&source);

    source.emit(vec!["x1", "x2", "y1"]);
    context.process_pending();

    let grid = binding.grid();
    assert_eq!(grid.section_count(), 2);
    assert_eq!(table.row_counts(), vec![2, 1]);
    assert_eq!(table.row_counts().iter().sum::<usize>(), grid.total_rows());
    assert_eq!(table.cell_at(IndexPath::new(1, 0)).unwrap().text, "y1");
}

#[test]
fn flat_binding_keeps_every_item_in_one_section() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);

    source.emit(vec!["x1", "x2", "y1"]);
    context.process_pending();

    assert_eq!(binding.grid().section_count(), 1);
    assert_eq!(table.row_counts(), vec![3]);
    assert_eq!(table.cell_at(IndexPath::new(0, 2)).unwrap().text, "y1");
}

#[test]
fn sectioned_binding_drops_events_for_vanished_sections() {
    let context = MainContext::new();
    let source = Signal::new();
    let table = Arc::new(RecordingTable::new());
    let binding = TableBinder::new(&table, &context, cells())
        .sections(
            GroupBy::new(|item: &&str| item.chars().next()),
            ExtractorSectionProvider::new(),
        )
        .bind(&source);
    let displayed = record(binding.will_display());
    let selected = record(binding.did_select());

    source.emit(vec!["x1", "y1"]);
    context.process_pending();
    assert_eq!(table.row_counts(), vec![1, 1]);

    source.emit(vec!["x1", "x2"]);
    context.process_pending();
    assert_eq!(table.row_counts(), vec![2]);

    table.will_display(TestCell::new("row", "y1"), IndexPath::new(1, 0));
    table.select(IndexPath::new(1, 0));
    assert!(displayed.lock().is_empty());
    assert!(selected.lock().is_empty());

    table.select(IndexPath::new(0, 1));
    assert_eq!(*selected.lock(), vec!["x2"]);
}

#[test]
fn selection_resolves_item_and_deselects() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    let selected = record(binding.did_select());

    source.emit(vec!["a", "b", "c"]);
    context.process_pending();
    table.select(IndexPath::new(0, 1));

    assert_eq!(*selected.lock(), vec!["b"]);
    assert_eq!(table.deselected(), vec![IndexPath::new(0, 1)]);
}

#[test]
fn end_display_carries_cell_and_item() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    let ended = record(binding.did_end_display());

    source.emit(vec!["a", "b"]);
    context.process_pending();
    let cell = table.display(IndexPath::new(0, 0)).unwrap();
    table.end_display(cell.clone(), IndexPath::new(0, 0));

    assert_eq!(*ended.lock(), vec![(cell, "a")]);
}

#[test]
fn empty_emission_yields_one_empty_section() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);

    source.emit(Vec::new());
    context.process_pending();

    assert_eq!(binding.grid().section_count(), 1);
    assert_eq!(table.row_counts(), vec![0]);
}

#[test]
fn stale_cell_request_reloads_once() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, _binding) = flat_binding(&context, &source);

    source.emit(vec!["a", "b", "c"]);
    context.process_pending();
    source.emit(vec!["a"]);
    context.process_pending();
    let reloads = table.reload_count();

    let cell = table.cell_at(IndexPath::new(0, 2)).unwrap();

    assert_eq!(cell, TestCell::new("placeholder", ""));
    assert_eq!(table.reload_count(), reloads + 1);
    assert_eq!(table.row_counts(), vec![1]);
}

#[test]
fn widget_destruction_tears_binding_down() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    let selected = record(binding.did_select());

    source.emit(vec!["a", "b"]);
    context.process_pending();
    assert_eq!(source.connection_count(), 1);

    table.destroy();

    assert!(binding.is_disposed());
    assert!(!table.has_delegate());
    assert_eq!(table.delegate_history(), vec![true, false]);
    assert_eq!(source.connection_count(), 0);
    assert_eq!(binding.did_select().connection_count(), 0);
    assert_eq!(table.destroyed().connection_count(), 0);

    let generation = binding.generation();
    source.emit(vec!["z"]);
    context.process_pending();
    assert_eq!(binding.generation(), generation);
    assert!(selected.lock().is_empty());

    // Destroying twice is harmless.
    table.destroy();
    assert!(!binding.dispose());
}

#[test]
fn dropping_widget_without_destroy_releases_source() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    source.emit(vec!["a"]);
    context.process_pending();
    assert_eq!(source.connection_count(), 1);

    drop(binding);
    drop(table);

    assert_eq!(source.connection_count(), 0);
    source.emit(vec!["b"]);
    assert_eq!(context.process_pending(), 0);
}

#[test]
fn commits_queued_before_teardown_are_discarded() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, binding) = flat_binding(&context, &source);

    source.emit(vec!["a"]);
    table.destroy();
    context.process_pending();

    assert_eq!(binding.generation(), 0);
    assert_eq!(table.reload_count(), 1);
}

#[test]
fn foreign_thread_emissions_apply_in_order_on_drain() {
    let context = MainContext::new();
    let source: Signal<Vec<&'static str>> = Signal::new();
    let (table, binding) = flat_binding(&context, &source);
    let sizes = Arc::new(Mutex::new(Vec::new()));
    let sizes_clone = sizes.clone();
    binding
        .grid_changed()
        .connect(move |(_, next)| sizes_clone.lock().push(next.total_rows()));

    let emitter = source.clone();
    std::thread::spawn(move || {
        emitter.emit(vec!["a"]);
        emitter.emit(vec!["a", "b"]);
        emitter.emit(vec!["a", "b", "c"]);
    })
    .join()
    .unwrap();

    assert_eq!(binding.generation(), 0);
    assert_eq!(table.row_counts(), vec![0]);

    assert_eq!(context.process_pending(), 3);
    assert_eq!(*sizes.lock(), vec![1, 2, 3]);
    assert_eq!(table.row_counts(), vec![3]);
}

#[test]
fn update_callback_receives_previous_and_next() {
    let context = MainContext::new();
    let source = Signal::new();
    let table = Arc::new(RecordingTable::new());
    let updates = Arc::new(Mutex::new(Vec::new()));
    let updates_clone = updates.clone();

    let _binding = TableBinder::new(&table, &context, cells())
        .update(move |table: &RecordingTable, previous, next| {
            updates_clone
                .lock()
                .push((previous.total_rows(), next.total_rows()));
            table.reload_data();
        })
        .bind(&source);

    source.emit(vec!["a", "b", "c"]);
    source.emit(vec!["a", "b"]);
    source.emit(vec!["a", "b"]);
    context.process_pending();

    assert_eq!(*updates.lock(), vec![(3, 2), (2, 2)]);
    assert_eq!(table.row_counts(), vec![2]);
}

#[test]
fn first_commit_can_go_through_update_callback() {
    let context = MainContext::new();
    let source = Signal::new();
    let table = Arc::new(RecordingTable::new());
    let updates = Arc::new(Mutex::new(0));
    let updates_clone = updates.clone();

    let _binding = TableBinder::new(&table, &context, cells())
        .config(BindingConfig::default().with_reload_on_first_commit(false))
        .update(move |_: &RecordingTable, _, _| *updates_clone.lock() += 1)
        .bind(&source);

    source.emit(vec!["a"]);
    context.process_pending();

    assert_eq!(*updates.lock(), 1);
    assert_eq!(table.reload_count(), 1);
}

#[test]
fn cells_are_reused_by_identifier() {
    let context = MainContext::new();
    let source = Signal::new();
    let (table, _binding) = flat_binding(&context, &source);

    source.emit(vec!["a", "b"]);
    context.process_pending();
    table.enqueue_reusable("row", TestCell::new("row", "stale"));

    let reused = table.cell_at(IndexPath::new(0, 0)).unwrap();
    let fresh = table.cell_at(IndexPath::new(0, 1)).unwrap();

    assert!(reused.reused);
    assert_eq!(reused.text, "a");
    assert!(!fresh.reused);
}
