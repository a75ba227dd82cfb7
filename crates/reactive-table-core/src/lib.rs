//! Core primitives for Reactive Table.
//!
//! This crate provides the building blocks the table binding is made of:
//!
//! - **Signal/Slot System**: Type-safe push streams with direct and queued slots
//! - **Property System**: Single-slot reactive values with whole-value replacement
//! - **Execution Context**: A single-threaded FIFO task queue owned by the UI thread
//! - **Thread Affinity**: Assertions that state is touched from its owning thread
//! - **Logging**: Tracing targets, span names and debug visualization
//!
//! # Signal/Slot Example
//!
//! ```
//! use reactive_table_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Queued Delivery Example
//!
//! ```
//! use reactive_table_core::{MainContext, Signal};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//!
//! let context = MainContext::new();
//! let items = Signal::<i32>::new();
//! let last = Arc::new(AtomicI32::new(0));
//!
//! let last_clone = last.clone();
//! items.connect_queued(&context.handle(), move |&n| last_clone.store(n, Ordering::SeqCst));
//!
//! items.emit(7);
//! assert_eq!(last.load(Ordering::SeqCst), 0);
//!
//! context.process_pending();
//! assert_eq!(last.load(Ordering::SeqCst), 7);
//! ```

pub mod context;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod thread_check;

pub use context::{ContextHandle, MainContext, TaskId};
pub use error::{ContextError, CoreError, Result, SignalError};
pub use logging::{PerfSpan, SectionTreeDebug, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, ConnectionType, Signal};
pub use thread_check::ThreadAffinity;
