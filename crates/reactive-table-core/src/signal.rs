//! Signal/slot system for Reactive Table.
//!
//! A [`Signal<Args>`] is a push-based stream: it has any number of connected
//! slots (callbacks), and every [`emit`](Signal::emit) invokes each of them
//! with the emitted value. Signals never fail and never complete; a consumer
//! stops listening by disconnecting.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionType`] - How a slot should be invoked (Direct or Queued)
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Connection Types
//!
//! - **Direct**: Slot is called immediately in the emitting thread
//! - **Queued**: Slot execution is posted to a [`MainContext`](crate::MainContext)
//!   and runs when its owning thread drains the queue
//!
//! # Sharing
//!
//! `Signal` is a cheap handle: cloning it yields another handle to the same
//! set of connections. This is how a producer hands out a stream while keeping
//! the ability to emit on it.
//!
//! # Example
//!
//! ```
//! use reactive_table_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::context::ContextHandle;
use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected.
    pub struct ConnectionId;
}

/// Specifies how a connected slot is invoked when the signal is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionType {
    /// Invoke the slot immediately in the emitting thread.
    #[default]
    Direct,

    /// Post the invocation to an execution context.
    ///
    /// The emitted value is cloned into the posted task.
    Queued,
}

/// A connected callback, taking the emitted value by reference or by value.
enum Slot<Args> {
    Borrowed(Arc<dyn Fn(&Args) + Send + Sync>),
    Owned(Arc<dyn Fn(Args) + Send + Sync>),
}

impl<Args> Clone for Slot<Args> {
    fn clone(&self) -> Self {
        match self {
            Slot::Borrowed(slot) => Slot::Borrowed(Arc::clone(slot)),
            Slot::Owned(slot) => Slot::Owned(Arc::clone(slot)),
        }
    }
}

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    /// Target context for queued connections.
    context: Option<ContextHandle>,
}

impl<Args> Connection<Args> {
    fn connection_type(&self) -> ConnectionType {
        if self.context.is_some() {
            ConnectionType::Queued
        } else {
            ConnectionType::Direct
        }
    }
}

struct Shared<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Re-entrancy
///
/// Emission snapshots the connected slots before invoking them, so a slot may
/// connect or disconnect slots (including itself) on the same signal. Such
/// changes take effect from the next emission.
pub struct Signal<Args> {
    shared: Arc<Shared<Args>>,
}

impl<Args> Clone for Signal<Args> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                connections: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// Connect a slot that is invoked directly on the emitting thread.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// ```
    /// use reactive_table_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.insert(Connection {
            slot: Slot::Borrowed(Arc::new(slot)),
            context: None,
        })
    }

    /// Connect a slot whose invocations are posted to `context`.
    ///
    /// The slot runs when the context's owning thread drains its queue, in the
    /// order the emissions happened.
    pub fn connect_queued<F>(&self, context: &ContextHandle, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.insert(Connection {
            slot: Slot::Borrowed(Arc::new(slot)),
            context: Some(context.clone()),
        })
    }

    /// Like [`connect_queued`](Self::connect_queued), but the slot takes the
    /// value cloned into the posted task by value.
    ///
    /// ```
    /// use reactive_table_core::{MainContext, Signal};
    ///
    /// let context = MainContext::new();
    /// let signal = Signal::<Vec<u32>>::new();
    /// signal.connect_queued_owned(&context.handle(), |values: Vec<u32>| {
    ///     assert_eq!(values.into_iter().sum::<u32>(), 6);
    /// });
    ///
    /// signal.emit(vec![1, 2, 3]);
    /// assert_eq!(context.process_pending(), 1);
    /// ```
    pub fn connect_queued_owned<F>(&self, context: &ContextHandle, slot: F) -> ConnectionId
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        self.insert(Connection {
            slot: Slot::Owned(Arc::new(slot)),
            context: Some(context.clone()),
        })
    }

    fn insert(&self, connection: Connection<Args>) -> ConnectionId {
        let connection_type = connection.connection_type();
        let id = self.shared.connections.lock().insert(connection);
        tracing::trace!(target: targets::SIGNAL, ?id, ?connection_type, "slot connected");
        id
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Direct slots run before this call returns. Queued slots receive a clone
    /// of `args` on their context; if that context is gone the invocation is
    /// dropped with a warning.
    #[tracing::instrument(skip_all, target = "reactive_table_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        // Snapshot so slots can touch this signal's connections.
        let snapshot: Vec<(Slot<Args>, Option<ContextHandle>)> = {
            let connections = self.shared.connections.lock();
            connections
                .values()
                .map(|conn| (conn.slot.clone(), conn.context.clone()))
                .collect()
        };
        tracing::trace!(
            target: targets::SIGNAL,
            connection_count = snapshot.len(),
            "emitting signal"
        );

        for (slot, context) in snapshot {
            match (slot, context) {
                (Slot::Borrowed(slot), None) => slot(&args),
                (Slot::Owned(slot), None) => slot(args.clone()),
                (slot, Some(context)) => {
                    let args = args.clone();
                    let posted = match slot {
                        Slot::Borrowed(slot) => context.post(move || slot(&args)),
                        Slot::Owned(slot) => context.post(move || slot(args)),
                    };
                    if posted.is_err() {
                        tracing::warn!(
                            target: targets::SIGNAL,
                            "target context dropped, discarding queued invocation"
                        );
                    }
                }
            }
        }
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the signal, so it may outlive
    /// it; dropping it afterwards is a no-op.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }
}

impl<Args> Signal<Args> {
    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        // Dropped after the lock is released; a slot may own state that
        // disconnects from this signal when it drops.
        let removed = self.shared.connections.lock().remove(id);
        removed.is_some()
    }

    /// Like [`disconnect`](Self::disconnect), reporting unknown IDs as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        let removed: Vec<_> = self.shared.connections.lock().drain().collect();
        drop(removed);
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.shared.connections.lock().len()
    }

    /// Returns `true` if `id` is still connected.
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.shared.connections.lock().contains_key(id)
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.shared.connections.lock().len())
            .finish()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// ```
/// use reactive_table_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args> {
    shared: Weak<Shared<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The guarded connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            let removed = shared.connections.lock().remove(self.id);
            drop(removed);
        }
    }
}

impl<Args> fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("id", &self.id)
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(ConnectionGuard<String>: Send, Sync);
