//! Single-threaded execution context.
//!
//! A [`MainContext`] is a FIFO task queue owned by one thread (normally the UI
//! thread). Any thread may post work through a [`ContextHandle`]; the work only
//! runs when the owning thread drains the queue with
//! [`process_pending`](MainContext::process_pending) or
//! [`process_batch`](MainContext::process_batch). This serializes every state
//! change onto one thread without locking the state itself.
//!
//! ```
//! use reactive_table_core::MainContext;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let context = MainContext::new();
//! let handle = context.handle();
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let hits_clone = hits.clone();
//! std::thread::spawn(move || {
//!     handle.post(move || { hits_clone.fetch_add(1, Ordering::SeqCst); }).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(hits.load(Ordering::SeqCst), 0);
//! assert_eq!(context.process_pending(), 1);
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::error::ContextError;
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal task data.
struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// Default number of tasks run per [`MainContext::process_batch`] call.
const DEFAULT_BATCH_SIZE: usize = 64;

/// A single-threaded execution context.
///
/// The thread that creates the context owns it; only that thread may drain
/// the queue. Tasks run in the order they were posted.
pub struct MainContext {
    sender: Sender<TaskData>,
    receiver: Receiver<TaskData>,
    affinity: ThreadAffinity,
    batch_size: usize,
}

impl MainContext {
    /// Create a context owned by the current thread.
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH_SIZE)
    }

    /// Create a context with a custom batch size for
    /// [`process_batch`](Self::process_batch).
    pub fn with_batch_size(batch_size: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            affinity: ThreadAffinity::current(),
            batch_size: batch_size.max(1),
        }
    }

    /// Get a cloneable, thread-safe handle for posting work.
    pub fn handle(&self) -> ContextHandle {
        ContextHandle {
            sender: self.sender.clone(),
            affinity: self.affinity,
        }
    }

    /// The owning thread's affinity.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    /// Returns `true` if the caller is on the owning thread.
    pub fn is_current(&self) -> bool {
        self.affinity.is_same_thread()
    }

    /// Post a task from the owning thread.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        // The context holds its own receiver, so the channel cannot be closed here.
        let _ = self.sender.send(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Run up to `batch_size` tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_batch(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        let mut count = 0;
        while count < self.batch_size {
            match self.receiver.try_recv() {
                Ok(data) => {
                    self.run(data);
                    count += 1;
                }
                Err(_) => break,
            }
        }
        count
    }

    /// Run every pending task, including tasks posted while draining.
    ///
    /// Returns the number of tasks processed.
    pub fn process_pending(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        let mut count = 0;
        while let Ok(data) = self.receiver.try_recv() {
            self.run(data);
            count += 1;
        }
        count
    }

    fn run(&self, data: TaskData) {
        tracing::trace!(target: targets::CONTEXT, task = data.id.as_u64(), "running task");
        (data.task)();
    }
}

impl Default for MainContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MainContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainContext")
            .field("thread", &self.affinity.thread_id())
            .field("pending", &self.pending_count())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

/// A thread-safe handle for posting tasks to a [`MainContext`].
#[derive(Clone)]
pub struct ContextHandle {
    sender: Sender<TaskData>,
    affinity: ThreadAffinity,
}

impl ContextHandle {
    /// Post a task to run on the context's owning thread.
    ///
    /// Fails with [`ContextError::Closed`] if the context has been dropped.
    pub fn post<F>(&self, task: F) -> Result<TaskId, ContextError>
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.sender
            .send(TaskData {
                id,
                task: Box::new(task),
            })
            .map_err(|_| ContextError::Closed)?;
        Ok(id)
    }

    /// Returns `true` if the caller is on the context's owning thread.
    pub fn is_current(&self) -> bool {
        self.affinity.is_same_thread()
    }

    /// The owning thread's affinity.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }
}

impl std::fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextHandle")
            .field("thread", &self.affinity.thread_id())
            .finish()
    }
}

static_assertions::assert_impl_all!(ContextHandle: Send, Sync);
