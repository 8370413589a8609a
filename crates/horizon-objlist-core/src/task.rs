//! Deferred task queue for idle processing.
//!
//! Owning list models post item destruction here instead of dropping items
//! while a notification for them may still be on the call stack. The host
//! drains the queue from its frame or idle callback.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// A FIFO queue of deferred tasks.
#[derive(Default)]
pub struct TaskQueue {
    tasks: VecDeque<BoxedTask>,
}

impl TaskQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a task to be executed on the next drain.
    pub fn post<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.push_back(Box::new(task));
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Process all pending tasks in posting order.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&mut self) -> usize {
        let count = self.tasks.len();
        while let Some(task) = self.tasks.pop_front() {
            task();
        }
        count
    }
}

/// A thread-safe wrapper around [`TaskQueue`].
///
/// Tasks run outside the lock, so a task may post further tasks; those run on
/// the following drain.
#[derive(Default)]
pub struct SharedTaskQueue {
    inner: Mutex<TaskQueue>,
}

impl SharedTaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a task. See [`TaskQueue::post`].
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(task);
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Run every task pending at the time of the call.
    pub fn process_all(&self) -> usize {
        let mut pending = std::mem::take(&mut *self.inner.lock());
        pending.process_all()
    }
}
