//! Deferred single-shot tasks for the UI thread.
//!
//! A task is posted during one UI turn and executed on a later one, after the
//! current layout or removal pass has settled. Tasks receive mutable access to
//! a context (usually the engine that owns the queue), which is why the queue
//! is drained into a [`ReadyTasks`] batch before anything runs: the owner can
//! then hand itself to each task without aliasing the queue.
//!
//! Tasks posted while a batch is running land in the queue again and run on
//! the *next* turn, never in the batch that posted them.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask<C> = Box<dyn FnOnce(&mut C) + 'static>;

/// A posted task waiting to run.
pub struct Task<C> {
    id: TaskId,
    label: &'static str,
    run: BoxedTask<C>,
}

impl<C> Task<C> {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Short description used in logs.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Consume the task, running it against `ctx`.
    pub fn run(self, ctx: &mut C) {
        tracing::trace!(target: targets::TASK, id = self.id.0, label = self.label, "running task");
        (self.run)(ctx);
    }
}

impl<C> fmt::Debug for Task<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A batch of tasks taken out of a [`TaskQueue`].
pub struct ReadyTasks<C> {
    tasks: VecDeque<Task<C>>,
}

impl<C> ReadyTasks<C> {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task in posting order.
    ///
    /// Returns the number of tasks run.
    pub fn run_all(self, ctx: &mut C) -> usize {
        let count = self.tasks.len();
        for task in self.tasks {
            task.run(ctx);
        }
        count
    }
}

impl<C> IntoIterator for ReadyTasks<C> {
    type Item = Task<C>;
    type IntoIter = std::collections::vec_deque::IntoIter<Task<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

/// FIFO queue of deferred tasks.
pub struct TaskQueue<C> {
    tasks: VecDeque<Task<C>>,
}

impl<C> TaskQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a task to run on a later turn.
    ///
    /// Tasks cannot be withdrawn once posted; a task re-checks its
    /// preconditions when it runs.
    pub fn post<F>(&mut self, label: &'static str, task: F) -> TaskId
    where
        F: FnOnce(&mut C) + 'static,
    {
        let id = next_task_id();
        tracing::trace!(target: targets::TASK, id = id.0, label, "posted task");
        self.tasks.push_back(Task {
            id,
            label,
            run: Box::new(task),
        });
        id
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Take every pending task out of the queue.
    pub fn take_ready(&mut self) -> ReadyTasks<C> {
        ReadyTasks {
            tasks: std::mem::take(&mut self.tasks),
        }
    }
}

impl<C> Default for TaskQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TaskQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tasks.iter()).finish()
    }
}
