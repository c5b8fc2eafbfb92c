// src/dag/results.rs

//! Task result types and the run-scoped results map.

use std::collections::HashMap;

use crate::dag::graph::TaskName;

/// A deferred sequence of values produced by a task instead of a
/// materialized result.
///
/// Streams are intentionally never persisted to the cache; serializing a
/// deferred computation would either fail or silently discard its laziness,
/// so stream-producing tasks are recomputed on every run. A stream is
/// consumed by at most one dependent: handing it to a consumer leaves an
/// exhausted stream behind, and any later consumer sees no items.
pub struct ValueStream<V> {
    inner: Box<dyn Iterator<Item = V>>,
}

impl<V: 'static> ValueStream<V> {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = V> + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    pub fn empty() -> Self {
        Self {
            inner: Box::new(std::iter::empty()),
        }
    }

    /// Move the underlying iterator out, leaving this stream exhausted.
    pub fn take(&mut self) -> Self {
        Self {
            inner: std::mem::replace(&mut self.inner, Box::new(std::iter::empty())),
        }
    }
}

impl<V> Iterator for ValueStream<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next()
    }
}

impl<V> std::fmt::Debug for ValueStream<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueStream(..)")
    }
}

/// What a task body produced, and what a dependent receives as input.
///
/// The variant is the serialization boundary: `Value` outputs are persisted
/// under the task's cache key, `Stream` outputs never are.
#[derive(Debug)]
pub enum TaskOutput<V> {
    /// A materialized value, safe to serialize and reload.
    Value(V),
    /// A lazy sequence, excluded from persistence.
    Stream(ValueStream<V>),
}

impl<V: 'static> TaskOutput<V> {
    /// Convenience constructor for stream outputs.
    pub fn stream<I>(iter: I) -> Self
    where
        I: Iterator<Item = V> + 'static,
    {
        TaskOutput::Stream(ValueStream::new(iter))
    }
}

impl<V> TaskOutput<V> {
    pub fn is_stream(&self) -> bool {
        matches!(self, TaskOutput::Stream(_))
    }

    /// The materialized value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            TaskOutput::Value(v) => Some(v),
            TaskOutput::Stream(_) => None,
        }
    }
}

/// Run-scoped mapping from task name to its computed or cache-loaded output.
///
/// Created fresh at the start of every [`Pipeline::run`](crate::dag::Pipeline::run),
/// populated during execution and returned to the caller; the engine keeps
/// no in-memory state across runs. Streams that were consumed by a dependent
/// during the run remain in the map, exhausted.
#[derive(Debug)]
pub struct CompletedResults<V> {
    results: HashMap<TaskName, TaskOutput<V>>,
}

impl<V> CompletedResults<V> {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
        }
    }

    pub fn output(&self, task: &str) -> Option<&TaskOutput<V>> {
        self.results.get(task)
    }

    /// The materialized value of a task, or `None` if the task is unknown or
    /// produced a stream.
    pub fn value(&self, task: &str) -> Option<&V> {
        self.results.get(task).and_then(|o| o.value())
    }

    pub fn contains(&self, task: &str) -> bool {
        self.results.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(|s| s.as_str())
    }

    pub(crate) fn insert(&mut self, task: TaskName, output: TaskOutput<V>) {
        self.results.insert(task, output);
    }
}

impl<V: Clone + 'static> CompletedResults<V> {
    /// Resolve a producer's completed output as input for a dependent.
    ///
    /// Materialized values are cloned; streams are taken, leaving the
    /// producer's entry exhausted.
    pub(crate) fn resolve_input(&mut self, producer: &str) -> Option<TaskOutput<V>> {
        match self.results.get_mut(producer)? {
            TaskOutput::Value(v) => Some(TaskOutput::Value(v.clone())),
            TaskOutput::Stream(s) => Some(TaskOutput::Stream(s.take())),
        }
    }
}
