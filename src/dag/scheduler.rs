// src/dag/scheduler.rs

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::ResultCache;
use crate::dag::graph::{TaskGraph, TaskName};
use crate::dag::results::{CompletedResults, TaskOutput};
use crate::errors::{HnpipeError, Result};

type BoxedTask<V> = Box<dyn FnMut(Option<TaskOutput<V>>) -> anyhow::Result<TaskOutput<V>>>;

/// Pipeline owns the dependency graph, the registered task bodies and the
/// result cache, and drives one memoized sequential run at a time.
///
/// It is responsible for:
/// - registering tasks and their dependency edges
/// - executing every task exactly once, in topological order
/// - consulting the cache before invoking a body, and populating it after
/// - wiring each task's single upstream result into its dependent
///
/// The pipeline knows nothing about what a task computes — only its name,
/// its edges and its [`TaskOutput`]. Execution is strictly sequential;
/// independent branches are not parallelized, and a blocking task body
/// blocks the whole run.
pub struct Pipeline<V> {
    graph: TaskGraph,
    bodies: HashMap<TaskName, BoxedTask<V>>,
    cache: Box<dyn ResultCache<V>>,
}

impl<V> Pipeline<V>
where
    V: Clone + Serialize + DeserializeOwned + 'static,
{
    pub fn new(cache: Box<dyn ResultCache<V>>) -> Self {
        Self {
            graph: TaskGraph::new(),
            bodies: HashMap::new(),
            cache,
        }
    }

    /// Register a task under a unique name, with at most one dependency.
    ///
    /// If `depends_on` is given it must name an already-registered task; the
    /// edge `depends_on -> name` is added and the new task will be invoked
    /// with that producer's result. Returns the task handle so call sites
    /// stay composable:
    ///
    /// ```ignore
    /// let fetch = pipeline.register("fetch", None, fetch_body)?;
    /// pipeline.register("filter", Some(&fetch), filter_body)?;
    /// ```
    pub fn register<F>(&mut self, name: &str, depends_on: Option<&str>, body: F) -> Result<TaskName>
    where
        F: FnMut(Option<TaskOutput<V>>) -> anyhow::Result<TaskOutput<V>> + 'static,
    {
        if self.bodies.contains_key(name) {
            return Err(HnpipeError::DuplicateTask(name.to_string()));
        }

        match depends_on {
            Some(dep) => {
                if !self.bodies.contains_key(dep) {
                    return Err(HnpipeError::TaskNotFound(dep.to_string()));
                }
                self.graph.add(dep, Some(name))?;
            }
            None => self.graph.add(name, None)?,
        }

        self.bodies.insert(name.to_string(), Box::new(body));
        debug!(task = %name, depends_on = ?depends_on, "registered task");
        Ok(name.to_string())
    }

    /// Declare an additional producer edge `producer -> consumer` between
    /// two already-registered tasks.
    ///
    /// Execution still resolves a single upstream result per consumer: when
    /// a task ends up with several producers, the one whose edge appears
    /// last in registration order wins and earlier producers' results are
    /// silently ignored. Keep the graph a forest per consumer unless that is
    /// what you want.
    pub fn link(&mut self, producer: &str, consumer: &str) -> Result<()> {
        for task in [producer, consumer] {
            if !self.bodies.contains_key(task) {
                return Err(HnpipeError::TaskNotFound(task.to_string()));
            }
        }
        self.graph.add(producer, Some(consumer))
    }

    /// Read-only view of the dependency graph.
    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Execute all registered tasks once, in topological order.
    ///
    /// Per task: if the cache holds its key, the stored result is loaded and
    /// the body is not invoked. Otherwise the body runs with its resolved
    /// upstream result (if any) and a materialized output is persisted under
    /// the task's name; stream outputs are never persisted and are thus
    /// recomputed on every run.
    ///
    /// Errors are not caught or retried: the first failure aborts the run
    /// and unwinds to the caller. Results persisted before the failure make
    /// the next `run()` resume from the failure point, since earlier tasks
    /// load from cache instead of recomputing.
    pub fn run(&mut self) -> Result<CompletedResults<V>> {
        let scheduled = self.graph.sort();
        info!(tasks = scheduled.len(), "starting pipeline run");

        let mut completed = CompletedResults::new();

        for name in &scheduled {
            if self.cache.exists(name) {
                debug!(task = %name, "cache hit; skipping execution");
                let value = self.cache.load(name)?;
                completed.insert(name.clone(), TaskOutput::Value(value));
                continue;
            }

            let input = match self.graph.last_producer_of(name) {
                Some(producer) => {
                    let producer = producer.to_string();
                    completed.resolve_input(&producer)
                }
                None => None,
            };

            debug!(task = %name, with_input = input.is_some(), "executing task");
            let body = self
                .bodies
                .get_mut(name)
                .ok_or_else(|| HnpipeError::TaskNotFound(name.clone()))?;
            let output = body(input).map_err(|source| HnpipeError::TaskFailed {
                task: name.clone(),
                source,
            })?;

            match &output {
                TaskOutput::Value(value) => self.cache.store(name, value)?,
                TaskOutput::Stream(_) => {
                    debug!(task = %name, "stream result; not persisted");
                }
            }

            completed.insert(name.clone(), output);
        }

        info!(completed = completed.len(), "pipeline run finished");
        Ok(completed)
    }
}
