// src/dag/graph.rs

use std::collections::{HashMap, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{HnpipeError, Result};

/// Task name as used for graph keys and cache keys.
pub type TaskName = String;

/// Directed dependency graph keyed by task name.
///
/// Edges point from producer to consumer: `A -> B` means B consumes A's
/// result and must run after it. Children lists keep append order, and
/// `order` records the first time each name was seen, so every traversal
/// below is deterministic for a fixed registration sequence.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    children: HashMap<TaskName, Vec<TaskName>>,
    /// Node names in first-seen order.
    order: Vec<TaskName>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `node` exists; if `to` is given, also add the edge `node -> to`.
    ///
    /// The candidate edge is checked for cycles *before* anything is
    /// committed, so a failed call leaves the node and edge sets exactly as
    /// they were and returns [`HnpipeError::DagCycle`] naming the rejected
    /// edge.
    pub fn add(&mut self, node: &str, to: Option<&str>) -> Result<()> {
        let Some(to) = to else {
            self.ensure_node(node);
            return Ok(());
        };

        if self.would_cycle(node, to) {
            return Err(HnpipeError::DagCycle {
                from: node.to_string(),
                to: to.to_string(),
            });
        }

        self.ensure_node(node);
        self.ensure_node(to);
        self.children
            .get_mut(node)
            .expect("node inserted above")
            .push(to.to_string());

        debug!(from = %node, to = %to, "added edge to task graph");
        Ok(())
    }

    /// Incoming-edge count for every known node (0 for sources).
    pub fn in_degrees(&self) -> HashMap<TaskName, usize> {
        let mut degrees: HashMap<TaskName, usize> =
            self.order.iter().map(|n| (n.clone(), 0)).collect();

        for node in &self.order {
            for child in &self.children[node] {
                *degrees.get_mut(child).expect("no dangling edges") += 1;
            }
        }

        degrees
    }

    /// Kahn's algorithm over the current graph.
    ///
    /// The ready queue is seeded with all in-degree-0 nodes in first-seen
    /// order and drained strictly FIFO, so ties among simultaneously-ready
    /// nodes break by registration order. If the graph contained a cycle the
    /// returned order would be shorter than the node count; `add` rejects
    /// cycles up front, so callers can rely on a full ordering.
    pub fn sort(&self) -> Vec<TaskName> {
        let mut degrees = self.in_degrees();

        let mut queue: VecDeque<TaskName> = self
            .order
            .iter()
            .filter(|n| degrees[*n] == 0)
            .cloned()
            .collect();

        let mut found = Vec::with_capacity(self.order.len());
        while let Some(node) = queue.pop_front() {
            for child in &self.children[&node] {
                let d = degrees.get_mut(child).expect("no dangling edges");
                *d -= 1;
                if *d == 0 {
                    queue.push_back(child.clone());
                }
            }
            found.push(node);
        }

        found
    }

    /// The single producer whose result a consumer receives.
    ///
    /// Scans the adjacency in insertion order; when several producers point
    /// at the same consumer, the last one encountered wins and earlier
    /// producers' results are ignored. This is the supported contract, not a
    /// general fan-in model.
    pub fn last_producer_of(&self, task: &str) -> Option<&str> {
        let mut found = None;
        for node in &self.order {
            if self.children[node].iter().any(|c| c == task) {
                found = Some(node.as_str());
            }
        }
        found
    }

    /// Node names in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Direct dependents of a task.
    pub fn children_of(&self, name: &str) -> &[TaskName] {
        self.children.get(name).map(|c| c.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn ensure_node(&mut self, name: &str) {
        if !self.children.contains_key(name) {
            self.children.insert(name.to_string(), Vec::new());
            self.order.push(name.to_string());
        }
    }

    /// Whether adding `from -> to` would make the graph cyclic.
    ///
    /// Rebuilds a petgraph view of the adjacency plus the candidate edge and
    /// topologically sorts it. A full re-sort per mutation is fine at these
    /// graph sizes.
    fn would_cycle(&self, from: &str, to: &str) -> bool {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for node in &self.order {
            graph.add_node(node.as_str());
        }
        for node in &self.order {
            for child in &self.children[node] {
                graph.add_edge(node.as_str(), child.as_str(), ());
            }
        }
        graph.add_edge(from, to, ());

        toposort(&graph, None).is_err()
    }
}
