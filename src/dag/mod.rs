// src/dag/mod.rs

//! Dependency graph and memoized task scheduling.
//!
//! - [`graph`] holds the directed acyclic graph of task names and computes
//!   the deterministic execution order.
//! - [`scheduler`] drives a run: cache consultation, body invocation and
//!   upstream result wiring.
//! - [`results`] defines task outputs (materialized vs stream) and the
//!   run-scoped results map.

pub mod graph;
pub mod results;
pub mod scheduler;

pub use graph::{TaskGraph, TaskName};
pub use results::{CompletedResults, TaskOutput, ValueStream};
pub use scheduler::Pipeline;
