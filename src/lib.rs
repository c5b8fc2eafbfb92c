// src/lib.rs

pub mod cache;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod table;
pub mod tasks;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cache::FileCache;
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{Pipeline, TaskOutput};
use crate::tasks::{TERMINAL_TASK, Value, build_pipeline};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the file-backed result cache
/// - pipeline construction and execution
/// - printing the chosen task's result
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let cache = FileCache::new(cfg.cache.root.clone());
    let mut pipeline = build_pipeline(&cfg, Box::new(cache))?;

    if args.dry_run {
        print_dry_run(&cfg, &pipeline);
        return Ok(());
    }

    info!(cache_root = ?cfg.cache.root, "running pipeline");
    let completed = pipeline.run()?;

    let task = args.task.as_deref().unwrap_or(TERMINAL_TASK);
    match completed.output(task) {
        Some(TaskOutput::Value(value)) => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Some(TaskOutput::Stream(_)) => {
            println!(
                "task '{task}' produced a streaming result; it was consumed during \
                 the run and has no printable value"
            );
        }
        None => anyhow::bail!("task '{task}' is not registered in the pipeline"),
    }

    Ok(())
}

/// Simple dry-run output: print config and tasks in execution order.
fn print_dry_run(cfg: &ConfigFile, pipeline: &Pipeline<Value>) {
    println!("hnpipe dry-run");
    println!("  cache.root = {:?}", cfg.cache.root);
    println!("  fetch.endpoint = {}", cfg.fetch.endpoint);
    println!("  fetch.year = {}", cfg.fetch.year);
    println!("  fetch.hits_per_page = {}", cfg.fetch.hits_per_page);
    println!("  keywords.top = {}", cfg.keywords.top);
    println!();

    let order = pipeline.graph().sort();
    println!("tasks in execution order ({}):", order.len());
    for name in &order {
        match pipeline.graph().last_producer_of(name) {
            Some(producer) => println!("  - {name} (after {producer})"),
            None => println!("  - {name}"),
        }
    }

    debug!("dry-run complete (no execution)");
}
