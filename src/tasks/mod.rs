// src/tasks/mod.rs

//! The Hacker News keyword pipeline: domain task bodies and their wiring.
//!
//! The scheduler treats everything here as opaque: each task is just a name,
//! one upstream edge and a body producing a [`TaskOutput`]. The chain is
//!
//! ```text
//! fetch_stories -> filter_stories -> stories_to_table -> extract_titles
//!     -> clean_titles -> keyword_counts -> top_keywords
//! ```

pub mod fetch;
pub mod stop_words;
pub mod words;

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::cache::ResultCache;
use crate::config::model::ConfigFile;
use crate::dag::{Pipeline, TaskOutput, ValueStream};
use crate::errors::Result;
use crate::table;

pub use fetch::Story;

/// The value type flowing through the pipeline.
///
/// Stream-producing tasks yield the per-item variants (`Story`, `Text`);
/// materialized tasks produce the aggregate ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Stories(Vec<Story>),
    Story(Story),
    Table(String),
    Text(String),
    Counts(BTreeMap<String, u64>),
    Ranked(Vec<(String, u64)>),
}

/// Header row of the intermediate story table.
pub const TABLE_HEADER: [&str; 5] = ["objectID", "created_at", "url", "points", "title"];

/// The task whose value the binary prints by default.
pub const TERMINAL_TASK: &str = "top_keywords";

fn expect_value(input: Option<TaskOutput<Value>>) -> anyhow::Result<Value> {
    match input {
        Some(TaskOutput::Value(v)) => Ok(v),
        Some(TaskOutput::Stream(_)) => bail!("expected a materialized upstream result, got a stream"),
        None => bail!("expected an upstream result, got none"),
    }
}

fn expect_stream(input: Option<TaskOutput<Value>>) -> anyhow::Result<ValueStream<Value>> {
    match input {
        Some(TaskOutput::Stream(s)) => Ok(s),
        Some(TaskOutput::Value(_)) => bail!("expected a streaming upstream result, got a value"),
        None => bail!("expected an upstream result, got none"),
    }
}

fn is_popular(story: &Story) -> bool {
    story.points.unwrap_or(0) > 50
        && story.num_comments.unwrap_or(0) > 1
        && !story.title.starts_with("Ask HN")
}

fn story_row(story: &Story) -> Vec<String> {
    vec![
        story.object_id.clone(),
        fetch::format_created_at(&story.created_at),
        story.url.clone().unwrap_or_default(),
        story.points.unwrap_or(0).to_string(),
        story.title.clone(),
    ]
}

/// Register the full keyword chain on a fresh [`Pipeline`] backed by `cache`.
pub fn build_pipeline(
    cfg: &ConfigFile,
    cache: Box<dyn ResultCache<Value>>,
) -> Result<Pipeline<Value>> {
    let mut pipeline = Pipeline::new(cache);

    let fetch_cfg = cfg.fetch.clone();
    let fetched = pipeline.register("fetch_stories", None, move |_input| {
        let stories = fetch::fetch_stories(&fetch_cfg)?;
        Ok(TaskOutput::Value(Value::Stories(stories)))
    })?;

    let filtered = pipeline.register("filter_stories", Some(&fetched), |input| {
        let Value::Stories(stories) = expect_value(input)? else {
            bail!("filter_stories expects a story list");
        };
        Ok(TaskOutput::stream(
            stories.into_iter().filter(is_popular).map(Value::Story),
        ))
    })?;

    let tabled = pipeline.register("stories_to_table", Some(&filtered), |input| {
        let stream = expect_stream(input)?;
        let rows = stream.filter_map(|v| match v {
            Value::Story(s) => Some(story_row(&s)),
            _ => None,
        });

        let mut cursor = table::build_table(rows, Some(&TABLE_HEADER), Cursor::new(Vec::new()))?;
        let mut text = String::new();
        cursor.read_to_string(&mut text)?;
        Ok(TaskOutput::Value(Value::Table(text)))
    })?;

    let titles = pipeline.register("extract_titles", Some(&tabled), |input| {
        let Value::Table(text) = expect_value(input)? else {
            bail!("extract_titles expects a table");
        };
        let mut rows = table::parse_table(&text).into_iter();
        let header = rows.next().context("table missing header row")?;
        let title_idx = header
            .iter()
            .position(|h| h == "title")
            .context("table missing 'title' column")?;

        Ok(TaskOutput::stream(
            rows.filter_map(move |row| row.into_iter().nth(title_idx))
                .map(Value::Text),
        ))
    })?;

    let cleaned = pipeline.register("clean_titles", Some(&titles), |input| {
        let stream = expect_stream(input)?;
        Ok(TaskOutput::stream(stream.map(|v| match v {
            Value::Text(t) => Value::Text(words::clean_title(&t)),
            other => other,
        })))
    })?;

    let counted = pipeline.register("keyword_counts", Some(&cleaned), |input| {
        let stream = expect_stream(input)?;
        let titles = stream.filter_map(|v| match v {
            Value::Text(t) => Some(t),
            _ => None,
        });
        Ok(TaskOutput::Value(Value::Counts(words::keyword_counts(
            titles,
        ))))
    })?;

    let top = cfg.keywords.top;
    pipeline.register(TERMINAL_TASK, Some(&counted), move |input| {
        let Value::Counts(counts) = expect_value(input)? else {
            bail!("top_keywords expects keyword counts");
        };
        Ok(TaskOutput::Value(Value::Ranked(words::top_keywords(
            &counts, top,
        ))))
    })?;

    Ok(pipeline)
}
