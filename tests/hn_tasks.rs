use hnpipe::cache::{FileCache, ResultCache};
use hnpipe::tasks::{Story, TERMINAL_TASK, Value, build_pipeline};
use hnpipe_test_utils::builders::ConfigFileBuilder;
use hnpipe_test_utils::init_tracing;

fn story(id: &str, title: &str, points: i64, num_comments: i64) -> Story {
    Story {
        object_id: id.to_string(),
        created_at: "2014-05-29T08:23:46.000Z".to_string(),
        url: Some(format!("https://example.com/{id}")),
        points: Some(points),
        num_comments: Some(num_comments),
        title: title.to_string(),
    }
}

#[test]
fn domain_chain_is_registered_in_topological_order() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ConfigFileBuilder::new().with_cache_root(dir.path()).build();

    let pipeline = build_pipeline(&cfg, Box::new(FileCache::new(dir.path()))).unwrap();
    assert_eq!(pipeline.graph().sort(), vec![
        "fetch_stories",
        "filter_stories",
        "stories_to_table",
        "extract_titles",
        "clean_titles",
        "keyword_counts",
        TERMINAL_TASK,
    ]);
}

/// With the fetch result pre-seeded in the cache, the whole chain runs
/// offline: the fetch body is never invoked (cache hit) and every
/// downstream stage computes from it.
#[test]
fn chain_computes_keywords_from_cached_stories() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let stories = vec![
        story("1", "Rust rises, again!", 120, 30),
        story("2", "Obscure framework nobody upvoted", 10, 0),
        story("3", "Ask HN: how do I rust?", 90, 50),
    ];

    let mut cache = FileCache::new(dir.path());
    ResultCache::<Value>::store(&mut cache, "fetch_stories", &Value::Stories(stories)).unwrap();

    let cfg = ConfigFileBuilder::new().with_cache_root(dir.path()).build();
    let mut pipeline = build_pipeline(&cfg, Box::new(cache)).unwrap();
    let completed = pipeline.run().unwrap();

    // Only story 1 survives the popularity filter; its cleaned title is
    // "rust rises again" and "again" is a stop word.
    assert_eq!(
        completed.value(TERMINAL_TASK),
        Some(&Value::Ranked(vec![
            ("rises".to_string(), 1),
            ("rust".to_string(), 1),
        ]))
    );

    // Materialized stages are persisted; streaming stages never are.
    for cached in ["fetch_stories", "stories_to_table", "keyword_counts", "top_keywords"] {
        assert!(dir.path().join(format!("{cached}.json")).exists());
    }
    for streamed in ["filter_stories", "extract_titles", "clean_titles"] {
        assert!(!dir.path().join(format!("{streamed}.json")).exists());
    }

    // The intermediate table kept the quoted title intact.
    let Some(Value::Table(table_text)) = completed.value("stories_to_table") else {
        panic!("expected a materialized table");
    };
    assert!(table_text.starts_with("objectID,created_at,url,points,title\n"));
    assert!(table_text.contains("\"Rust rises, again!\""));
}
