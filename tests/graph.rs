use hnpipe::dag::TaskGraph;
use hnpipe::errors::HnpipeError;

#[test]
fn sort_returns_linear_chain_in_order() {
    let mut graph = TaskGraph::new();
    graph.add("a", None).unwrap();
    graph.add("a", Some("b")).unwrap();
    graph.add("b", Some("c")).unwrap();

    assert_eq!(graph.sort(), vec!["a", "b", "c"]);
}

#[test]
fn sort_breaks_ties_by_registration_order() {
    let mut graph = TaskGraph::new();
    graph.add("c", None).unwrap();
    graph.add("a", None).unwrap();
    graph.add("b", None).unwrap();

    // All three are ready immediately; first-registered runs first.
    assert_eq!(graph.sort(), vec!["c", "a", "b"]);
}

#[test]
fn sort_interleaves_independent_chains_deterministically() {
    let mut graph = TaskGraph::new();
    graph.add("a", Some("b")).unwrap();
    graph.add("x", Some("y")).unwrap();

    // Roots in first-seen order, then their children as they become ready.
    assert_eq!(graph.sort(), vec!["a", "x", "b", "y"]);
}

#[test]
fn in_degrees_counts_incoming_edges() {
    let mut graph = TaskGraph::new();
    graph.add("a", Some("c")).unwrap();
    graph.add("b", Some("c")).unwrap();
    graph.add("c", Some("d")).unwrap();

    let degrees = graph.in_degrees();
    assert_eq!(degrees["a"], 0);
    assert_eq!(degrees["b"], 0);
    assert_eq!(degrees["c"], 2);
    assert_eq!(degrees["d"], 1);
}

#[test]
fn cycle_edge_is_rejected_and_graph_left_unchanged() {
    let mut graph = TaskGraph::new();
    graph.add("a", Some("b")).unwrap();

    let err = graph.add("b", Some("a")).unwrap_err();
    match err {
        HnpipeError::DagCycle { from, to } => {
            assert_eq!(from, "b");
            assert_eq!(to, "a");
        }
        other => panic!("expected DagCycle, got {other:?}"),
    }

    // The failed add must not have committed anything.
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.children_of("a"), ["b".to_string()]);
    assert!(graph.children_of("b").is_empty());
    assert_eq!(graph.sort(), vec!["a", "b"]);
}

#[test]
fn failed_add_does_not_leak_new_nodes() {
    let mut graph = TaskGraph::new();
    graph.add("a", Some("b")).unwrap();
    graph.add("b", Some("c")).unwrap();

    // c -> a closes the loop through existing nodes.
    assert!(graph.add("c", Some("a")).is_err());
    assert_eq!(graph.len(), 3);
}

#[test]
fn self_edge_is_rejected() {
    let mut graph = TaskGraph::new();
    let err = graph.add("a", Some("a")).unwrap_err();
    assert!(matches!(err, HnpipeError::DagCycle { .. }));
    assert!(graph.is_empty());
}

#[test]
fn last_producer_wins_when_scanning_entries() {
    let mut graph = TaskGraph::new();
    graph.add("p1", None).unwrap();
    graph.add("p2", None).unwrap();
    graph.add("p1", Some("c")).unwrap();
    graph.add("p2", Some("c")).unwrap();

    assert_eq!(graph.last_producer_of("c"), Some("p2"));
    assert_eq!(graph.last_producer_of("p1"), None);
}
