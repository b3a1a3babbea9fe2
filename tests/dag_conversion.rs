// tests/dag_conversion.rs

use randwire::errors::RandwireError;
use randwire::graph::{Graph, UndirectedGraph, to_dag};
use randwire_test_utils::builders::GraphBuilder;

fn expect_invalid_graph<T: std::fmt::Debug>(result: Result<T, RandwireError>, needle: &str) {
    match result {
        Err(RandwireError::InvalidGraph(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("Expected InvalidGraph, got: {other:?}"),
    }
}

#[test]
fn test_to_dag_orients_low_to_high() {
    let skeleton = UndirectedGraph::from_edges(5, vec![(3, 1), (0, 4), (2, 0), (1, 2), (4, 3)]);
    let dag = to_dag(&skeleton).unwrap();

    let edges: Vec<_> = dag.edges().collect();
    assert_eq!(edges, vec![(0, 2), (0, 4), (1, 2), (1, 3), (3, 4)]);
    assert!(dag.edges().all(|(u, v)| u < v));
}

#[test]
fn test_to_dag_rejects_self_loop() {
    let skeleton = UndirectedGraph::from_edges(3, vec![(0, 1), (2, 2)]);
    expect_invalid_graph(to_dag(&skeleton), "self-loop");
}

#[test]
fn test_to_dag_rejects_duplicate_in_either_orientation() {
    let same = UndirectedGraph::from_edges(3, vec![(0, 1), (0, 1)]);
    expect_invalid_graph(to_dag(&same), "duplicate");

    let flipped = UndirectedGraph::from_edges(3, vec![(0, 1), (1, 0)]);
    expect_invalid_graph(to_dag(&flipped), "duplicate");
}

#[test]
fn test_to_dag_rejects_out_of_range_endpoint() {
    let skeleton = UndirectedGraph::from_edges(3, vec![(0, 3)]);
    expect_invalid_graph(to_dag(&skeleton), "outside");
}

#[test]
fn test_graph_new_rejects_cycles() {
    expect_invalid_graph(Graph::new(3, vec![(0, 1), (1, 2), (2, 0)]), "cycle");
    expect_invalid_graph(Graph::new(2, vec![(0, 1), (1, 0)]), "cycle");
    expect_invalid_graph(Graph::new(0, Vec::new()), "at least one node");
}

#[test]
fn test_descriptors_follow_edges() {
    let graph = GraphBuilder::diamond().build();
    let d0 = graph.descriptor(0).unwrap();
    assert!(d0.is_source());
    assert_eq!(d0.successors, vec![1, 2]);

    let d3 = graph.descriptor(3).unwrap();
    assert!(d3.is_sink());
    assert_eq!(d3.in_degree, 2);
    assert_eq!(d3.predecessors, vec![1, 2]);

    assert!(graph.descriptor(4).is_none());
    assert_eq!(graph.descriptors().len(), 4);
}

#[test]
fn test_relabel_is_structure_preserving() {
    let graph = GraphBuilder::diamond().build();
    let mapping = [3, 0, 2, 1];
    let relabeled = graph.relabel(&mapping).unwrap();

    assert_eq!(relabeled.edge_count(), graph.edge_count());
    for (u, v) in graph.edges() {
        assert!(relabeled.contains_edge(mapping[u], mapping[v]));
    }
    // Old source 0 is now 3; old sink 3 is now 1.
    assert_eq!(relabeled.sources(), vec![3]);
    assert_eq!(relabeled.sinks(), vec![1]);
}

#[test]
fn test_relabel_rejects_non_bijections() {
    let graph = GraphBuilder::chain(3).build();
    expect_invalid_graph(graph.relabel(&[0, 1]), "covers");
    expect_invalid_graph(graph.relabel(&[0, 0, 1]), "bijection");
    expect_invalid_graph(graph.relabel(&[0, 1, 7]), "bijection");
}

#[test]
fn test_graph_serializes_as_node_count_and_edge_list() {
    let graph = GraphBuilder::chain(3).build();
    let json = serde_json::to_string(&graph).unwrap();
    assert_eq!(json, r#"{"node_count":3,"edges":[[0,1],[1,2]]}"#);

    let back: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}

#[test]
fn test_deserialization_revalidates() {
    let cyclic = r#"{"node_count":2,"edges":[[0,1],[1,0]]}"#;
    let err = serde_json::from_str::<Graph>(cyclic).unwrap_err();
    assert!(err.to_string().contains("cycle"), "unexpected error: {err}");

    let looped = r#"{"node_count":2,"edges":[[1,1]]}"#;
    assert!(serde_json::from_str::<Graph>(looped).is_err());
}
