// tests/generation.rs

use std::collections::VecDeque;

use randwire::errors::RandwireError;
use randwire::graph::{Graph, ModelParams, RandomGraphModel, to_dag};
use randwire::types::ModelKind;
use randwire_test_utils::init_tracing;

/// Kahn's algorithm must consume every node.
fn kahn_completes(graph: &Graph) -> bool {
    let n = graph.node_count();
    let mut indeg: Vec<usize> = (0..n).map(|v| graph.in_degree(v)).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indeg[v] == 0).collect();
    let mut seen = 0;
    while let Some(u) = queue.pop_front() {
        seen += 1;
        for &v in graph.successors(u) {
            indeg[v] -= 1;
            if indeg[v] == 0 {
                queue.push_back(v);
            }
        }
    }
    seen == n && indeg.iter().all(|&d| d == 0)
}

fn assert_invalid_parameter<T: std::fmt::Debug>(result: Result<T, RandwireError>, needle: &str) {
    match result {
        Err(RandwireError::InvalidParameter(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("Expected InvalidParameter, got: {other:?}"),
    }
}

#[test]
fn test_configure_rejects_missing_or_out_of_range_params() {
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::default()),
        "P",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(1.5)),
        "between 0 and 1",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(f64::NAN)),
        "between 0 and 1",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::BarabasiAlbert, &ModelParams::default()),
        "M",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::BarabasiAlbert, &ModelParams::barabasi_albert(0)),
        "positive",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::WattsStrogatz, &ModelParams::watts_strogatz(3, 0.5)),
        "even",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(
            ModelKind::WattsStrogatz,
            &ModelParams {
                k: Some(4),
                ..ModelParams::default()
            },
        ),
        "P",
    );
    assert_invalid_parameter(
        RandomGraphModel::configure(ModelKind::WattsStrogatz, &ModelParams::watts_strogatz(4, -0.1)),
        "between 0 and 1",
    );
}

#[test]
fn test_er_scenario_connected_with_source_and_sink() {
    init_tracing();

    let model =
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(0.5)).unwrap();
    let skeleton = model.generate(10, Some(42)).unwrap();
    assert_eq!(skeleton.node_count(), 10);
    assert!(skeleton.is_connected());

    let dag = to_dag(&skeleton).unwrap();
    assert!(kahn_completes(&dag));
    assert!(!dag.sources().is_empty());
    assert!(!dag.sinks().is_empty());
    assert_eq!(dag.edge_count(), skeleton.edge_count());
}

#[test]
fn test_ws_k_must_be_smaller_than_node_count() {
    let model = RandomGraphModel::configure(
        ModelKind::WattsStrogatz,
        &ModelParams::watts_strogatz(4, 0.75),
    )
    .unwrap();
    let skeleton = model.generate(8, Some(3)).unwrap();
    assert!(skeleton.is_connected());

    let too_wide = RandomGraphModel::configure(
        ModelKind::WattsStrogatz,
        &ModelParams::watts_strogatz(8, 0.75),
    )
    .unwrap();
    assert_invalid_parameter(too_wide.generate(8, Some(3)), "smaller than the node count");
}

#[test]
fn test_ba_m_must_be_smaller_than_node_count() {
    let model =
        RandomGraphModel::configure(ModelKind::BarabasiAlbert, &ModelParams::barabasi_albert(4))
            .unwrap();
    assert_invalid_parameter(model.generate(4, Some(0)), "smaller than the node count");
}

#[test]
fn test_zero_nodes_is_rejected() {
    let model =
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(0.5)).unwrap();
    assert_invalid_parameter(model.generate(0, Some(1)), "at least 1");
}

#[test]
fn test_same_seed_same_graph_for_every_model() {
    let models = [
        (ModelKind::ErdosRenyi, ModelParams::erdos_renyi(0.4)),
        (ModelKind::BarabasiAlbert, ModelParams::barabasi_albert(3)),
        (ModelKind::WattsStrogatz, ModelParams::watts_strogatz(4, 0.3)),
    ];

    for (kind, params) in models {
        let model = RandomGraphModel::configure(kind, &params).unwrap();
        let a = model.generate(24, Some(7)).unwrap();
        let b = model.generate(24, Some(7)).unwrap();
        assert_eq!(a, b, "{kind} model is not deterministic under a fixed seed");
    }
}

#[test]
fn test_ba_edge_count_and_connectivity() {
    let model =
        RandomGraphModel::configure(ModelKind::BarabasiAlbert, &ModelParams::barabasi_albert(3))
            .unwrap();
    for seed in 0..10 {
        let skeleton = model.generate(20, Some(seed)).unwrap();
        assert!(skeleton.is_connected());
        // Every node after the first M adds exactly M fresh edges.
        assert_eq!(skeleton.edge_count(), 3 * (20 - 3));
    }
}

#[test]
fn test_ws_rewiring_keeps_edge_count() {
    let model = RandomGraphModel::configure(
        ModelKind::WattsStrogatz,
        &ModelParams::watts_strogatz(6, 0.25),
    )
    .unwrap();
    for seed in 0..10 {
        let skeleton = model.generate(32, Some(seed)).unwrap();
        assert!(skeleton.is_connected());
        assert_eq!(skeleton.edge_count(), 32 * 6 / 2);
        assert!(skeleton.edges().iter().all(|&(u, v)| u < v));
    }
}

#[test]
fn test_ws_without_rewiring_is_ring_lattice() {
    let model = RandomGraphModel::configure(
        ModelKind::WattsStrogatz,
        &ModelParams::watts_strogatz(2, 0.0),
    )
    .unwrap();
    let skeleton = model.generate(5, None).unwrap();
    assert_eq!(
        skeleton.edges(),
        &[(0, 1), (0, 4), (1, 2), (2, 3), (3, 4)]
    );
}

#[test]
fn test_er_rejection_budget_surfaces_timeout() {
    let model = RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(0.0))
        .unwrap()
        .with_max_attempts(3);

    match model.generate(5, Some(1)) {
        Err(RandwireError::GenerationTimeout {
            model,
            node_count,
            attempts,
        }) => {
            assert_eq!(model, ModelKind::ErdosRenyi);
            assert_eq!(node_count, 5);
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected GenerationTimeout, got: {other:?}"),
    }
}

#[test]
fn test_single_node_er_graph_is_connected() {
    let model = RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(0.0))
        .unwrap()
        .with_max_attempts(1);
    let skeleton = model.generate(1, Some(5)).unwrap();
    assert_eq!(skeleton.edge_count(), 0);

    let dag = to_dag(&skeleton).unwrap();
    assert_eq!(dag.sources(), vec![0]);
    assert_eq!(dag.sinks(), vec![0]);
}

#[test]
fn test_complete_er_graph() {
    let model =
        RandomGraphModel::configure(ModelKind::ErdosRenyi, &ModelParams::erdos_renyi(1.0)).unwrap();
    let dag = to_dag(&model.generate(6, Some(9)).unwrap()).unwrap();
    assert_eq!(dag.edge_count(), 15);
    assert_eq!(dag.sources(), vec![0]);
    assert_eq!(dag.sinks(), vec![5]);
}
