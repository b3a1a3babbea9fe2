// tests/config.rs

use std::fs;

use tempfile::TempDir;

use randwire::config::{ConfigFile, load_and_validate, parse_str};
use randwire::errors::RandwireError;
use randwire::graph::{
    DEFAULT_MAX_ATTEMPTS, ModelParams, ModelSpec, NodeCounts, RandomGraphModel, Seeds,
    generate_batch, get_graphs,
};
use randwire::types::ModelKind;
use randwire_test_utils::builders::ConfigFileBuilder;

fn expect_config_error(toml: &str, needle: &str) {
    let raw = parse_str(toml).unwrap();
    match ConfigFile::try_from(raw) {
        Err(RandwireError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn test_load_full_config_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("randwire.toml");
    fs::write(
        &path,
        r#"
[model]
kind = "WS"
P = 0.75
K = 4

[generation]
max_attempts = 50

[batch]
graph_count = 3
node_counts = [16, 24, 32]
seeds = 7

[search]
trials = 20
seed = 1

[exec]
workers = 4
input_len = 8
"#,
    )
    .unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.model.kind(), ModelKind::WattsStrogatz);
    assert_eq!(cfg.model.max_attempts(), 50);
    assert!(matches!(cfg.model.spec(), ModelSpec::WattsStrogatz { k: 4, .. }));
    assert_eq!(cfg.batch.graph_count, 3);
    assert_eq!(cfg.batch.node_counts, NodeCounts::PerGraph(vec![16, 24, 32]));
    assert_eq!(cfg.batch.seeds, Some(Seeds::Base(7)));
    assert_eq!(cfg.search.trials, 20);
    assert_eq!(cfg.search.seed, Some(1));
    assert_eq!(cfg.exec.workers, 4);
    assert_eq!(cfg.exec.input_len, 8);
}

#[test]
fn test_only_model_section_is_required() {
    let raw = parse_str("[model]\nkind = \"BA\"\nM = 2\n").unwrap();
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(cfg.model.kind(), ModelKind::BarabasiAlbert);
    assert_eq!(cfg.model.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(cfg.batch.graph_count, 1);
    assert_eq!(cfg.batch.node_counts, NodeCounts::Uniform(32));
    assert_eq!(cfg.batch.seeds, None);
    assert_eq!(cfg.search.trials, 1);
    assert_eq!(cfg.search.seed, None);
    assert_eq!(cfg.exec.workers, 1);
    assert_eq!(cfg.exec.input_len, 4);

    assert!(parse_str("[batch]\ngraph_count = 2\n").is_err());
}

#[test]
fn test_per_graph_seed_list() {
    let raw = parse_str(
        "[model]\nkind = \"ER\"\nP = 0.5\n[batch]\ngraph_count = 2\nseeds = [10, 20]\n",
    )
    .unwrap();
    let cfg = ConfigFile::try_from(raw).unwrap();
    assert_eq!(cfg.batch.seeds, Some(Seeds::PerGraph(vec![10, 20])));
}

#[test]
fn test_model_parameters_sit_directly_in_model_section() {
    let ws = parse_str("[model]\nkind = \"WS\"\nP = 0.75\nK = 4\n").unwrap();
    assert_eq!(ws.model.kind, ModelKind::WattsStrogatz);
    assert_eq!(ws.model.params, ModelParams::watts_strogatz(4, 0.75));

    let ba = parse_str("[model]\nkind = \"BA\"\nM = 3\n").unwrap();
    assert_eq!(ba.model.params, ModelParams::barabasi_albert(3));

    // Parameters a model ignores are carried through as given.
    let er = parse_str("[model]\nkind = \"ER\"\nP = 0.2\nM = 7\n").unwrap();
    assert_eq!(er.model.params.p, Some(0.2));
    assert_eq!(er.model.params.m, Some(7));
    assert_eq!(er.model.params.k, None);
}

#[test]
fn test_unknown_model_kind_fails_to_parse() {
    match parse_str("[model]\nkind = \"XY\"\n") {
        Err(RandwireError::TomlError(_)) => {}
        other => panic!("Expected TomlError, got: {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    match load_and_validate(dir.path().join("absent.toml")) {
        Err(RandwireError::IoError(_)) => {}
        other => panic!("Expected IoError, got: {other:?}"),
    }
}

#[test]
fn test_model_parameters_are_validated() {
    let raw = parse_str("[model]\nkind = \"WS\"\nP = 0.5\nK = 3\n").unwrap();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(RandwireError::InvalidParameter(_))
    ));

    let raw = parse_str("[model]\nkind = \"ER\"\n").unwrap();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(RandwireError::InvalidParameter(_))
    ));
}

#[test]
fn test_section_values_are_validated() {
    let model = "[model]\nkind = \"ER\"\nP = 0.5\n";
    expect_config_error(
        &format!("{model}[generation]\nmax_attempts = 0\n"),
        "[generation].max_attempts",
    );
    expect_config_error(&format!("{model}[batch]\ngraph_count = 0\n"), "[batch].graph_count");
    expect_config_error(
        &format!("{model}[batch]\ngraph_count = 2\nnode_counts = [8, 8, 8]\n"),
        "[batch].node_counts",
    );
    expect_config_error(
        &format!("{model}[batch]\ngraph_count = 2\nnode_counts = [8, 0]\n"),
        "graph 1 has no nodes",
    );
    expect_config_error(
        &format!("{model}[batch]\ngraph_count = 3\nseeds = [1, 2]\n"),
        "[batch].seeds",
    );
    expect_config_error(&format!("{model}[search]\ntrials = 0\n"), "[search].trials");
    expect_config_error(&format!("{model}[exec]\nworkers = 0\n"), "[exec].workers");
    expect_config_error(&format!("{model}[exec]\ninput_len = 0\n"), "[exec].input_len");
}

#[test]
fn test_builder_config_drives_batch_generation() {
    let cfg = ConfigFileBuilder::new(ModelKind::BarabasiAlbert)
        .m(2)
        .graphs(3, NodeCounts::PerGraph(vec![5, 10, 15]))
        .seeds(Seeds::Base(100))
        .build();

    let graphs = generate_batch(
        &cfg.model,
        cfg.batch.graph_count,
        &cfg.batch.node_counts,
        cfg.batch.seeds.as_ref(),
    )
    .unwrap();
    let sizes: Vec<_> = graphs.iter().map(|g| g.node_count()).collect();
    assert_eq!(sizes, vec![5, 10, 15]);
}

#[test]
fn test_base_seed_matches_explicit_seed_list() {
    let params = ModelParams::watts_strogatz(4, 0.5);
    let counts = NodeCounts::Uniform(20);

    let from_base =
        get_graphs(ModelKind::WattsStrogatz, &params, 4, &counts, Some(&Seeds::Base(30))).unwrap();
    let from_list = get_graphs(
        ModelKind::WattsStrogatz,
        &params,
        4,
        &counts,
        Some(&Seeds::PerGraph(vec![30, 31, 32, 33])),
    )
    .unwrap();
    assert_eq!(from_base, from_list);

    let model = RandomGraphModel::configure(ModelKind::WattsStrogatz, &params).unwrap();
    let third = randwire::graph::to_dag(&model.generate(20, Some(32)).unwrap()).unwrap();
    assert_eq!(from_base[2], third);
}

#[test]
fn test_batch_rejects_zero_graphs() {
    let result = get_graphs(
        ModelKind::ErdosRenyi,
        &ModelParams::erdos_renyi(0.5),
        0,
        &NodeCounts::Uniform(8),
        None,
    );
    assert!(matches!(result, Err(RandwireError::InvalidParameter(_))));
}

#[test]
fn test_model_kind_parses_short_names() {
    assert_eq!("ws".parse::<ModelKind>().unwrap(), ModelKind::WattsStrogatz);
    assert_eq!(" BA ".parse::<ModelKind>().unwrap(), ModelKind::BarabasiAlbert);
    assert_eq!(ModelKind::ErdosRenyi.to_string(), "ER");
    assert!("GNP".parse::<ModelKind>().is_err());
}
