// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod schedule;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_and_validate;
use crate::exec::{DagExecutor, MeanAggregator, ParallelExecutor, SumUnit, uniform_units};
use crate::graph::generate_batch;
use crate::schedule::{ReorderOptimizer, Schedule, SearchOutcome};
use crate::types::EmitFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - batch generation
/// - reorder search per graph
/// - (optional) execution of the chosen schedule
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let optimizer = ReorderOptimizer::new(args.trials.unwrap_or(cfg.search.trials))?;
    let trials = optimizer.trials();
    let mut search_rng = match cfg.search.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let graphs = generate_batch(
        &cfg.model,
        cfg.batch.graph_count,
        &cfg.batch.node_counts,
        cfg.batch.seeds.as_ref(),
    )?;
    info!(graphs = graphs.len(), trials, "batch generated; planning schedules");

    for (index, graph) in graphs.iter().enumerate() {
        let outcome = optimizer.search(graph, &mut search_rng)?;

        match args.emit {
            EmitFormat::Text => print_summary(index, &outcome, trials),
            EmitFormat::Json => println!("{}", serde_json::to_string(outcome.best.graph())?),
        }

        if args.no_exec {
            continue;
        }

        let output = execute(outcome.best, &cfg).await?;
        if args.emit == EmitFormat::Text {
            println!("  output: {output:?}");
        }
    }

    Ok(())
}

/// Run a schedule with the demo compute unit over a ones vector.
async fn execute(schedule: Schedule, cfg: &ConfigFile) -> Result<Vec<f32>> {
    let node_count = schedule.graph().node_count();
    let units = uniform_units(SumUnit, node_count);
    let input = vec![1.0f32; cfg.exec.input_len];

    let output = if cfg.exec.workers > 1 {
        let executor = ParallelExecutor::new(Arc::new(schedule), units, cfg.exec.workers)?;
        executor.run(Arc::new(input), &MeanAggregator).await?
    } else {
        DagExecutor::new(&schedule, &units)?.run(&input, &MeanAggregator)?
    };

    debug!(node_count, workers = cfg.exec.workers, "schedule executed");
    Ok(output)
}

fn print_summary(index: usize, outcome: &SearchOutcome, trials: usize) {
    let graph = outcome.best.graph();
    println!(
        "graph {index}: {} nodes, {} edges, {} sources, {} sinks",
        graph.node_count(),
        graph.edge_count(),
        graph.sources().len(),
        graph.sinks().len()
    );
    println!(
        "  peak live: {} -> {} (trial {} of {trials})",
        outcome.initial_peak, outcome.best_peak, outcome.best_trial
    );
    println!("  order: {:?}", outcome.best.order().nodes());
}

/// Simple dry-run output: print the validated configuration.
fn print_dry_run(cfg: &ConfigFile) {
    println!("randwire dry-run");
    println!("  model = {} {:?}", cfg.model.kind(), cfg.model.spec());
    println!("  generation.max_attempts = {}", cfg.model.max_attempts());
    println!("  batch.graph_count = {}", cfg.batch.graph_count);
    println!("  batch.node_counts = {:?}", cfg.batch.node_counts);
    match cfg.batch.seeds {
        Some(ref seeds) => println!("  batch.seeds = {seeds:?}"),
        None => println!("  batch.seeds = <entropy>"),
    }
    println!("  search.trials = {}", cfg.search.trials);
    if let Some(seed) = cfg.search.seed {
        println!("  search.seed = {seed}");
    }
    println!("  exec.workers = {}", cfg.exec.workers);
    println!("  exec.input_len = {}", cfg.exec.input_len);

    debug!("dry-run complete (no generation)");
}
