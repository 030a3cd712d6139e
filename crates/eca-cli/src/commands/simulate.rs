//! Simulation commands: the full walkthrough and the three single views.

use anyhow::{Context, Result};
use eca_automaton::views::{image_view, ratio_view};
use eca_automaton::{simulate_network, GraphView, RuleIndex, RuleTable, Visualizations};
use serde::Serialize;
use tracing::info;

use super::{OutputFormat, RunContext};
use crate::render;

/// Run all three views from one sampled (or explicit) initial state.
pub fn demo(ctx: &RunContext) -> Result<()> {
    let initial = ctx.initial_state()?;
    let simulation = &ctx.config.simulation;
    let views = Visualizations::generate(simulation, &initial)
        .context("Failed to generate visualizations")?;

    match ctx.format {
        OutputFormat::Json => println!("{}", views.to_json()?),
        OutputFormat::Text => {
            println!("# initial state: {}", views.initial);
            println!();
            println!(
                "# image: rule {}, {} steps",
                simulation.image.rule, simulation.image.iters
            );
            print!("{}", render::image(&views.image));
            println!();
            println!(
                "# activation ratio: rule {}, {} steps",
                simulation.ratio.rule, simulation.ratio.iters
            );
            print!("{}", render::ratio(&views.ratio));
            println!();
            println!(
                "# network: rule {}, {} steps, {} states, {} distinct transitions",
                simulation.network.rule,
                simulation.network.iters,
                views.graph.node_count(),
                views.graph.edge_count()
            );
            print!("{}", views.graph.to_dot());
        }
    }

    Ok(())
}

/// Space-time image for one rule.
pub fn image(ctx: &RunContext, rule: i64, iters: usize) -> Result<()> {
    let initial = ctx.initial_state()?;
    let table = rule_table(ctx, rule)?;
    let view = image_view(&initial, &table, iters).context("Simulation failed")?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{}", render::image(&view)),
    }
    Ok(())
}

/// Activation ratio series for one rule.
pub fn ratio(ctx: &RunContext, rule: i64, iters: usize) -> Result<()> {
    let initial = ctx.initial_state()?;
    let table = rule_table(ctx, rule)?;
    let view = ratio_view(&initial, &table, iters).context("Simulation failed")?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{}", render::ratio(&view)),
    }
    Ok(())
}

#[derive(Serialize)]
struct NetworkOutput<'a> {
    initial: String,
    rule: i64,
    iters: usize,
    #[serde(flatten)]
    graph: &'a GraphView,
}

/// Transition network for one rule.
pub fn network(ctx: &RunContext, rule: i64, iters: usize) -> Result<()> {
    let initial = ctx.initial_state()?;
    let table = rule_table(ctx, rule)?;
    let graph = simulate_network(&initial, &table, iters).context("Simulation failed")?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        attractors = graph.attractors().len(),
        "network_built"
    );

    match ctx.format {
        OutputFormat::Json => {
            let view = GraphView::from_graph(&graph);
            let output = NetworkOutput {
                initial: initial.to_string(),
                rule,
                iters,
                graph: &view,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print!("{}", graph.to_dot()),
    }
    Ok(())
}

fn rule_table(ctx: &RunContext, rule: i64) -> Result<RuleTable> {
    let index = RuleIndex::new(rule)?;
    Ok(ctx.config.simulation.numbering.table(index))
}
