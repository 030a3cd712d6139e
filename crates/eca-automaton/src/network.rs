//! State-transition graphs.
//!
//! Each simulated step adds an edge from the id of the state before the step
//! to the id of the state after it. Nodes appear the first time an edge
//! references them. Repeated transitions are kept as one edge whose weight
//! counts how often it was observed.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::automaton::step;
use crate::error::{AutomatonError, AutomatonResult};
use crate::hash::{hash_state, StateId};
use crate::rule::RuleTable;
use crate::state::State;

/// An observed transition between two states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub from: StateId,
    pub to: StateId,
    /// How many simulated steps took this transition.
    pub count: usize,
}

/// Directed graph over [`StateId`]s built from a simulation.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    graph: DiGraph<StateId, usize>,
    id_to_index: HashMap<StateId, NodeIndex>,
}

impl TransitionGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one transition, creating its endpoints if needed.
    pub fn add_transition(&mut self, from: StateId, to: StateId) {
        let from = self.node_for(from);
        let to = self.node_for(to);
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
    }

    fn node_for(&mut self, id: StateId) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.id_to_index.insert(id, idx);
        idx
    }

    fn edge_between(&self, from: &StateId, to: &StateId) -> Option<usize> {
        let from = *self.id_to_index.get(from)?;
        let to = *self.id_to_index.get(to)?;
        self.graph.find_edge(from, to).map(|edge| self.graph[edge])
    }

    /// Number of distinct states.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct transitions.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total transitions recorded, repeats included.
    pub fn transition_count(&self) -> usize {
        self.graph.edge_weights().sum()
    }

    /// States in the graph, in insertion order.
    pub fn nodes(&self) -> Vec<StateId> {
        self.graph.node_weights().cloned().collect()
    }

    /// Distinct transitions with their multiplicity, in insertion order.
    pub fn edges(&self) -> Vec<TransitionEdge> {
        self.graph
            .edge_references()
            .map(|edge| TransitionEdge {
                from: self.graph[edge.source()].clone(),
                to: self.graph[edge.target()].clone(),
                count: *edge.weight(),
            })
            .collect()
    }

    /// Check if the graph has a node for `id`.
    pub fn contains_node(&self, id: &StateId) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Check if `from -> to` was observed.
    pub fn contains_edge(&self, from: &StateId, to: &StateId) -> bool {
        self.edge_between(from, to).is_some()
    }

    /// Observed count for `from -> to`.
    pub fn transition_weight(&self, from: &StateId, to: &StateId) -> Option<usize> {
        self.edge_between(from, to)
    }

    /// The state `id` moved to, if it was ever stepped.
    ///
    /// A deterministic rule gives every state at most one successor.
    pub fn successor(&self, id: &StateId) -> Option<StateId> {
        let idx = *self.id_to_index.get(id)?;
        self.graph
            .neighbors(idx)
            .next()
            .map(|next| self.graph[next].clone())
    }

    /// Cycles of the graph, each listed from its smallest id.
    ///
    /// A cycle is either a strongly connected component with more than one
    /// state or a single state with a self-loop.
    pub fn attractors(&self) -> Vec<Vec<StateId>> {
        let mut cycles: Vec<Vec<StateId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.find_edge(component[0], component[0]).is_some()
            })
            .map(|component| {
                let mut ids: Vec<StateId> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Render in Graphviz DOT format, nodes labelled with their ids and
    /// edges with their counts.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}

/// Step `initial` under `rule` for `iters` steps, recording each
/// `hash(before) -> hash(after)` pair.
///
/// Only the hashed endpoints of each step are kept; the rows themselves are
/// discarded.
pub fn simulate_network(
    initial: &State,
    rule: &RuleTable,
    iters: usize,
) -> AutomatonResult<TransitionGraph> {
    if iters == 0 {
        return Err(AutomatonError::InvalidIterations { iters });
    }
    info!(
        width = initial.width(),
        iters,
        wolfram_code = rule.wolfram_code().value(),
        "network_simulation_start"
    );

    let mut graph = TransitionGraph::new();
    let mut state = initial.clone();
    let mut before = hash_state(&state);

    for _ in 0..iters {
        state = step(&state, rule);
        let after = hash_state(&state);
        graph.add_transition(before, after.clone());
        before = after;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "network_simulation_complete"
    );
    Ok(graph)
}
