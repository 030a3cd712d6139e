//! The automaton engine: single steps, multi-step simulation and a stateful
//! runner with tick history.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::RuleTable;
use crate::state::{State, StateSpace};

/// Apply `rule` to every cell of `state` at once.
///
/// Every new cell is computed from the same pre-step state; the input is
/// left untouched and a new state of the same width is returned.
pub fn step(state: &State, rule: &RuleTable) -> State {
    let cells = (0..state.width())
        .map(|i| rule.lookup(state.neighborhood(i)))
        .collect();
    State::from_nonempty(cells)
}

/// Run `rule` from `initial`, returning `iters` rows (the initial state included).
pub fn simulate(initial: &State, rule: &RuleTable, iters: usize) -> AutomatonResult<StateSpace> {
    if iters == 0 {
        return Err(AutomatonError::InvalidIterations { iters });
    }
    info!(
        width = initial.width(),
        iters,
        wolfram_code = rule.wolfram_code().value(),
        "simulation_start"
    );

    let mut rows = Vec::with_capacity(iters);
    rows.push(initial.clone());
    for t in 1..iters {
        let next = step(&rows[t - 1], rule);
        rows.push(next);
    }

    info!(rows = rows.len(), "simulation_complete");
    Ok(StateSpace::from_rows(rows))
}

/// Fraction of live cells at each of the `iters` time steps.
pub fn simulate_ratio(initial: &State, rule: &RuleTable, iters: usize) -> AutomatonResult<Vec<f64>> {
    Ok(simulate(initial, rule, iters)?.activation_ratios())
}

/// Result of a single tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickResult {
    /// Tick number (0-indexed).
    pub tick: u64,

    /// Number of cells whose value changed.
    pub changed_cells: usize,

    /// Width of the state.
    pub width: usize,

    /// Fraction of live cells after this tick.
    pub activation_ratio: f64,

    /// Duration of the tick.
    pub duration: Duration,
}

impl TickResult {
    /// Check if any cell changed.
    pub fn had_changes(&self) -> bool {
        self.changed_cells > 0
    }

    /// Changed cells / width.
    pub fn change_rate(&self) -> f64 {
        self.changed_cells as f64 / self.width as f64
    }
}

/// Where a trajectory starts repeating itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orbit {
    /// Steps taken before entering the cycle.
    pub transient: usize,
    /// Length of the cycle (1 = fixed point).
    pub period: usize,
}

/// Stateful runner that keeps the current state and a history of ticks.
#[derive(Debug, Clone)]
pub struct ElementaryAutomaton {
    rule: RuleTable,
    initial: State,
    state: State,
    current_tick: u64,
    tick_history: Vec<TickResult>,
}

impl ElementaryAutomaton {
    /// Create an automaton positioned at `initial`.
    pub fn new(initial: State, rule: RuleTable) -> Self {
        Self {
            rule,
            state: initial.clone(),
            initial,
            current_tick: 0,
            tick_history: Vec::new(),
        }
    }

    /// The rule being applied.
    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    /// The state the automaton started from.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// The current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get current tick number.
    pub fn tick_count(&self) -> u64 {
        self.current_tick
    }

    /// Get tick history.
    pub fn tick_history(&self) -> &[TickResult] {
        &self.tick_history
    }

    /// Advance one step.
    pub fn tick(&mut self) -> TickResult {
        let started = Instant::now();

        let next = step(&self.state, &self.rule);
        let changed_cells = next.hamming_distance(&self.state);
        self.state = next;

        let result = TickResult {
            tick: self.current_tick,
            changed_cells,
            width: self.state.width(),
            activation_ratio: self.state.activation_ratio(),
            duration: started.elapsed(),
        };

        debug!(
            tick = result.tick,
            changed = result.changed_cells,
            ratio = result.activation_ratio,
            "automaton_tick_complete"
        );

        self.tick_history.push(result.clone());
        self.current_tick += 1;
        result
    }

    /// Run exactly N ticks.
    pub fn run_ticks(&mut self, n: usize) -> Vec<TickResult> {
        (0..n).map(|_| self.tick()).collect()
    }

    /// Return to the initial state and clear the history.
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
        self.current_tick = 0;
        self.tick_history.clear();
    }

    /// Follow the trajectory from the current state for up to `max_ticks`
    /// steps and report the first repeated state, if any.
    ///
    /// Does not advance the automaton.
    pub fn find_orbit(&self, max_ticks: usize) -> Option<Orbit> {
        let mut seen: HashMap<State, usize> = HashMap::new();
        let mut state = self.state.clone();

        for t in 0..=max_ticks {
            if let Some(&first) = seen.get(&state) {
                let orbit = Orbit {
                    transient: first,
                    period: t - first,
                };
                debug!(
                    transient = orbit.transient,
                    period = orbit.period,
                    "orbit_found"
                );
                return Some(orbit);
            }
            let next = step(&state, &self.rule);
            seen.insert(state, t);
            state = next;
        }

        None
    }
}
