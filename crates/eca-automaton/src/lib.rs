//! Elementary cellular automata on a ring, with the data behind three views:
//! a space-time image, an activation-ratio series and a state-transition graph.
//!
//! ## Core Concepts
//!
//! - **Cell**: a binary value, dead (0) or alive (1)
//! - **State**: a fixed-width row of cells whose ends wrap around
//! - **RuleTable**: the next center cell for each of the 8 neighborhoods
//! - **StateSpace**: the rows of one simulation, oldest first
//! - **StateId**: a state read as a little-endian binary number
//! - **TransitionGraph**: one edge per simulated step, between state ids
//!
//! ## Pipeline
//!
//! ```text
//! rule index ──build_rule──▶ RuleTable
//! initial State ──simulate──▶ StateSpace ──▶ ImageView / RatioView
//! initial State ──simulate_network──▶ TransitionGraph ──▶ GraphView
//! ```
//!
//! ```
//! use eca_automaton::{build_rule, simulate, State};
//!
//! let initial: State = "0000100000".parse().unwrap();
//! let space = simulate(&initial, &build_rule(90).unwrap(), 20).unwrap();
//! assert_eq!(space.len(), 20);
//! ```

mod automaton;
pub mod config;
mod error;
mod hash;
mod network;
mod rule;
mod sample;
mod state;
pub mod views;

pub use automaton::{simulate, simulate_ratio, step, ElementaryAutomaton, Orbit, TickResult};
pub use config::{RuleRun, SimulationConfig};
pub use error::{AutomatonError, AutomatonResult};
pub use hash::{hash_state, StateId};
pub use network::{simulate_network, TransitionEdge, TransitionGraph};
pub use rule::{build_rule, Cell, Neighborhood, RuleIndex, RuleNumbering, RuleTable};
pub use sample::InitialStateSampler;
pub use state::{State, StateSpace};
pub use views::{GraphView, ImageView, RatioPoint, RatioView, Visualizations};
