//! Automaton states and their evolution over time.
//!
//! ```text
//! State      = [Cell; W]            // one row, indices arranged in a ring
//! StateSpace = [State; iters]       // row 0 = initial, row t = step(row t-1)
//! ```
//!
//! Both are immutable values: stepping produces a new `State` instead of
//! rewriting cells in place.

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::{Cell, Neighborhood};

/// A fixed-width row of cells arranged in a ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct State {
    cells: Vec<Cell>,
}

impl State {
    /// Create a state from its cells. Fails on an empty row.
    pub fn new(cells: Vec<Cell>) -> AutomatonResult<Self> {
        if cells.is_empty() {
            return Err(AutomatonError::EmptyState);
        }
        Ok(Self { cells })
    }

    /// Caller guarantees `cells` is non-empty.
    pub(crate) fn from_nonempty(cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// Create a state from 0/1 values.
    pub fn from_bits(bits: &[u8]) -> AutomatonResult<Self> {
        let cells = bits
            .iter()
            .map(|&bit| Cell::try_from(bit))
            .collect::<AutomatonResult<Vec<_>>>()?;
        Self::new(cells)
    }

    /// All-dead state of the given width.
    pub fn zeros(width: usize) -> AutomatonResult<Self> {
        Self::new(vec![Cell::Dead; width])
    }

    /// All-alive state of the given width.
    pub fn ones(width: usize) -> AutomatonResult<Self> {
        Self::new(vec![Cell::Alive; width])
    }

    /// A single live cell at `width / 2`, everything else dead.
    pub fn single_center(width: usize) -> AutomatonResult<Self> {
        let mut cells = vec![Cell::Dead; width];
        if let Some(center) = cells.get_mut(width / 2) {
            *center = Cell::Alive;
        }
        Self::new(cells)
    }

    /// Number of cells (W).
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// The cells, index 0 first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `index`, wrapping around the ring.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index % self.cells.len()]
    }

    /// Neighborhood `(state[i-1], state[i], state[i+1])` with ring wrap.
    pub fn neighborhood(&self, index: usize) -> Neighborhood {
        let width = self.cells.len();
        let index = index % width;
        Neighborhood::new(
            self.cells[(index + width - 1) % width],
            self.cells[index],
            self.cells[(index + 1) % width],
        )
    }

    /// Number of live cells.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Fraction of live cells, in `[0, 1]`.
    pub fn activation_ratio(&self) -> f64 {
        self.active_count() as f64 / self.width() as f64
    }

    /// Indices of the live cells.
    pub fn active_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of positions where `self` and `other` differ.
    pub fn hamming_distance(&self, other: &State) -> usize {
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// The cells as 0/1 values.
    pub fn to_bits(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.value()).collect()
    }
}

impl Not for &State {
    type Output = State;

    fn not(self) -> State {
        State {
            cells: self.cells.iter().map(|&c| !c).collect(),
        }
    }
}

impl TryFrom<Vec<Cell>> for State {
    type Error = AutomatonError;

    fn try_from(cells: Vec<Cell>) -> AutomatonResult<Self> {
        Self::new(cells)
    }
}

impl From<State> for Vec<Cell> {
    fn from(state: State) -> Self {
        state.cells
    }
}

impl FromStr for State {
    type Err = AutomatonError;

    /// Parse a string of `0` and `1` characters.
    fn from_str(s: &str) -> AutomatonResult<Self> {
        let cells = s
            .trim()
            .chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(Cell::Dead),
                '1' => Ok(Cell::Alive),
                _ => Err(AutomatonError::ParseState {
                    character,
                    position,
                }),
            })
            .collect::<AutomatonResult<Vec<_>>>()?;
        Self::new(cells)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

/// The rows produced by one simulation, oldest first.
///
/// Built once per simulation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSpace {
    rows: Vec<State>,
}

impl StateSpace {
    pub(crate) fn from_rows(rows: Vec<State>) -> Self {
        debug_assert!(!rows.is_empty());
        Self { rows }
    }

    /// Number of time steps (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a state space holds at least the initial state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of every row.
    pub fn width(&self) -> usize {
        self.rows.first().map(State::width).unwrap_or(0)
    }

    /// Row `t`, if present.
    pub fn get(&self, t: usize) -> Option<&State> {
        self.rows.get(t)
    }

    /// All rows.
    pub fn rows(&self) -> &[State] {
        &self.rows
    }

    /// The initial state.
    pub fn initial(&self) -> &State {
        &self.rows[0]
    }

    /// The last simulated state.
    pub fn last(&self) -> &State {
        &self.rows[self.rows.len() - 1]
    }

    /// Iterate rows in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.rows.iter()
    }

    /// Fraction of live cells per row.
    pub fn activation_ratios(&self) -> Vec<f64> {
        self.rows.iter().map(State::activation_ratio).collect()
    }

    /// Rows as 0/1 values, time along the outer axis.
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.rows.iter().map(State::to_bits).collect()
    }
}

impl<'a> IntoIterator for &'a StateSpace {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
