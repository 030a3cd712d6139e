//! Rule tables for elementary cellular automata.
//!
//! An elementary rule maps each of the 8 possible neighborhoods
//! `(left, center, right)` to the next value of the center cell. Rules are
//! identified by a [`RuleIndex`] in `0..=255`, and [`build_rule`] turns an
//! index into a total [`RuleTable`].

use std::collections::HashMap;
use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AutomatonError, AutomatonResult};

/// A single binary cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    /// Inactive cell (0).
    #[default]
    Dead = 0,
    /// Active cell (1).
    Alive = 1,
}

impl Cell {
    /// Build a cell from the lowest bit of `bit`.
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    /// Check if the cell is active.
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Numeric value (0 or 1).
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl Not for Cell {
    type Output = Cell;

    fn not(self) -> Cell {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}

impl TryFrom<u8> for Cell {
    type Error = AutomatonError;

    fn try_from(value: u8) -> AutomatonResult<Self> {
        match value {
            0 => Ok(Cell::Dead),
            1 => Ok(Cell::Alive),
            _ => Err(AutomatonError::InvalidCell { value }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The three cells a rule looks at: left neighbor, the cell itself, right neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighborhood {
    pub left: Cell,
    pub center: Cell,
    pub right: Cell,
}

impl Neighborhood {
    /// All 8 neighborhoods in canonical order: `000, 001, ..., 111`.
    pub const ALL: [Neighborhood; 8] = [
        Self::from_index(0),
        Self::from_index(1),
        Self::from_index(2),
        Self::from_index(3),
        Self::from_index(4),
        Self::from_index(5),
        Self::from_index(6),
        Self::from_index(7),
    ];

    /// Create a neighborhood from its three cells.
    pub const fn new(left: Cell, center: Cell, right: Cell) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    /// Decode a canonical index (left neighbor is the most significant bit).
    pub const fn from_index(index: u8) -> Self {
        Self::new(
            Cell::from_bit(index >> 2),
            Cell::from_bit(index >> 1),
            Cell::from_bit(index),
        )
    }

    /// Position of this neighborhood in canonical order (0..8).
    pub fn index(&self) -> usize {
        (self.left.value() as usize) << 2
            | (self.center.value() as usize) << 1
            | self.right.value() as usize
    }

    /// The neighborhood with every cell flipped.
    pub fn inverted(&self) -> Self {
        Self::new(!self.left, !self.center, !self.right)
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.center, self.right)
    }
}

/// Identifier of one of the 256 elementary rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleIndex(u8);

impl RuleIndex {
    /// Validate an arbitrary integer as a rule index.
    pub fn new(index: i64) -> AutomatonResult<Self> {
        u8::try_from(index)
            .map(Self)
            .map_err(|_| AutomatonError::InvalidRuleIndex { index })
    }

    /// The numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for RuleIndex {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl TryFrom<i64> for RuleIndex {
    type Error = AutomatonError;

    fn try_from(index: i64) -> AutomatonResult<Self> {
        Self::new(index)
    }
}

impl fmt::Display for RuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a rule index is turned into a rule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleNumbering {
    /// Complement of the index, most significant bit assigned to `000`.
    /// See [`RuleTable::from_index`].
    #[default]
    Complement,
    /// Canonical Wolfram code: bit `k` of the index is the output for
    /// neighborhood `k`.
    Wolfram,
}

impl RuleNumbering {
    /// Build the table for `index` under this numbering.
    pub fn table(self, index: RuleIndex) -> RuleTable {
        match self {
            RuleNumbering::Complement => RuleTable::from_index(index),
            RuleNumbering::Wolfram => RuleTable::wolfram(index),
        }
    }
}

/// A total mapping from every [`Neighborhood`] to the next [`Cell`].
///
/// Outputs are stored by canonical neighborhood index, so every table is
/// total by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleTable {
    outputs: [Cell; 8],
}

impl RuleTable {
    /// Create a table from outputs listed in canonical neighborhood order.
    pub fn new(outputs: [Cell; 8]) -> Self {
        Self { outputs }
    }

    /// Build the table for a rule index.
    ///
    /// Takes `255 - index`, writes it as 8 bits most significant first, and
    /// assigns the i-th bit to the i-th neighborhood in canonical order.
    /// The result is the color conjugate of the Wolfram rule with the same
    /// number: `from_index(n) == wolfram(n).conjugate()`.
    pub fn from_index(index: RuleIndex) -> Self {
        let complement = 255 - index.value();
        let mut outputs = [Cell::Dead; 8];
        for (i, slot) in outputs.iter_mut().enumerate() {
            *slot = Cell::from_bit(complement >> (7 - i));
        }
        Self { outputs }
    }

    /// Build the table for a canonical Wolfram code.
    pub fn wolfram(index: RuleIndex) -> Self {
        let code = index.value();
        let mut outputs = [Cell::Dead; 8];
        for (k, slot) in outputs.iter_mut().enumerate() {
            *slot = Cell::from_bit(code >> k);
        }
        Self { outputs }
    }

    /// Build a table from an explicit mapping, which must cover all 8 neighborhoods.
    pub fn from_mapping(mapping: &HashMap<Neighborhood, Cell>) -> AutomatonResult<Self> {
        let mut outputs = [Cell::Dead; 8];
        for key in Neighborhood::ALL {
            outputs[key.index()] = *mapping
                .get(&key)
                .ok_or(AutomatonError::MalformedRuleTable { key })?;
        }
        Ok(Self { outputs })
    }

    /// Next value of the center cell for `key`.
    pub fn lookup(&self, key: Neighborhood) -> Cell {
        self.outputs[key.index()]
    }

    /// Outputs in canonical neighborhood order.
    pub fn outputs(&self) -> &[Cell; 8] {
        &self.outputs
    }

    /// Iterate `(neighborhood, output)` pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Neighborhood, Cell)> + '_ {
        Neighborhood::ALL
            .into_iter()
            .map(move |key| (key, self.lookup(key)))
    }

    /// The rule obtained by swapping the roles of 0 and 1.
    pub fn conjugate(&self) -> Self {
        let mut outputs = [Cell::Dead; 8];
        for (k, slot) in outputs.iter_mut().enumerate() {
            *slot = !self.outputs[7 - k];
        }
        Self { outputs }
    }

    /// The Wolfram code describing this table.
    pub fn wolfram_code(&self) -> RuleIndex {
        let code = self
            .outputs
            .iter()
            .enumerate()
            .fold(0u8, |acc, (k, cell)| acc | cell.value() << k);
        RuleIndex(code)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, output) in self.entries() {
            writeln!(f, "{key} -> {output}")?;
        }
        Ok(())
    }
}

/// Build the rule table for `rule_index`, rejecting values outside `0..=255`.
pub fn build_rule(rule_index: i64) -> AutomatonResult<RuleTable> {
    let index = RuleIndex::new(rule_index)?;
    let table = RuleTable::from_index(index);
    debug!(
        rule = rule_index,
        wolfram_code = table.wolfram_code().value(),
        "rule_table_built"
    );
    Ok(table)
}
