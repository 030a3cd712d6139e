//! Integer identifiers for states.
//!
//! A state is read as a little-endian binary number: cell `i` contributes
//! `2^i` when alive. Ids are unbounded, so any width maps without
//! collisions. Within one run all states share a width, so equal ids mean
//! equal states.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AutomatonResult;
use crate::rule::Cell;
use crate::state::State;

/// Identifier of a state among all states of the same width.
///
/// Ordered numerically. Serialized as a JSON number when it fits in a
/// `u64` and as a decimal string otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StateId(BigUint);

impl StateId {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// The id as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Rebuild the state of `width` cells this id was computed from.
    ///
    /// Bits at or above `width` are ignored.
    pub fn to_state(&self, width: usize) -> AutomatonResult<State> {
        let bytes = self.0.to_bytes_le();
        let cells = (0..width)
            .map(|i| {
                let byte = bytes.get(i / 8).copied().unwrap_or(0);
                Cell::from_bit(byte >> (i % 8))
            })
            .collect();
        State::new(cells)
    }
}

impl From<u64> for StateId {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for StateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_u64() {
            Some(small) => serializer.serialize_u64(small),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for StateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StateIdVisitor;

        impl Visitor<'_> for StateIdVisitor {
            type Value = StateId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or a decimal string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<StateId, E> {
                Ok(StateId::from(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<StateId, E> {
                value
                    .parse::<BigUint>()
                    .map(StateId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(StateIdVisitor)
    }
}

/// Compute `Σ 2^i · state[i]`.
pub fn hash_state(state: &State) -> StateId {
    let mut bytes = vec![0u8; state.width().div_ceil(8)];
    for i in state.active_indices() {
        bytes[i / 8] |= 1 << (i % 8);
    }
    StateId(BigUint::from_bytes_le(&bytes))
}
