//! Random initial states.
//!
//! The generator is always passed in, so a seeded `StdRng` reproduces the
//! same initial state run after run.

use rand::distr::{Bernoulli, Distribution};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::Cell;
use crate::state::State;

/// Draws states cell by cell from a biased coin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialStateSampler {
    width: usize,
    activation_probability: f64,
}

impl InitialStateSampler {
    /// Create a sampler for `width` cells, each alive with `activation_probability`.
    pub fn new(width: usize, activation_probability: f64) -> AutomatonResult<Self> {
        if width == 0 {
            return Err(AutomatonError::EmptyState);
        }
        if !(0.0..=1.0).contains(&activation_probability) {
            return Err(AutomatonError::InvalidProbability {
                probability: activation_probability,
            });
        }
        Ok(Self {
            width,
            activation_probability,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn activation_probability(&self) -> f64 {
        self.activation_probability
    }

    /// Draw one state.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> AutomatonResult<State> {
        let coin = Bernoulli::new(self.activation_probability).map_err(|_| {
            AutomatonError::InvalidProbability {
                probability: self.activation_probability,
            }
        })?;
        let cells = (0..self.width)
            .map(|_| Cell::from(coin.sample(rng)))
            .collect();
        State::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let sampler = InitialStateSampler::new(10, 0.5).unwrap();
        let a = sampler.sample(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = sampler.sample(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width(), 10);
    }

    #[test]
    fn test_certain_probabilities() {
        let mut rng = StdRng::seed_from_u64(7);
        let all_dead = InitialStateSampler::new(16, 0.0).unwrap();
        assert_eq!(all_dead.sample(&mut rng).unwrap().active_count(), 0);
        let all_alive = InitialStateSampler::new(16, 1.0).unwrap();
        assert_eq!(all_alive.sample(&mut rng).unwrap().active_count(), 16);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(matches!(
            InitialStateSampler::new(0, 0.5),
            Err(AutomatonError::EmptyState)
        ));
        assert!(matches!(
            InitialStateSampler::new(10, 1.5),
            Err(AutomatonError::InvalidProbability { .. })
        ));
        assert!(matches!(
            InitialStateSampler::new(10, f64::NAN),
            Err(AutomatonError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_bias_is_roughly_respected() {
        let sampler = InitialStateSampler::new(10_000, 0.25).unwrap();
        let state = sampler.sample(&mut StdRng::seed_from_u64(1)).unwrap();
        let ratio = state.activation_ratio();
        assert!((0.2..0.3).contains(&ratio), "ratio was {ratio}");
    }
}
