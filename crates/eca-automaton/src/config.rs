//! Simulation parameters for the three views.
//!
//! Defaults reproduce the classic walkthrough: a random 10-cell start,
//! rule 90 for the image (20 steps) and the ratio series (100 steps), and
//! rule 105 for the transition network (500 steps).

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};
use crate::rule::{RuleIndex, RuleNumbering};

/// A rule paired with how many iterations to run it for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRun {
    pub rule: i64,
    pub iters: usize,
}

impl RuleRun {
    pub fn new(rule: i64, iters: usize) -> Self {
        Self { rule, iters }
    }

    /// Check the rule index and iteration count.
    pub fn validate(&self) -> AutomatonResult<()> {
        RuleIndex::new(self.rule)?;
        if self.iters == 0 {
            return Err(AutomatonError::InvalidIterations { iters: self.iters });
        }
        Ok(())
    }
}

/// Parameters for a full run of the image, ratio and network views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of cells in the sampled initial state.
    pub width: usize,

    /// Probability that a sampled cell starts alive.
    pub activation_probability: f64,

    /// How rule indices become rule tables.
    pub numbering: RuleNumbering,

    /// Space-time image.
    pub image: RuleRun,

    /// Activation ratio series.
    pub ratio: RuleRun,

    /// State-transition network.
    pub network: RuleRun,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 10,
            activation_probability: 0.5,
            numbering: RuleNumbering::Complement,
            image: RuleRun::new(90, 20),
            ratio: RuleRun::new(90, 100),
            network: RuleRun::new(105, 500),
        }
    }
}

impl SimulationConfig {
    /// Check every parameter before any simulation runs.
    pub fn validate(&self) -> AutomatonResult<()> {
        if self.width == 0 {
            return Err(AutomatonError::EmptyState);
        }
        if !(0.0..=1.0).contains(&self.activation_probability) {
            return Err(AutomatonError::InvalidProbability {
                probability: self.activation_probability,
            });
        }
        self.image.validate()?;
        self.ratio.validate()?;
        self.network.validate()
    }
}
