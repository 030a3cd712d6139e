//! CLI configuration management.
//!
//! Defaults come from [`SimulationConfig`], are overridden by environment
//! variables (a `.env` file is honored), and finally by command-line flags.

use anyhow::{Context, Result};
use eca_automaton::{RuleNumbering, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Application-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Seed for the initial-state sampler; `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Parameters of the three views.
    pub simulation: SimulationConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(seed) = std::env::var("ECA_SEED") {
            config.seed = Some(
                seed.parse()
                    .with_context(|| format!("Invalid ECA_SEED: {seed}"))?,
            );
        }
        if let Ok(width) = std::env::var("ECA_WIDTH") {
            config.simulation.width = width
                .parse()
                .with_context(|| format!("Invalid ECA_WIDTH: {width}"))?;
        }
        if let Ok(probability) = std::env::var("ECA_ACTIVATION_PROBABILITY") {
            config.simulation.activation_probability = probability
                .parse()
                .with_context(|| format!("Invalid ECA_ACTIVATION_PROBABILITY: {probability}"))?;
        }
        if let Ok(numbering) = std::env::var("ECA_NUMBERING") {
            config.simulation.numbering = parse_numbering(&numbering)?;
        }

        Ok(config)
    }

    /// Random generator for the initial state.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Parse `complement` or `wolfram`.
pub fn parse_numbering(s: &str) -> Result<RuleNumbering> {
    match s.to_lowercase().as_str() {
        "complement" => Ok(RuleNumbering::Complement),
        "wolfram" => Ok(RuleNumbering::Wolfram),
        _ => anyhow::bail!("Unknown numbering: {}. Use 'complement' or 'wolfram'", s),
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_parse_numbering() {
        assert_eq!(parse_numbering("Wolfram").unwrap(), RuleNumbering::Wolfram);
        assert_eq!(
            parse_numbering("complement").unwrap(),
            RuleNumbering::Complement
        );
        assert!(parse_numbering("gray").is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config {
            seed: Some(9),
            ..Default::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
