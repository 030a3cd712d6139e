//! CLI command implementations.

pub mod rule;
pub mod simulate;

use anyhow::{Context, Result};
use eca_automaton::{InitialStateSampler, State};
use tracing::info;

use crate::config::Config;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

/// Everything a command needs: configuration, optional explicit start, format.
#[derive(Debug)]
pub struct RunContext {
    pub config: Config,
    pub initial: Option<String>,
    pub format: OutputFormat,
}

impl RunContext {
    pub fn new(config: Config, initial: Option<&str>, format: OutputFormat) -> Self {
        Self {
            config,
            initial: initial.map(str::to_string),
            format,
        }
    }

    /// The explicit `--initial` state, or one drawn from the seeded sampler.
    pub fn initial_state(&self) -> Result<State> {
        if let Some(bits) = &self.initial {
            return bits
                .parse()
                .with_context(|| format!("Invalid initial state: {bits}"));
        }

        let simulation = &self.config.simulation;
        let sampler =
            InitialStateSampler::new(simulation.width, simulation.activation_probability)
                .context("Invalid sampler settings")?;
        let state = sampler.sample(&mut self.config.rng())?;
        info!(
            seed = ?self.config.seed,
            initial = %state,
            "initial_state_sampled"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("md".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_explicit_initial_state_wins() {
        let ctx = RunContext::new(Config::default(), Some("0010"), OutputFormat::Text);
        assert_eq!(ctx.initial_state().unwrap().to_string(), "0010");

        let ctx = RunContext::new(Config::default(), Some("0020"), OutputFormat::Text);
        assert!(ctx.initial_state().is_err());
    }

    #[test]
    fn test_seeded_initial_state() {
        let config = Config {
            seed: Some(42),
            ..Default::default()
        };
        let ctx = RunContext::new(config, None, OutputFormat::Text);
        let a = ctx.initial_state().unwrap();
        let b = ctx.initial_state().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width(), 10);
    }
}
