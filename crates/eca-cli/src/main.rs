//! eca - simulate elementary cellular automata from the command line.
//!
//! With no subcommand it runs the classic walkthrough: a random 10-cell
//! start, a rule 90 image over 20 steps, the rule 90 activation ratio over
//! 100 steps and the rule 105 transition network over 500 steps.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;
mod render;

use commands::{OutputFormat, RunContext};
use config::Config;

/// Elementary cellular automaton simulator.
///
/// Emits the data behind a space-time image, an activation-ratio plot and a
/// state-transition network.
#[derive(Parser, Debug)]
#[command(
    name = "eca",
    author,
    version,
    about = "Simulate elementary cellular automata and emit image, ratio and network views",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Seed for the random initial state.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Width of the random initial state.
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Probability that a random initial cell starts alive.
    #[arg(long, global = true)]
    probability: Option<f64>,

    /// Explicit initial state, e.g. `0001000` (skips random sampling).
    #[arg(long, global = true)]
    initial: Option<String>,

    /// Rule numbering: complement or wolfram.
    #[arg(long, global = true)]
    numbering: Option<String>,

    /// Output format: text or json.
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the image, ratio and network views (default command).
    Demo,

    /// Space-time image: one row per time step.
    Image {
        /// Rule index (0-255).
        #[arg(short, long, default_value_t = 90)]
        rule: i64,

        /// Number of rows, the initial state included.
        #[arg(short = 'n', long, default_value_t = 20)]
        iters: usize,
    },

    /// Fraction of live cells per time step.
    Ratio {
        /// Rule index (0-255).
        #[arg(short, long, default_value_t = 90)]
        rule: i64,

        /// Number of time steps, the initial state included.
        #[arg(short = 'n', long, default_value_t = 100)]
        iters: usize,
    },

    /// State-transition network in DOT format.
    Network {
        /// Rule index (0-255).
        #[arg(short, long, default_value_t = 105)]
        rule: i64,

        /// Number of simulated steps.
        #[arg(short = 'n', long, default_value_t = 500)]
        iters: usize,
    },

    /// Print the rule table for an index.
    Rule {
        /// Rule index (0-255).
        index: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Environment first, flags on top
    let mut config = Config::load()?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(width) = cli.width {
        config.simulation.width = width;
    }
    if let Some(probability) = cli.probability {
        config.simulation.activation_probability = probability;
    }
    if let Some(numbering) = &cli.numbering {
        config.simulation.numbering = config::parse_numbering(numbering)?;
    }

    let format: OutputFormat = cli.format.parse()?;
    let ctx = RunContext::new(config, cli.initial.as_deref(), format);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => commands::simulate::demo(&ctx)?,
        Commands::Image { rule, iters } => commands::simulate::image(&ctx, rule, iters)?,
        Commands::Ratio { rule, iters } => commands::simulate::ratio(&ctx, rule, iters)?,
        Commands::Network { rule, iters } => commands::simulate::network(&ctx, rule, iters)?,
        Commands::Rule { index } => commands::rule::execute(&ctx, index)?,
    }

    Ok(())
}
