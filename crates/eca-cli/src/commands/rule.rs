//! Rule table inspection.

use anyhow::Result;
use eca_automaton::{RuleIndex, RuleNumbering};
use serde::Serialize;

use super::{OutputFormat, RunContext};

#[derive(Debug, Serialize)]
struct RuleSummary {
    index: u8,
    numbering: RuleNumbering,
    wolfram_code: u8,
    /// Outputs for neighborhoods 000..111.
    outputs: Vec<u8>,
}

/// Print the table `index` maps to under the configured numbering.
pub fn execute(ctx: &RunContext, index: i64) -> Result<()> {
    let index = RuleIndex::new(index)?;
    let numbering = ctx.config.simulation.numbering;
    let table = numbering.table(index);

    match ctx.format {
        OutputFormat::Json => {
            let summary = RuleSummary {
                index: index.value(),
                numbering,
                wolfram_code: table.wolfram_code().value(),
                outputs: table.outputs().iter().map(|c| c.value()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!(
                "rule {} ({:?} numbering, wolfram code {})",
                index,
                numbering,
                table.wolfram_code()
            );
            print!("{table}");
        }
    }
    Ok(())
}
