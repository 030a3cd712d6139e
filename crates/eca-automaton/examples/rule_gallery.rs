//! A gallery of well-known elementary rules grown from a single cell.
//!
//! Each rule is drawn with canonical Wolfram numbering and with the
//! complement numbering, together with the period of the trajectory.
//!
//! Run with:
//! ```bash
//! cargo run --example rule_gallery -p eca-automaton
//! ```

use eca_automaton::{
    simulate, ElementaryAutomaton, RuleIndex, RuleNumbering, State, StateSpace,
};

// =============================================================================
// Rendering
// =============================================================================

fn draw(space: &StateSpace) {
    for row in space {
        let line: String = row
            .cells()
            .iter()
            .map(|c| if c.is_alive() { '█' } else { ' ' })
            .collect();
        println!("│{line}│");
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let width = 31;
    let generations = 16;

    let rules = [
        (30, "chaotic, used as a random generator"),
        (90, "Sierpinski triangle"),
        (105, "complement of rule 150"),
        (110, "Turing complete"),
        (184, "traffic flow"),
    ];

    for numbering in [RuleNumbering::Wolfram, RuleNumbering::Complement] {
        // Complement tables paint the picture in negative, so start from a
        // single dead cell in a live background.
        let initial = match numbering {
            RuleNumbering::Wolfram => State::single_center(width)?,
            RuleNumbering::Complement => !&State::single_center(width)?,
        };

        println!("=== {numbering:?} numbering ===");
        for (index, description) in rules {
            let table = numbering.table(RuleIndex::new(index)?);
            let space = simulate(&initial, &table, generations)?;

            println!();
            println!(
                "Rule {index} ({description}), wolfram code {}",
                table.wolfram_code()
            );
            draw(&space);

            let automaton = ElementaryAutomaton::new(initial.clone(), table);
            match automaton.find_orbit(1 << 12) {
                Some(orbit) => println!(
                    "  enters a cycle of period {} after {} steps",
                    orbit.period, orbit.transient
                ),
                None => println!("  no repeat within 4096 steps"),
            }
        }
        println!();
    }

    Ok(())
}
