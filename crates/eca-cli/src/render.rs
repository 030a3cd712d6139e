//! Plain-text renderings of the views.

use std::fmt::Write;

use eca_automaton::views::WHITE;
use eca_automaton::{ImageView, RatioView};

const LIVE: char = '█';
const DEAD: char = '·';

/// One text line per time step, live cells drawn as blocks.
pub fn image(view: &ImageView) -> String {
    let mut out = String::with_capacity(view.height * (view.width + 1) * 3);
    for row in &view.pixels {
        out.extend(row.iter().map(|&p| if p == WHITE { LIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

/// `step<TAB>ratio` lines.
pub fn ratio(view: &RatioView) -> String {
    let mut out = String::new();
    for point in &view.points {
        let _ = writeln!(out, "{}\t{:.4}", point.step, point.ratio);
    }
    out
}
