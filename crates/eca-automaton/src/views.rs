//! Data handed to rendering collaborators.
//!
//! - [`ImageView`]: rows = time, columns = position, grayscale pixels.
//! - [`RatioView`]: `(step, ratio)` points for a line plot.
//! - [`GraphView`]: node and edge lists for a graph layout.
//!
//! [`Visualizations::generate`] runs the three simulations behind the views.
//! They are independent runs from the same initial state; the network view
//! does not reuse the rows of the image or ratio runs.

use serde::Serialize;
use tracing::info;

use crate::automaton::{simulate, simulate_ratio};
use crate::config::{RuleRun, SimulationConfig};
use crate::error::AutomatonResult;
use crate::hash::StateId;
use crate::network::{simulate_network, TransitionEdge, TransitionGraph};
use crate::rule::{RuleIndex, RuleNumbering, RuleTable};
use crate::state::{State, StateSpace};

/// Pixel value of a dead cell.
pub const BLACK: u8 = 0;
/// Pixel value of a live cell.
pub const WHITE: u8 = 255;

/// A grayscale space-time image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub width: usize,
    pub height: usize,
    /// `pixels[t][i]` is cell `i` at time `t`.
    pub pixels: Vec<Vec<u8>>,
}

impl ImageView {
    pub fn from_state_space(space: &StateSpace) -> Self {
        let pixels = space
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .map(|c| if c.is_alive() { WHITE } else { BLACK })
                    .collect()
            })
            .collect();
        Self {
            width: space.width(),
            height: space.len(),
            pixels,
        }
    }

    /// Pixel at time `row`, position `col`.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// One point of the ratio series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioPoint {
    pub step: usize,
    pub ratio: f64,
}

/// Activation ratio over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioView {
    pub points: Vec<RatioPoint>,
}

impl RatioView {
    pub fn from_ratios(ratios: &[f64]) -> Self {
        let points = ratios
            .iter()
            .enumerate()
            .map(|(step, &ratio)| RatioPoint { step, ratio })
            .collect();
        Self { points }
    }

    /// Ratios in time order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ratio).collect()
    }

    /// Mean ratio over the whole series.
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.ratio).sum::<f64>() / self.points.len() as f64
    }
}

/// Node and edge lists of a transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<StateId>,
    pub edges: Vec<TransitionEdge>,
    pub attractors: Vec<Vec<StateId>>,
}

impl GraphView {
    pub fn from_graph(graph: &TransitionGraph) -> Self {
        Self {
            nodes: graph.nodes(),
            edges: graph.edges(),
            attractors: graph.attractors(),
        }
    }
}

/// The three views computed from one initial state.
#[derive(Debug, Clone, Serialize)]
pub struct Visualizations {
    pub initial: State,
    pub image: ImageView,
    pub ratio: RatioView,
    pub network: GraphView,
    #[serde(skip)]
    pub graph: TransitionGraph,
}

impl Visualizations {
    /// Run the image, ratio and network simulations described by `config`.
    ///
    /// All three start from `initial` at whatever width it has;
    /// `config.width` only sizes states drawn by the sampler.
    pub fn generate(config: &SimulationConfig, initial: &State) -> AutomatonResult<Self> {
        config.validate()?;
        info!(initial = %initial, "visualizations_start");

        let image = image_view(
            initial,
            &rule_for(config.numbering, &config.image)?,
            config.image.iters,
        )?;
        let ratio = ratio_view(
            initial,
            &rule_for(config.numbering, &config.ratio)?,
            config.ratio.iters,
        )?;
        let graph = simulate_network(
            initial,
            &rule_for(config.numbering, &config.network)?,
            config.network.iters,
        )?;

        info!(
            image_rows = image.height,
            ratio_points = ratio.points.len(),
            network_nodes = graph.node_count(),
            "visualizations_complete"
        );

        Ok(Self {
            initial: initial.clone(),
            image,
            ratio,
            network: GraphView::from_graph(&graph),
            graph,
        })
    }

    /// Serialize the views as pretty JSON.
    pub fn to_json(&self) -> AutomatonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Simulate and shape the result as an image.
pub fn image_view(initial: &State, rule: &RuleTable, iters: usize) -> AutomatonResult<ImageView> {
    Ok(ImageView::from_state_space(&simulate(initial, rule, iters)?))
}

/// Simulate and shape the activation ratios as a series.
pub fn ratio_view(initial: &State, rule: &RuleTable, iters: usize) -> AutomatonResult<RatioView> {
    Ok(RatioView::from_ratios(&simulate_ratio(initial, rule, iters)?))
}

fn rule_for(numbering: RuleNumbering, run: &RuleRun) -> AutomatonResult<RuleTable> {
    Ok(numbering.table(RuleIndex::new(run.rule)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::build_rule;

    #[test]
    fn test_image_maps_cells_to_grayscale() {
        let initial: State = "100".parse().unwrap();
        let image = image_view(&initial, &build_rule(255).unwrap(), 2).unwrap();
        assert_eq!(image.width, 3);
        assert_eq!(image.height, 2);
        assert_eq!(image.pixels, vec![vec![WHITE, BLACK, BLACK], vec![BLACK; 3]]);
        assert_eq!(image.pixel(0, 0), Some(WHITE));
        assert_eq!(image.pixel(5, 0), None);
    }

    #[test]
    fn test_ratio_points_are_indexed_by_step() {
        let view = RatioView::from_ratios(&[0.0, 0.5, 1.0]);
        assert_eq!(view.points[1], RatioPoint { step: 1, ratio: 0.5 });
        assert_eq!(view.values(), vec![0.0, 0.5, 1.0]);
        assert!((view.mean() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_generate_default_walkthrough() {
        let initial: State = "0110100101".parse().unwrap();
        let views = Visualizations::generate(&SimulationConfig::default(), &initial).unwrap();

        assert_eq!(views.image.height, 20);
        assert_eq!(views.image.width, 10);
        assert_eq!(views.ratio.points.len(), 100);
        assert_eq!(views.graph.transition_count(), 500);
        assert!(views.network.nodes.len() <= 501);
        assert_eq!(views.network.edges.len(), views.graph.edge_count());
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = SimulationConfig {
            ratio: RuleRun::new(256, 10),
            ..Default::default()
        };
        let initial: State = "01".parse().unwrap();
        assert!(Visualizations::generate(&config, &initial).is_err());
    }

    #[test]
    fn test_json_contains_all_views() {
        let config = SimulationConfig {
            image: RuleRun::new(90, 3),
            ratio: RuleRun::new(90, 3),
            network: RuleRun::new(105, 3),
            ..Default::default()
        };
        let views = Visualizations::generate(&config, &"0101".parse().unwrap()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&views.to_json().unwrap()).unwrap();
        assert_eq!(json["initial"], serde_json::json!([0, 1, 0, 1]));
        assert_eq!(json["image"]["height"], 3);
        assert_eq!(json["ratio"]["points"].as_array().unwrap().len(), 3);
        assert!(json["network"]["edges"].is_array());
        assert!(json.get("graph").is_none());
    }

    #[test]
    fn test_generate_uses_width_of_initial_state() {
        let config = SimulationConfig {
            width: 10,
            ..Default::default()
        };
        let views = Visualizations::generate(&config, &"01101".parse().unwrap()).unwrap();
        assert_eq!(views.image.width, 5);
        assert!(views.network.nodes.len() <= 32);
    }

    #[test]
    fn test_generate_beyond_64_cells() {
        for width in [65, 200] {
            let config = SimulationConfig {
                width,
                ..Default::default()
            };
            let views = Visualizations::generate(&config, &State::zeros(width).unwrap()).unwrap();
            assert_eq!(views.image.width, width);
            assert_eq!(views.network.nodes.len(), 2);
            assert_eq!(views.network.nodes[0], StateId::from(0));
            assert!(views.to_json().is_ok());
        }
    }
}
