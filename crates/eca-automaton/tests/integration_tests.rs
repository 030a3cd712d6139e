//! Integration tests for eca-automaton through its public API.

use std::collections::HashSet;

use eca_automaton::{
    build_rule, hash_state, simulate, simulate_network, simulate_ratio, step, ElementaryAutomaton,
    InitialStateSampler, Orbit, RuleIndex, RuleNumbering, RuleTable, SimulationConfig, State,
    StateId, Visualizations,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Helpers
// ============================================================================

fn state(bits: &str) -> State {
    bits.parse().expect("valid state string")
}

fn wolfram(code: u8) -> RuleTable {
    RuleTable::wolfram(RuleIndex::from(code))
}

/// Width-`width` state with live cells at `active`.
fn state_with(width: usize, active: &[usize]) -> State {
    let bits: Vec<u8> = (0..width).map(|i| u8::from(active.contains(&i))).collect();
    State::from_bits(&bits).expect("non-empty state")
}

// ============================================================================
// Rule construction
// ============================================================================

#[test]
fn test_rule_tables_are_total_and_distinct() {
    let tables: HashSet<RuleTable> = (0..=255).map(|i| build_rule(i).unwrap()).collect();
    assert_eq!(tables.len(), 256);
}

#[test]
fn test_rule_index_validation() {
    assert!(build_rule(255).is_ok());
    assert!(build_rule(256).is_err());
    assert!(build_rule(i64::MIN).is_err());
    assert!(RuleIndex::new(1000).is_err());
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn test_ring_wrap_at_width_three() {
    let s = state("100");
    assert_eq!(s.neighborhood(0).to_string(), "010");

    // Rule 4 keeps only isolated live cells (010 -> 1).
    let next = step(&s, &wolfram(4));
    assert_eq!(next.to_string(), "100");
}

#[test]
fn test_width_one_state_steps() {
    for index in 0..=255 {
        let next = step(&state("1"), &build_rule(index).unwrap());
        assert_eq!(next.width(), 1);
    }
}

#[test]
fn test_sierpinski_pattern_with_canonical_rule_90() {
    let space = simulate(&state_with(11, &[5]), &wolfram(90), 4).unwrap();
    assert_eq!(space.get(1).unwrap(), &state_with(11, &[4, 6]));
    assert_eq!(space.get(2).unwrap(), &state_with(11, &[3, 7]));
    assert_eq!(space.get(3).unwrap(), &state_with(11, &[2, 4, 6, 8]));
}

#[test]
fn test_sierpinski_pattern_with_complement_rule_90_is_inverted() {
    let initial = !&state_with(11, &[5]);
    let space = simulate(&initial, &build_rule(90).unwrap(), 4).unwrap();
    assert_eq!(space.get(1).unwrap(), &!&state_with(11, &[4, 6]));
    assert_eq!(space.get(3).unwrap(), &!&state_with(11, &[2, 4, 6, 8]));
}

#[test]
fn test_rule_184_moves_particles_right() {
    // Traffic rule: a car (1) moves right when the next cell is free.
    let rule = wolfram(184);
    assert_eq!(step(&state("1100010"), &rule).to_string(), "1010001");
    // Same rule through the complement numbering: cars are 0s moving right.
    let rule = build_rule(184).unwrap();
    assert_eq!(step(&state("0011101"), &rule).to_string(), "0101110");
}

#[test]
fn test_simulation_length_and_determinism() {
    let initial = state("0110100101");
    let rule = build_rule(90).unwrap();
    for iters in [1, 2, 20, 100] {
        let space = simulate(&initial, &rule, iters).unwrap();
        assert_eq!(space.len(), iters);
        assert!(space.iter().all(|row| row.width() == initial.width()));
        assert_eq!(space, simulate(&initial, &rule, iters).unwrap());
    }
}

#[test]
fn test_ratio_matches_state_space() {
    let initial = state("0110100101");
    let rule = build_rule(90).unwrap();
    let ratios = simulate_ratio(&initial, &rule, 30).unwrap();
    let space = simulate(&initial, &rule, 30).unwrap();
    for (ratio, row) in ratios.iter().zip(space.iter()) {
        assert_eq!(*ratio, row.active_count() as f64 / 10.0);
    }
}

#[test]
fn test_automaton_matches_simulate() {
    let initial = state("1011000110");
    let rule = build_rule(30).unwrap();
    let space = simulate(&initial, &rule, 10).unwrap();

    let mut automaton = ElementaryAutomaton::new(initial, rule);
    for row in space.rows().iter().skip(1) {
        automaton.tick();
        assert_eq!(automaton.state(), row);
    }
    assert_eq!(automaton.tick_count(), 9);
}

#[test]
fn test_orbit_agrees_with_network_cycle() {
    let initial = state("0110100101");
    let rule = build_rule(105).unwrap();

    let orbit: Orbit = ElementaryAutomaton::new(initial.clone(), rule)
        .find_orbit(1 << 10)
        .expect("a 10-cell ring must repeat within 1024 steps");
    let steps = orbit.transient + orbit.period;
    let graph = simulate_network(&initial, &rule, steps).unwrap();

    let attractors = graph.attractors();
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].len(), orbit.period);
    assert_eq!(graph.node_count(), steps);
}

// ============================================================================
// Hashing and transition graphs
// ============================================================================

#[test]
fn test_hash_is_injective_for_fixed_width() {
    let ids: HashSet<StateId> = (0..1u64 << 10)
        .map(|id| hash_state(&StateId::from(id).to_state(10).unwrap()))
        .collect();
    assert_eq!(ids.len(), 1024);
    assert_eq!(hash_state(&State::zeros(10).unwrap()), StateId::from(0));
}

#[test]
fn test_all_zero_canonical_rule_90_network() {
    let graph = simulate_network(&State::zeros(10).unwrap(), &wolfram(90), 500).unwrap();
    assert_eq!(graph.nodes(), vec![StateId::from(0)]);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.contains_edge(&StateId::from(0), &StateId::from(0)));
}

#[test]
fn test_network_edges_match_consecutive_rows() {
    let initial = state("1001011010");
    let rule = build_rule(105).unwrap();
    let space = simulate(&initial, &rule, 41).unwrap();
    let graph = simulate_network(&initial, &rule, 40).unwrap();

    for pair in space.rows().windows(2) {
        let from = hash_state(&pair[0]);
        let to = hash_state(&pair[1]);
        assert!(graph.contains_edge(&from, &to));
        assert_eq!(graph.successor(&from), Some(to));
    }
}

// ============================================================================
// Sampling and the full walkthrough
// ============================================================================

#[test]
fn test_seeded_walkthrough_is_reproducible() {
    let config = SimulationConfig::default();
    let sampler = InitialStateSampler::new(config.width, config.activation_probability).unwrap();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = sampler.sample(&mut rng).unwrap();
        Visualizations::generate(&config, &initial).unwrap()
    };

    let a = run(2022);
    let b = run(2022);
    assert_eq!(a.initial, b.initial);
    assert_eq!(a.image, b.image);
    assert_eq!(a.ratio, b.ratio);
    assert_eq!(a.network, b.network);
}

#[test]
fn test_wolfram_numbering_in_config() -> anyhow::Result<()> {
    let config = SimulationConfig {
        numbering: RuleNumbering::Wolfram,
        ..Default::default()
    };
    let views = Visualizations::generate(&config, &State::zeros(10)?)?;
    assert!(views.ratio.values().iter().all(|&r| r == 0.0));
    // Canonical rule 105 maps 000 -> 1 and 111 -> 0.
    assert_eq!(views.network.nodes, vec![StateId::from(0), StateId::from(1023)]);
    assert_eq!(views.network.attractors, vec![vec![StateId::from(0), StateId::from(1023)]]);
    Ok(())
}

#[test]
fn test_walkthrough_on_wide_rings() -> anyhow::Result<()> {
    for width in [65, 200] {
        let config = SimulationConfig {
            width,
            ..Default::default()
        };
        let sampler = InitialStateSampler::new(width, config.activation_probability)?;
        let initial = sampler.sample(&mut StdRng::seed_from_u64(7))?;
        let views = Visualizations::generate(&config, &initial)?;

        assert_eq!(views.image.width, width);
        assert_eq!(views.image.height, 20);
        assert_eq!(views.ratio.points.len(), 100);
        assert_eq!(views.graph.transition_count(), 500);
        assert_eq!(views.network.nodes[0], hash_state(&initial));
        assert_eq!(views.network.nodes[0].to_state(width)?, initial);
    }
    Ok(())
}
