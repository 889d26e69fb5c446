//! End-to-end checks across sensor, training, guidance and simulation.

use std::collections::HashSet;

use intercept_core::config::{GuidanceMode, SimConfig, TrainingConfig};
use intercept_core::constants::CANONICAL_LOOKUP_TABLE;
use intercept_core::geometry::Position;
use intercept_core::guidance::{build_guidance, LookupGuidance};
use intercept_core::sensor::AngularSensor;
use intercept_core::sim::{Engagement, RoundOutcome};
use intercept_core::training::{CandidateSet, Trainer};
use intercept_core::{Guidance, InterceptError};

const OBSERVER: Position = Position::new(128.0, 6.0);

#[test]
fn lookup_reads_reference_table_at_every_cell_centre() {
    let sensor = AngularSensor::default();
    let lookup = LookupGuidance::canonical(sensor.cell_count()).unwrap();

    let corrections: Vec<f64> = (0..17)
        .map(|i| {
            let bearing = sensor.config().cell_center_offset_deg(i);
            let target = OBSERVER.offset_by_bearing(bearing, 150.0);
            lookup.correction(&sensor.read(0.0, OBSERVER, target))
        })
        .collect();

    for (i, c) in corrections.iter().enumerate() {
        let expected = if i == 8 { 0.0 } else { CANONICAL_LOOKUP_TABLE[i] };
        assert_eq!(*c, expected, "cell {i}");
    }
}

#[test]
fn candidates_are_unique_and_replayable() {
    let sensor = AngularSensor::default();
    let mut set = CandidateSet::new(sensor.clone(), &TrainingConfig::default());
    let cone = sensor.cone_vertices(0.0, OBSERVER);

    let first = set.drain_in_cone(&cone);
    let second = set.drain_in_cone(&cone);
    assert_eq!(first, second);

    let keys: HashSet<Vec<u64>> =
        first.iter().map(|&c| sensor.read(0.0, OBSERVER, c).dedup_key()).collect();
    assert_eq!(keys.len(), first.len());
}

#[test]
fn learned_guidance_matches_training_targets() {
    let trainer = Trainer::new(AngularSensor::default(), TrainingConfig::default());
    let (network, outcome) = trainer.fit().unwrap();
    assert!(outcome.converged());

    for row in &outcome.accuracy.rows {
        let learned = network.infer(row.reading.as_slice())[0];
        assert!((learned - row.desired).abs() <= 0.001, "{row:?}");
    }
}

#[test]
fn learned_engagement_plays_rounds() {
    let config = SimConfig { guidance: GuidanceMode::Learned, seed: 5, ..SimConfig::default() };
    let mut engagement = Engagement::new(&config).unwrap();
    let results = engagement.run_rounds(3, 2_000);

    assert_eq!(results.len(), 3);
    assert_eq!(engagement.scoreboard().rounds(), 3);
    assert!(results.iter().all(|r| r.outcome != RoundOutcome::TimedOut));
}

#[test]
fn mismatched_sensor_is_fatal_for_lookup() {
    let mut config = SimConfig { guidance: GuidanceMode::Lookup, ..SimConfig::default() };
    config.sensor.cell_count = 11;
    let err = Engagement::new(&config).unwrap_err();
    assert!(matches!(err, InterceptError::LookupWidthMismatch { expected: 11, found: 17 }));
    assert!(err.is_fatal_at_startup());
}

#[test]
fn undertrained_network_never_reaches_the_controller() {
    let training = TrainingConfig { max_attempts: 1, check_interval: 1, ..TrainingConfig::default() };
    let result = build_guidance(GuidanceMode::Learned, &AngularSensor::default(), &training);
    assert!(matches!(result, Err(InterceptError::TrainingNotConverged { attempts: 1, .. })));
}
