//! Guidance Module - sensor reading to heading correction
//!
//! Two interchangeable strategies sit behind [`Guidance`]:
//! - `LearnedGuidance`: trained network, available only after convergence
//! - `LookupGuidance`: fixed per-cell offsets, needs no training
//!
//! The strategy is picked once per run from [`GuidanceMode`] and driven by
//! the [`ClosedLoopController`].

mod controller;
mod learned;
mod lookup;

pub use controller::{ClosedLoopController, InterceptorState, TickReport, WindSample};
pub use learned::LearnedGuidance;
pub use lookup::LookupGuidance;

use tracing::info;

use crate::config::{GuidanceMode, TrainingConfig};
use crate::error::Result;
use crate::sensor::{AngularSensor, SensorReading};
use crate::training::Trainer;

/// Heading correction policy
pub trait Guidance {
    fn name(&self) -> &'static str;

    /// Signed heading change in radians; positive steers towards +horizontal.
    fn correction(&self, reading: &SensorReading) -> f64;
}

/// Construct the strategy for `mode`.
///
/// `Learned` trains synchronously and fails with `TrainingNotConverged`
/// instead of falling back to an undertrained network. `Lookup` never trains.
pub fn build_guidance(
    mode: GuidanceMode,
    sensor: &AngularSensor,
    training: &TrainingConfig,
) -> Result<Box<dyn Guidance>> {
    let guidance: Box<dyn Guidance> = match mode {
        GuidanceMode::Learned => {
            let trainer = Trainer::new(sensor.clone(), training.clone());
            let (network, outcome) = trainer.fit()?;
            info!(
                epochs = outcome.report.epochs,
                max_deviation = outcome.accuracy.max_deviation(),
                "learned guidance ready"
            );
            Box::new(LearnedGuidance::new(network))
        }
        GuidanceMode::Lookup => Box::new(LookupGuidance::canonical(sensor.cell_count())?),
    };
    Ok(guidance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;
    use crate::constants::CANONICAL_LOOKUP_TABLE;
    use crate::error::InterceptError;
    use crate::geometry::Position;

    #[test]
    fn test_lookup_over_every_cell_centre() {
        let sensor = AngularSensor::default();
        let guidance = build_guidance(GuidanceMode::Lookup, &sensor, &TrainingConfig::default()).unwrap();
        assert_eq!(guidance.name(), "lookup");

        let observer = Position::new(128.0, 6.0);
        for i in 0..17 {
            let bearing = sensor.config().cell_center_offset_deg(i);
            let reading = sensor.read(0.0, observer, observer.offset_by_bearing(bearing, 231.0));
            let correction = guidance.correction(&reading);
            if i == 8 {
                assert_eq!(correction, 0.0);
            } else {
                assert_eq!(correction, CANONICAL_LOOKUP_TABLE[i]);
            }
        }
    }

    #[test]
    fn test_lookup_needs_matching_sensor() {
        let sensor = AngularSensor::new(SensorConfig { cell_count: 9, ..SensorConfig::default() });
        let result = build_guidance(GuidanceMode::Lookup, &sensor, &TrainingConfig::default());
        assert!(matches!(result, Err(InterceptError::LookupWidthMismatch { expected: 9, found: 17 })));
    }

    #[test]
    fn test_learned_guidance_tracks_desired_angle() {
        let sensor = AngularSensor::default();
        let guidance = build_guidance(GuidanceMode::Learned, &sensor, &TrainingConfig::default()).unwrap();
        assert_eq!(guidance.name(), "learned");

        // Rightmost cell wants roughly +50°, leftmost roughly -50°.
        let observer = Position::new(128.0, 6.0);
        let right = sensor.read(0.0, observer, observer.offset_by_bearing(50.0, 231.0));
        let left = sensor.read(0.0, observer, observer.offset_by_bearing(-50.0, 231.0));
        assert!((guidance.correction(&right) - 0.8727).abs() < 0.01);
        assert!(guidance.correction(&left) < -0.75);
    }

    #[test]
    fn test_learned_guidance_refuses_undertrained_network() {
        let training = TrainingConfig { max_attempts: 2, check_interval: 1, ..TrainingConfig::default() };
        let result = build_guidance(GuidanceMode::Learned, &AngularSensor::default(), &training);
        match result {
            Err(err) => assert!(!err.is_fatal_at_startup()),
            Ok(_) => panic!("undertrained network must be rejected"),
        }
    }
}
