//! Training Orchestrator
//!
//! Pairs every in-cone candidate with the analytically desired steering
//! correction and fits the network once at process start.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{CandidateSet, FeedForwardNetwork, Network, TrainingBudget, TrainingReport, TrainingSample};
use crate::config::TrainingConfig;
use crate::error::{InterceptError, Result};
use crate::geometry::Position;
use crate::sensor::{AngularSensor, Cone, SensorReading};

/// Correction (radians) that turns a straight-up heading towards `target`.
///
/// `atan2` measures from the +horizontal axis; adding π/2 makes "straight up"
/// zero, matching the controller's forward convention.
pub fn desired_correction(observer: Position, target: Position) -> f64 {
    let angle = (-(target.altitude - observer.altitude)).atan2(target.horizontal - observer.horizontal);
    angle + std::f64::consts::FRAC_PI_2
}

// =============================================================================
// Outcome types
// =============================================================================

/// Per-sample comparison of learned output against the desired correction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyRow {
    pub target: Position,
    pub reading: SensorReading,
    pub desired: f64,
    pub learned: f64,
}

impl AccuracyRow {
    pub fn deviation(&self) -> f64 {
        (self.learned - self.desired).abs()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub rows: Vec<AccuracyRow>,
}

impl AccuracyReport {
    pub fn max_deviation(&self) -> f64 {
        self.rows.iter().map(AccuracyRow::deviation).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingOutcome {
    pub report: TrainingReport,
    /// Number of samples the network was fitted on
    pub samples: usize,
    pub accuracy: AccuracyReport,
}

impl TrainingOutcome {
    pub fn converged(&self) -> bool {
        self.report.converged
    }

    /// Wrap the network this outcome was produced with.
    ///
    /// Learned guidance can never run on an undertrained model: a
    /// non-converged outcome yields `TrainingNotConverged` instead.
    pub fn into_trained<N: Network + 'static>(&self, network: N) -> Result<TrainedNetwork> {
        if !self.converged() {
            return Err(InterceptError::TrainingNotConverged {
                attempts: self.report.epochs,
                max_deviation: self.report.max_deviation,
            });
        }
        Ok(TrainedNetwork { network: Box::new(network) })
    }
}

/// A network known to have converged; see [`TrainingOutcome::into_trained`].
pub struct TrainedNetwork {
    network: Box<dyn Network>,
}

impl TrainedNetwork {
    pub fn input_width(&self) -> usize {
        self.network.input_width()
    }

    pub fn infer(&self, input: &[f64]) -> Vec<f64> {
        self.network.infer(input)
    }
}

impl std::fmt::Debug for TrainedNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedNetwork")
            .field("input_width", &self.network.input_width())
            .field("output_width", &self.network.output_width())
            .finish()
    }
}

// =============================================================================
// Trainer
// =============================================================================

pub struct Trainer {
    sensor: AngularSensor,
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(sensor: AngularSensor, config: TrainingConfig) -> Self {
        Self { sensor, config }
    }

    pub fn budget(&self) -> TrainingBudget {
        TrainingBudget {
            max_error: self.config.max_error,
            check_interval: self.config.check_interval,
            max_attempts: self.config.max_attempts,
        }
    }

    /// Sensor envelope at the canonical pose
    pub fn canonical_cone(&self) -> Cone {
        self.sensor.cone_vertices(self.config.heading_deg, self.config.observer)
    }

    pub fn candidate_set(&self) -> CandidateSet {
        CandidateSet::new(self.sensor.clone(), &self.config)
    }

    /// Untrained network shaped `[cells, hidden..., 1]`
    pub fn new_network(&self) -> Result<FeedForwardNetwork> {
        let mut sizes = vec![self.sensor.cell_count()];
        sizes.extend(&self.config.hidden_layers);
        sizes.push(1);
        FeedForwardNetwork::new(&sizes, self.config.learning_rate, self.config.seed)
    }

    /// Drain the candidate stream into supervised pairs.
    pub fn build_samples(&self, candidates: &mut CandidateSet) -> Result<Vec<(Position, TrainingSample)>> {
        let cone = self.canonical_cone();

        // Pre-check pass: every candidate should already be inside the cone.
        let in_cone = candidates.drain_in_cone(&cone).len();
        if in_cone < candidates.len() {
            warn!(in_cone, total = candidates.len(), "some candidates fall outside the sensor cone");
        }
        if in_cone == 0 {
            return Err(InterceptError::EmptyTrainingSet);
        }

        candidates.reset();
        let mut samples = Vec::with_capacity(in_cone);
        while let Some(target) = candidates.next_in_cone(&cone) {
            let reading = self.sensor.read(self.config.heading_deg, self.config.observer, target);
            let desired = desired_correction(self.config.observer, target);
            samples.push((target, TrainingSample::new(reading.into_vec(), vec![desired])));
        }
        Ok(samples)
    }

    /// Fit `network` on the candidate set.
    ///
    /// Non-convergence is reported in the outcome, not as an error; use
    /// [`TrainingOutcome::into_trained`] to gate learned guidance on it.
    pub fn train<N: Network + ?Sized>(
        &self,
        network: &mut N,
        candidates: &mut CandidateSet,
    ) -> Result<TrainingOutcome> {
        if network.input_width() != self.sensor.cell_count() || network.output_width() != 1 {
            return Err(InterceptError::InvalidConfig(format!(
                "network must be shaped [{}, .., 1], got [{}, .., {}]",
                self.sensor.cell_count(),
                network.input_width(),
                network.output_width()
            )));
        }

        let pairs = self.build_samples(candidates)?;
        let samples: Vec<TrainingSample> = pairs.iter().map(|(_, s)| s.clone()).collect();

        info!(samples = samples.len(), budget = ?self.budget(), "training guidance network");
        let report = network.train(&samples, self.budget());

        if report.converged {
            info!(epochs = report.epochs, max_deviation = report.max_deviation, "training converged");
        } else {
            warn!(epochs = report.epochs, max_deviation = report.max_deviation, "** TRAINING FAILED **");
        }

        let rows = pairs
            .into_iter()
            .map(|(target, sample)| AccuracyRow {
                target,
                learned: network.infer(&sample.input).first().copied().unwrap_or(f64::NAN),
                desired: sample.output[0],
                reading: self.sensor.read(self.config.heading_deg, self.config.observer, target),
            })
            .collect();

        Ok(TrainingOutcome { report, samples: samples.len(), accuracy: AccuracyReport { rows } })
    }

    /// Build, train and gate a fresh network in one go.
    pub fn fit(&self) -> Result<(TrainedNetwork, TrainingOutcome)> {
        let mut network = self.new_network()?;
        let mut candidates = self.candidate_set();
        let outcome = self.train(&mut network, &mut candidates)?;
        let trained = outcome.into_trained(network)?;
        Ok((trained, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;

    #[test]
    fn test_desired_correction_convention() {
        let observer = Position::new(128.0, 6.0);
        assert!(desired_correction(observer, Position::new(128.0, 200.0)).abs() < 1e-12);
        // Target up and to the right -> positive correction
        let right = desired_correction(observer, Position::new(304.95627, 154.48393));
        assert!((right - 0.8727).abs() < 1e-3);
        let left = desired_correction(observer, Position::new(-40.600704, 163.90758));
        assert!((left + 0.8181).abs() < 1e-3);
    }

    #[test]
    fn test_samples_pair_reading_with_angle() {
        let trainer = Trainer::new(AngularSensor::default(), TrainingConfig::default());
        let mut candidates = trainer.candidate_set();
        let pairs = trainer.build_samples(&mut candidates).unwrap();
        assert_eq!(pairs.len(), 17);
        for (_, sample) in &pairs {
            assert_eq!(sample.input.len(), 17);
            assert_eq!(sample.output.len(), 1);
        }
        // First sample: rightmost cell, 50° to the right
        assert_eq!(pairs[0].1.input[16], 1.0);
        assert!((pairs[0].1.output[0] - 0.8727).abs() < 1e-3);
    }

    #[test]
    fn test_canonical_training_converges() {
        let trainer = Trainer::new(AngularSensor::default(), TrainingConfig::default());
        let (trained, outcome) = trainer.fit().unwrap();
        assert!(outcome.converged());
        assert_eq!(outcome.samples, 17);
        assert!(outcome.accuracy.max_deviation() <= 0.001);
        assert_eq!(trained.input_width(), 17);

        for row in &outcome.accuracy.rows {
            let learned = trained.infer(row.reading.as_slice())[0];
            assert!((learned - row.desired).abs() <= 0.001);
        }
    }

    #[test]
    fn test_exhausted_budget_is_rejected() {
        let config = TrainingConfig { max_attempts: 3, check_interval: 1, ..TrainingConfig::default() };
        let trainer = Trainer::new(AngularSensor::default(), config);
        let mut network = trainer.new_network().unwrap();
        let mut candidates = trainer.candidate_set();
        let outcome = trainer.train(&mut network, &mut candidates).unwrap();
        assert!(!outcome.converged());
        assert_eq!(outcome.report.epochs, 3);

        let err = outcome.into_trained(network).unwrap_err();
        assert!(matches!(err, InterceptError::TrainingNotConverged { attempts: 3, .. }));
    }

    #[test]
    fn test_even_sensor_samples_are_never_blank() {
        // With 16 cells several sweep targets sit exactly on shared cell edges.
        let sensor = AngularSensor::new(SensorConfig { cell_count: 16, ..SensorConfig::default() });
        let trainer = Trainer::new(sensor, TrainingConfig::default());
        let mut candidates = trainer.candidate_set();
        let pairs = trainer.build_samples(&mut candidates).unwrap();

        assert_eq!(pairs.len(), 16);
        for (target, sample) in &pairs {
            let active = sample.input.iter().filter(|&&v| v != 0.0).count();
            assert_eq!(active, 1, "blank reading for {target}");
        }
    }

    /// Network with no output layer
    struct Headless;

    impl Network for Headless {
        fn input_width(&self) -> usize {
            17
        }

        fn output_width(&self) -> usize {
            0
        }

        fn infer(&self, _input: &[f64]) -> Vec<f64> {
            Vec::new()
        }

        fn train(&mut self, _samples: &[TrainingSample], _budget: TrainingBudget) -> TrainingReport {
            TrainingReport { converged: true, epochs: 1, max_deviation: 0.0 }
        }
    }

    #[test]
    fn test_network_without_outputs_is_rejected() {
        let trainer = Trainer::new(AngularSensor::default(), TrainingConfig::default());
        let mut candidates = trainer.candidate_set();
        let err = trainer.train(&mut Headless, &mut candidates).unwrap_err();
        assert!(matches!(err, InterceptError::InvalidConfig(_)));
    }

    #[test]
    fn test_cone_without_candidates_is_empty_training_set() {
        // Observer facing straight down never sees the upward sweep.
        let config = TrainingConfig { heading_deg: 180.0, ..TrainingConfig::default() };
        let sensor = AngularSensor::new(SensorConfig::default());
        let trainer = Trainer::new(sensor.clone(), config);
        // Candidates are still synthesized about "up"; only the cone rotates.
        let mut candidates = CandidateSet::new(sensor, &TrainingConfig::default());
        assert!(matches!(trainer.build_samples(&mut candidates), Err(InterceptError::EmptyTrainingSet)));
    }
}
