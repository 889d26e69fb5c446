//! Training-Set Synthesizer
//!
//! Sweeps a fine angular parameter across the field of view at a fixed
//! radius around the canonical observer pose and keeps one candidate per
//! distinguishable sensor reading. Two positions that read identically would
//! ask the network to map one input to two outputs, which never trains.

use fxhash::FxHashSet;
use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::config::TrainingConfig;
use crate::constants::training::MAX_CANDIDATE_STEPS;
use crate::geometry::{degrees_to_radians, Position};
use crate::sensor::{AngularSensor, Cone};

/// Deduplicated candidate targets with a restartable cursor.
///
/// Built lazily on the first request and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    sensor: AngularSensor,
    observer: Position,
    heading_deg: f64,
    radius: f64,
    step_deg: f64,
    candidates: OnceCell<Vec<Position>>,
    cursor: usize,
}

impl CandidateSet {
    pub fn new(sensor: AngularSensor, config: &TrainingConfig) -> Self {
        Self {
            sensor,
            observer: config.observer,
            heading_deg: config.heading_deg,
            radius: config.candidate_radius,
            step_deg: config.candidate_step_deg,
            candidates: OnceCell::new(),
            cursor: 0,
        }
    }

    /// Ordered candidates, one per distinct reading, by increasing sweep angle.
    pub fn generate(&self) -> &[Position] {
        self.candidates.get_or_init(|| self.sweep())
    }

    fn sweep(&self) -> Vec<Position> {
        let fov = self.sensor.config();
        let steps = ((fov.fov_stop_deg - fov.fov_start_deg) / self.step_deg)
            .round()
            .min(MAX_CANDIDATE_STEPS as f64) as u64;

        let mut seen: FxHashSet<Vec<u64>> = FxHashSet::default();
        let mut out = Vec::new();

        for k in 0..=steps {
            let angle = fov.fov_start_deg + k as f64 * self.step_deg;
            // Rotating a radius about the observer; +90° puts 0 straight up.
            let rad = degrees_to_radians(angle + 90.0);
            let candidate = Position::new(
                self.observer.horizontal + self.radius * rad.cos(),
                self.observer.altitude + self.radius * rad.sin(),
            );

            let reading = self.sensor.read(self.heading_deg, self.observer, candidate);
            if seen.insert(reading.dedup_key()) {
                debug!(%candidate, %reading, angle, "unique training candidate");
                out.push(candidate);
            }
        }

        out
    }

    pub fn len(&self) -> usize {
        self.generate().len()
    }

    pub fn is_empty(&self) -> bool {
        self.generate().is_empty()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next candidate inside `cone`, or `None` once the sequence is exhausted.
    ///
    /// Candidates outside the cone are skipped; rounding at the FOV extremes
    /// can push a synthesized point just outside the envelope.
    pub fn next_in_cone(&mut self, cone: &Cone) -> Option<Position> {
        while self.cursor < self.generate().len() {
            let candidate = self.generate()[self.cursor];
            self.cursor += 1;
            if cone.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Reset, then collect every in-cone candidate. Leaves the cursor exhausted.
    pub fn drain_in_cone(&mut self, cone: &Cone) -> Vec<Position> {
        self.reset();
        std::iter::from_fn(|| self.next_in_cone(cone)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;

    fn canonical() -> CandidateSet {
        CandidateSet::new(AngularSensor::default(), &TrainingConfig::default())
    }

    #[test]
    fn test_one_candidate_per_reading() {
        let set = canonical();
        let sensor = AngularSensor::default();
        let observer = Position::new(128.0, 6.0);

        // 16 firing cells plus the shared all-zero reading
        assert_eq!(set.len(), 17);

        let mut keys = FxHashSet::default();
        for &c in set.generate() {
            assert!(keys.insert(sensor.read(0.0, observer, c).dedup_key()));
        }
    }

    #[test]
    fn test_generate_is_cached() {
        let set = canonical();
        let first = set.generate().to_vec();
        let second = set.generate();
        assert_eq!(first.as_slice(), second);
        assert!(std::ptr::eq(set.generate().as_ptr(), second.as_ptr()));
    }

    #[test]
    fn test_first_candidate_is_right_edge() {
        // Sweep starts at -50°, which (+90°) lands 50° right of straight up.
        let set = canonical();
        let first = set.generate()[0];
        assert!((first.horizontal - 304.956).abs() < 0.01);
        assert!((first.altitude - 154.484).abs() < 0.01);
        let reading = AngularSensor::default().read(0.0, Position::new(128.0, 6.0), first);
        assert_eq!(reading.active_cell(), Some(16));
    }

    #[test]
    fn test_reset_and_drain_reproduces_sequence() {
        let mut set = canonical();
        let cone = AngularSensor::default().cone_vertices(0.0, Position::new(128.0, 6.0));

        let first = set.drain_in_cone(&cone);
        assert_eq!(set.next_in_cone(&cone), None);
        assert_eq!(set.cursor(), set.len());

        let second = set.drain_in_cone(&cone);
        assert_eq!(first, second);
        assert_eq!(first.len(), 17);
    }

    #[test]
    fn test_candidates_outside_cone_are_skipped() {
        let mut set = canonical();
        // A cone rotated to face straight down sees none of the candidates.
        let cone = AngularSensor::default().cone_vertices(180.0, Position::new(128.0, 6.0));
        set.reset();
        assert_eq!(set.next_in_cone(&cone), None);
        assert_eq!(set.cursor(), set.len());
    }

    #[test]
    fn test_narrow_sensor_yields_fewer_candidates() {
        let sensor = AngularSensor::new(SensorConfig { cell_count: 5, ..SensorConfig::default() });
        let set = CandidateSet::new(sensor, &TrainingConfig::default());
        assert_eq!(set.len(), 5);
    }
}
