//! Learned guidance - trained network maps a reading to a correction

use super::Guidance;
use crate::sensor::SensorReading;
use crate::training::TrainedNetwork;

#[derive(Debug)]
pub struct LearnedGuidance {
    network: TrainedNetwork,
}

impl LearnedGuidance {
    pub fn new(network: TrainedNetwork) -> Self {
        Self { network }
    }
}

impl Guidance for LearnedGuidance {
    fn name(&self) -> &'static str {
        "learned"
    }

    fn correction(&self, reading: &SensorReading) -> f64 {
        self.network.infer(reading.as_slice()).first().copied().unwrap_or(0.0)
    }
}
