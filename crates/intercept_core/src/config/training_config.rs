//! Training-set synthesis and network fitting parameters

use serde::{Deserialize, Serialize};

use crate::constants::{interceptor, training};
use crate::geometry::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    // === Canonical pose ===
    /// Observer position used for every training sample
    pub observer: Position,
    /// Observer heading (sensor degrees, 0 = straight up)
    pub heading_deg: f64,
    /// Distance of synthesized targets from the observer (기본: 231)
    pub candidate_radius: f64,
    /// Angular step of the candidate sweep (기본: 0.01°)
    pub candidate_step_deg: f64,

    // === Convergence ===
    /// Largest tolerated |output - desired| over all samples (기본: 0.001)
    pub max_error: f64,
    /// Epochs between convergence checks (기본: 1000)
    pub check_interval: u64,
    /// Epoch budget (기본: 2,000,000)
    pub max_attempts: u64,

    // === Network ===
    /// Hidden layer widths; empty means input wired straight to the output
    #[serde(default)]
    pub hidden_layers: Vec<usize>,
    /// Gradient descent step (기본: 0.05)
    pub learning_rate: f64,
    /// Weight initialisation seed
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            observer: Position::new(interceptor::LAUNCH_HORIZONTAL, interceptor::LAUNCH_ALTITUDE),
            heading_deg: 0.0,
            candidate_radius: training::CANDIDATE_RADIUS,
            candidate_step_deg: training::CANDIDATE_STEP_DEG,
            max_error: training::MAX_ERROR,
            check_interval: training::CHECK_INTERVAL,
            max_attempts: training::MAX_ATTEMPTS,
            hidden_layers: Vec::new(),
            learning_rate: training::LEARNING_RATE,
            seed: training::WEIGHT_SEED,
        }
    }
}
