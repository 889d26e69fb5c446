//! # Simulation Configuration
//!
//! All tuning constants for one process run, grouped by concern.
//!
//! ## Presets
//! - `SimConfig::calm()` - no wind (default)
//! - `SimConfig::gusty()` - variable wind with a wandering direction
//!
//! ## Usage
//! ```rust
//! use intercept_core::config::{GuidanceMode, SimConfig};
//!
//! let mut config = SimConfig::gusty();
//! config.guidance = GuidanceMode::Lookup;
//! config.validate().unwrap();
//! ```

mod motion_config;
mod sensor_config;
mod training_config;
mod wind_config;

pub use motion_config::MotionConfig;
pub use sensor_config::SensorConfig;
pub use training_config::TrainingConfig;
pub use wind_config::WindConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::training::MAX_CANDIDATE_STEPS;
use crate::error::{InterceptError, Result};

/// Which steering strategy drives the interceptor for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuidanceMode {
    /// Trained network; requires training to converge at startup
    #[default]
    Learned,
    /// Hand-authored per-cell offsets; never trains
    Lookup,
}

impl std::str::FromStr for GuidanceMode {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learned" | "ai" | "network" => Ok(GuidanceMode::Learned),
            "lookup" | "table" | "mapping" => Ok(GuidanceMode::Lookup),
            other => Err(InterceptError::InvalidConfig(format!("unknown guidance mode '{other}'"))),
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub wind: WindConfig,
    #[serde(default)]
    pub guidance: GuidanceMode,
    /// Seed for inbound spawn, jitter and wind
    #[serde(default)]
    pub seed: u64,
}

impl SimConfig {
    /// No wind at all (기본)
    pub fn calm() -> Self {
        Self::default()
    }

    /// Random-strength wind whose direction wanders up to 10° per tick
    pub fn gusty() -> Self {
        let mut cfg = Self::default();
        cfg.wind.strength = 0.5;
        cfg.wind.constant = false;
        cfg.wind.max_deviation_deg = 10.0;
        cfg
    }

    /// Parse from JSON; missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: SimConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values outside their documented ranges.
    pub fn validate(&self) -> Result<()> {
        if self.sensor.cell_count == 0 {
            return Err(invalid("sensor.cell_count must be at least 1"));
        }
        if !(self.sensor.depth > 0.0) {
            return Err(invalid("sensor.depth must be positive"));
        }
        if self.sensor.fov_stop_deg < self.sensor.fov_start_deg {
            return Err(invalid("sensor.fov_stop_deg must not be left of fov_start_deg"));
        }
        if !(self.wind.strength >= 0.0) {
            return Err(invalid("wind.strength must be >= 0"));
        }
        if !(self.wind.max_deviation_deg >= 0.0) {
            return Err(invalid("wind.max_deviation_deg must be >= 0"));
        }
        if !(self.training.max_error > 0.0) {
            return Err(invalid("training.max_error must be positive"));
        }
        if self.training.check_interval == 0 {
            return Err(invalid("training.check_interval must be at least 1"));
        }
        if !(self.training.candidate_step_deg > 0.0) {
            return Err(invalid("training.candidate_step_deg must be positive"));
        }
        let sweep_steps = (self.sensor.fov_stop_deg - self.sensor.fov_start_deg) / self.training.candidate_step_deg;
        if sweep_steps > MAX_CANDIDATE_STEPS as f64 {
            return Err(invalid("training.candidate_step_deg is too fine for the field of view"));
        }
        if self.training.hidden_layers.iter().any(|&w| w == 0) {
            return Err(invalid("training.hidden_layers must not contain empty layers"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> InterceptError {
    InterceptError::InvalidConfig(msg.to_string())
}

// ========== Tests ==========
