//! Wind shear settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WindConfig {
    /// Peak wind strength, >= 0 (기본: 0, calm)
    pub strength: f64,
    /// Blow at full strength every tick instead of a random fraction
    pub constant: bool,
    /// Largest random change of wind direction per tick, degrees >= 0
    pub max_deviation_deg: f64,
}
