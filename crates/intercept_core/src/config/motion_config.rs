//! Interceptor launch state and motion integration

use serde::{Deserialize, Serialize};

use crate::constants::interceptor;
use crate::geometry::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Launch pad position
    pub launch_position: Position,
    /// Initial heading in radians (기본: π/2, straight up)
    pub launch_heading_rad: f64,
    /// Initial speed (기본: 1.0)
    pub launch_speed: f64,
    /// Downward pull per tick (기본: 0.9)
    pub gravity: f64,
    /// Speed gained per tick (기본: 0.07)
    pub speed_increment: f64,
    /// Altitude floor while in flight (기본: 6.0)
    pub min_altitude: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            launch_position: Position::new(
                interceptor::LAUNCH_HORIZONTAL,
                interceptor::LAUNCH_ALTITUDE,
            ),
            launch_heading_rad: interceptor::LAUNCH_HEADING_RAD,
            launch_speed: interceptor::LAUNCH_SPEED,
            gravity: interceptor::GRAVITY,
            speed_increment: interceptor::SPEED_INCREMENT,
            min_altitude: interceptor::LAUNCH_ALTITUDE,
        }
    }
}
