//! Closed-Loop Controller
//!
//! One tick: sense, correct heading, integrate motion under gravity and
//! wind, then refresh the diagnostic sweep at the new pose.
//!
//! ## Heading convention
//! `heading_rad` is π/2 when pointing straight up. Increasing it turns the
//! interceptor towards +horizontal because the horizontal step is
//! subtracted, so `degrees(heading) - 90` is directly a sensor bearing.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Guidance;
use crate::config::MotionConfig;
use crate::geometry::{normalize_degrees_360, radians_to_degrees, Position};
use crate::sensor::{AngularSensor, SensorReading, SweepDiagnostics};

/// Kinematic state of the interceptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptorState {
    pub position: Position,
    pub heading_rad: f64,
    pub speed: f64,
}

impl InterceptorState {
    /// Fresh state on the launch pad
    pub fn launch(motion: &MotionConfig) -> Self {
        Self {
            position: motion.launch_position,
            heading_rad: motion.launch_heading_rad,
            speed: motion.launch_speed,
        }
    }

    /// Sensor bearing the interceptor is facing, in [0, 360)
    pub fn sensor_heading_deg(&self) -> f64 {
        normalize_degrees_360(radians_to_degrees(self.heading_rad) - 90.0)
    }
}

/// Wind acting on one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindSample {
    pub strength: f64,
    pub angle_rad: f64,
}

impl WindSample {
    pub const CALM: WindSample = WindSample { strength: 0.0, angle_rad: 0.0 };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Reading the correction was computed from (pre-move)
    pub reading: SensorReading,
    /// Heading change applied this tick (radians)
    pub correction: f64,
    /// Magnitude of this tick's displacement
    pub speed: f64,
}

pub struct ClosedLoopController {
    sensor: AngularSensor,
    guidance: Box<dyn Guidance>,
    motion: MotionConfig,
    diagnostics: SweepDiagnostics,
}

impl ClosedLoopController {
    pub fn new(sensor: AngularSensor, guidance: Box<dyn Guidance>, motion: MotionConfig) -> Self {
        Self { sensor, guidance, motion, diagnostics: SweepDiagnostics::default() }
    }

    pub fn guidance_name(&self) -> &'static str {
        self.guidance.name()
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Cell geometry at the pose after the last `advance`
    pub fn diagnostics(&self) -> &SweepDiagnostics {
        &self.diagnostics
    }

    pub fn advance(
        &mut self,
        state: &mut InterceptorState,
        target: Position,
        wind: WindSample,
    ) -> TickReport {
        let reading = self.sensor.read(state.sensor_heading_deg(), state.position, target);
        let correction = self.guidance.correction(&reading);
        state.heading_rad += correction;

        let dy = state.heading_rad.sin() * state.speed
            - self.motion.gravity
            - wind.strength * wind.angle_rad.sin();
        let dx = state.heading_rad.cos() * state.speed - wind.strength * wind.angle_rad.cos();

        state.position.altitude = (state.position.altitude + dy).max(self.motion.min_altitude);
        state.position.horizontal -= dx;
        state.speed += self.motion.speed_increment;

        // Renderer state only; the next control decision re-reads the sensor.
        self.sensor.refresh(&mut self.diagnostics, state.sensor_heading_deg(), state.position, target);

        let speed = (dx * dx + dy * dy).sqrt();
        trace!(
            position = %state.position,
            heading_rad = state.heading_rad,
            correction,
            speed,
            "interceptor advanced"
        );

        TickReport { reading, correction, speed }
    }
}

impl std::fmt::Debug for ClosedLoopController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosedLoopController")
            .field("guidance", &self.guidance.name())
            .field("cells", &self.sensor.cell_count())
            .finish()
    }
}
