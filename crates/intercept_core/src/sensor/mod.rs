//! Sensor Module - discretized angular heat sensor
//!
//! Converts continuous observer/target geometry into a fixed-width vector
//! that both guidance strategies consume.
//!
//! ## Usage
//!
//! ```rust
//! use intercept_core::geometry::Position;
//! use intercept_core::sensor::AngularSensor;
//!
//! let sensor = AngularSensor::default();
//! let reading = sensor.read(0.0, Position::new(128.0, 6.0), Position::new(200.0, 150.0));
//! assert_eq!(reading.width(), 17);
//! ```

mod angular;
mod reading;

pub use angular::{AngularSensor, CellPolygon, Cone, SweepDiagnostics};
pub use reading::SensorReading;
