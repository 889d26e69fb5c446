//! # intercept_core - Heat-Seeking Interceptor Guidance
//!
//! Guidance core for a 2-D interceptor chasing an inbound missile.
//!
//! ## Features
//! - Discretized angular sensor (17 cells across ±50°)
//! - Learned guidance: a small tanh network trained at startup on
//!   synthesized, deduplicated targets
//! - Lookup guidance: fixed per-cell offsets, no training
//! - Seeded simulation (same seed = same rounds) emitting serializable
//!   telemetry frames

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - index loops mirror cell indices
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod guidance;
pub mod sensor;
pub mod sim;
pub mod training;

pub use config::{GuidanceMode, SimConfig};
pub use error::{InterceptError, Result};
pub use geometry::Position;
pub use guidance::{build_guidance, ClosedLoopController, Guidance, LearnedGuidance, LookupGuidance};
pub use sensor::{AngularSensor, SensorReading};
pub use sim::{Engagement, RoundOutcome, Scoreboard, TelemetryFrame};
pub use training::{CandidateSet, FeedForwardNetwork, Network, Trainer, TrainingOutcome};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
