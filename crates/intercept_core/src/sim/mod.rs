//! Simulation Module - the world around the guidance core
//!
//! Inbound missile, wind and round scoring. Everything is seeded from
//! `SimConfig::seed`, so a run replays exactly.

mod inbound;
mod round;
mod wind;

pub use inbound::InboundMissile;
pub use round::{Engagement, RoundOutcome, RoundResult, Scoreboard, TelemetryFrame, TickOutcome};
pub use wind::WindModel;
