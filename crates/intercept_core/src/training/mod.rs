//! Training Module - offline fitting of the learned guidance
//!
//! ## Pipeline
//! 1. `CandidateSet` sweeps synthetic targets around the canonical pose,
//!    one per distinct sensor reading.
//! 2. `Trainer` pairs each reading with the analytically desired correction.
//! 3. A `Network` is fitted until every sample is within `max_error`.
//!
//! Runs once, synchronously, before the first tick.

mod candidates;
mod network;
mod orchestrator;

pub use candidates::CandidateSet;
pub use network::{FeedForwardNetwork, Network, TrainingBudget, TrainingReport, TrainingSample};
pub use orchestrator::{
    desired_correction, AccuracyReport, AccuracyRow, TrainedNetwork, Trainer, TrainingOutcome,
};
