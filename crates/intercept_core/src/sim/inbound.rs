//! Inbound missile - scripted drift and descent

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{inbound, playfield};
use crate::geometry::{clamp, Position};

/// Jitter added to the horizontal drift every tick
const JITTER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InboundMissile {
    pub position: Position,
    /// Horizontal movement per tick before jitter
    pub drift: f64,
}

impl InboundMissile {
    /// Random spawn in the upper band of the playfield.
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let horizontal = rng.gen_range(0.0..playfield::WIDTH + 1.0);
        let altitude = playfield::HEIGHT - rng.gen_range(0.0..inbound::SPAWN_ALTITUDE_BAND);
        let drift = inbound::DRIFT_AMPLIFIER * rng.gen_range(-0.5..0.5);
        Self { position: Position::new(horizontal, altitude), drift }
    }

    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        let jitter = rng.gen_range(-JITTER..JITTER);
        self.position.horizontal += self.drift + jitter;
        if self.position.horizontal < inbound::BOUNCE_MIN || self.position.horizontal > inbound::BOUNCE_MAX {
            self.drift = -self.drift;
        }
        self.position.horizontal = clamp(self.position.horizontal, 0.0, playfield::WIDTH);
        self.position.altitude -= inbound::DESCENT_PER_TICK;
    }
}
