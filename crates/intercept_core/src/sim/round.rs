//! Engagement - round bookkeeping around the closed-loop controller
//!
//! ## Tick order
//! 1. End-of-round check on the current positions (hit, interceptor lost,
//!    inbound down). An ended round is scored and reset.
//! 2. Otherwise: inbound moves, wind is sampled, interceptor advances.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use super::{InboundMissile, WindModel};
use crate::config::SimConfig;
use crate::constants::playfield;
use crate::error::Result;
use crate::geometry::{distance, normalize_degrees_360, radians_to_degrees, Position};
use crate::guidance::{build_guidance, ClosedLoopController, Guidance, InterceptorState, WindSample};
use crate::sensor::{AngularSensor, CellPolygon};

/// Separate stream for wind so inbound spawns do not depend on wind settings
const WIND_SEED_SALT: u64 = 0x57_1D;

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Interceptor came within the hit radius
    Intercepted,
    /// Interceptor left the playfield through the top or fell below the pad
    InterceptorLost,
    /// Inbound reached the ground
    GroundImpact,
    /// Tick limit reached before any other outcome
    TimedOut,
}

impl RoundOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, RoundOutcome::Intercepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub hits: u32,
    pub misses: u32,
}

impl Scoreboard {
    pub fn rounds(&self) -> u32 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        match self.rounds() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    fn record(&mut self, outcome: RoundOutcome) {
        if outcome.is_hit() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub outcome: RoundOutcome,
    pub ticks: u64,
    /// Interceptor-to-inbound distance when the round ended
    pub final_distance: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub round: u32,
    pub tick: u64,
    pub cells: Vec<CellPolygon>,
    pub hit_cell: Option<usize>,
    pub interceptor: Position,
    pub inbound: Position,
    pub speed: f64,
    pub correction: f64,
    pub wind_strength: f64,
    /// Wind direction in [0, 360)
    pub wind_angle_deg: f64,
    pub hits: u32,
    pub misses: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    RoundEnded(RoundResult),
    InFlight(TelemetryFrame),
}

// =============================================================================
// Engagement
// =============================================================================

#[derive(Debug)]
pub struct Engagement {
    controller: ClosedLoopController,
    interceptor: InterceptorState,
    inbound: InboundMissile,
    wind: WindModel,
    rng: ChaCha8Rng,
    scoreboard: Scoreboard,
    round: u32,
    round_ticks: u64,
}

impl Engagement {
    /// Validate `config`, build its guidance (training if needed) and spawn round 1.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let sensor = AngularSensor::new(config.sensor.clone());
        let guidance = build_guidance(config.guidance, &sensor, &config.training)?;
        Ok(Self::with_guidance(config, sensor, guidance))
    }

    /// Use an already-built guidance strategy.
    pub fn with_guidance(config: &SimConfig, sensor: AngularSensor, guidance: Box<dyn Guidance>) -> Self {
        let controller = ClosedLoopController::new(sensor, guidance, config.motion.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let inbound = InboundMissile::spawn(&mut rng);
        info!(guidance = controller.guidance_name(), seed = config.seed, "engagement ready");

        Self {
            interceptor: InterceptorState::launch(&config.motion),
            controller,
            inbound,
            wind: WindModel::new(config.wind.clone(), config.seed ^ WIND_SEED_SALT),
            rng,
            scoreboard: Scoreboard::default(),
            round: 1,
            round_ticks: 0,
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn interceptor(&self) -> &InterceptorState {
        &self.interceptor
    }

    pub fn inbound(&self) -> &InboundMissile {
        &self.inbound
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    fn round_end(&self) -> Option<RoundOutcome> {
        let interceptor = self.interceptor.position;
        if distance(interceptor, self.inbound.position) < playfield::HIT_DISTANCE {
            return Some(RoundOutcome::Intercepted);
        }
        if interceptor.altitude > playfield::ESCAPE_ALTITUDE
            || interceptor.altitude < playfield::GROUND_ALTITUDE
        {
            return Some(RoundOutcome::InterceptorLost);
        }
        if self.inbound.position.altitude < playfield::GROUND_ALTITUDE {
            return Some(RoundOutcome::GroundImpact);
        }
        None
    }

    fn finish_round(&mut self, outcome: RoundOutcome) -> RoundResult {
        self.scoreboard.record(outcome);
        let result = RoundResult {
            round: self.round,
            outcome,
            ticks: self.round_ticks,
            final_distance: distance(self.interceptor.position, self.inbound.position),
        };
        info!(
            round = result.round,
            outcome = ?result.outcome,
            ticks = result.ticks,
            hits = self.scoreboard.hits,
            misses = self.scoreboard.misses,
            "round ended"
        );

        self.interceptor = InterceptorState::launch(self.controller.motion());
        self.inbound = InboundMissile::spawn(&mut self.rng);
        self.wind.reset();
        self.round += 1;
        self.round_ticks = 0;
        result
    }

    /// Advance the world by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(outcome) = self.round_end() {
            return TickOutcome::RoundEnded(self.finish_round(outcome));
        }

        self.inbound.step(&mut self.rng);
        let wind = self.wind.sample();
        let report = self.controller.advance(&mut self.interceptor, self.inbound.position, wind);
        self.round_ticks += 1;

        let frame = self.frame(report.speed, report.correction, wind);
        trace!(?frame, "tick");
        TickOutcome::InFlight(frame)
    }

    fn frame(&self, speed: f64, correction: f64, wind: WindSample) -> TelemetryFrame {
        let diagnostics = self.controller.diagnostics();
        TelemetryFrame {
            round: self.round,
            tick: self.round_ticks,
            cells: diagnostics.cells.clone(),
            hit_cell: diagnostics.hit_cell,
            interceptor: self.interceptor.position,
            inbound: self.inbound.position,
            speed,
            correction,
            wind_strength: wind.strength,
            wind_angle_deg: normalize_degrees_360(radians_to_degrees(wind.angle_rad) % 360.0),
            hits: self.scoreboard.hits,
            misses: self.scoreboard.misses,
        }
    }

    /// Play `rounds` rounds; a round still in flight after `tick_limit` ticks
    /// is scored as `TimedOut`.
    pub fn run_rounds(&mut self, rounds: u32, tick_limit: u64) -> Vec<RoundResult> {
        self.run_rounds_with(rounds, tick_limit, |_| {})
    }

    /// As [`run_rounds`](Self::run_rounds), handing every in-flight frame to `on_frame`.
    pub fn run_rounds_with<F>(&mut self, rounds: u32, tick_limit: u64, mut on_frame: F) -> Vec<RoundResult>
    where
        F: FnMut(&TelemetryFrame),
    {
        let mut results = Vec::with_capacity(rounds as usize);
        while results.len() < rounds as usize {
            if self.round_ticks >= tick_limit {
                results.push(self.finish_round(RoundOutcome::TimedOut));
                continue;
            }
            match self.tick() {
                TickOutcome::RoundEnded(result) => results.push(result),
                TickOutcome::InFlight(frame) => on_frame(&frame),
            }
        }
        results
    }
}
