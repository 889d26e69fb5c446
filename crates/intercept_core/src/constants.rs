//! Canonical constants for the interception playfield
//!
//! Defaults for the config structs are drawn from here so tests and presets
//! agree on a single source of truth.

// ============================================================
// Playfield
// ============================================================
pub mod playfield {
    /// Horizontal extent (0..=255)
    pub const WIDTH: f64 = 255.0;

    /// Vertical extent (0..=231)
    pub const HEIGHT: f64 = 231.0;

    /// Interceptor counts as lost once it flies this far above the top edge.
    pub const ESCAPE_ALTITUDE: f64 = HEIGHT + 100.0;

    /// Anything at or below this altitude has hit the ground.
    pub const GROUND_ALTITUDE: f64 = 6.0;

    /// Hit radius for an interception.
    pub const HIT_DISTANCE: f64 = 4.0;
}

// ============================================================
// Sensor
// ============================================================
pub mod sensor {
    /// Number of angular cells (-8..=+8)
    pub const CELL_COUNT: usize = 17;

    /// Left edge of the field of view relative to heading (degrees)
    pub const FOV_START_DEG: f64 = -50.0;

    /// Right edge of the field of view relative to heading (degrees)
    pub const FOV_STOP_DEG: f64 = 50.0;

    /// Projection depth of each cell triangle.
    /// Must exceed the largest observer-target separation on the playfield.
    pub const DEPTH: f64 = 700.0;
}

// ============================================================
// Interceptor motion
// ============================================================
pub mod interceptor {
    /// Launch pad, bottom centre
    pub const LAUNCH_HORIZONTAL: f64 = 128.0;
    pub const LAUNCH_ALTITUDE: f64 = 6.0;

    /// Straight up (radians, 0 = pointing right)
    pub const LAUNCH_HEADING_RAD: f64 = std::f64::consts::FRAC_PI_2;

    pub const LAUNCH_SPEED: f64 = 1.0;

    /// Pseudo gravity applied downwards every tick regardless of heading
    pub const GRAVITY: f64 = 0.9;

    /// Thrust model: speed grows by this much every tick, unbounded
    pub const SPEED_INCREMENT: f64 = 0.07;
}

// ============================================================
// Inbound missile motion
// ============================================================
pub mod inbound {
    /// Amplifier for the per-round horizontal drift
    pub const DRIFT_AMPLIFIER: f64 = 3.0;

    /// Constant descent per tick
    pub const DESCENT_PER_TICK: f64 = 0.5;

    /// Walls where the horizontal drift reverses
    pub const BOUNCE_MIN: f64 = 10.0;
    pub const BOUNCE_MAX: f64 = 246.0;

    /// Spawn altitude band below the top edge
    pub const SPAWN_ALTITUDE_BAND: f64 = 120.0;
}

// ============================================================
// Training
// ============================================================
pub mod training {
    /// Nominal vertical separation used to place candidates
    pub const CANDIDATE_RADIUS: f64 = 231.0;

    /// Angular step of the candidate sweep (degrees)
    pub const CANDIDATE_STEP_DEG: f64 = 0.01;

    /// Upper bound on sweep iterations; finer steps are rejected by `validate`.
    pub const MAX_CANDIDATE_STEPS: u64 = 10_000_000;

    pub const MAX_ERROR: f64 = 0.001;
    pub const CHECK_INTERVAL: u64 = 1_000;
    pub const MAX_ATTEMPTS: u64 = 2_000_000;

    pub const LEARNING_RATE: f64 = 0.05;
    pub const WEIGHT_SEED: u64 = 0x5EED;
}

/// Hand-authored steering offsets (radians) for the 17-cell sensor.
///
/// Index 8 is the centre cell; it never fires, so its entry is unreachable.
pub const CANONICAL_LOOKUP_TABLE: [f64; 17] = [
    -0.819, -0.709, -0.6, -0.491, -0.382, -0.273, -0.164, -0.054, 0.054, 0.164, 0.273, 0.382,
    0.491, 0.6, 0.709, 0.818, 0.871,
];

const _: () = assert!(CANONICAL_LOOKUP_TABLE.len() == sensor::CELL_COUNT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_covers_playfield_diagonal() {
        let diagonal = (playfield::WIDTH.powi(2) + playfield::ESCAPE_ALTITUDE.powi(2)).sqrt();
        assert!(sensor::DEPTH > diagonal);
    }

    #[test]
    fn test_lookup_table_is_monotonic() {
        for pair in CANONICAL_LOOKUP_TABLE.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
