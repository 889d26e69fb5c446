//! Wind shear
//!
//! Strength is re-rolled every tick unless constant; the direction random
//! walks by up to `max_deviation_deg` per tick, or stays at 0 when the
//! deviation is 0.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WindConfig;
use crate::geometry::degrees_to_radians;
use crate::guidance::WindSample;

#[derive(Debug, Clone)]
pub struct WindModel {
    config: WindConfig,
    rng: ChaCha8Rng,
    angle_rad: f64,
}

impl WindModel {
    pub fn new(config: WindConfig, seed: u64) -> Self {
        Self { config, rng: ChaCha8Rng::seed_from_u64(seed), angle_rad: 0.0 }
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    /// Wind for the next tick
    pub fn sample(&mut self) -> WindSample {
        let fraction = if self.config.constant { 1.0 } else { self.rng.gen_range(0.0..1.0) };
        let strength = self.config.strength * fraction;

        if self.config.max_deviation_deg > 0.0 {
            let swing = self.rng.gen_range(-1.0..1.0) * self.config.max_deviation_deg;
            self.angle_rad += degrees_to_radians(swing);
        } else {
            self.angle_rad = 0.0;
        }

        WindSample { strength, angle_rad: self.angle_rad }
    }

    /// Direction back to 0 for a new round
    pub fn reset(&mut self) {
        self.angle_rad = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_strength_is_calm() {
        let mut wind = WindModel::new(WindConfig { strength: 0.0, constant: false, max_deviation_deg: 30.0 }, 1);
        for _ in 0..100 {
            assert_eq!(wind.sample().strength, 0.0);
        }
    }

    #[test]
    fn test_constant_wind_blows_at_full_strength() {
        let mut wind = WindModel::new(WindConfig { strength: 1.5, constant: true, max_deviation_deg: 0.0 }, 2);
        for _ in 0..10 {
            assert_eq!(wind.sample(), WindSample { strength: 1.5, angle_rad: 0.0 });
        }
    }

    #[test]
    fn test_variable_strength_stays_below_peak() {
        let mut wind = WindModel::new(WindConfig { strength: 2.0, constant: false, max_deviation_deg: 0.0 }, 3);
        for _ in 0..200 {
            let s = wind.sample().strength;
            assert!((0.0..2.0).contains(&s));
        }
    }

    #[test]
    fn test_direction_wanders_within_deviation() {
        let mut wind = WindModel::new(WindConfig { strength: 1.0, constant: true, max_deviation_deg: 10.0 }, 4);
        let mut previous = 0.0;
        for _ in 0..50 {
            let angle = wind.sample().angle_rad;
            assert!((angle - previous).abs() <= degrees_to_radians(10.0) + 1e-12);
            previous = angle;
        }
        wind.reset();
        wind.config.max_deviation_deg = 0.0;
        assert_eq!(wind.sample().angle_rad, 0.0);
    }

    #[test]
    fn test_same_seed_same_gusts() {
        let cfg = WindConfig { strength: 1.0, constant: false, max_deviation_deg: 5.0 };
        let mut a = WindModel::new(cfg.clone(), 9);
        let mut b = WindModel::new(cfg, 9);
        for _ in 0..20 {
            assert_eq!(a.sample(), b.sample());
        }
    }
}
