/*
 * Simulation Parameters Module
 *
 * This module defines the FlockParams struct that contains everything needed
 * to build a flock: the domain, the spawn count, the per-boid tuning and the
 * three behavior weights. Parameters are loaded from RON (see `config`) and
 * may be edited live through the viewer. It also provides slider ranges,
 * validation and change detection.
 */

use std::ops::RangeInclusive;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::boid::BoidTuning;
use crate::error::ConfigError;

/// Multipliers for the three flocking behaviors, sampled once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
}

impl Default for FlockWeights {
    fn default() -> Self {
        Self {
            separation: 1.0,
            alignment: 1.0,
            cohesion: 1.0,
        }
    }
}

impl FlockWeights {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 2.0;

    pub fn new(separation: f32, alignment: f32, cohesion: f32) -> Self {
        Self {
            separation,
            alignment,
            cohesion,
        }
    }

    pub fn range() -> RangeInclusive<f32> {
        Self::MIN..=Self::MAX
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || !Self::range().contains(&value) {
                return Err(ConfigError::WeightOutOfRange {
                    name,
                    value,
                    min: Self::MIN,
                    max: Self::MAX,
                });
            }
        }
        Ok(())
    }

    /// Forces every weight into the slider range. NaN becomes `MIN`.
    pub fn clamped(self) -> Self {
        let clamp = |value: f32| {
            if value.is_nan() {
                Self::MIN
            } else {
                value.clamp(Self::MIN, Self::MAX)
            }
        };
        Self {
            separation: clamp(self.separation),
            alignment: clamp(self.alignment),
            cohesion: clamp(self.cohesion),
        }
    }

    fn named(&self) -> [(&'static str, f32); 3] {
        [
            ("separation", self.separation),
            ("alignment", self.alignment),
            ("cohesion", self.cohesion),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub spawn_count: usize,
    pub size: f32,
    pub center: Vec3,
    pub weights: FlockWeights,
    pub tuning: BoidTuning,
    /// Fixed ticks per second when a host drives the flock in real time.
    pub tick_rate: f32,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    pub(crate) previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParamSnapshot {
    spawn_count: usize,
    size: f32,
    weights: FlockWeights,
    tick_rate: f32,
    parallel: bool,
    show_debug: bool,
    pause_simulation: bool,
}

/// What moved since the last `take_snapshot`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub weights_changed: bool,
    pub respawn_needed: bool,
    pub tick_rate_changed: bool,
    pub any_changed: bool,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            spawn_count: 10,
            size: 10.0,
            center: Vec3::ZERO,
            weights: FlockWeights::default(),
            tuning: BoidTuning::default(),
            tick_rate: 50.0,
            seed: None,
            parallel: false,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl FlockParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !self.center.is_finite() {
            return Err(ConfigError::InvalidCenter(self.center));
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "tick_rate",
                value: self.tick_rate,
            });
        }
        self.weights.validate()?;
        self.tuning.validate()?;
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            spawn_count: self.spawn_count,
            size: self.size,
            weights: self.weights,
            tick_rate: self.tick_rate,
            parallel: self.parallel,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Without a snapshot nothing has changed
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };

        let weights_changed = self.weights != prev.weights;
        let respawn_needed = self.spawn_count != prev.spawn_count || self.size != prev.size;
        let tick_rate_changed = self.tick_rate != prev.tick_rate;
        let any_changed = weights_changed
            || respawn_needed
            || tick_rate_changed
            || self.parallel != prev.parallel
            || self.show_debug != prev.show_debug
            || self.pause_simulation != prev.pause_simulation;

        ParamChanges {
            weights_changed,
            respawn_needed,
            tick_rate_changed,
            any_changed,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_spawn_count_range() -> RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_size_range() -> RangeInclusive<f32> {
        2.0..=100.0
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        FlockWeights::range()
    }

    pub fn get_tick_rate_range() -> RangeInclusive<f32> {
        10.0..=240.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FlockParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_world() {
        let params = FlockParams {
            size: 0.0,
            ..FlockParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::InvalidSize(_))));

        let params = FlockParams {
            center: Vec3::new(f32::NAN, 0.0, 0.0),
            ..FlockParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::InvalidCenter(_))));
    }

    #[test]
    fn rejects_zero_mass() {
        let mut params = FlockParams::default();
        params.tuning.mass = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositive { name: "mass", .. })
        ));
    }

    #[test]
    fn rejects_weight_outside_slider_range() {
        let params = FlockParams {
            weights: FlockWeights::new(1.0, 2.5, 1.0),
            ..FlockParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::WeightOutOfRange { name: "alignment", .. })
        ));
    }

    #[test]
    fn clamped_weights_stay_in_range() {
        let weights = FlockWeights::new(-1.0, 7.0, f32::NAN).clamped();
        assert_eq!(weights, FlockWeights::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn change_detection_tracks_weights_and_respawn() {
        let mut params = FlockParams::default();
        assert_eq!(params.detect_changes(), ParamChanges::default());

        params.take_snapshot();
        assert!(!params.detect_changes().any_changed);

        params.weights.cohesion = 0.5;
        let changes = params.detect_changes();
        assert!(changes.weights_changed);
        assert!(!changes.respawn_needed);
        assert!(changes.any_changed);

        params.take_snapshot();
        params.spawn_count = 50;
        let changes = params.detect_changes();
        assert!(!changes.weights_changed);
        assert!(changes.respawn_needed);
    }
}
