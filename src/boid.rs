/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid is a point mass steered by three rules, evaluated against a
 * snapshot of the flock taken at the start of the tick:
 * 1. Separation: Push away from every neighbor that is too close
 * 2. Alignment: Steer towards the combined heading of nearby boids
 * 3. Cohesion: Seek the softened average position of nearby boids
 *
 * All three write into the same acceleration accumulator, which is
 * integrated exactly once per tick and then cleared.
 */

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flock::Bounds;
use crate::params::FlockWeights;
use crate::physics::wrap_axis;

/// How `steer_toward` treats the steering delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringPolicy {
    /// `desired - velocity` is applied as-is.
    #[default]
    Unbounded,
    /// `desired - velocity` is clamped to `max_force` before it is applied.
    Bounded,
}

/// Fixed per-boid constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidTuning {
    pub mass: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub arrival_distance: f32,
    pub separate_distance: f32,
    pub align_distance: f32,
    pub cohere_distance: f32,
    pub steering: SteeringPolicy,
}

impl Default for BoidTuning {
    fn default() -> Self {
        Self {
            mass: 20.0,
            max_speed: 0.2,
            max_force: 0.1,
            arrival_distance: 2.0,
            separate_distance: 0.5,
            align_distance: 2.0,
            cohere_distance: 2.0,
            steering: SteeringPolicy::Unbounded,
        }
    }
}

impl BoidTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mass", self.mass)?;
        positive("max_speed", self.max_speed)?;
        non_negative("max_force", self.max_force)?;
        non_negative("arrival_distance", self.arrival_distance)?;
        non_negative("separate_distance", self.separate_distance)?;
        non_negative("align_distance", self.align_distance)?;
        non_negative("cohere_distance", self.cohere_distance)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// What other boids may read about a boid during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoidSnapshot {
    pub position: Vec3,
    pub forward: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    position: Vec3,
    velocity: Vec3,
    forward: Vec3,
    acceleration: Vec3,
    pub tuning: BoidTuning,
}

impl Default for Boid {
    fn default() -> Self {
        Self::new(BoidTuning::default())
    }
}

impl Boid {
    pub fn new(tuning: BoidTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            forward: Vec3::Z,
            acceleration: Vec3::ZERO,
            tuning,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.set_velocity(velocity);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Unit heading, or the last valid heading if the boid has stopped.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    // Placement by the spawner; not part of the per-tick update
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        if let Some(forward) = velocity.try_normalize() {
            self.forward = forward;
        }
    }

    pub fn snapshot(&self) -> BoidSnapshot {
        BoidSnapshot {
            position: self.position,
            forward: self.forward,
        }
    }

    // Accumulate a force, converted to acceleration through the boid's mass
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.tuning.mass;
    }

    // Reynolds steering: force = desired - velocity
    pub fn steer_toward(&mut self, desired: Vec3) {
        let mut force = desired - self.velocity;
        if self.tuning.steering == SteeringPolicy::Bounded {
            force = force.clamp_length_max(self.tuning.max_force);
        }
        self.apply_force(force);
    }

    /// Steers towards `target` at `max_speed`, slowing linearly once inside
    /// `arrival_distance`. A target at the boid's own position applies nothing.
    pub fn seek(&mut self, target: Vec3, max_speed: f32, arrival_distance: f32) {
        let offset = target - self.position;
        let Some(direction) = offset.try_normalize() else {
            return;
        };
        let distance = offset.length();

        let mut desired = direction * max_speed;
        if distance < arrival_distance {
            desired *= distance / arrival_distance;
        }

        self.steer_toward(desired);
    }

    pub fn flee(&mut self, target: Vec3, max_speed: f32) {
        let offset = self.position - target;
        let Some(direction) = offset.try_normalize() else {
            return;
        };

        self.steer_toward(direction * max_speed);
    }

    // Integrate the accumulated acceleration; runs once per tick after all steering
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;

        let max_speed = self.tuning.max_speed;
        if self.velocity.length() > max_speed {
            self.velocity = self.velocity.normalize_or_zero() * max_speed;
        }

        if let Some(forward) = self.velocity.try_normalize() {
            self.forward = forward;
        }

        // Velocity is already a per-tick displacement
        self.position += self.velocity;

        self.acceleration = Vec3::ZERO;
    }

    /// Mirrored wrap: leaving the cube by `d` on one face re-enters at `d`
    /// inside the opposite face.
    pub fn wrap_to_bounds(&mut self, center: Vec3, size: f32) {
        let radius = size * 0.5;
        let local = self.position - center;

        let wrapped = Vec3::new(
            wrap_axis(local.x, radius),
            wrap_axis(local.y, radius),
            wrap_axis(local.z, radius),
        );

        self.position = center + wrapped;
    }

    // Calculate separation force (avoid crowding neighbors).
    // Every close neighbor gets its own steer call, so crowding compounds.
    pub fn separate(&mut self, index: usize, flock: &[BoidSnapshot], weight: f32) {
        let separate_distance = self.tuning.separate_distance;
        // NaN or negative weights push nothing
        let cap = (self.tuning.max_speed * weight).max(0.0);

        for (other_index, other) in flock.iter().enumerate() {
            if other_index == index {
                continue;
            }

            let offset = self.position - other.position;
            let distance = offset.length();
            if distance >= separate_distance {
                continue;
            }

            // Coincident boids have no direction to push along
            let Some(away) = offset.try_normalize() else {
                continue;
            };

            let strength = (separate_distance / distance).clamp(0.0, cap);
            self.steer_toward(away * strength);
        }
    }

    // Calculate alignment force (steer towards the combined heading of neighbors)
    pub fn align(&mut self, index: usize, flock: &[BoidSnapshot], weight: f32) {
        let align_distance = self.tuning.align_distance;
        let mut heading = Vec3::ZERO;

        for (other_index, other) in flock.iter().enumerate() {
            if other_index == index {
                continue;
            }

            if self.position.distance(other.position) < align_distance {
                heading += other.forward;
            }
        }

        // No neighbors, or headings that cancel out
        let Some(heading) = heading.try_normalize() else {
            return;
        };

        self.steer_toward(heading * self.tuning.max_speed * weight);
    }

    /// Point the boid seeks for cohesion.
    ///
    /// Positions of neighbors within `cohere_distance` are summed and divided
    /// by `flock.len() - 1`, i.e. by every other boid rather than only the
    /// ones in range. The result is pulled towards the world origin when few
    /// neighbors are close, and a boid with nobody in range seeks the origin
    /// itself. This acts as a softened global cohesion term.
    /// A boid alone in the flock gets its own position back.
    pub fn cohesion_target(&self, index: usize, flock: &[BoidSnapshot]) -> Vec3 {
        let cohere_distance = self.tuning.cohere_distance;
        if flock.len() <= 1 {
            return self.position;
        }

        let mut sum = Vec3::ZERO;
        for (other_index, other) in flock.iter().enumerate() {
            if other_index == index {
                continue;
            }

            if self.position.distance(other.position) < cohere_distance {
                sum += other.position;
            }
        }

        sum / (flock.len() - 1) as f32
    }

    pub fn cohere(&mut self, index: usize, flock: &[BoidSnapshot], weight: f32) {
        let target = self.cohesion_target(index, flock);
        let speed = self.tuning.max_speed * weight;
        let arrival_distance = self.tuning.arrival_distance;

        self.seek(target, speed, arrival_distance);
    }

    // Apply all flocking behaviors; order is fixed
    pub fn flock(&mut self, index: usize, flock: &[BoidSnapshot], weights: &FlockWeights) {
        self.separate(index, flock, weights.separation);
        self.align(index, flock, weights.alignment);
        self.cohere(index, flock, weights.cohesion);
    }

    /// One full tick for this boid against the start-of-tick snapshot.
    pub fn step(
        &mut self,
        index: usize,
        flock: &[BoidSnapshot],
        weights: &FlockWeights,
        bounds: &Bounds,
    ) {
        self.flock(index, flock, weights);
        self.integrate();
        self.wrap_to_bounds(bounds.center, bounds.size);
    }
}
