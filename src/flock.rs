/*
 * Flock Module
 *
 * FlockWorld owns the cubic domain, the boids living in it and the live
 * behavior weights. It is passed explicitly to whoever drives the
 * simulation; nothing here is global, so tests can build as many isolated
 * worlds as they like.
 */

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::boid::Boid;
use crate::error::ConfigError;
use crate::params::{FlockParams, FlockWeights};
use crate::physics;

/// Axis-aligned cube of edge `size` centered on `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub size: f32,
}

impl Bounds {
    pub fn new(center: Vec3, size: f32) -> Self {
        Self { center, size }
    }

    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let local = (point - self.center).abs();
        let radius = self.radius();
        local.x <= radius && local.y <= radius && local.z <= radius
    }

    /// The twelve edges of the cube, as world-space segments.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        const CORNER_PAIRS: [([f32; 3], [f32; 3]); 12] = [
            ([-0.5, -0.5, -0.5], [0.5, -0.5, -0.5]),
            ([-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]),
            ([-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5]),
            ([0.5, -0.5, -0.5], [0.5, 0.5, -0.5]),
            ([-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5]),
            ([-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5]),
            ([0.5, -0.5, -0.5], [0.5, -0.5, 0.5]),
            ([0.5, 0.5, -0.5], [0.5, 0.5, 0.5]),
            ([-0.5, -0.5, 0.5], [0.5, -0.5, 0.5]),
            ([-0.5, 0.5, 0.5], [0.5, 0.5, 0.5]),
            ([-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5]),
            ([0.5, -0.5, 0.5], [0.5, 0.5, 0.5]),
        ];

        CORNER_PAIRS.map(|(a, b)| {
            (
                self.center + Vec3::from_array(a) * self.size,
                self.center + Vec3::from_array(b) * self.size,
            )
        })
    }
}

pub struct FlockWorld {
    bounds: Bounds,
    boids: Vec<Boid>,
    weights: FlockWeights,
    parallel: bool,
    tick_count: u64,
}

impl FlockWorld {
    /// Builds a world around an existing set of boids.
    pub fn with_boids(
        bounds: Bounds,
        weights: FlockWeights,
        boids: Vec<Boid>,
    ) -> Result<Self, ConfigError> {
        if !bounds.size.is_finite() || bounds.size <= 0.0 {
            return Err(ConfigError::InvalidSize(bounds.size));
        }
        if !bounds.center.is_finite() {
            return Err(ConfigError::InvalidCenter(bounds.center));
        }
        weights.validate()?;
        for boid in &boids {
            boid.tuning.validate()?;
        }

        Ok(Self {
            bounds,
            boids,
            weights,
            parallel: false,
            tick_count: 0,
        })
    }

    pub fn from_params(params: &FlockParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let bounds = Bounds::new(params.center, params.size);
        let tuning = params.tuning;
        let boids = Self::spawn(params.spawn_count, &bounds, &mut rng, || Boid::new(tuning));

        info!(
            boids = boids.len(),
            size = params.size,
            seed = ?params.seed,
            steering = ?tuning.steering,
            "flock spawned"
        );

        let mut world = Self::with_boids(bounds, params.weights, boids)?;
        world.parallel = params.parallel;
        Ok(world)
    }

    /// Creates `count` boids from `factory`, each placed uniformly inside
    /// `bounds` and given a random unit heading as its initial velocity.
    /// Bounds with no positive finite size spawn every boid at the center.
    pub fn spawn<R, F>(count: usize, bounds: &Bounds, rng: &mut R, mut factory: F) -> Vec<Boid>
    where
        R: Rng + ?Sized,
        F: FnMut() -> Boid,
    {
        let half = bounds.radius();

        (0..count)
            .map(|_| {
                let mut boid = factory();
                let offset = Vec3::new(
                    spawn_offset(rng, half),
                    spawn_offset(rng, half),
                    spawn_offset(rng, half),
                );
                boid.set_position(bounds.center + offset);
                boid.set_velocity(random_unit_vector(rng));
                boid
            })
            .collect()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn size(&self) -> f32 {
        self.bounds.size
    }

    pub fn center(&self) -> Vec3 {
        self.bounds.center
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn weights(&self) -> FlockWeights {
        self.weights
    }

    /// Replaces the live weights. Out-of-range values are clamped.
    pub fn set_weights(&mut self, weights: FlockWeights) {
        let clamped = weights.clamped();
        if clamped != weights {
            warn!(?weights, ?clamped, "flock weights clamped to slider range");
        }
        self.weights = clamped;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self) {
        let weights = self.weights;
        physics::update_boids(&mut self.boids, &self.bounds, &weights, self.parallel);
        self.tick_count += 1;

        trace!(tick = self.tick_count, "flock ticked");
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
        debug!(ticks, total = self.tick_count, "flock advanced");
    }
}

// Uniform on the unit sphere
fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(ring * theta.cos(), ring * theta.sin(), z).normalize_or_zero()
}

fn spawn_offset<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half.is_finite() && half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_params(seed: u64) -> FlockParams {
        FlockParams {
            spawn_count: 40,
            seed: Some(seed),
            ..FlockParams::default()
        }
    }

    #[test]
    fn spawn_places_boids_inside_bounds_with_unit_velocity() {
        let bounds = Bounds::new(Vec3::new(3.0, -2.0, 1.0), 8.0);
        let mut rng = StdRng::seed_from_u64(11);
        let boids = FlockWorld::spawn(200, &bounds, &mut rng, Boid::default);

        assert_eq!(boids.len(), 200);
        for boid in &boids {
            assert!(bounds.contains(boid.position()));
            assert!((boid.velocity().length() - 1.0).abs() < 1.0e-5);
            assert!((boid.forward() - boid.velocity()).length() < 1.0e-5);
        }
    }

    #[test]
    fn spawn_into_empty_bounds_stays_at_center() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mut rng = StdRng::seed_from_u64(5);

        for size in [0.0, -4.0, f32::NAN] {
            let boids = FlockWorld::spawn(8, &Bounds::new(center, size), &mut rng, Boid::default);
            assert_eq!(boids.len(), 8);
            for boid in &boids {
                assert_eq!(boid.position(), center);
                assert!((boid.velocity().length() - 1.0).abs() < 1.0e-5);
            }
        }
    }

    #[test]
    fn same_seed_spawns_same_flock() {
        let a = FlockWorld::from_params(&seeded_params(99)).unwrap();
        let b = FlockWorld::from_params(&seeded_params(99)).unwrap();
        let c = FlockWorld::from_params(&seeded_params(100)).unwrap();

        assert_eq!(a.boids(), b.boids());
        assert_ne!(a.boids(), c.boids());
    }

    #[test]
    fn from_params_rejects_invalid_world() {
        let params = FlockParams {
            size: -1.0,
            ..FlockParams::default()
        };
        assert!(FlockWorld::from_params(&params).is_err());
    }

    #[test]
    fn set_weights_clamps() {
        let mut world = FlockWorld::from_params(&seeded_params(1)).unwrap();
        world.set_weights(FlockWeights::new(3.0, -0.5, 1.25));
        assert_eq!(world.weights(), FlockWeights::new(2.0, 0.0, 1.25));
    }

    #[test]
    fn tick_counts_steps() {
        let mut world = FlockWorld::from_params(&seeded_params(2)).unwrap();
        world.run(5);
        world.tick();
        assert_eq!(world.tick_count(), 6);
    }

    #[test]
    fn edges_span_the_cube() {
        let bounds = Bounds::new(Vec3::ONE, 4.0);
        let edges = bounds.edges();

        assert_eq!(edges.len(), 12);
        for (a, b) in edges {
            assert!((a.distance(b) - 4.0).abs() < 1.0e-6);
            assert!(bounds.contains(a) && bounds.contains(b));
        }
    }
}
