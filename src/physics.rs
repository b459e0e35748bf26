/*
 * Physics Module
 *
 * This module runs one simulation tick over the whole flock.
 *
 * The tick is two-phase: every boid's position and heading are copied into a
 * snapshot first, then each boid accumulates its forces against that snapshot,
 * integrates and wraps. A boid only ever writes to itself, so the order in
 * which boids are visited does not change the result, and the same work can
 * be spread across threads with rayon.
 */

use rayon::prelude::*;

use crate::boid::{Boid, BoidSnapshot};
use crate::flock::Bounds;
use crate::params::FlockWeights;

/// Wraps a single coordinate, relative to the domain center, into
/// `[-radius, radius]`.
///
/// Overshooting one face by `d` re-enters at `d` inside the opposite face.
/// Overshoots of more than a full domain width fall back to a Euclidean
/// modulo wrap.
pub fn wrap_axis(value: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }

    let span = 2.0 * radius;

    if value > radius {
        let wrapped = value - span;
        if wrapped <= radius {
            return wrapped;
        }
    } else if value < -radius {
        let wrapped = value + span;
        if wrapped >= -radius {
            return wrapped;
        }
    } else {
        return value;
    }

    // rem_euclid can round up to `span` for tiny negative inputs
    ((value + radius).rem_euclid(span) - radius).clamp(-radius, radius)
}

pub fn snapshot_boids(boids: &[Boid]) -> Vec<BoidSnapshot> {
    boids.iter().map(Boid::snapshot).collect()
}

// Update boid positions and behaviors for one tick
pub fn update_boids(boids: &mut [Boid], bounds: &Bounds, weights: &FlockWeights, parallel: bool) {
    let snapshot = snapshot_boids(boids);

    if parallel {
        boids
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, boid)| boid.step(index, &snapshot, weights, bounds));
    } else {
        for (index, boid) in boids.iter_mut().enumerate() {
            boid.step(index, &snapshot, weights, bounds);
        }
    }
}
