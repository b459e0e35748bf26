/*
 * Debug Information Module
 *
 * FlockStats summarizes the state of a world (speeds, centroid and whether
 * every boid is inside the domain); the headless runner logs it and the
 * viewer shows it. DebugInfo holds the viewer's per-frame metrics:
 * - FPS (frames per second)
 * - Frame time
 * - Fixed ticks run this frame
 * - Interpolation alpha
 */

use std::time::Duration;

use glam::Vec3;

use crate::flock::FlockWorld;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockStats {
    pub tick: u64,
    pub boid_count: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub centroid: Vec3,
    /// Mean of all unit headings; near 1 when the flock moves as one.
    pub polarization: f32,
    pub out_of_bounds: usize,
}

impl FlockStats {
    pub fn sample(world: &FlockWorld) -> Self {
        let boids = world.boids();
        let bounds = world.bounds();

        let mut stats = Self {
            tick: world.tick_count(),
            boid_count: boids.len(),
            ..Self::default()
        };
        if boids.is_empty() {
            return stats;
        }

        let mut speed_sum = 0.0;
        let mut position_sum = Vec3::ZERO;
        let mut heading_sum = Vec3::ZERO;

        for boid in boids {
            let speed = boid.velocity().length();
            speed_sum += speed;
            stats.max_speed = stats.max_speed.max(speed);
            position_sum += boid.position();
            heading_sum += boid.forward();
            if !bounds.contains(boid.position()) {
                stats.out_of_bounds += 1;
            }
        }

        let count = boids.len() as f32;
        stats.mean_speed = speed_sum / count;
        stats.centroid = position_sum / count;
        stats.polarization = heading_sum.length() / count;
        stats
    }
}

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: u32,
    pub interpolation_alpha: f32,
    pub stats: FlockStats,
}
