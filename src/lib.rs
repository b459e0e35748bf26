/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The simulation core (boid, physics, flock) is plain Rust with no windowing
 * dependency; the nannou viewer modules are only built with the `viewer`
 * feature.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidSnapshot, BoidTuning, SteeringPolicy};
pub use debug::{DebugInfo, FlockStats};
pub use error::ConfigError;
pub use flock::{Bounds, FlockWorld};
pub use params::{FlockParams, FlockWeights, ParamChanges};
pub use timestep::FixedTimestep;

#[cfg(feature = "viewer")]
pub use app::Model;

// Define modules
pub mod boid;
pub mod config;
pub mod debug;
pub mod error;
pub mod flock;
pub mod logging;
pub mod params;
pub mod physics;
pub mod timestep;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod camera;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;

// Constants
pub const DEFAULT_CONFIG_PATH: &str = "config/flock.ron";
