/*
 * Error Module
 *
 * Setup-time failures. Everything here is reported once while the flock is
 * being configured; the per-tick simulation path never returns errors.
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("world size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} weight {value} is outside the allowed range {min}..={max}")]
    WeightOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("world center must be finite, got {0}")]
    InvalidCenter(glam::Vec3),
}
