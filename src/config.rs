/*
 * Config Module
 *
 * Loads FlockParams from RON. Missing fields fall back to their defaults,
 * so a config file only needs to mention what it changes. The result is
 * validated before it is handed back.
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConfigError;
use crate::params::FlockParams;

pub fn load_params(path: impl AsRef<Path>) -> Result<FlockParams, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let params = parse_params_from(&text, path)?;
    info!(path = %path.display(), boids = params.spawn_count, "loaded flock config");
    Ok(params)
}

pub fn parse_params(text: &str) -> Result<FlockParams, ConfigError> {
    parse_params_from(text, Path::new("<inline>"))
}

fn parse_params_from(text: &str, origin: &Path) -> Result<FlockParams, ConfigError> {
    let params: FlockParams = ron::from_str(text).map_err(|source| ConfigError::Parse {
        path: PathBuf::from(origin),
        source,
    })?;
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::SteeringPolicy;
    use crate::params::FlockWeights;

    #[test]
    fn partial_config_keeps_defaults() {
        let params = parse_params("(spawn_count: 25, size: 20.0)").unwrap();
        assert_eq!(params.spawn_count, 25);
        assert_eq!(params.size, 20.0);
        assert_eq!(params.weights, FlockWeights::default());
        assert_eq!(params.tuning.mass, 20.0);
    }

    #[test]
    fn nested_fields_parse() {
        let text = r#"(
            center: (1.0, 2.0, 3.0),
            weights: (separation: 1.5, cohesion: 0.25),
            tuning: (max_speed: 0.5, steering: Bounded),
            seed: Some(7),
        )"#;
        let params = parse_params(text).unwrap();

        assert_eq!(params.center, glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(params.weights, FlockWeights::new(1.5, 1.0, 0.25));
        assert_eq!(params.tuning.max_speed, 0.5);
        assert_eq!(params.tuning.steering, SteeringPolicy::Bounded);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        assert!(matches!(
            parse_params("(spawn_count: \"lots\")"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        assert!(matches!(
            parse_params("(size: 0.0)"),
            Err(ConfigError::InvalidSize(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_params("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::DEFAULT_CONFIG_PATH);
        let params = load_params(path).unwrap();
        assert!(params.validate().is_ok());
    }
}
