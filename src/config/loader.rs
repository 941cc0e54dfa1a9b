//! Configuration loading.
//!
//! Layered sources, later entries winning: built-in defaults, an optional
//! TOML file, then `LARDER__`-prefixed environment variables (double
//! underscore separating sections, e.g. `LARDER__DATABASE__URL`).

use std::path::Path;

use config::{Config, Environment, File};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

pub const ENV_PREFIX: &str = "LARDER";

/// Loads settings from an optional file path plus the environment.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = config.try_deserialize::<Settings>()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_without_a_file() {
        let settings = load_settings(None).expect("defaults should load");
        assert_eq!(settings.application.name, "larder");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_settings(Some(Path::new("/nonexistent/larder.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
