use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, EncoderConfig, LogLevel, LoggingConfig, ReplayConfig};

/// Prefix of environment variables that override file settings,
/// e.g. `CHARTFEED__ENCODER__MARKER`.
pub const ENV_PREFIX: &str = "CHARTFEED";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at `path`
/// (skipped when it does not exist), then `CHARTFEED__*` environment variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    build(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    // The encoder owns the marker rules.
    events::JsonEncoder::new(config.encoder.marker.as_str())
        .map_err(|e| ConfigError::ValidationError(format!("encoder.marker: {e}")))?;
    if config.replay.render_every == 0 {
        return Err(ConfigError::ValidationError(
            "replay.render_every must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = build(Path::new("does-not-exist.toml"), env(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.encoder.marker, "#bigint");
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.replay.page, 1);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
            [encoder]
            marker = "@i64"

            [logging]
            level = "debug"
            "#,
        );
        let config = build(file.path(), env(&[])).unwrap();
        assert_eq!(config.encoder.marker, "@i64");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.replay, ReplayConfig::default());
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[replay]\npage = 4\n");
        let config = build(
            file.path(),
            env(&[
                ("CHARTFEED__REPLAY__PAGE", "9"),
                ("CHARTFEED__REPLAY__REAL_TIME", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.replay.page, 9);
        assert!(config.replay.real_time);
        assert_eq!(config.replay.render_every, 100);
    }

    #[test]
    fn invalid_marker_fails_validation() {
        let file = toml_file("[encoder]\nmarker = \"\"\n");
        let err = build(file.path(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let file = toml_file("[encoder]\nmarker = 'a\"b'\n");
        assert!(build(file.path(), env(&[])).is_err());

        let file = toml_file("[encoder]\nmarker = \"#big\\tint\"\n");
        let err = build(file.path(), env(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError(msg) if msg.starts_with("encoder.marker")
        ));
    }

    #[test]
    fn zero_render_interval_fails_validation() {
        let file = toml_file("[replay]\nrender_every = 0\n");
        let err = build(file.path(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("render_every")));
    }

    #[test]
    fn unknown_log_level_is_a_load_error() {
        let file = toml_file("[logging]\nlevel = \"loud\"\n");
        let err = build(file.path(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
