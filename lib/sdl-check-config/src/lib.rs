mod env_overrides;
pub mod input;
pub mod log;

use config::{Config, File, FileFormat, FileSourceFile};
use envconfig::Envconfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::PathBuf;

use crate::{
    env_overrides::{EnvVarOverrides, EnvVarOverridesError},
    input::InputConfig,
    log::LoggingConfig,
};

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SdlCheckConfig {
    /// The logger configuration.
    ///
    /// Logs are written to stderr so they never mix with the check results printed to stdout.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Rules for schema files handed to the checker.
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum SdlCheckConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Failed to apply configuration overrides: {0}")]
    EnvVarOverridesError(#[from] EnvVarOverridesError),
    #[error("Failed to load the environment variables: {0}")]
    EnvVarLoadError(#[from] envconfig::Error),
    #[error("Failed to parse the configuration file path: {0}")]
    ConfigPathParseError(Infallible),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "sdl-check.config.yaml",
    "sdl-check.config.yml",
    "sdl-check.config.json",
    "sdl-check.config.json5",
];

/// Loads the configuration from `override_config_path` (required to exist) or,
/// when none is given, from any of the default file names in the current
/// directory. Environment variable overrides are applied last.
pub fn load_config(
    override_config_path: Option<String>,
) -> Result<SdlCheckConfig, SdlCheckConfigError> {
    let env_overrides = EnvVarOverrides::init_from_env()?;
    let mut config = Config::builder();

    if let Some(path_str) = override_config_path {
        let path_buf = path_str
            .parse::<PathBuf>()
            .map_err(SdlCheckConfigError::ConfigPathParseError)?;
        let as_file: File<FileSourceFile, _> = path_buf.into();

        config = config.add_source(as_file.required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    config = env_overrides.apply_overrides(config)?;

    Ok(config.build()?.try_deserialize::<SdlCheckConfig>()?)
}

pub fn parse_yaml_config(config_raw: &str) -> Result<SdlCheckConfig, SdlCheckConfigError> {
    Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<SdlCheckConfig>()
        .map_err(SdlCheckConfigError::ConfigLoadError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogFormat, LogLevel};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = parse_yaml_config("").expect("empty config should be accepted");
        assert_eq!(config.log.level, LogLevel::default());
        assert_eq!(config.log.format, LogFormat::default());
        assert_eq!(config.log.filter, None);
        assert_eq!(
            config.input.allowed_extensions,
            vec!["graphql", "gql", "json", "txt"]
        );
        assert_eq!(config.input.max_file_size, "5 MB");
    }

    #[test]
    fn reads_every_section() {
        let config = parse_yaml_config(
            r#"
log:
  level: warn
  format: json
  filter: sdl_check=trace
input:
  allowed_extensions: [graphql]
  max_file_size: 64 kB
"#,
        )
        .expect("config should parse");

        assert_eq!(config.log.level, LogLevel::Warn);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.filter.as_deref(), Some("sdl_check=trace"));
        assert_eq!(config.input.allowed_extensions, vec!["graphql"]);
        assert_eq!(config.input.max_file_size_bytes(), Ok(64_000));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_yaml_config("input:\n  max_size: 1 MB\n").unwrap_err();
        assert!(matches!(err, SdlCheckConfigError::ConfigLoadError(_)));
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(parse_yaml_config("log:\n  level: loud\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some("does-not-exist/sdl-check.config.yaml".to_string()));
        assert!(result.is_err());
    }
}
