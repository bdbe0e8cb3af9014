//! Layered configuration loading.
//!
//! Every binary owns its configuration struct and hands a default instance to
//! [`load_layered`]. Layers are merged in this order, later wins:
//!
//! 1. serialized defaults
//! 2. YAML file (only when a path is given)
//! 3. environment variables with the binary's prefix, `__` separating nested keys
//!    (e.g. `USER_SERVICE__STORAGE__URI`)
//!
//! CLI overrides are applied by the caller on the extracted value.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Configuration error for layered loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("invalid configuration: {source}")]
    Invalid {
        #[source]
        source: Box<figment::Error>,
    },

    #[error("failed to render configuration: {source}")]
    Render {
        #[source]
        source: serde_json::Error,
    },
}

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging section shared by all binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `user_service=debug,info`.
    pub level: String,
    pub format: LogFormat,
    /// Colored output for the text format.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            ansi: true,
        }
    }
}

/// Load `T` from defaults, an optional YAML file and `<env_prefix>*` variables.
///
/// # Errors
/// Returns [`ConfigError::MissingFile`] if `path` is given but is not a file, and
/// [`ConfigError::Invalid`] if the merged layers cannot be deserialized into `T`.
pub fn load_layered<T>(defaults: &T, path: Option<&Path>, env_prefix: &str) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned,
{
    let mut figment = Figment::new().merge(Serialized::defaults(defaults));

    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), "loading configuration file");
        figment = figment.merge(Yaml::file(path));
    }

    figment
        .merge(Env::prefixed(env_prefix).split("__"))
        .extract()
        .map_err(|e| ConfigError::Invalid {
            source: Box::new(e),
        })
}

/// Render the effective configuration for `--print-config` and `check`.
///
/// # Errors
/// Returns [`ConfigError::Render`] if `T` cannot be serialized.
pub fn to_pretty_json<T: Serialize>(config: &T) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(|source| ConfigError::Render { source })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    #[serde(default)]
    struct SampleConfig {
        listen_addr: String,
        logging: LoggingConfig,
        nested: Nested,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    #[serde(default)]
    struct Nested {
        collection: String,
        retries: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                listen_addr: "127.0.0.1:50051".to_owned(),
                logging: LoggingConfig::default(),
                nested: Nested::default(),
            }
        }
    }

    impl Default for Nested {
        fn default() -> Self {
            Self {
                collection: "user".to_owned(),
                retries: 3,
            }
        }
    }

    const PREFIX: &str = "SVCKIT_BOOTSTRAP_TEST_UNSET__";

    #[test]
    fn defaults_are_used_without_file() {
        let cfg = load_layered(&SampleConfig::default(), None, PREFIX).unwrap();
        assert_eq!(cfg, SampleConfig::default());
    }

    #[test]
    fn yaml_overrides_only_present_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "listen_addr: 0.0.0.0:6000\nlogging:\n  format: json\nnested:\n  retries: 7"
        )
        .unwrap();

        let cfg = load_layered(&SampleConfig::default(), Some(file.path()), PREFIX).unwrap();

        assert_eq!(cfg.listen_addr, "0.0.0.0:6000");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.nested.collection, "user");
        assert_eq!(cfg.nested.retries, 7);
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = load_layered(
            &SampleConfig::default(),
            Some(Path::new("/definitely/not/here.yaml")),
            PREFIX,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn malformed_value_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "nested:\n  retries: many").unwrap();

        let err = load_layered(&SampleConfig::default(), Some(file.path()), PREFIX).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn pretty_json_contains_sections() {
        let out = to_pretty_json(&SampleConfig::default()).unwrap();
        assert!(out.contains("\"listen_addr\""));
        assert!(out.contains("\"format\": \"text\""));
    }
}
