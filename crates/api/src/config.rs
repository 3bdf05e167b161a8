use std::path::PathBuf;
use std::str::FromStr;

/// Raised when an environment variable is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When unset, records live in JSON files under `data_dir`.
    pub database_url: Option<String>,
    /// Directory holding `<collection>.json` files (default: `data`).
    pub data_dir: PathBuf,
    /// Directory uploaded files are written to and served from (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Request body limit for uploads in bytes (default: 50 MiB).
    pub max_upload_bytes: usize,
    /// Reject uploaded files whose content type is not `image/*` (default: `true`).
    pub upload_images_only: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `3000`      |
    /// | `CORS_ORIGINS`         | `*`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `DATABASE_URL`         | unset       |
    /// | `DATA_DIR`             | `data`      |
    /// | `UPLOAD_DIR`           | `uploads`   |
    /// | `MAX_UPLOAD_BYTES`     | `52428800`  |
    /// | `UPLOAD_IMAGES_ONLY`   | `true`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var("PORT", var("PORT"), 3000, "a port number")?,
            cors_origins,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS"),
                30,
                "a number of seconds",
            )?,
            database_url: var("DATABASE_URL"),
            data_dir: var("DATA_DIR").unwrap_or_else(|| "data".into()).into(),
            upload_dir: var("UPLOAD_DIR").unwrap_or_else(|| "uploads".into()).into(),
            max_upload_bytes: parse_var(
                "MAX_UPLOAD_BYTES",
                var("MAX_UPLOAD_BYTES"),
                50 * 1024 * 1024,
                "a byte count",
            )?,
            upload_images_only: parse_var(
                "UPLOAD_IMAGES_ONLY",
                var("UPLOAD_IMAGES_ONLY"),
                true,
                "true or false",
            )?,
        })
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, ["*"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.database_url.is_none());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 52_428_800);
        assert!(config.upload_images_only);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://alazar.studio, http://localhost:5173"),
            ("DATABASE_URL", "postgres://localhost/alazar"),
            ("UPLOAD_IMAGES_ONLY", "false"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            ["https://alazar.studio", "http://localhost:5173"]
        );
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/alazar"));
        assert!(!config.upload_images_only);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("UPLOAD_IMAGES_ONLY", "yes")]),
            Err(ConfigError::Invalid { var: "UPLOAD_IMAGES_ONLY", .. })
        );
    }
}
