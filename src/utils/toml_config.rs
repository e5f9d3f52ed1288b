//! TOML-based configuration for FitTrack
//!
//! Infrastructure settings live in `fittrack.toml`. Secrets never do: the file
//! names the environment variable that holds the signing secret, and
//! [`FitTrackConfig::jwt_secret`] resolves it at startup. Configuration is read
//! once and is immutable for the life of the process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from fittrack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitTrackConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Bearer token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Shortest signing secret accepted at startup
    #[serde(default = "default_min_secret_len")]
    pub min_secret_len: usize,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_token_ttl_secs() -> i64 {
    24 * 60 * 60
}

/// Ten years. Longer lifetimes are rejected at load time.
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

fn default_min_secret_len() -> usize {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_ttl_secs: default_token_ttl_secs(),
            min_secret_len: default_min_secret_len(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, `:memory:`, or a `libsql://` URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "./data/fittrack.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

// ============= Errors =============

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl FitTrackConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(path)) => {
                tracing::warn!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: FitTrackConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate values that serde can't check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_ttl_secs <= 0 || self.auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_secs must be between 1 and {}",
                MAX_TOKEN_TTL_SECS
            )));
        }
        if self.auth.jwt_secret_env.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret_env must name an environment variable".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the JWT signing secret from the environment.
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        let name = &self.auth.jwt_secret_env;
        let secret = std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.clone()))?;

        if secret.len() < self.auth.min_secret_len {
            return Err(ConfigError::ValidationError(format!(
                "{} must be at least {} bytes",
                name, self.auth.min_secret_len
            )));
        }

        Ok(secret)
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 4000
log_level = "debug"
log_format = "json"

[auth]
jwt_secret_env = "FITTRACK_TEST_JWT_SECRET"
token_ttl_secs = 900

[database]
url = ":memory:"
"#
        .to_string()
    }

    #[test]
    fn test_parse_full_config() {
        let config = FitTrackConfig::parse(&create_test_config()).expect("should parse");

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.auth.token_ttl_secs, 900);
        assert_eq!(config.auth.min_secret_len, 32);
        assert_eq!(config.database.url, ":memory:");
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FitTrackConfig::parse("").expect("should parse");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.auth.token_ttl_secs, 86400);
        assert_eq!(config.database.url, "./data/fittrack.db");
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = FitTrackConfig::parse("[auth]\ntoken_ttl_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        for ttl in ["10000000000000", "9223372036854775807"] {
            let result = FitTrackConfig::parse(&format!("[auth]\ntoken_ttl_secs = {}\n", ttl));
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "ttl {} should be rejected",
                ttl
            );
        }

        let at_limit = format!("[auth]\ntoken_ttl_secs = {}\n", MAX_TOKEN_TTL_SECS);
        let config = FitTrackConfig::parse(&at_limit).expect("limit itself is allowed");
        assert_eq!(config.auth.token_ttl_secs, MAX_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            FitTrackConfig::load(&path),
            Err(ConfigError::FileNotFound(_))
        ));
        let config = FitTrackConfig::load_or_default(&path).expect("defaults");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fittrack.toml");
        fs::write(&path, create_test_config()).expect("write config");

        let config = FitTrackConfig::load(&path).expect("should load");
        assert_eq!(config.server.log_level, "debug");
    }

    #[test]
    fn test_jwt_secret_resolution() {
        let mut config = FitTrackConfig::default();
        config.auth.jwt_secret_env = "FITTRACK_TEST_SECRET_RESOLUTION".to_string();

        std::env::remove_var("FITTRACK_TEST_SECRET_RESOLUTION");
        assert!(matches!(
            config.jwt_secret(),
            Err(ConfigError::MissingEnvVar(_))
        ));

        std::env::set_var("FITTRACK_TEST_SECRET_RESOLUTION", "too-short");
        assert!(matches!(
            config.jwt_secret(),
            Err(ConfigError::ValidationError(_))
        ));

        let secret = "a-signing-secret-that-is-long-enough!!";
        std::env::set_var("FITTRACK_TEST_SECRET_RESOLUTION", secret);
        assert_eq!(config.jwt_secret().expect("should resolve"), secret);
    }
}
