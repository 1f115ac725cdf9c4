use jsonwebtoken::Algorithm;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, time::Duration};
use thiserror::Error;

// Runtime configuration: defaults, then an optional TOML file, then environment.

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/bingo-integration";
pub const CONFIG_PATH_ENV: &str = "BINGO_HARNESS_CONFIG";

const API_URL_ENV: &str = "BINGO_API_URL";
const SSO_SECRET_ENV: &str = "BINGO_SECRET_SSO_SECRET_KEY";
const JWT_SECRET_ENV: &str = "BINGO_SECRET_JWT";
const JWT_ALGORITHMS_ENV: &str = "BINGO_JWT_ALGORITHMS";
const REQUEST_TIMEOUT_ENV: &str = "BINGO_REQUEST_TIMEOUT_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported token algorithm `{0}`, expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),
    #[error("invalid value for {name}: `{value}`")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    // Base URL of the bingo-integration API.
    pub api_url: String,
    // Sent as X-SSO-Secret on every call.
    pub sso_secret: String,
    // Shared secret for launch tokens.
    pub jwt_secret: String,
    pub jwt_algorithms: Vec<String>,
    // No timeout unless set.
    pub request_timeout_ms: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            sso_secret: String::new(),
            jwt_secret: String::new(),
            jwt_algorithms: vec!["HS512".to_string()],
            request_timeout_ms: None,
        }
    }
}

impl HarnessConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // Environment wins over the file. `lookup` is injectable for tests.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(API_URL_ENV) {
            self.api_url = value;
        }
        if let Some(value) = lookup(SSO_SECRET_ENV) {
            self.sso_secret = value;
        }
        if let Some(value) = lookup(JWT_SECRET_ENV) {
            self.jwt_secret = value;
        }
        if let Some(value) = lookup(JWT_ALGORITHMS_ENV) {
            self.jwt_algorithms = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup(REQUEST_TIMEOUT_ENV) {
            let millis = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: REQUEST_TIMEOUT_ENV,
                value: value.clone(),
            })?;
            self.request_timeout_ms = Some(millis);
        }
        Ok(())
    }

    // Only the shared-secret (HMAC) family makes sense here.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, ConfigError> {
        if self.jwt_algorithms.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "jwt_algorithms",
                value: String::new(),
            });
        }
        self.jwt_algorithms
            .iter()
            .map(|name| match name.to_ascii_uppercase().as_str() {
                "HS256" => Ok(Algorithm::HS256),
                "HS384" => Ok(Algorithm::HS384),
                "HS512" => Ok(Algorithm::HS512),
                _ => Err(ConfigError::UnsupportedAlgorithm(name.clone())),
            })
            .collect()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    // Missing secrets are allowed, only reported.
    pub fn warn_on_missing_secrets(&self) {
        if self.sso_secret.is_empty() {
            tracing::warn!(env = SSO_SECRET_ENV, "sso secret is empty.");
        }
        if self.jwt_secret.is_empty() {
            tracing::warn!(env = JWT_SECRET_ENV, "jwt secret is empty.");
        }
    }
}
