//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ISSUESCOUT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::ResultCacheConfig;
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_EMBED_WORKERS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MIN_SIMILARITY,
};
use crate::embedding::EmbedderConfig;
use crate::fetch::FetcherConfig;
use crate::matcher::MatcherConfig;

/// Default front-end origin allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ISSUESCOUT_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence-transformer model directory. `None` runs the stub embedder.
    pub model_path: Option<PathBuf>,

    /// Max entries in the result cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Result cache entry lifetime in seconds. Default: none.
    pub cache_ttl_secs: Option<u64>,

    /// Per-candidate fetch timeout in seconds. Default: `5`.
    pub fetch_timeout_secs: u64,

    /// Max concurrent candidate fetches. Default: unbounded.
    pub fetch_concurrency: Option<usize>,

    /// Blocking workers for file embeddings. Default: `5`.
    pub embed_workers: usize,

    /// Minimum cosine similarity (exclusive). Default: `0.1`.
    pub min_similarity: f32,

    /// Origins allowed by CORS. Default: `http://localhost:3000`.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            fetch_concurrency: None,
            embed_workers: DEFAULT_EMBED_WORKERS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ISSUESCOUT_PORT";
    const ENV_BIND_ADDR: &'static str = "ISSUESCOUT_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "ISSUESCOUT_MODEL_PATH";
    const ENV_CACHE_CAPACITY: &'static str = "ISSUESCOUT_CACHE_CAPACITY";
    const ENV_CACHE_TTL_SECS: &'static str = "ISSUESCOUT_CACHE_TTL_SECS";
    const ENV_FETCH_TIMEOUT_SECS: &'static str = "ISSUESCOUT_FETCH_TIMEOUT_SECS";
    const ENV_FETCH_CONCURRENCY: &'static str = "ISSUESCOUT_FETCH_CONCURRENCY";
    const ENV_EMBED_WORKERS: &'static str = "ISSUESCOUT_EMBED_WORKERS";
    const ENV_MIN_SIMILARITY: &'static str = "ISSUESCOUT_MIN_SIMILARITY";
    const ENV_ALLOWED_ORIGINS: &'static str = "ISSUESCOUT_ALLOWED_ORIGINS";

    /// Every variable read by [`Config::from_env`].
    pub const ENV_VARS: [&'static str; 10] = [
        Self::ENV_PORT,
        Self::ENV_BIND_ADDR,
        Self::ENV_MODEL_PATH,
        Self::ENV_CACHE_CAPACITY,
        Self::ENV_CACHE_TTL_SECS,
        Self::ENV_FETCH_TIMEOUT_SECS,
        Self::ENV_FETCH_CONCURRENCY,
        Self::ENV_EMBED_WORKERS,
        Self::ENV_MIN_SIMILARITY,
        Self::ENV_ALLOWED_ORIGINS,
    ];

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let cache_capacity =
            Self::parse_value_from_env(Self::ENV_CACHE_CAPACITY)?.unwrap_or(defaults.cache_capacity);
        let cache_ttl_secs = Self::parse_value_from_env(Self::ENV_CACHE_TTL_SECS)?;
        let fetch_timeout_secs = Self::parse_value_from_env(Self::ENV_FETCH_TIMEOUT_SECS)?
            .unwrap_or(defaults.fetch_timeout_secs);
        let fetch_concurrency = Self::parse_value_from_env(Self::ENV_FETCH_CONCURRENCY)?;
        let embed_workers =
            Self::parse_value_from_env(Self::ENV_EMBED_WORKERS)?.unwrap_or(defaults.embed_workers);
        let min_similarity = Self::parse_value_from_env(Self::ENV_MIN_SIMILARITY)?
            .unwrap_or(defaults.min_similarity);
        let allowed_origins =
            Self::parse_list_from_env(Self::ENV_ALLOWED_ORIGINS).unwrap_or(defaults.allowed_origins);

        Ok(Self {
            port,
            bind_addr,
            model_path,
            cache_capacity,
            cache_ttl_secs,
            fetch_timeout_secs,
            fetch_concurrency,
            embed_workers,
            min_similarity,
            allowed_origins,
        })
    }

    /// Validates paths and numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.cache_capacity == 0 {
            return Err(Self::invalid(Self::ENV_CACHE_CAPACITY, "must be greater than zero"));
        }

        if self.cache_ttl_secs == Some(0) {
            return Err(Self::invalid(Self::ENV_CACHE_TTL_SECS, "must be greater than zero"));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(Self::invalid(
                Self::ENV_FETCH_TIMEOUT_SECS,
                "must be greater than zero",
            ));
        }

        if self.fetch_concurrency == Some(0) {
            return Err(Self::invalid(
                Self::ENV_FETCH_CONCURRENCY,
                "must be greater than zero",
            ));
        }

        if self.embed_workers == 0 {
            return Err(Self::invalid(Self::ENV_EMBED_WORKERS, "must be greater than zero"));
        }

        if !self.min_similarity.is_finite() || !(-1.0..=1.0).contains(&self.min_similarity) {
            return Err(Self::invalid(
                Self::ENV_MIN_SIMILARITY,
                "must be between -1 and 1",
            ));
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Embedder settings (stub when no model path is configured).
    pub fn embedder_config(&self) -> EmbedderConfig {
        match &self.model_path {
            Some(path) => EmbedderConfig::new(path),
            None => EmbedderConfig::stub(),
        }
    }

    /// Fetcher settings.
    pub fn fetcher_config(&self) -> FetcherConfig {
        let config =
            FetcherConfig::default().with_timeout(Duration::from_secs(self.fetch_timeout_secs));
        match self.fetch_concurrency {
            Some(limit) => config.with_max_concurrency(limit),
            None => config,
        }
    }

    /// Matcher settings.
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig::default()
            .with_min_similarity(self.min_similarity)
            .with_embed_workers(self.embed_workers)
    }

    /// Result cache settings.
    pub fn cache_config(&self) -> ResultCacheConfig {
        let config = ResultCacheConfig::default().with_capacity(self.cache_capacity);
        match self.cache_ttl_secs {
            Some(secs) => config.with_ttl(Duration::from_secs(secs)),
            None => config,
        }
    }

    fn invalid(name: &'static str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            name,
            reason: reason.to_string(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Parses a set, non-blank variable; blank or unset yields `None`.
    fn parse_value_from_env<T>(var_name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Ok(raw) = env::var(var_name) else {
            return Ok(None);
        };

        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name: var_name,
                reason: format!("'{value}': {e}"),
            })
    }

    /// Comma-separated list; entries are trimmed and blanks dropped.
    fn parse_list_from_env(var_name: &str) -> Option<Vec<String>> {
        let raw = env::var(var_name).ok()?;
        let items: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        (!items.is_empty()).then_some(items)
    }
}
