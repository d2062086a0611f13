//! # Configuration
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`stockcast.toml` unless `--config` says otherwise)
//! 3. Environment (`STOCKCAST_INVENTORY`, `STOCKCAST_PREDICTED_STOCK`,
//!    `STOCKCAST_API_KEY`, `STOCKCAST_RATE_LIMIT`, `STOCKCAST_CORS_ORIGINS`)
//! 4. Command-line flags
//!
//! A missing config file is fine; a malformed one is an error.
//!
//! ```toml
//! inventory_path = "data/daily.csv"
//! predicted_stock_level = 90
//! host = "0.0.0.0"
//! port = 8080
//! api_key = "change-me"
//! rate_limit = 50
//! cors_origins = ["https://dashboard.example.org"]
//! ```

use crate::api::ApiKey;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stockcast_core::{PredictedStockLevel, StockError, primitives::DEFAULT_INVENTORY_FILE};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "stockcast.toml";

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default API request budget, requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Browser origins the API answers CORS requests for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Local dashboard ports only.
    #[default]
    Localhost,
    /// Any origin.
    Any,
    /// Exactly these origins.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Interpret a configured origin list. `*` anywhere means any origin;
    /// a list with no usable entries falls back to localhost.
    fn from_list(origins: Vec<String>) -> Self {
        let origins: Vec<String> = origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else if origins.is_empty() {
            Self::Localhost
        } else {
            Self::List(origins)
        }
    }
}

// =============================================================================
// LAYERS
// =============================================================================

/// One configuration layer. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub inventory_path: Option<PathBuf>,
    pub predicted_stock_level: Option<i64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub rate_limit: Option<u32>,
    pub cors_origins: Option<Vec<String>>,
}

/// Parse a numeric environment variable, if set.
fn env_number<T: FromStr>(name: &str) -> Result<Option<T>, StockError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            StockError::InvalidParameter(format!("{} is not a valid number: {:?}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

impl ConfigLayer {
    /// Parse a layer from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, StockError> {
        toml::from_str(text)
            .map_err(|e| StockError::SerializationError(format!("Config file: {}", e)))
    }

    /// Read a layer from a TOML file. A missing file is an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, StockError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StockError::IoError(format!(
                "Cannot read config '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Build a layer from `STOCKCAST_*` environment variables.
    pub fn from_env() -> Result<Self, StockError> {
        let cors_origins = std::env::var("STOCKCAST_CORS_ORIGINS")
            .ok()
            .map(|raw| raw.split(',').map(str::to_string).collect());

        Ok(Self {
            inventory_path: std::env::var_os("STOCKCAST_INVENTORY").map(PathBuf::from),
            predicted_stock_level: env_number("STOCKCAST_PREDICTED_STOCK")?,
            host: None,
            port: None,
            api_key: std::env::var("STOCKCAST_API_KEY").ok(),
            rate_limit: env_number("STOCKCAST_RATE_LIMIT")?,
            cors_origins,
        })
    }

    /// Overlay `other` on top of `self`.
    #[must_use]
    pub fn merge(self, other: ConfigLayer) -> Self {
        Self {
            inventory_path: other.inventory_path.or(self.inventory_path),
            predicted_stock_level: other.predicted_stock_level.or(self.predicted_stock_level),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            api_key: other.api_key.or(self.api_key),
            rate_limit: other.rate_limit.or(self.rate_limit),
            cors_origins: other.cors_origins.or(self.cors_origins),
        }
    }
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Fully resolved, validated settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub inventory_path: PathBuf,
    pub predicted_stock_level: PredictedStockLevel,
    pub host: String,
    pub port: u16,
    /// Key required by the HTTP API; `None` leaves it open.
    pub api_key: Option<ApiKey>,
    /// API requests per second; 0 disables limiting.
    pub rate_limit: u32,
    pub cors_origins: CorsOrigins,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_FILE),
            predicted_stock_level: PredictedStockLevel::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: CorsOrigins::default(),
        }
    }
}

impl Settings {
    /// Resolve a merged layer against the defaults, validating values.
    pub fn resolve(layer: ConfigLayer) -> Result<Self, StockError> {
        let defaults = Self::default();

        let predicted_stock_level = match layer.predicted_stock_level {
            Some(raw) => PredictedStockLevel::new(raw)?,
            None => defaults.predicted_stock_level,
        };

        Ok(Self {
            inventory_path: layer.inventory_path.unwrap_or(defaults.inventory_path),
            predicted_stock_level,
            host: layer.host.unwrap_or(defaults.host),
            port: layer.port.unwrap_or(defaults.port),
            api_key: layer.api_key.and_then(ApiKey::new),
            rate_limit: layer.rate_limit.unwrap_or(defaults.rate_limit),
            cors_origins: layer
                .cors_origins
                .map(CorsOrigins::from_list)
                .unwrap_or(defaults.cors_origins),
        })
    }

    /// Load settings: file, then environment, then `flags`.
    pub fn load(config_path: &Path, flags: ConfigLayer) -> Result<Self, StockError> {
        let file = ConfigLayer::from_file(config_path)?;
        let env = ConfigLayer::from_env()?;

        let settings = Self::resolve(file.merge(env).merge(flags))?;
        tracing::debug!(?settings, "Configuration resolved");
        Ok(settings)
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_set() {
        let settings = Settings::resolve(ConfigLayer::default()).expect("resolve");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.inventory_path, PathBuf::from("daily.csv"));
        assert_eq!(settings.predicted_stock_level.value(), 70);
        assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn parse_toml_layer() {
        let layer = ConfigLayer::from_toml(
            "inventory_path = \"data/daily.csv\"\npredicted_stock_level = 90\nport = 9000\n",
        )
        .expect("toml");

        assert_eq!(layer.inventory_path, Some(PathBuf::from("data/daily.csv")));
        assert_eq!(layer.predicted_stock_level, Some(90));
        assert_eq!(layer.port, Some(9000));
        assert_eq!(layer.host, None);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(ConfigLayer::from_toml("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn later_layers_win() {
        let file = ConfigLayer {
            inventory_path: Some(PathBuf::from("file.csv")),
            predicted_stock_level: Some(10),
            host: Some("0.0.0.0".to_string()),
            ..ConfigLayer::default()
        };
        let flags = ConfigLayer {
            predicted_stock_level: Some(150),
            ..ConfigLayer::default()
        };

        let settings = Settings::resolve(file.merge(flags)).expect("resolve");
        assert_eq!(settings.inventory_path, PathBuf::from("file.csv"));
        assert_eq!(settings.predicted_stock_level.value(), 150);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn out_of_range_predicted_level_rejected() {
        let layer = ConfigLayer {
            predicted_stock_level: Some(500),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            Settings::resolve(layer),
            Err(StockError::InvalidParameter(_))
        ));
    }

    #[test]
    fn api_settings_from_toml() {
        let layer = ConfigLayer::from_toml(
            "api_key = \"k1\"\nrate_limit = 0\ncors_origins = [\"https://a.test\"]\n",
        )
        .expect("toml");
        let settings = Settings::resolve(layer).expect("resolve");

        assert_eq!(settings.api_key, ApiKey::new("k1"));
        assert_eq!(settings.rate_limit, 0);
        assert_eq!(
            settings.cors_origins,
            CorsOrigins::List(vec!["https://a.test".to_string()])
        );
    }

    #[test]
    fn api_defaults_are_open_localhost_and_limited() {
        let settings = Settings::default();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.rate_limit, DEFAULT_RATE_LIMIT);
        assert_eq!(settings.cors_origins, CorsOrigins::Localhost);
    }

    #[test]
    fn blank_api_key_leaves_api_open() {
        let layer = ConfigLayer {
            api_key: Some(String::new()),
            ..ConfigLayer::default()
        };
        assert!(Settings::resolve(layer).expect("resolve").api_key.is_none());
    }

    #[test]
    fn later_layer_replaces_api_key() {
        let file = ConfigLayer {
            api_key: Some("from-file".to_string()),
            rate_limit: Some(5),
            ..ConfigLayer::default()
        };
        let env = ConfigLayer {
            api_key: Some("from-env".to_string()),
            ..ConfigLayer::default()
        };

        let settings = Settings::resolve(file.merge(env)).expect("resolve");
        assert_eq!(settings.api_key, ApiKey::new("from-env"));
        assert_eq!(settings.rate_limit, 5);
    }

    #[test]
    fn cors_origin_lists() {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(CorsOrigins::from_list(list(&["*"])), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::from_list(list(&["https://a.test", "*"])),
            CorsOrigins::Any
        );
        assert_eq!(CorsOrigins::from_list(list(&[" ", ""])), CorsOrigins::Localhost);
        assert_eq!(
            CorsOrigins::from_list(list(&[" https://a.test ", "https://b.test"])),
            CorsOrigins::List(list(&["https://a.test", "https://b.test"]))
        );
    }

    #[test]
    fn resolved_settings_debug_hides_api_key() {
        let settings = Settings {
            api_key: ApiKey::new("hunter2"),
            ..Settings::default()
        };
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }

    #[test]
    fn negative_rate_limit_rejected_in_toml() {
        assert!(ConfigLayer::from_toml("rate_limit = -1\n").is_err());
    }

    #[test]
    fn missing_config_file_is_empty_layer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layer = ConfigLayer::from_file(&dir.path().join("stockcast.toml")).expect("layer");
        assert_eq!(layer, ConfigLayer::default());
    }
}
