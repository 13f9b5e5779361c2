pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing directly at a settings file
pub const CONFIG_PATH_ENV: &str = "NODEFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 2] = ["nodeflow.local.yaml", "nodeflow.yaml"];

/// NodeFlow settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub retry: RetrySettings,
    pub http: HttpSettings,
    pub providers: ProviderEndpoints,
}

/// Backoff for provider verification calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    /// Per-request timeout. A timeout counts as a network error.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("nodeflow/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// API base URL overrides, mainly for staging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderEndpoints {
    pub hetzner: Option<String>,
    pub digitalocean: Option<String>,
}

impl Settings {
    fn validate(self) -> Result<Self> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http.timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.retry.max_delay_ms < self.retry.base_delay_ms {
            return Err(ConfigError::InvalidValue {
                key: "retry.max_delay_ms",
                message: "must not be smaller than retry.base_delay_ms".to_string(),
            });
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "http.user_agent",
                message: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}

/// NodeFlow's global config directory (`~/.config/nodeflow`)
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("nodeflow"))
}

/// Locate the settings file
///
/// Search order:
/// 1. `NODEFLOW_CONFIG_PATH`
/// 2. Current directory: nodeflow.local.yaml, nodeflow.yaml
/// 3. `./.nodeflow/` with the same names
/// 4. `~/.config/nodeflow/config.yaml`
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        tracing::warn!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    for dir in [current_dir.clone(), current_dir.join(".nodeflow")] {
        for filename in &CANDIDATES {
            let path = dir.join(filename);
            if path.exists() {
                return Ok(Some(path));
            }
        }
    }

    if let Ok(config_dir) = get_config_dir() {
        let global = config_dir.join("config.yaml");
        if global.exists() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

/// Load settings from the first file found, or defaults when there is none
pub fn load() -> Result<Settings> {
    match find_config_file()? {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

pub fn load_from(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    tracing::debug!("Loading settings from {}", path.display());
    parse(&content).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse settings from YAML text
pub fn parse(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    settings.validate()
}
