use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    #[serde(default)]
    pub(crate) app_name: Option<String>,
    #[serde(default)]
    pub(crate) cache_ttl_seconds: Option<i64>,
    #[serde(default)]
    pub(crate) chars_per_token: Option<f64>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) debug: bool,
}

/// Result of searching the config paths. Diagnostics are held until
/// [`LoadedConfig::report`] so they reach the log once it is set up.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) errors: Vec<(PathBuf, String)>,
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for (path, error) in &self.errors {
            warn!(path = %path.display(), error = %error, "failed to parse config");
        }
        if let Some(path) = &self.path {
            debug!(path = %path.display(), "loaded config");
        }
    }
}

impl Config {
    /// First parseable config file wins; unreadable or invalid files are skipped.
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from_paths(&Self::get_config_paths())
    }

    pub(crate) fn load_from_paths(paths: &[PathBuf]) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();
        for path in paths {
            match Self::load_from(path) {
                Ok(Some(config)) => {
                    loaded.config = config;
                    loaded.path = Some(path.clone());
                    break;
                }
                Ok(None) => {}
                Err(e) => loaded.errors.push((path.clone(), e)),
            }
        }
        loaded
    }

    /// `Ok(None)` when the file does not exist.
    pub(crate) fn load_from(path: &Path) -> Result<Option<Self>, String> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str::<Config>(&content)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/llmcost/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("llmcost").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("llmcost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.llmcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".llmcost.toml"));
        }

        paths
    }
}
