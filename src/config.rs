//! Configuration for brainly.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BRAINLY_HOME, BRAINLY_MATCH_TAGS)
//! 2. Config file (.brainly/config.yaml)
//! 3. Defaults (~/.brainly, title-only search)
//!
//! Config file discovery:
//! - Searches current directory and parents for .brainly/config.yaml
//! - Paths in config file are relative to the .brainly/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::library::{SearchOptions, DEFAULT_SHARE_BASE_URL};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub search: Option<SearchConfig>,
    #[serde(default)]
    pub share: Option<ShareConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .brainly/)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub match_tags: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    pub base_url: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to brainly home (snapshot lives here)
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Default search behaviour
    pub search: SearchOptions,
    /// Prefix for generated share links
    pub share_base_url: String,
}

impl ResolvedConfig {
    /// Path of the brain snapshot
    pub fn snapshot_path(&self) -> PathBuf {
        self.home.join("brain.json")
    }
}

/// Values taken from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<PathBuf>,
    match_tags: Option<bool>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var("BRAINLY_HOME").ok().map(PathBuf::from),
            match_tags: std::env::var("BRAINLY_MATCH_TAGS")
                .ok()
                .map(|v| parse_flag(&v)),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".brainly").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge the sources into a resolved config
fn resolve(
    config_path: Option<PathBuf>,
    env: EnvOverrides,
    default_home: PathBuf,
) -> Result<ResolvedConfig> {
    let file = config_path.as_deref().map(load_config_file).transpose()?;

    let home = if let Some(env_home) = env.home {
        env_home
    } else if let (Some(path), Some(home_path)) = (
        config_path.as_deref(),
        file.as_ref().and_then(|f| f.paths.home.as_deref()),
    ) {
        // home is relative to .brainly/ directory
        let brainly_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(brainly_dir, home_path)
    } else {
        default_home
    };

    let match_tags = env
        .match_tags
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.search.as_ref())
                .and_then(|s| s.match_tags)
        })
        .unwrap_or(false);

    let share_base_url = file
        .as_ref()
        .and_then(|f| f.share.as_ref())
        .and_then(|s| s.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SHARE_BASE_URL.to_string());

    Ok(ResolvedConfig {
        home,
        config_file: config_path,
        search: SearchOptions { match_tags },
        share_base_url,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".brainly");

    resolve(find_config_file(), EnvOverrides::from_env(), default_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the snapshot path ($BRAINLY_HOME/brain.json)
pub fn snapshot_path() -> Result<PathBuf> {
    Ok(config()?.snapshot_path())
}
