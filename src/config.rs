//! Configuration for ted-study paths and learner defaults.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--catalog`, profile flags)
//! 2. Environment variables (TED_STUDY_HOME, TED_STUDY_CATALOG)
//! 3. Config file (.ted-study/config.yaml)
//! 4. Defaults (~/.ted-study)
//!
//! Config file discovery:
//! - Searches current directory and parents for .ted-study/config.yaml
//! - Paths in config file are relative to the .ted-study/ directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::{Goal, Level, OutputLanguage, OutputStyle, SubtitleFormat};

/// Directory holding engine state and the config file
pub const CONFIG_DIR: &str = ".ted-study";

const CONFIG_FILE: &str = "config.yaml";
const CATALOG_FILE: &str = "catalog.json";

const ENV_HOME: &str = "TED_STUDY_HOME";
const ENV_CATALOG: &str = "TED_STUDY_CATALOG";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub profile: ProfileDefaults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .ted-study/)
    pub home: Option<String>,
    /// Catalog file (relative to .ted-study/)
    pub catalog: Option<String>,
}

/// Learner defaults applied when the matching CLI flag is absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileDefaults {
    pub level: Option<Level>,
    pub vocabulary_size: Option<u32>,
    pub goals: Option<Vec<Goal>>,
    pub output_language: Option<OutputLanguage>,
    pub subtitle_format: Option<SubtitleFormat>,
    pub output_style: Option<OutputStyle>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Catalog file
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Learner defaults from the config file
    pub profile: ProfileDefaults,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
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

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Environment lookups, injectable for tests
trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

fn resolve(
    env: &dyn Env,
    default_home: PathBuf,
    config_file: Option<PathBuf>,
) -> Result<ResolvedConfig> {
    let (file_home, file_catalog, profile) = match &config_file {
        Some(config_path) => {
            let config = load_config_file(config_path)?;
            let config_dir = config_path.parent().unwrap_or(Path::new("."));

            (
                config.paths.home.map(|h| resolve_path(config_dir, &h)),
                config.paths.catalog.map(|c| resolve_path(config_dir, &c)),
                config.profile,
            )
        }
        None => (None, None, ProfileDefaults::default()),
    };

    let home = env
        .var(ENV_HOME)
        .map(PathBuf::from)
        .or(file_home)
        .unwrap_or(default_home);

    let catalog = env
        .var(ENV_CATALOG)
        .map(PathBuf::from)
        .or(file_catalog)
        .unwrap_or_else(|| home.join(CATALOG_FILE));

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file,
        profile,
    })
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let config_file = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file(&cwd));

    resolve(&ProcessEnv, default_home, config_file)
}
