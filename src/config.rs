// src/config.rs

use crate::cli::GlobalArgs;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Pixela host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://pixe.la";

/// Environment variables behind the global flags.
const USERNAME_ENV: &str = "PA_USERNAME";
const TOKEN_ENV: &str = "PA_TOKEN";
const BASE_URL_ENV: &str = "PA_BASE_URL";

/// File names probed, in order, in the working directory and then in the
/// home directory.
const CONFIG_FILE_NAMES: [&str; 2] = [".pa.yaml", ".pa.yml"];

/// Optional configuration file (`.pa.yaml`).
///
/// Holds the same keys as the global flags and has the lowest precedence:
/// flag > environment (`PA_*`) > this file > built-in default.
///
/// Example:
///
/// username: alice
/// token: thisissecret
/// retry: 3
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    /// How many times a rejected request is retried.
    #[serde(default)]
    pub retry: Option<u32>,

    #[serde(default)]
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load and parse a config file from disk.
    ///
    /// An empty file is the same as no file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: FileConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML config: {:?}", path))?;

        Ok(cfg)
    }

    /// Load the explicit `--config` file, or the first config file found in
    /// the working directory or the home directory.
    ///
    /// A missing explicit file is an error; a missing discovered file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "using config file");
            return Self::load(path);
        }

        let mut roots = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            roots.push(cwd);
        }
        if let Some(home) = dirs::home_dir() {
            roots.push(home);
        }

        match find_config_file(&roots) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// First existing config file in `dirs`, probing every name per directory.
fn find_config_file(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Settings resolved once at startup and passed to the client factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub retry: u32,
    pub base_url: String,
}

impl Settings {
    /// Merge global flags (already merged with `PA_*` env vars by clap) over
    /// the config file.
    pub fn resolve(globals: &GlobalArgs, file: FileConfig) -> Self {
        Self::resolve_with(globals, file, |name| std::env::var(name).ok())
    }

    /// clap skips the environment once a flag is given, even as `""`, so an
    /// empty flag consults `env` before the config file.
    fn resolve_with<F>(globals: &GlobalArgs, file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let layered = |flag: &Option<String>, var: &str, stored: Option<String>| {
            pick(flag.clone(), || env(var)).or_else(|| stored.filter(|v| !v.is_empty()))
        };

        let base_url = layered(&globals.base_url, BASE_URL_ENV, file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            username: layered(&globals.username, USERNAME_ENV, file.username).unwrap_or_default(),
            token: layered(&globals.token, TOKEN_ENV, file.token).unwrap_or_default(),
            retry: globals.retry.or(file.retry).unwrap_or(0),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Prefer a non-empty higher-precedence value.
fn pick(primary: Option<String>, fallback: impl FnOnce() -> Option<String>) -> Option<String> {
    primary
        .filter(|v| !v.is_empty())
        .or_else(|| fallback().filter(|v| !v.is_empty()))
}
