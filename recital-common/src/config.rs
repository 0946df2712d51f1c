//! Configuration loading and resolution
//!
//! Every key resolves through the same priority order:
//! 1. Command-line argument (highest)
//! 2. `RECITAL_*` environment variable
//! 3. TOML config file
//! 4. Compiled default (where one exists)
//!
//! The WebDAV endpoint and credentials have no compiled default; startup
//! fails with a configuration error when none of the other tiers supplies
//! them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Compiled defaults
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5740";
pub const DEFAULT_RECORDINGS_DIR: &str = "/Recordings";
pub const DEFAULT_ROSTER_PATH: &str = "roster.toml";
pub const DEFAULT_CACHE_PATH: &str = "data/recordings.json";
pub const DEFAULT_CONFIG_PATH: &str = "recital.toml";

/// TOML config file schema. All keys optional; missing keys fall through
/// to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub listen_addr: Option<String>,
    pub webdav_url: Option<String>,
    pub public_url: Option<String>,
    pub webdav_username: Option<String>,
    pub webdav_password: Option<String>,
    pub recordings_dir: Option<String>,
    pub roster_path: Option<PathBuf>,
    pub cache_path: Option<PathBuf>,
}

impl TomlConfig {
    /// Load a TOML config file. A missing file is not an error: it yields
    /// the empty config so resolution falls through to lower tiers.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Command-line overrides, filled by the binary's clap parser. Highest
/// resolution tier.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen_addr: Option<String>,
    pub webdav_url: Option<String>,
    pub public_url: Option<String>,
    pub webdav_username: Option<String>,
    pub webdav_password: Option<String>,
    pub recordings_dir: Option<String>,
    pub roster_path: Option<PathBuf>,
    pub cache_path: Option<PathBuf>,
}

/// Fully resolved service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// WebDAV endpoint recordings are stored under
    pub webdav_url: String,
    /// Public base URL used to build playback links
    pub public_url: String,
    pub webdav_username: String,
    pub webdav_password: String,
    /// Remote directory holding recordings
    pub recordings_dir: String,
    /// Roster TOML file
    pub roster_path: PathBuf,
    /// Local recordings cache JSON file
    pub cache_path: PathBuf,
}

impl Settings {
    /// Resolve settings from CLI overrides, environment, and the TOML
    /// config at `config_path` (default `recital.toml`).
    pub fn resolve(overrides: Overrides, config_path: Option<&Path>) -> Result<Self> {
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        let toml = TomlConfig::load(config_path.unwrap_or(&default_path))?;

        let listen_addr =
            resolve_key(overrides.listen_addr, "RECITAL_LISTEN_ADDR", toml.listen_addr)
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let recordings_dir = resolve_key(
            overrides.recordings_dir,
            "RECITAL_RECORDINGS_DIR",
            toml.recordings_dir,
        )
        .unwrap_or_else(|| DEFAULT_RECORDINGS_DIR.to_string());
        let roster_path = resolve_path(overrides.roster_path, "RECITAL_ROSTER_PATH", toml.roster_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH));
        let cache_path = resolve_path(overrides.cache_path, "RECITAL_CACHE_PATH", toml.cache_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH));

        let webdav_url = resolve_key(overrides.webdav_url, "RECITAL_WEBDAV_URL", toml.webdav_url)
            .ok_or_else(|| missing("webdav_url", "RECITAL_WEBDAV_URL"))?;
        let public_url = resolve_key(overrides.public_url, "RECITAL_PUBLIC_URL", toml.public_url)
            .ok_or_else(|| missing("public_url", "RECITAL_PUBLIC_URL"))?;
        let webdav_username = resolve_key(
            overrides.webdav_username,
            "RECITAL_WEBDAV_USERNAME",
            toml.webdav_username,
        )
        .ok_or_else(|| missing("webdav_username", "RECITAL_WEBDAV_USERNAME"))?;
        let webdav_password = resolve_key(
            overrides.webdav_password,
            "RECITAL_WEBDAV_PASSWORD",
            toml.webdav_password,
        )
        .ok_or_else(|| missing("webdav_password", "RECITAL_WEBDAV_PASSWORD"))?;

        Ok(Self {
            listen_addr,
            webdav_url,
            public_url,
            webdav_username,
            webdav_password,
            recordings_dir,
            roster_path,
            cache_path,
        })
    }
}

/// Resolve one string key through the tier order.
fn resolve_key(cli: Option<String>, env_name: &str, toml: Option<String>) -> Option<String> {
    let env = std::env::var(env_name).ok().filter(|v| !v.is_empty());

    let mut sources = Vec::new();
    if cli.is_some() {
        sources.push("command line");
    }
    if env.is_some() {
        sources.push("environment");
    }
    if toml.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        tracing::debug!(
            "{} set in multiple sources ({}); using {}",
            env_name,
            sources.join(", "),
            sources[0]
        );
    }

    cli.or(env).or(toml)
}

/// Resolve one path key through the tier order.
fn resolve_path(cli: Option<PathBuf>, env_name: &str, toml: Option<PathBuf>) -> Option<PathBuf> {
    resolve_key(
        cli.map(|p| p.to_string_lossy().into_owned()),
        env_name,
        toml.map(|p| p.to_string_lossy().into_owned()),
    )
    .map(PathBuf::from)
}

fn missing(key: &str, env_name: &str) -> Error {
    Error::Config(format!(
        "{} not configured. Supply it via:\n\
         1. Command line: --{}\n\
         2. Environment: {}=...\n\
         3. TOML config: {} = \"...\" in recital.toml",
        key,
        key.replace('_', "-"),
        env_name,
        key
    ))
}
