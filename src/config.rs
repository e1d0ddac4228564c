//! Runtime settings and logger setup.
//!
//! Settings sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. JSON file (explicit path, else `APPOBJECTS_CONFIG`)
//! 3. Environment overrides (`APPOBJECTS_LERP_DURATION_MS`, `APPOBJECTS_LOG_LEVEL`)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;

pub const CONFIG_ENV: &str = "APPOBJECTS_CONFIG";
pub const LERP_DURATION_ENV: &str = "APPOBJECTS_LERP_DURATION_MS";
pub const LOG_LEVEL_ENV: &str = "APPOBJECTS_LOG_LEVEL";

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Settings {
    // Lerp
    pub lerp_duration_ms: u64,
    pub lerp_poll_interval_ms: u64,
    pub lerp_ease: String, // name from utils::ease::EASE_FUNCTIONS

    // Logging
    pub log_level: String, // used when no -v flag is given
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lerp_duration_ms: 1000,
            lerp_poll_interval_ms: 10,
            lerp_ease: "quint_in_out".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the JSON file, then environment overrides.
    /// A missing file is an error only when a path was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let mut settings = match path {
            Some(path) => Self::from_json(&path)?,
            None => Self::default(),
        };
        settings.apply_env_with(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply overrides from `lookup` (the process environment in `load`).
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(LERP_DURATION_ENV) {
            match raw.trim().parse() {
                Ok(ms) => self.lerp_duration_ms = ms,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", LERP_DURATION_ENV, raw),
            }
        }
        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            if parse_level(&raw).is_some() {
                self.log_level = raw.trim().to_lowercase();
            } else {
                log::warn!("Ignoring {}={:?}: unknown level", LOG_LEVEL_ENV, raw);
            }
        }
    }
}

fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Level for a `-v` count: 0 = settings level (warn by default),
/// 1 = info, 2 = debug, 3+ = trace.
pub fn level_for(verbosity: u8, settings: &Settings) -> LevelFilter {
    match verbosity {
        0 => parse_level(&settings.log_level).unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. With `log_file` output goes to that file,
/// otherwise to stderr honouring `RUST_LOG`.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>, settings: &Settings) -> Result<()> {
    let level = level_for(verbosity, settings);

    if let Some(path) = log_file {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("Logger already initialised")?;
        log::info!("Logging to file: {} (level: {:?})", path.display(), level);
    } else {
        let default_filter = level.to_string().to_lowercase();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format_timestamp_millis()
            .try_init()
            .context("Logger already initialised")?;
    }
    Ok(())
}
