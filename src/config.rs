use std::env;
use std::fmt::Display;
use std::fs::read_to_string;
use std::str::FromStr;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::local_time::DEFAULT_TIME_ZONE;
use crate::search::{DEFAULT_RESULT_CAP, FilterMode};
use crate::tags::TagTable;
use crate::trending::DEFAULT_TRENDING_WINDOW;

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub time_zone: Tz,
    pub filter_mode: FilterMode,
    pub result_cap: usize,
    pub trending_window: usize,
    pub tags: TagTable,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase_url = required(&lookup, "SUPABASE_URL")?;
        let supabase_key = required(&lookup, "SUPABASE_ANON_KEY")?;

        let time_zone = try_load(&lookup, "DINING_TIME_ZONE", DEFAULT_TIME_ZONE)?;
        let filter_mode = try_load(&lookup, "DINING_FILTER_MODE", FilterMode::Pushdown)?;
        let result_cap = try_load(&lookup, "DINING_RESULT_CAP", DEFAULT_RESULT_CAP)?;
        let trending_window = try_load(&lookup, "DINING_TRENDING_WINDOW", DEFAULT_TRENDING_WINDOW)?;

        let tags = match lookup("DINING_TAG_TABLE").filter(|p| !p.trim().is_empty()) {
            Some(path) => load_tag_table(&path)?,
            None => TagTable::builtin(),
        };

        Ok(Self {
            supabase_url,
            supabase_key,
            time_zone,
            filter_mode,
            result_cap,
            trending_window,
            tags,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!(key, value = %raw, "Invalid configuration value");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        }),
        None => {
            info!(key, default = %default, "Not set, using default");
            Ok(default)
        }
    }
}

fn load_tag_table(path: &str) -> Result<TagTable, ConfigError> {
    let text = read_to_string(path).map_err(|e| ConfigError::TagTable {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    TagTable::from_json(&text).map_err(|e| ConfigError::TagTable {
        path: path.to_string(),
        message: e.to_string(),
    })
}
