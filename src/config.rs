//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::{cli::types::Season, error::MbaError, Result};

pub const PARK_STATS_API_ENV_VAR: &str = "MBA_PARK_STATS_API";
pub const ROLE_SYNC_API_ENV_VAR: &str = "MBA_ROLE_SYNC_API";
pub const API_KEY_ENV_VAR: &str = "MBA_API_KEY";
pub const CACHE_TTL_ENV_VAR: &str = "MBA_CACHE_TTL_SECS";
pub const DATABASE_ENV_VAR: &str = "MBA_DATABASE";
pub const SEASON_ENV_VAR: &str = "MBA_SEASON";

pub const DEFAULT_PARK_STATS_API: &str = "http://localhost:54321/functions/v1/park-stats";
pub const DEFAULT_ROLE_SYNC_API: &str = "http://localhost:54321/functions/v1/discord-role-sync";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub park_stats_api: String,
    pub role_sync_api: String,
    pub api_key: Option<String>,
    pub cache_ttl: Duration,
    pub database_path: Option<PathBuf>,
    pub season: Season,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            park_stats_api: DEFAULT_PARK_STATS_API.to_string(),
            role_sync_api: DEFAULT_ROLE_SYNC_API.to_string(),
            api_key: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            database_path: None,
            season: Season::default(),
        }
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cache_ttl = match get(CACHE_TTL_ENV_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| MbaError::InvalidConfig {
                    env_var: CACHE_TTL_ENV_VAR.to_string(),
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.cache_ttl,
        };

        let season = match get(SEASON_ENV_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.season,
        };

        Ok(Self {
            park_stats_api: get(PARK_STATS_API_ENV_VAR)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.park_stats_api),
            role_sync_api: get(ROLE_SYNC_API_ENV_VAR).unwrap_or(defaults.role_sync_api),
            api_key: get(API_KEY_ENV_VAR),
            cache_ttl,
            database_path: get(DATABASE_ENV_VAR).map(PathBuf::from),
            season,
        })
    }
}
