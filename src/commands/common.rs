//! Common utilities and helper functions shared across commands.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::{
    api::{
        types::{Fetched, LeaderboardRow, ParkGameStats},
        LeagueApi,
    },
    cli::types::{MetricKey, Season},
    config::Config,
    core::{
        cache::{default_cache_dir, AllParkStatsKey, CacheManager, LeaderboardKey, ParkStatsKey},
        clock::SystemClock,
    },
    stats::derive::DerivedMetrics,
    storage::StatsDatabase,
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub config: Config,
    pub db: StatsDatabase,
    pub api: LeagueApi,
    pub caches: CacheManager,
}

impl CommandContext {
    /// Open the database and build the API client and caches from `config`
    pub fn new(config: Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => StatsDatabase::open(path)?,
            None => StatsDatabase::new()?,
        };
        let api = LeagueApi::from_config(&config)?;

        let disk_dir = match default_cache_dir() {
            Ok(dir) => Some(dir.join("http")),
            Err(e) => {
                debug!(error = %e, "disk cache disabled");
                None
            }
        };
        let caches = CacheManager::new(Arc::new(SystemClock), disk_dir);

        Ok(Self::from_parts(config, db, api, caches))
    }

    pub fn from_parts(
        config: Config,
        db: StatsDatabase,
        api: LeagueApi,
        caches: CacheManager,
    ) -> Self {
        Self {
            config,
            db,
            api,
            caches,
        }
    }

    /// The season given on the command line, or the configured one
    pub fn season_or_default(&self, season: Option<Season>) -> Season {
        season.unwrap_or_else(|| self.config.season.clone())
    }

    /// Park stats for one player, served from the cache while fresh
    pub async fn park_stats(
        &self,
        identifier: &str,
        season: u16,
        refresh: bool,
    ) -> Result<Fetched<ParkGameStats>> {
        let key = ParkStatsKey::new(identifier, season);
        let cache = &self.caches.park_stats;
        let fetch = || self.api.fetch_park_stats(identifier, season);
        if refresh {
            cache.refresh(&key, fetch).await
        } else {
            cache.read_through(&key, self.config.cache_ttl, fetch).await
        }
    }

    /// Every player's park stats for a season, served from the cache while fresh
    pub async fn all_park_stats(&self, season: u16, refresh: bool) -> Result<Vec<ParkGameStats>> {
        let key = AllParkStatsKey { season };
        let cache = &self.caches.all_park_stats;
        let fetch = || self.api.fetch_all_park_stats(season);
        if refresh {
            cache.refresh(&key, fetch).await
        } else {
            cache.read_through(&key, self.config.cache_ttl, fetch).await
        }
    }

    /// The hosted leaderboard, served from the cache while fresh
    pub async fn remote_leaderboard(
        &self,
        metric: MetricKey,
        season: Option<&Season>,
        limit: usize,
        refresh: bool,
    ) -> Result<Vec<LeaderboardRow>> {
        let key = LeaderboardKey {
            metric,
            season: season.cloned(),
            limit,
        };
        let cache = &self.caches.leaderboard;
        let fetch = || self.api.fetch_leaderboard(metric, season, limit);
        if refresh {
            cache.refresh(&key, fetch).await
        } else {
            cache.read_through(&key, self.config.cache_ttl, fetch).await
        }
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Three text lines summarising derived metrics
pub fn format_metrics(games_played: u32, won: u32, lost: u32, m: &DerivedMetrics) -> String {
    format!(
        "  GP {}  W-L {}-{}  Win% {:.1}\n  PPG {:.1}  RPG {:.1}  APG {:.1}  SPG {:.1}  BPG {:.1}  TPG {:.1}\n  FG% {:.1}  3P% {:.1}  FT% {:.1}",
        games_played,
        won,
        lost,
        m.win_pct,
        m.ppg,
        m.rpg,
        m.apg,
        m.spg,
        m.bpg,
        m.tpg,
        m.fg_pct,
        m.three_pct,
        m.ft_pct
    )
}
