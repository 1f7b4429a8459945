//! Minecraft Basketball Association stats library
//!
//! Turns raw per-player counting totals into derived per-game metrics,
//! combines totals from several sources, ranks players into leaderboards and
//! serves remote data through a freshness cache.
//!
//! ## Features
//!
//! - **Derived metrics**: per-game rates and shooting percentages with fixed rounding
//! - **Aggregation**: sum seasons and park games before averaging
//! - **Leaderboards**: stable ranking by any category, average or total
//! - **Freshness cache**: TTL read-through with stale fallback and a disk tier
//! - **Storage**: local SQLite database of players and season totals
//!
//! ## Quick Start
//!
//! ```rust
//! use mba_stats::stats::{derive, RawStatRecord};
//!
//! let record = RawStatRecord {
//!     games_played: 10,
//!     points: 200,
//!     field_goals_made: 80,
//!     field_goals_attempted: 160,
//!     ..RawStatRecord::new("discord-123456789", "S1")
//! };
//!
//! let metrics = derive(&record);
//! assert_eq!(metrics.ppg, 20.0);
//! assert_eq!(metrics.fg_pct, 50.0);
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export MBA_PARK_STATS_API=https://<project>.supabase.co/functions/v1/park-stats
//! export MBA_API_KEY=<anon key>
//! export MBA_SEASON=S2
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MetricKey, PlayerId, RankMode, Season};
pub use config::{
    API_KEY_ENV_VAR, CACHE_TTL_ENV_VAR, DATABASE_ENV_VAR, PARK_STATS_API_ENV_VAR,
    ROLE_SYNC_API_ENV_VAR, SEASON_ENV_VAR,
};
pub use error::{MbaError, Result};
