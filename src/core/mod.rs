//! Core utilities shared across the CLI
//!
//! - `cache`: freshness cache with memory and disk tiers
//! - `clock`: injectable time source
//! - `http`: request header helpers

pub mod cache;
pub mod clock;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{
    default_cache_dir, AllParkStatsKey, CacheKey, CacheManager, FreshnessCache, LeaderboardKey,
    ParkStatsKey,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use http::auth_header_map;
