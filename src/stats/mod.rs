//! Stats engine: raw totals, derived metrics, aggregation and ranking.
//!
//! Everything here is pure and synchronous. Raw totals are the only stored
//! shape; derived metrics are recomputed on every read.

pub mod aggregate;
pub mod derive;
pub mod leaderboard;
pub mod record;

pub use aggregate::{aggregate, aggregate_for, correlate_by_name, Aggregation, Correlation};
pub use derive::{derive, DerivedMetrics};
pub use leaderboard::{rank, DisplayIdentity, LeaderboardEntry};
pub use record::{GameLine, GameResult, RawStatRecord};
