//! Clients and wire types for the league's remote services

pub mod http;
pub mod types;

pub use http::{LeagueApi, ALREADY_IN_STATE};
pub use types::{Fetched, LeaderboardRow, ParkGameStats, RoleSyncOutcome};
