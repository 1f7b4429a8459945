use serde::{Deserialize, Serialize};

use crate::cli::types::{mask_identifier, RankMode, RoleAction};
use crate::stats::leaderboard::LeaderboardEntry;
use crate::stats::record::RawStatRecord;


/// Result of a lookup that can legitimately come back empty.
///
/// Transport failures travel in the surrounding `Result`, so "no data" and
/// "request failed" can never be confused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fetched<T> {
    Found(T),
    NotFound,
}

impl<T> Fetched<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Found(v) => Some(v),
            Fetched::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Fetched::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Found(v) => Fetched::Found(f(v)),
            Fetched::NotFound => Fetched::NotFound,
        }
    }
}

/// Park (pickup game) stats row as returned by the park stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParkGameStats {
    pub player_uuid: String,
    #[serde(default)]
    pub player_name: String,
    #[serde(default = "default_park_season")]
    pub season: u16,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub rebounds: u32,
    #[serde(default)]
    pub steals: u32,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub fg_made: u32,
    #[serde(default)]
    pub fg_attempted: u32,
    #[serde(default)]
    pub three_fg_made: u32,
    #[serde(default)]
    pub three_fg_attempted: u32,
}

fn default_park_season() -> u16 {
    1
}

impl ParkGameStats {
    /// Map the park field names onto a raw record for `entity_id`.
    ///
    /// The park source has no fouls, minutes or free throws; those stay 0.
    pub fn to_raw_record(&self, entity_id: &str, window: &str) -> RawStatRecord {
        RawStatRecord {
            games_played: self.games_played,
            games_won: self.wins,
            games_lost: self.losses,
            points: self.points,
            assists: self.assists,
            rebounds: self.rebounds,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
            field_goals_made: self.fg_made,
            field_goals_attempted: self.fg_attempted,
            three_pointers_made: self.three_fg_made,
            three_pointers_attempted: self.three_fg_attempted,
            ..RawStatRecord::new(entity_id, window)
        }
    }
}

/// Row of the remote, already-ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub discord_id: String,
    #[serde(default)]
    pub minecraft_name: Option<String>,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub average: f64,
}

impl LeaderboardRow {
    /// Convert to the local entry shape; `value` follows the ranking mode.
    pub fn into_entry(self, mode: RankMode) -> LeaderboardEntry {
        let display_name = match self.minecraft_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => mask_identifier(&self.discord_id),
        };
        let value = match mode {
            RankMode::Average => self.average,
            RankMode::Total => f64::from(self.total),
        };
        LeaderboardEntry {
            rank: self.rank,
            player_id: self.discord_id,
            display_name,
            value,
            games_played: self.games_played,
            total: self.total,
            average: self.average,
        }
    }
}

/// Body posted to the role sync proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSyncRequest {
    pub action: RoleAction,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "roleId")]
    pub role_id: String,
}

/// Response body of the role sync proxy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleSyncResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the caller learns from a role mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSyncOutcome {
    pub success: bool,
    pub message: String,
}
