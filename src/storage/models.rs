//! Data models for the storage layer

use crate::cli::types::{PlayerId, TeamId};
use crate::stats::leaderboard::DisplayIdentity;
use serde::{Deserialize, Serialize};

/// Player profile stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub display_name: String,
    pub minecraft_username: Option<String>,
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn is_free_agent(&self) -> bool {
        self.team_id.is_none()
    }

    /// Name shown on leaderboards.
    pub fn identity(&self) -> DisplayIdentity {
        DisplayIdentity {
            name: Some(self.display_name.clone()),
        }
    }

    /// Name to look the player up by in the park stats source.
    pub fn park_name(&self) -> &str {
        self.minecraft_username
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.display_name)
    }
}
