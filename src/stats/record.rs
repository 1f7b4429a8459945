//! Raw counting totals for one player over one season or window.

use serde::{Deserialize, Serialize};

/// Cumulative counting totals for one entity over one window.
///
/// Counts are unsigned, so negative totals cannot be represented. The
/// `made <= attempted` and `won + lost <= played` relations are not
/// enforced here; derivation tolerates records that break them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatRecord {
    pub entity_id: String,
    pub window: String,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub games_lost: u32,
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
    pub fouls: u32,
    #[serde(default)]
    pub minutes_played: u32,
    #[serde(default)]
    pub field_goals_made: u32,
    #[serde(default)]
    pub field_goals_attempted: u32,
    #[serde(default)]
    pub three_pointers_made: u32,
    #[serde(default)]
    pub three_pointers_attempted: u32,
    #[serde(default)]
    pub free_throws_made: u32,
    #[serde(default)]
    pub free_throws_attempted: u32,
}

impl RawStatRecord {
    /// Zero-valued record for an entity and window.
    pub fn new(entity_id: impl Into<String>, window: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            window: window.into(),
            ..Default::default()
        }
    }

    /// Add one game's line to the running totals.
    pub fn apply_game(&mut self, line: &GameLine) {
        self.games_played = self.games_played.saturating_add(1);
        match line.result {
            Some(GameResult::Won) => self.games_won = self.games_won.saturating_add(1),
            Some(GameResult::Lost) => self.games_lost = self.games_lost.saturating_add(1),
            None => {}
        }
        self.points = self.points.saturating_add(line.points);
        self.assists = self.assists.saturating_add(line.assists);
        self.rebounds = self.rebounds.saturating_add(line.rebounds);
        self.steals = self.steals.saturating_add(line.steals);
        self.blocks = self.blocks.saturating_add(line.blocks);
        self.turnovers = self.turnovers.saturating_add(line.turnovers);
        self.fouls = self.fouls.saturating_add(line.fouls);
        self.minutes_played = self.minutes_played.saturating_add(line.minutes_played);
        self.field_goals_made = self.field_goals_made.saturating_add(line.field_goals_made);
        self.field_goals_attempted = self
            .field_goals_attempted
            .saturating_add(line.field_goals_attempted);
        self.three_pointers_made = self
            .three_pointers_made
            .saturating_add(line.three_pointers_made);
        self.three_pointers_attempted = self
            .three_pointers_attempted
            .saturating_add(line.three_pointers_attempted);
        self.free_throws_made = self.free_throws_made.saturating_add(line.free_throws_made);
        self.free_throws_attempted = self
            .free_throws_attempted
            .saturating_add(line.free_throws_attempted);
    }
}

/// Outcome of a single game for the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Won,
    Lost,
}

/// One game's box score line for one player, as entered by a referee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLine {
    /// `None` when the outcome was not recorded.
    pub result: Option<GameResult>,
    pub points: u32,
    pub assists: u32,
    pub rebounds: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub minutes_played: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
}
