//! Database schema and connection management

use crate::core::cache::default_cache_dir;
use crate::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for players and their season totals
pub struct StatsDatabase {
    pub(crate) conn: Connection,
}

impl StatsDatabase {
    /// Open the database at the default location and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(Self::database_path()?)
    }

    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Private database that lives as long as the value
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn database_path() -> Result<PathBuf> {
        Ok(default_cache_dir()?.join("stats.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                minecraft_username TEXT,
                team_id TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Raw totals only; averages and percentages are derived on read.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS season_stats (
                player_id TEXT NOT NULL,
                season TEXT NOT NULL,
                games_played INTEGER NOT NULL DEFAULT 0,
                games_won INTEGER NOT NULL DEFAULT 0,
                games_lost INTEGER NOT NULL DEFAULT 0,
                points INTEGER NOT NULL DEFAULT 0,
                assists INTEGER NOT NULL DEFAULT 0,
                rebounds INTEGER NOT NULL DEFAULT 0,
                steals INTEGER NOT NULL DEFAULT 0,
                blocks INTEGER NOT NULL DEFAULT 0,
                turnovers INTEGER NOT NULL DEFAULT 0,
                fouls INTEGER NOT NULL DEFAULT 0,
                minutes_played INTEGER NOT NULL DEFAULT 0,
                field_goals_made INTEGER NOT NULL DEFAULT 0,
                field_goals_attempted INTEGER NOT NULL DEFAULT 0,
                three_pointers_made INTEGER NOT NULL DEFAULT 0,
                three_pointers_attempted INTEGER NOT NULL DEFAULT 0,
                free_throws_made INTEGER NOT NULL DEFAULT 0,
                free_throws_attempted INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (player_id, season),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_season_stats_season
             ON season_stats(season)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team
             ON players(team_id)",
            [],
        )?;

        Ok(())
    }
}
