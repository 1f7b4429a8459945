//! Basic database query operations

use super::{models::*, schema::StatsDatabase};
use crate::cli::types::{PlayerId, Season, TeamId};
use crate::error::MbaError;
use crate::stats::record::{GameLine, RawStatRecord};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

const PLAYER_COLUMNS: &str = "player_id, display_name, minecraft_username, team_id";

const STATS_COLUMNS: &str = "player_id, season, games_played, games_won, games_lost,
     points, assists, rebounds, steals, blocks, turnovers, fouls, minutes_played,
     field_goals_made, field_goals_attempted, three_pointers_made, three_pointers_attempted,
     free_throws_made, free_throws_attempted";

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl StatsDatabase {
    /// Insert or update a player's profile
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        let now = now_secs();
        self.conn.execute(
            "INSERT INTO players (player_id, display_name, minecraft_username, team_id,
                                  created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(player_id) DO UPDATE SET
                display_name = excluded.display_name,
                minecraft_username = excluded.minecraft_username,
                team_id = excluded.team_id,
                updated_at = excluded.updated_at",
            params![
                player.player_id.as_str(),
                player.display_name,
                player.minecraft_username,
                player.team_id.as_ref().map(|t| t.as_str()),
                now
            ],
        )?;
        Ok(())
    }

    pub fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = ?"),
                params![player_id.as_str()],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    /// Look a player up by display name or Minecraft username, ignoring case
    pub fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        let name = name.trim();
        let player = self
            .conn
            .query_row(
                &format!(
                    "SELECT {PLAYER_COLUMNS} FROM players
                     WHERE display_name = ?1 COLLATE NOCASE
                        OR minecraft_username = ?1 COLLATE NOCASE
                     ORDER BY player_id
                     LIMIT 1"
                ),
                params![name],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY display_name COLLATE NOCASE"
        ))?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Players not on any team
    pub fn list_free_agents(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players
             WHERE team_id IS NULL OR team_id = ''
             ORDER BY display_name COLLATE NOCASE"
        ))?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Replace a player's totals for one season. `entity_id` is the player
    /// and `window` the season label.
    pub fn upsert_season_stats(&mut self, record: &RawStatRecord) -> Result<()> {
        write_season_row(&self.conn, record)?;
        Ok(())
    }

    pub fn get_season_stats(
        &self,
        player_id: &PlayerId,
        season: &Season,
    ) -> Result<Option<RawStatRecord>> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT {STATS_COLUMNS} FROM season_stats
                     WHERE player_id = ? AND season = ?"
                ),
                params![player_id.as_str(), season.as_str()],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Season rows, optionally limited to one season, ordered by player then season
    pub fn list_season_stats(&self, season: Option<&Season>) -> Result<Vec<RawStatRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STATS_COLUMNS} FROM season_stats
             WHERE ?1 IS NULL OR season = ?1
             ORDER BY player_id, season"
        ))?;
        let rows = stmt.query_map(params![season.map(|s| s.as_str())], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Add one game to a player's season totals, creating the row if needed.
    ///
    /// Returns the updated totals.
    pub fn record_game(
        &mut self,
        player_id: &PlayerId,
        season: &Season,
        line: &GameLine,
    ) -> Result<RawStatRecord> {
        if self.get_player(player_id)?.is_none() {
            return Err(MbaError::PlayerNotFound {
                id: player_id.to_string(),
            });
        }

        let tx = self.conn.transaction()?;
        let existing = tx
            .query_row(
                &format!(
                    "SELECT {STATS_COLUMNS} FROM season_stats
                     WHERE player_id = ? AND season = ?"
                ),
                params![player_id.as_str(), season.as_str()],
                row_to_record,
            )
            .optional()?;

        let mut record =
            existing.unwrap_or_else(|| RawStatRecord::new(player_id.as_str(), season.as_str()));
        record.apply_game(line);

        write_season_row(&tx, &record)?;
        tx.commit()?;

        debug!(player = %player_id, season = %season, games = record.games_played, "recorded game");
        Ok(record)
    }

    /// Clear all data from the database
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM season_stats", [])?;
        self.conn.execute("DELETE FROM players", [])?;
        Ok(())
    }
}

fn write_season_row(conn: &Connection, record: &RawStatRecord) -> rusqlite::Result<usize> {
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO season_stats ({STATS_COLUMNS}, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ),
        params![
            record.entity_id,
            record.window,
            record.games_played,
            record.games_won,
            record.games_lost,
            record.points,
            record.assists,
            record.rebounds,
            record.steals,
            record.blocks,
            record.turnovers,
            record.fouls,
            record.minutes_played,
            record.field_goals_made,
            record.field_goals_attempted,
            record.three_pointers_made,
            record.three_pointers_attempted,
            record.free_throws_made,
            record.free_throws_attempted,
            now_secs()
        ],
    )
}

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    let player_id: String = row.get(0)?;
    let team_id: Option<String> = row.get(3)?;
    Ok(Player {
        player_id: PlayerId::new(player_id),
        display_name: row.get(1)?,
        minecraft_username: row.get(2)?,
        team_id: team_id.filter(|t| !t.is_empty()).map(TeamId::new),
    })
}

fn row_to_record(row: &Row) -> rusqlite::Result<RawStatRecord> {
    Ok(RawStatRecord {
        entity_id: row.get(0)?,
        window: row.get(1)?,
        games_played: row.get(2)?,
        games_won: row.get(3)?,
        games_lost: row.get(4)?,
        points: row.get(5)?,
        assists: row.get(6)?,
        rebounds: row.get(7)?,
        steals: row.get(8)?,
        blocks: row.get(9)?,
        turnovers: row.get(10)?,
        fouls: row.get(11)?,
        minutes_played: row.get(12)?,
        field_goals_made: row.get(13)?,
        field_goals_attempted: row.get(14)?,
        three_pointers_made: row.get(15)?,
        three_pointers_attempted: row.get(16)?,
        free_throws_made: row.get(17)?,
        free_throws_attempted: row.get(18)?,
    })
}
