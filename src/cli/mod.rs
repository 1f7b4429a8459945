//! CLI argument definitions and parsing.

pub mod types;

use crate::stats::record::{GameLine, GameResult};
use clap::{Args, Parser, Subcommand};
use types::{MetricKey, PlayerId, RankMode, RoleAction, Season, TeamId};

/// Box score flags for one game
#[derive(Debug, Args)]
pub struct GameLineArgs {
    /// The player's team won.
    #[clap(long, conflicts_with = "lost")]
    pub won: bool,

    /// The player's team lost.
    #[clap(long)]
    pub lost: bool,

    #[clap(long, default_value_t = 0)]
    pub points: u32,

    #[clap(long, default_value_t = 0)]
    pub assists: u32,

    #[clap(long, default_value_t = 0)]
    pub rebounds: u32,

    #[clap(long, default_value_t = 0)]
    pub steals: u32,

    #[clap(long, default_value_t = 0)]
    pub blocks: u32,

    #[clap(long, default_value_t = 0)]
    pub turnovers: u32,

    #[clap(long, default_value_t = 0)]
    pub fouls: u32,

    #[clap(long, default_value_t = 0)]
    pub minutes: u32,

    /// Field goals made.
    #[clap(long, default_value_t = 0)]
    pub fgm: u32,

    /// Field goals attempted.
    #[clap(long, default_value_t = 0)]
    pub fga: u32,

    /// Three pointers made.
    #[clap(long = "threes-made", default_value_t = 0)]
    pub three_pm: u32,

    /// Three pointers attempted.
    #[clap(long = "threes-attempted", default_value_t = 0)]
    pub three_pa: u32,

    /// Free throws made.
    #[clap(long, default_value_t = 0)]
    pub ftm: u32,

    /// Free throws attempted.
    #[clap(long, default_value_t = 0)]
    pub fta: u32,
}

impl GameLineArgs {
    pub fn to_game_line(&self) -> GameLine {
        let result = match (self.won, self.lost) {
            (true, _) => Some(GameResult::Won),
            (false, true) => Some(GameResult::Lost),
            (false, false) => None,
        };
        GameLine {
            result,
            points: self.points,
            assists: self.assists,
            rebounds: self.rebounds,
            steals: self.steals,
            blocks: self.blocks,
            turnovers: self.turnovers,
            fouls: self.fouls,
            minutes_played: self.minutes,
            field_goals_made: self.fgm,
            field_goals_attempted: self.fga,
            three_pointers_made: self.three_pm,
            three_pointers_attempted: self.three_pa,
            free_throws_made: self.ftm,
            free_throws_attempted: self.fta,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "mba-stats", about = "Minecraft Basketball Association stats CLI")]
pub struct Mba {
    /// Log debug output to stderr (overrides `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add or update a player profile.
    Register {
        /// Player identifier (Discord id).
        #[clap(long)]
        id: PlayerId,

        /// Display name.
        #[clap(long)]
        name: String,

        /// Minecraft username, used to find park stats.
        #[clap(long)]
        minecraft: Option<String>,

        /// Team the player is signed to; omit for a free agent.
        #[clap(long)]
        team: Option<TeamId>,
    },

    /// Add one game's box score to a player's season totals.
    Record {
        #[clap(long)]
        player: PlayerId,

        /// Season label (or set `MBA_SEASON`).
        #[clap(long, short)]
        season: Option<Season>,

        #[clap(flatten)]
        line: GameLineArgs,
    },

    /// Show a player's totals and derived averages.
    Player {
        #[clap(long)]
        id: PlayerId,

        /// Season label (or set `MBA_SEASON`).
        #[clap(long, short)]
        season: Option<Season>,

        /// Merge in the player's park stats, matched by Minecraft name.
        #[clap(long)]
        park: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Rank players by one stat category.
    Leaderboard {
        /// ppg, rpg, apg, spg, bpg or tpg.
        #[clap(long, default_value_t = MetricKey::Points)]
        stat: MetricKey,

        #[clap(long, value_enum, default_value_t = RankMode::Average)]
        mode: RankMode,

        #[clap(long, short, default_value_t = 10)]
        limit: usize,

        /// Limit to one season; all seasons are combined when omitted.
        #[clap(long, short)]
        season: Option<Season>,

        /// Read the hosted leaderboard instead of the local database.
        #[clap(long)]
        remote: bool,

        /// Refetch remote data even if the cached copy is fresh.
        #[clap(long)]
        refresh: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show park (pickup game) stats for a player.
    Park {
        /// Minecraft name or uuid.
        #[clap(long)]
        player: String,

        /// Park season number.
        #[clap(long, short, default_value_t = 1)]
        season: u16,

        /// Refetch even if the cached copy is fresh.
        #[clap(long)]
        refresh: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// List players not signed to a team.
    FreeAgents {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Grant or revoke a Discord role.
    Role {
        #[clap(value_enum)]
        action: RoleAction,

        /// Discord user id.
        #[clap(long)]
        user: String,

        /// Discord role id.
        #[clap(long)]
        role: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaderboard_defaults() {
        let app = Mba::try_parse_from(["mba-stats", "leaderboard"]).unwrap();
        match app.command {
            Commands::Leaderboard {
                stat,
                mode,
                limit,
                season,
                remote,
                ..
            } => {
                assert_eq!(stat, MetricKey::Points);
                assert_eq!(mode, RankMode::Average);
                assert_eq!(limit, 10);
                assert!(season.is_none());
                assert!(!remote);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_leaderboard_options() {
        let app = Mba::try_parse_from([
            "mba-stats",
            "leaderboard",
            "--stat",
            "rpg",
            "--mode",
            "total",
            "--limit",
            "3",
            "--season",
            "2",
        ])
        .unwrap();
        match app.command {
            Commands::Leaderboard {
                stat,
                mode,
                limit,
                season,
                ..
            } => {
                assert_eq!(stat, MetricKey::Rebounds);
                assert_eq!(mode, RankMode::Total);
                assert_eq!(limit, 3);
                assert_eq!(season, Some(Season::new("S2")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_stat() {
        assert!(Mba::try_parse_from(["mba-stats", "leaderboard", "--stat", "fg_pct"]).is_err());
    }

    #[test]
    fn test_parse_record_game_line() {
        let app = Mba::try_parse_from([
            "mba-stats",
            "record",
            "--player",
            "discord-1",
            "--won",
            "--points",
            "21",
            "--fgm",
            "9",
            "--fga",
            "15",
            "--threes-made",
            "2",
        ])
        .unwrap();
        match app.command {
            Commands::Record { player, line, .. } => {
                assert_eq!(player.as_str(), "discord-1");
                let game = line.to_game_line();
                assert_eq!(game.result, Some(GameResult::Won));
                assert_eq!(game.points, 21);
                assert_eq!(game.field_goals_attempted, 15);
                assert_eq!(game.three_pointers_made, 2);
                assert_eq!(game.free_throws_made, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_record_won_and_lost_conflict() {
        assert!(Mba::try_parse_from([
            "mba-stats",
            "record",
            "--player",
            "discord-1",
            "--won",
            "--lost",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_role_and_global_verbose() {
        let app = Mba::try_parse_from([
            "mba-stats", "role", "remove", "--user", "42", "--role", "99", "-v",
        ])
        .unwrap();
        assert!(app.verbose);
        match app.command {
            Commands::Role { action, user, role } => {
                assert_eq!(action, RoleAction::Remove);
                assert_eq!(user, "42");
                assert_eq!(role, "99");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
