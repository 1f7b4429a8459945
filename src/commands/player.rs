//! Player stat card, optionally merged with park stats.

use serde::Serialize;
use tracing::warn;

use super::common::{format_metrics, print_json, CommandContext};
use crate::{
    cli::types::{PlayerId, Season},
    error::MbaError,
    stats::{
        aggregate::{aggregate_for, correlate_by_name, Correlation},
        derive::{derive, DerivedMetrics},
        record::RawStatRecord,
    },
    storage::Player,
    Result,
};

/// How the park source lined up with the player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParkMatch {
    NotRequested,
    Matched,
    Unmatched,
    Ambiguous { candidates: usize },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub player: Player,
    pub season: Season,
    pub league: RawStatRecord,
    pub park: Option<RawStatRecord>,
    pub park_match: ParkMatch,
    /// League plus park totals when matched, otherwise league only.
    pub combined: RawStatRecord,
    pub metrics: DerivedMetrics,
}

/// Build the stat card for `id` in `season`
pub async fn player_report(
    ctx: &CommandContext,
    id: &PlayerId,
    season: &Season,
    include_park: bool,
) -> Result<PlayerReport> {
    let player = ctx
        .db
        .get_player(id)?
        .ok_or_else(|| MbaError::PlayerNotFound { id: id.to_string() })?;

    let league = ctx
        .db
        .get_season_stats(id, season)?
        .unwrap_or_else(|| RawStatRecord::new(id.as_str(), season.as_str()));

    let (park, park_match) = if include_park {
        park_record(ctx, &player, season).await
    } else {
        (None, ParkMatch::NotRequested)
    };

    let mut sources = vec![league.clone()];
    sources.extend(park.iter().cloned());
    let combined = aggregate_for(id.as_str(), &sources).record;
    let metrics = derive(&combined);

    Ok(PlayerReport {
        player,
        season: season.clone(),
        league,
        park,
        park_match,
        combined,
        metrics,
    })
}

async fn park_record(
    ctx: &CommandContext,
    player: &Player,
    season: &Season,
) -> (Option<RawStatRecord>, ParkMatch) {
    let rows = match ctx.all_park_stats(season.number(), false).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "park stats unavailable");
            return (
                None,
                ParkMatch::Unavailable {
                    reason: e.to_string(),
                },
            );
        }
    };

    let window = format!("park-{}", season.number());
    match correlate_by_name(player.player_id.as_str(), player.park_name(), &rows, &window) {
        Correlation::Matched(record) => (Some(record), ParkMatch::Matched),
        Correlation::Unmatched => (None, ParkMatch::Unmatched),
        Correlation::Ambiguous(candidates) => (None, ParkMatch::Ambiguous { candidates }),
    }
}

pub async fn handle_player(
    ctx: &CommandContext,
    id: PlayerId,
    season: Option<Season>,
    include_park: bool,
    as_json: bool,
) -> Result<()> {
    let season = ctx.season_or_default(season);
    let report = player_report(ctx, &id, &season, include_park).await?;

    if as_json {
        return print_json(&report);
    }

    let p = &report.player;
    println!("{} ({})  {}", p.display_name, p.player_id, report.season);
    if let Some(team) = &p.team_id {
        println!("  Team {}", team);
    }
    let c = &report.combined;
    println!(
        "{}",
        format_metrics(c.games_played, c.games_won, c.games_lost, &report.metrics)
    );

    match &report.park_match {
        ParkMatch::NotRequested => {}
        ParkMatch::Matched => {
            let park_games = report.park.as_ref().map(|r| r.games_played).unwrap_or(0);
            println!("✓ Includes {} park games as {}", park_games, p.park_name());
        }
        ParkMatch::Unmatched => println!("⚠ No park stats found for {}", p.park_name()),
        ParkMatch::Ambiguous { candidates } => println!(
            "⚠ {} park players are named {}; park stats not merged",
            candidates,
            p.park_name()
        ),
        ParkMatch::Unavailable { reason } => println!("⚠ Park stats unavailable: {}", reason),
    }
    Ok(())
}
