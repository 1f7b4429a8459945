//! Leaderboards from the local database or the hosted service.

use std::collections::{BTreeMap, HashMap};

use super::common::{print_json, CommandContext};
use crate::{
    cli::types::{MetricKey, RankMode, Season},
    stats::{
        aggregate::aggregate_for,
        leaderboard::{rank, DisplayIdentity, LeaderboardEntry},
        record::RawStatRecord,
    },
    storage::StatsDatabase,
    Result,
};

/// Rank players from the local database.
///
/// With no season, each player's seasons are summed before ranking.
pub fn local_leaderboard(
    db: &StatsDatabase,
    metric: MetricKey,
    mode: RankMode,
    limit: usize,
    season: Option<&Season>,
) -> Result<Vec<LeaderboardEntry>> {
    let names: HashMap<String, DisplayIdentity> = db
        .list_players()?
        .into_iter()
        .map(|p| (p.player_id.0.clone(), p.identity()))
        .collect();

    let mut by_player: BTreeMap<String, Vec<RawStatRecord>> = BTreeMap::new();
    for record in db.list_season_stats(season)? {
        by_player
            .entry(record.entity_id.clone())
            .or_default()
            .push(record);
    }

    let entries: Vec<(RawStatRecord, DisplayIdentity)> = by_player
        .into_iter()
        .map(|(id, records)| {
            let identity = names
                .get(&id)
                .cloned()
                .unwrap_or_else(DisplayIdentity::anonymous);
            (aggregate_for(&id, &records).record, identity)
        })
        .collect();

    Ok(rank(&entries, metric, mode, limit))
}

/// Fetch the hosted leaderboard through the cache
pub async fn remote_leaderboard(
    ctx: &CommandContext,
    metric: MetricKey,
    mode: RankMode,
    limit: usize,
    season: Option<&Season>,
    refresh: bool,
) -> Result<Vec<LeaderboardEntry>> {
    let rows = ctx
        .remote_leaderboard(metric, season, limit, refresh)
        .await?;
    Ok(rows.into_iter().map(|r| r.into_entry(mode)).collect())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_leaderboard(
    ctx: &CommandContext,
    metric: MetricKey,
    mode: RankMode,
    limit: usize,
    season: Option<Season>,
    remote: bool,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let entries = if remote {
        remote_leaderboard(ctx, metric, mode, limit, season.as_ref(), refresh).await?
    } else {
        local_leaderboard(&ctx.db, metric, mode, limit, season.as_ref())?
    };

    if as_json {
        return print_json(&entries);
    }

    let heading = match mode {
        RankMode::Average => metric.full_name().to_string(),
        RankMode::Total => format!("Total {}", metric.total_label()),
    };
    let scope = season
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "all seasons".to_string());
    println!("{} ({})", heading, scope);

    if entries.is_empty() {
        println!("No players with games played.");
        return Ok(());
    }
    for e in &entries {
        match mode {
            RankMode::Average => println!(
                "{:>3}. {:<24} {:>6.1}  ({} GP)",
                e.rank, e.display_name, e.value, e.games_played
            ),
            RankMode::Total => println!(
                "{:>3}. {:<24} {:>6}  ({} GP)",
                e.rank, e.display_name, e.total, e.games_played
            ),
        }
    }
    Ok(())
}
