//! Park (pickup game) stats lookup.

use serde::Serialize;

use super::common::{format_metrics, print_json, CommandContext};
use crate::{
    api::types::{Fetched, ParkGameStats},
    stats::derive::{derive, DerivedMetrics},
    Result,
};

#[derive(Debug, Clone, Serialize)]
pub struct ParkReport {
    pub stats: ParkGameStats,
    pub metrics: DerivedMetrics,
}

/// Park stats and derived metrics for a Minecraft name or uuid
pub async fn park_report(
    ctx: &CommandContext,
    identifier: &str,
    season: u16,
    refresh: bool,
) -> Result<Fetched<ParkReport>> {
    let fetched = ctx.park_stats(identifier, season, refresh).await?;
    Ok(fetched.map(|stats| {
        let raw = stats.to_raw_record(&stats.player_uuid, &format!("park-{}", season));
        ParkReport {
            metrics: derive(&raw),
            stats,
        }
    }))
}

pub async fn handle_park(
    ctx: &CommandContext,
    identifier: String,
    season: u16,
    refresh: bool,
    as_json: bool,
) -> Result<()> {
    let report = park_report(ctx, &identifier, season, refresh).await?;

    if as_json {
        return print_json(&report.into_option());
    }

    match report {
        Fetched::Found(r) => {
            let name = if r.stats.player_name.is_empty() {
                identifier.as_str()
            } else {
                r.stats.player_name.as_str()
            };
            println!("{}  park season {}", name, season);
            println!(
                "{}",
                format_metrics(r.stats.games_played, r.stats.wins, r.stats.losses, &r.metrics)
            );
        }
        Fetched::NotFound => println!("⚠ No park stats for {} in season {}", identifier, season),
    }
    Ok(())
}
