//! Admin entry of one game's box score.

use super::common::{format_metrics, CommandContext};
use crate::{
    cli::types::{PlayerId, Season},
    stats::{
        derive::{derive, DerivedMetrics},
        record::{GameLine, RawStatRecord},
    },
    Result,
};

/// Add `line` to the player's season totals; returns the new totals and their metrics
pub fn record_game(
    ctx: &mut CommandContext,
    player: &PlayerId,
    season: &Season,
    line: &GameLine,
) -> Result<(RawStatRecord, DerivedMetrics)> {
    let totals = ctx.db.record_game(player, season, line)?;
    let metrics = derive(&totals);
    Ok((totals, metrics))
}

pub fn handle_record(
    ctx: &mut CommandContext,
    player: PlayerId,
    season: Option<Season>,
    line: GameLine,
) -> Result<()> {
    let season = ctx.season_or_default(season);
    let (totals, metrics) = record_game(ctx, &player, &season, &line)?;

    println!("✓ Recorded game for {} in {}", player, season);
    println!(
        "{}",
        format_metrics(
            totals.games_played,
            totals.games_won,
            totals.games_lost,
            &metrics
        )
    );
    Ok(())
}
