//! Combining several raw windows for one player into a single record.
//!
//! Sources must already be correlated to the same player before they are
//! summed. The helpers here drop anything that cannot be tied to the target
//! player and report how many were dropped instead of merging them.

use std::collections::HashSet;
use tracing::{debug, warn};

use super::record::RawStatRecord;
use crate::api::types::ParkGameStats;

#[cfg(test)]
mod tests;

/// Window label used when the summed sources span more than one window.
pub const COMBINED_WINDOW: &str = "combined";

/// Result of aggregating sources for a specific player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub record: RawStatRecord,
    /// Sources skipped because they belonged to a different player.
    pub dropped: usize,
}

/// Outcome of looking a player up by name in the park stats source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    Matched(RawStatRecord),
    Unmatched,
    /// More than one distinct park player carries the name.
    Ambiguous(usize),
}

/// Sum every counting field across `sources`.
///
/// No averaging happens here; derive the result once afterwards. An empty
/// slice yields an all-zero record with empty identity.
pub fn aggregate(sources: &[RawStatRecord]) -> RawStatRecord {
    let Some(first) = sources.first() else {
        return RawStatRecord::default();
    };

    let window = if sources.iter().all(|s| s.window == first.window) {
        first.window.clone()
    } else {
        COMBINED_WINDOW.to_string()
    };

    let mut total = RawStatRecord::new(first.entity_id.clone(), window);
    for s in sources {
        add_into(&mut total, s);
    }
    total
}

/// Aggregate only the sources that belong to `entity_id`.
///
/// Sources with another entity id are dropped and counted, never merged.
pub fn aggregate_for(entity_id: &str, sources: &[RawStatRecord]) -> Aggregation {
    let (matching, others): (Vec<_>, Vec<_>) = sources
        .iter()
        .cloned()
        .partition(|s| s.entity_id == entity_id);

    for s in &others {
        warn!(
            target_entity = entity_id,
            source_entity = %s.entity_id,
            window = %s.window,
            "dropping stat source that does not belong to the target player"
        );
    }

    let mut record = aggregate(&matching);
    if matching.is_empty() {
        record.entity_id = entity_id.to_string();
    }

    Aggregation {
        record,
        dropped: others.len(),
    }
}

/// Find the park stats row for a display name, case-insensitively.
///
/// Matching is by name only, so a player who renames loses the link. Rows
/// from distinct park players sharing a name are reported as ambiguous and
/// not merged. The matched record is re-keyed to `entity_id` so it can be
/// aggregated with the player's primary stats.
pub fn correlate_by_name(
    entity_id: &str,
    name: &str,
    candidates: &[ParkGameStats],
    window: &str,
) -> Correlation {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Correlation::Unmatched;
    }

    let mut seen = HashSet::new();
    let hits: Vec<&ParkGameStats> = candidates
        .iter()
        .filter(|c| c.player_name.trim().to_lowercase() == needle)
        .filter(|c| seen.insert(c.player_uuid.clone()))
        .collect();

    match hits.as_slice() {
        [] => {
            debug!(name, "no park stats row matches player name");
            Correlation::Unmatched
        }
        [only] => Correlation::Matched(only.to_raw_record(entity_id, window)),
        many => {
            warn!(
                name,
                count = many.len(),
                "ambiguous park stats match; dropping all candidates"
            );
            Correlation::Ambiguous(many.len())
        }
    }
}

fn add_into(total: &mut RawStatRecord, s: &RawStatRecord) {
    total.games_played = total.games_played.saturating_add(s.games_played);
    total.games_won = total.games_won.saturating_add(s.games_won);
    total.games_lost = total.games_lost.saturating_add(s.games_lost);
    total.points = total.points.saturating_add(s.points);
    total.assists = total.assists.saturating_add(s.assists);
    total.rebounds = total.rebounds.saturating_add(s.rebounds);
    total.steals = total.steals.saturating_add(s.steals);
    total.blocks = total.blocks.saturating_add(s.blocks);
    total.turnovers = total.turnovers.saturating_add(s.turnovers);
    total.fouls = total.fouls.saturating_add(s.fouls);
    total.minutes_played = total.minutes_played.saturating_add(s.minutes_played);
    total.field_goals_made = total.field_goals_made.saturating_add(s.field_goals_made);
    total.field_goals_attempted = total
        .field_goals_attempted
        .saturating_add(s.field_goals_attempted);
    total.three_pointers_made = total
        .three_pointers_made
        .saturating_add(s.three_pointers_made);
    total.three_pointers_attempted = total
        .three_pointers_attempted
        .saturating_add(s.three_pointers_attempted);
    total.free_throws_made = total.free_throws_made.saturating_add(s.free_throws_made);
    total.free_throws_attempted = total
        .free_throws_attempted
        .saturating_add(s.free_throws_attempted);
}
