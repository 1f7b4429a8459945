//! Ranking players by a single stat category.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::derive::{derive, total_for};
use super::record::RawStatRecord;
use crate::cli::types::{mask_identifier, MetricKey, RankMode};


/// How a player is shown on a leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayIdentity {
    pub name: Option<String>,
}

impl DisplayIdentity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { name: None }
    }

    /// The display name, or a masked placeholder built from `entity_id`.
    pub fn resolve(&self, entity_id: &str) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => mask_identifier(entity_id),
        }
    }
}

/// One ranked row. Field names line up with the remote leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: String,
    pub display_name: String,
    /// The selected metric in the selected mode.
    pub value: f64,
    pub games_played: u32,
    pub total: u32,
    pub average: f64,
}

/// Rank `entries` by `metric`, highest first.
///
/// - Players with zero games are left out.
/// - Ties keep their input order; there is no secondary tiebreak.
/// - Average mode compares the rounded per-game rate, total mode the raw total.
/// - At most `limit` rows come back, ranked 1..=N with no gaps.
pub fn rank(
    entries: &[(RawStatRecord, DisplayIdentity)],
    metric: MetricKey,
    mode: RankMode,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    // par_iter + collect preserves input order, which the stable sort relies on.
    let mut rows: Vec<LeaderboardEntry> = entries
        .par_iter()
        .filter(|(raw, _)| raw.games_played > 0)
        .map(|(raw, identity)| {
            let average = derive(raw).rate_for(metric);
            let total = total_for(raw, metric);
            let value = match mode {
                RankMode::Average => average,
                RankMode::Total => f64::from(total),
            };
            LeaderboardEntry {
                rank: 0,
                player_id: raw.entity_id.clone(),
                display_name: identity.resolve(&raw.entity_id),
                value,
                games_played: raw.games_played,
                total,
                average,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows.truncate(limit);

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = (i + 1) as u32;
    }
    rows
}
