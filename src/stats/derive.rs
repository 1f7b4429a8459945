//! Per-game rates and shooting percentages.
//!
//! This module is the single place where division guards live. Callers that
//! need a rate or a percentage go through [`rate`] and [`pct`] rather than
//! dividing on their own.

use serde::{Deserialize, Serialize};

use super::record::RawStatRecord;
use crate::cli::types::MetricKey;


/// Metrics computed from a [`RawStatRecord`]. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub ppg: f64,
    pub apg: f64,
    pub rpg: f64,
    pub spg: f64,
    pub bpg: f64,
    pub tpg: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
    pub ft_pct: f64,
    pub win_pct: f64,
}

impl DerivedMetrics {
    /// Per-game rate for a leaderboard category.
    pub fn rate_for(&self, metric: MetricKey) -> f64 {
        match metric {
            MetricKey::Points => self.ppg,
            MetricKey::Rebounds => self.rpg,
            MetricKey::Assists => self.apg,
            MetricKey::Steals => self.spg,
            MetricKey::Blocks => self.bpg,
            MetricKey::Turnovers => self.tpg,
        }
    }
}

/// Raw counting total behind a leaderboard category.
pub fn total_for(raw: &RawStatRecord, metric: MetricKey) -> u32 {
    match metric {
        MetricKey::Points => raw.points,
        MetricKey::Rebounds => raw.rebounds,
        MetricKey::Assists => raw.assists,
        MetricKey::Steals => raw.steals,
        MetricKey::Blocks => raw.blocks,
        MetricKey::Turnovers => raw.turnovers,
    }
}

/// Round to one decimal place, half away from zero. Non-finite input maps to 0.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

/// `total / max(games, 1)`, rounded to one decimal.
///
/// A record with totals but zero games is treated as one game rather than
/// surfacing the anomaly.
pub fn rate(total: u32, games: u32) -> f64 {
    round1(f64::from(total) / f64::from(games.max(1)))
}

/// `made / attempted * 100`, rounded to one decimal; 0 when nothing was attempted.
pub fn pct(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    round1(f64::from(made) / f64::from(attempted) * 100.0)
}

/// Compute the derived metrics of a raw record.
///
/// Total and pure: every division is guarded, every field is rounded to one
/// decimal half away from zero, and identical input yields bit-identical
/// output. `win_pct` is measured against `games_played`, not against
/// `games_won + games_lost`.
pub fn derive(raw: &RawStatRecord) -> DerivedMetrics {
    let gp = raw.games_played;
    DerivedMetrics {
        ppg: rate(raw.points, gp),
        apg: rate(raw.assists, gp),
        rpg: rate(raw.rebounds, gp),
        spg: rate(raw.steals, gp),
        bpg: rate(raw.blocks, gp),
        tpg: rate(raw.turnovers, gp),
        fg_pct: pct(raw.field_goals_made, raw.field_goals_attempted),
        three_pct: pct(raw.three_pointers_made, raw.three_pointers_attempted),
        ft_pct: pct(raw.free_throws_made, raw.free_throws_attempted),
        win_pct: pct(raw.games_won, gp),
    }
}
