//! Stat categories and ranking modes.

use crate::error::{MbaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leaderboard stat category.
///
/// Each category names a per-game rate (`ppg`, `rpg`, ...) and, through
/// [`MetricKey::total_label`], the raw counting total it is derived from.
/// Selecting a category never changes the underlying record.
///
/// # Examples
///
/// ```rust
/// use mba_stats::MetricKey;
///
/// let key: MetricKey = "rpg".parse().unwrap();
/// assert_eq!(key, MetricKey::Rebounds);
/// assert_eq!(key.to_string(), "rpg");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "ppg")]
    Points,
    #[serde(rename = "rpg")]
    Rebounds,
    #[serde(rename = "apg")]
    Assists,
    #[serde(rename = "spg")]
    Steals,
    #[serde(rename = "bpg")]
    Blocks,
    #[serde(rename = "tpg")]
    Turnovers,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Points,
        MetricKey::Rebounds,
        MetricKey::Assists,
        MetricKey::Steals,
        MetricKey::Blocks,
        MetricKey::Turnovers,
    ];

    /// Short rate code used on the wire and in the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            MetricKey::Points => "ppg",
            MetricKey::Rebounds => "rpg",
            MetricKey::Assists => "apg",
            MetricKey::Steals => "spg",
            MetricKey::Blocks => "bpg",
            MetricKey::Turnovers => "tpg",
        }
    }

    /// Name of the counting total behind the rate.
    pub fn total_label(&self) -> &'static str {
        match self {
            MetricKey::Points => "points",
            MetricKey::Rebounds => "rebounds",
            MetricKey::Assists => "assists",
            MetricKey::Steals => "steals",
            MetricKey::Blocks => "blocks",
            MetricKey::Turnovers => "turnovers",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            MetricKey::Points => "Points Per Game",
            MetricKey::Rebounds => "Rebounds Per Game",
            MetricKey::Assists => "Assists Per Game",
            MetricKey::Steals => "Steals Per Game",
            MetricKey::Blocks => "Blocks Per Game",
            MetricKey::Turnovers => "Turnovers Per Game",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MetricKey {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ppg" | "points" => Ok(MetricKey::Points),
            "rpg" | "rebounds" => Ok(MetricKey::Rebounds),
            "apg" | "assists" => Ok(MetricKey::Assists),
            "spg" | "steals" => Ok(MetricKey::Steals),
            "bpg" | "blocks" => Ok(MetricKey::Blocks),
            "tpg" | "turnovers" => Ok(MetricKey::Turnovers),
            _ => Err(MbaError::InvalidMetric {
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a leaderboard ranks by per-game rate or by raw total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// Per-game average
    #[default]
    Average,
    /// Season total
    Total,
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankMode::Average => "average",
            RankMode::Total => "total",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RankMode {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "average" | "avg" => Ok(RankMode::Average),
            "total" => Ok(RankMode::Total),
            _ => Err(MbaError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Role grant mutation sent to the role sync proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoleAction {
    Add,
    Remove,
}

impl RoleAction {
    pub fn past_tense(&self) -> &'static str {
        match self {
            RoleAction::Add => "added",
            RoleAction::Remove => "removed",
        }
    }
}

impl fmt::Display for RoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoleAction::Add => "add",
            RoleAction::Remove => "remove",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RoleAction {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(RoleAction::Add),
            "remove" => Ok(RoleAction::Remove),
            _ => Err(MbaError::InvalidRoleAction {
                value: s.to_string(),
            }),
        }
    }
}
