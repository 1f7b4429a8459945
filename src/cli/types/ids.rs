//! ID types for league entities.

use crate::error::{MbaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for player identifiers.
///
/// League identifiers are opaque strings (for example `discord-123456789`),
/// so the wrapper exists to keep them from being mixed up with display names.
///
/// # Examples
///
/// ```rust
/// use mba_stats::PlayerId;
///
/// let id = PlayerId::new("discord-123456789");
/// assert_eq!(id.as_str(), "discord-123456789");
/// assert_eq!(id.masked(), "Player …6789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder name that never exposes the full identifier.
    ///
    /// Uses the last four characters; identifiers of four characters or
    /// fewer are fully masked.
    pub fn masked(&self) -> String {
        mask_identifier(&self.0)
    }
}

/// Build the `Player …XXXX` fallback for an identifier.
pub fn mask_identifier(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 4 {
        return "Player ****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("Player …{}", tail)
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MbaError::InvalidPlayerId {
                value: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type-safe wrapper for team identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().to_string()))
    }
}
