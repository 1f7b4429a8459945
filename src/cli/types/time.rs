//! Season labels.

use crate::error::{MbaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season labels such as `S1`.
///
/// The primary store keys seasons by label while the park stats source
/// keys them by number, so [`Season::number`] bridges the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub String);

impl Season {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing season number, e.g. `S3` -> 3. Labels without digits map to 1.
    pub fn number(&self) -> u16 {
        trailing_digits(&self.0).parse().unwrap_or(1)
    }
}

fn trailing_digits(label: &str) -> &str {
    let start = label.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    &label[start..]
}

impl Default for Season {
    fn default() -> Self {
        Self("S1".to_string())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = MbaError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(MbaError::InvalidSeason {
                value: s.to_string(),
            });
        }
        let digits = trailing_digits(trimmed);
        if !digits.is_empty() && digits.parse::<u16>().is_err() {
            return Err(MbaError::InvalidSeason {
                value: s.to_string(),
            });
        }
        // Bare numbers are accepted as shorthand: `2` -> `S2`.
        if digits.len() == trimmed.len() {
            return Ok(Self(format!("S{}", trimmed)));
        }
        Ok(Self(trimmed.to_string()))
    }
}
