//! Type-safe wrappers and enums for league data.

pub mod category;
pub mod ids;
pub mod time;

pub use category::{MetricKey, RankMode, RoleAction};
pub use ids::{mask_identifier, PlayerId, TeamId};
pub use time::Season;
