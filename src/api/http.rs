//! Clients for the park stats, leaderboard and role sync functions.

use reqwest::{header::HeaderMap, Client, StatusCode, Url};
use tracing::{debug, warn};

use super::types::{
    Fetched, LeaderboardRow, ParkGameStats, RoleSyncOutcome, RoleSyncRequest, RoleSyncResponse,
};
use crate::cli::types::{MetricKey, RoleAction, Season};
use crate::config::Config;
use crate::core::http::{auth_header_map, is_json_content_type};
use crate::error::MbaError;
use crate::Result;


/// Message returned when the role proxy reports the change is a no-op.
pub const ALREADY_IN_STATE: &str = "already in requested state";

/// Thin client over the league's hosted functions.
///
/// Base URLs are fields so tests can aim them at a mock server.
#[derive(Debug, Clone)]
pub struct LeagueApi {
    client: Client,
    headers: HeaderMap,
    park_stats_url: Url,
    role_sync_url: String,
}

impl LeagueApi {
    pub fn new(
        park_stats_url: impl Into<String>,
        role_sync_url: impl Into<String>,
        api_key: Option<&str>,
    ) -> Result<Self> {
        let park_stats_url = park_stats_url.into();
        let parsed = Url::parse(park_stats_url.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(MbaError::InvalidUrl {
                url: park_stats_url,
            })?;

        Ok(Self {
            client: Client::new(),
            headers: auth_header_map(api_key)?,
            park_stats_url: parsed,
            role_sync_url: role_sync_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.park_stats_api.clone(),
            config.role_sync_api.clone(),
            config.api_key.as_deref(),
        )
    }

    /// Park stats base URL with one percent-encoded path segment appended.
    fn park_stats_url_with(&self, segment: &str) -> Result<Url> {
        let mut url = self.park_stats_url.clone();
        url.path_segments_mut()
            .map_err(|()| MbaError::InvalidUrl {
                url: self.park_stats_url.to_string(),
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Park stats for one player, looked up by Minecraft name or uuid.
    ///
    /// A 404, or a non-JSON body (function not deployed), is `NotFound`.
    pub async fn fetch_park_stats(
        &self,
        identifier: &str,
        season: u16,
    ) -> Result<Fetched<ParkGameStats>> {
        let url = self.park_stats_url_with(identifier.trim())?;
        debug!(%url, season, "fetching park stats");

        let res = self
            .client
            .get(url.clone())
            .headers(self.headers.clone())
            .query(&[("season", season.to_string())])
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            debug!(identifier, "no park stats for player");
            return Ok(Fetched::NotFound);
        }
        if !status.is_success() {
            return Err(status_error("park-stats", status, res.text().await?));
        }
        if !is_json_content_type(res.headers()) {
            warn!(%url, "park stats endpoint did not return JSON; is the function deployed?");
            return Ok(Fetched::NotFound);
        }

        Ok(Fetched::Found(res.json::<ParkGameStats>().await?))
    }

    /// Every player's park stats for a season.
    pub async fn fetch_all_park_stats(&self, season: u16) -> Result<Vec<ParkGameStats>> {
        debug!(season, "fetching all park stats");

        let res = self
            .client
            .get(self.park_stats_url.clone())
            .headers(self.headers.clone())
            .query(&[("all", "true".to_string()), ("season", season.to_string())])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(status_error("park-stats", status, res.text().await?));
        }
        if !is_json_content_type(res.headers()) {
            warn!("park stats endpoint did not return JSON; treating as empty");
            return Ok(Vec::new());
        }

        Ok(res.json::<Vec<ParkGameStats>>().await?)
    }

    /// The remote, already-ranked leaderboard for one category.
    pub async fn fetch_leaderboard(
        &self,
        metric: MetricKey,
        season: Option<&Season>,
        limit: usize,
    ) -> Result<Vec<LeaderboardRow>> {
        let url = self.park_stats_url_with("leaderboard")?;
        let mut params = vec![
            ("stat", metric.code().to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(season) = season {
            params.push(("season", season.as_str().to_string()));
        }

        let res = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(status_error("leaderboard", status, res.text().await?));
        }

        Ok(res.json::<Vec<LeaderboardRow>>().await?)
    }

    /// Grant or revoke a Discord role through the sync proxy.
    ///
    /// 403 and 404 mean the user already is in the requested state and count
    /// as success. Other error statuses come back as `success: false`; only
    /// transport failures are errors.
    pub async fn sync_role(
        &self,
        action: RoleAction,
        user_id: &str,
        role_id: &str,
    ) -> Result<RoleSyncOutcome> {
        let body = RoleSyncRequest {
            action,
            user_id: user_id.to_string(),
            role_id: role_id.to_string(),
        };

        let res = self
            .client
            .post(&self.role_sync_url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::NOT_FOUND {
            debug!(%status, user_id, role_id, "role sync treated as no-op");
            return Ok(RoleSyncOutcome {
                success: true,
                message: ALREADY_IN_STATE.to_string(),
            });
        }

        let text = res.text().await?;
        if !status.is_success() {
            warn!(%status, user_id, role_id, "role sync failed");
            return Ok(RoleSyncOutcome {
                success: false,
                message: text,
            });
        }

        let parsed: RoleSyncResponse = serde_json::from_str(&text).unwrap_or_else(|e| {
            debug!(error = %e, "role sync body was not JSON");
            RoleSyncResponse {
                success: true,
                ..Default::default()
            }
        });

        let message = match (parsed.warning, parsed.error) {
            (Some(w), _) => w,
            (None, Some(e)) => e,
            (None, None) => format!("role {} {}", role_id, action.past_tense()),
        };

        Ok(RoleSyncOutcome {
            success: parsed.success,
            message,
        })
    }
}

fn status_error(service: &'static str, status: StatusCode, body: String) -> MbaError {
    warn!(service, %status, "unexpected response status");
    MbaError::Status {
        service,
        status: status.as_u16(),
        body,
    }
}
