//! Rate-limited HTTP client for the game API.

use crate::call_log::{ApiCallLog, ApiCallRecord};
use crate::error::{ApiError, Result};
use crate::game_api::GameApi;
use crate::models::{ClanDetails, ClanSearch, ClanSummary, PlayerProfile};
use async_trait::async_trait;
use clanscout_core::{ApiConfig, Tag};
use rand::Rng;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Default total attempts per call (first try included).
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

/// Jitter added to each backoff, as a fraction of the delay (1/4).
const JITTER_DIVISOR: u64 = 4;

/// HTTP client for the game API.
///
/// Retries HTTP 429 and transport errors with a linearly growing backoff
/// plus jitter; every other status fails the call immediately.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    max_attempts: u32,
    retry_backoff: Duration,
    probe_timeout: Duration,
    call_log: Option<Arc<ApiCallLog>>,
}

impl ApiClient {
    /// Create a client with default timeouts and retry policy.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let config = ApiConfig {
            base_url: base_url.into(),
            token: Some(token.into()),
            ..ApiConfig::default()
        };
        Self::from_config(&config)
    }

    /// Create a client from configuration. A missing token is sent as an
    /// empty bearer token, which the API rejects with 403.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().unwrap_or_default(),
            max_attempts: config.max_attempts.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            call_log: None,
        })
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_backoff = backoff;
        self
    }

    /// Append every attempt to `log`.
    #[must_use]
    pub fn with_call_log(mut self, log: Arc<ApiCallLog>) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Attached call log, if any.
    #[must_use]
    pub fn call_log(&self) -> Option<&Arc<ApiCallLog>> {
        self.call_log.as_ref()
    }

    /// Full URL for `endpoint`. A raw `#` in the path would start a URL
    /// fragment, so it is percent-encoded here as well.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            endpoint.trim_start_matches('/').replace('#', "%23")
        )
    }

    fn record(&self, url: &str, status: Option<u16>, response: &str, attempt: u32) {
        if let Some(log) = &self.call_log {
            log.push(ApiCallRecord::new(url, status, response, attempt));
        }
    }

    /// GET `endpoint` with `query` and decode the JSON body.
    ///
    /// HTTP 429 and transport errors are retried up to the configured
    /// attempt count. Any other non-200 status fails immediately.
    pub async fn request(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        self.send(endpoint, query, self.max_attempts, None).await
    }

    /// Like [`request`](Self::request) but with a single attempt and the
    /// probe timeout, for diagnostics that must answer quickly.
    pub async fn request_once(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        self.send(endpoint, query, 1, Some(self.probe_timeout)).await
    }

    async fn send(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        max_attempts: u32,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let mut builder = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header(header::ACCEPT, "application/json")
                .query(query);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    self.record(&url, None, &e.to_string(), attempt);
                    if attempt >= max_attempts {
                        tracing::warn!("Request to {} failed after {} attempts: {}", url, attempt, e);
                        return Err(ApiError::Network(e));
                    }
                    let delay = retry_delay(self.retry_backoff, attempt);
                    tracing::debug!(
                        "Request to {} failed (attempt {}/{}), retrying in {:?}: {}",
                        url,
                        attempt,
                        max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                self.record(&url, Some(status.as_u16()), "rate limited", attempt);
                if attempt >= max_attempts {
                    tracing::warn!("Still rate limited on {} after {} attempts", url, attempt);
                    return Err(ApiError::RateLimited {
                        url,
                        attempts: attempt,
                    });
                }
                let delay = retry_delay(self.retry_backoff, attempt);
                tracing::debug!(
                    "Rate limited on {} (attempt {}/{}), retrying in {:?}",
                    url,
                    attempt,
                    max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    self.record(&url, Some(status.as_u16()), &e.to_string(), attempt);
                    return Err(ApiError::Network(e));
                }
            };
            self.record(&url, Some(status.as_u16()), &body, attempt);

            if status != StatusCode::OK {
                return Err(ApiError::Status {
                    url,
                    status: status.as_u16(),
                    message: body.chars().take(200).collect(),
                });
            }

            return serde_json::from_str(&body).map_err(|e| ApiError::Parse {
                url,
                message: e.to_string(),
            });
        }
    }

    /// Clan detail including the roster.
    pub async fn fetch_clan(&self, clan_tag: &Tag) -> Result<ClanDetails> {
        let endpoint = format!("clans/{}", clan_tag.encoded());
        let value = self.request(&endpoint, &[]).await?;
        decode(&self.endpoint_url(&endpoint), value)
    }

    /// Player profile.
    pub async fn fetch_player(&self, player_tag: &Tag) -> Result<PlayerProfile> {
        let endpoint = format!("players/{}", player_tag.encoded());
        let value = self.request(&endpoint, &[]).await?;
        decode(&self.endpoint_url(&endpoint), value)
    }

    /// Raw clan search returning the decoded `items`.
    pub async fn fetch_clans(&self, query: &ClanSearch) -> Result<Vec<ClanSummary>> {
        let mut value = self.request("clans", &query.to_query()).await?;
        let items = match value.get_mut("items").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        };

        // One malformed entry should not hide the rest of the page.
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(clan) => Some(clan),
                Err(e) => {
                    tracing::debug!("Skipping malformed clan search item: {}", e);
                    None
                }
            })
            .collect())
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Delay before the next attempt: `backoff * attempt` plus up to 25% jitter.
fn retry_delay(backoff: Duration, attempt: u32) -> Duration {
    let base_ms = u64::try_from(backoff.as_millis())
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::from(attempt));
    let jitter_ms = rand::thread_rng().gen_range(0..=base_ms / JITTER_DIVISOR);
    Duration::from_millis(base_ms.saturating_add(jitter_ms))
}

#[async_trait]
impl GameApi for ApiClient {
    async fn search_clans(&self, query: &ClanSearch) -> Vec<ClanSummary> {
        match self.fetch_clans(query).await {
            Ok(clans) => clans,
            Err(e) => {
                tracing::warn!("Clan search for '{}' returned no data: {}", query.name, e);
                Vec::new()
            }
        }
    }

    async fn clan(&self, clan_tag: &Tag) -> Option<ClanDetails> {
        match self.fetch_clan(clan_tag).await {
            Ok(clan) => Some(clan),
            Err(e) => {
                tracing::warn!("Clan {} returned no data: {}", clan_tag, e);
                None
            }
        }
    }

    async fn player(&self, player_tag: &Tag) -> Option<PlayerProfile> {
        match self.fetch_player(player_tag).await {
            Ok(player) => Some(player),
            Err(e) => {
                tracing::debug!("Profile for player {} returned no data: {}", player_tag, e);
                None
            }
        }
    }

    async fn probe(&self) -> Result<u16> {
        let url = self.endpoint_url("locations");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .timeout(self.probe_timeout)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                self.record(&url, Some(status), &body, 1);
                Ok(status)
            }
            Err(e) => {
                self.record(&url, None, &e.to_string(), 1);
                Err(ApiError::Network(e))
            }
        }
    }
}
