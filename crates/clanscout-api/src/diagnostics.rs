//! Connectivity diagnostics.
//!
//! Runs a short sequence of checks against a configured client so a caller
//! can tell "no players matched" apart from "the API is unreachable".

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::game_api::GameApi;
use serde::Serialize;

/// Tokens shorter than this are certainly not API keys.
const MIN_TOKEN_LEN: usize = 20;

/// Outcome of a single diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Check name (`token_format`, `locations_probe`, `clan_search`)
    pub name: String,
    /// Whether the check passed
    pub success: bool,
    /// HTTP status, if a request was made and answered
    pub status: Option<u16>,
    /// Human-readable detail
    pub message: String,
}

/// Aggregated connectivity report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectivityReport {
    /// True when a real clan search succeeded
    pub success: bool,
    /// Individual check results, in execution order
    pub checks: Vec<CheckResult>,
    /// Suggested fixes for failed checks
    pub recommendations: Vec<String>,
}

impl ConnectivityReport {
    /// Look up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Run all connectivity checks against `client`.
///
/// Never fails; every problem is reported inside the returned report.
pub async fn check_connectivity(client: &ApiClient) -> ConnectivityReport {
    let mut report = ConnectivityReport::default();

    // Token format
    let token_ok = client.token().len() >= MIN_TOKEN_LEN;
    report.checks.push(CheckResult {
        name: "token_format".to_string(),
        success: token_ok,
        status: None,
        message: if token_ok {
            "API token format appears valid".to_string()
        } else {
            "API token appears to be missing or invalid".to_string()
        },
    });
    if !token_ok {
        report.recommendations.push(
            "Set the API token in the [api] section of the config file or via CLANSCOUT_API_TOKEN"
                .to_string(),
        );
    }

    // Locations probe
    match client.probe().await {
        Ok(status) => {
            let success = status == 200;
            report.checks.push(CheckResult {
                name: "locations_probe".to_string(),
                success,
                status: Some(status),
                message: if success {
                    "Connection successful".to_string()
                } else {
                    format!("Probe returned HTTP {status}")
                },
            });
            if status == 403 {
                report.recommendations.push(format!(
                    "{} rejected the token (HTTP 403). Make sure the key's IP allow-list includes the address requests originate from.",
                    client.base_url()
                ));
            } else if !success {
                report
                    .recommendations
                    .push(format!("Probe returned HTTP {status}; the API may be under maintenance."));
            }
        }
        Err(e) => {
            report.checks.push(CheckResult {
                name: "locations_probe".to_string(),
                success: false,
                status: None,
                message: format!("Error connecting to {}: {e}", client.base_url()),
            });
            report.recommendations.push(format!(
                "Network error connecting to {}. Check the internet connection and that outbound HTTPS is allowed.",
                client.base_url()
            ));
        }
    }

    // Minimal clan search
    let query = [("name", "Clash".to_string()), ("limit", "1".to_string())];
    let search = client.request_once("clans", &query).await;
    let (success, status, message) = match &search {
        Ok(_) => (true, Some(200), "Clan search successful".to_string()),
        Err(ApiError::Status {
            status, message, ..
        }) => (false, Some(*status), message.clone()),
        Err(ApiError::RateLimited { .. }) => (false, Some(429), search_error_message(&search)),
        Err(_) => (false, None, search_error_message(&search)),
    };
    report.checks.push(CheckResult {
        name: "clan_search".to_string(),
        success,
        status,
        message,
    });
    report.success = success;

    if report.success {
        tracing::info!("Connectivity check passed against {}", client.base_url());
    } else {
        tracing::warn!("Connectivity check failed against {}", client.base_url());
    }

    report
}

fn search_error_message<T>(result: &Result<T, ApiError>) -> String {
    match result {
        Ok(_) => String::new(),
        Err(e) => format!("Error performing clan search: {e}"),
    }
}
