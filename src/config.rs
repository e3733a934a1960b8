//! Client configuration.
//!
//! Everything the client, the live poller and the favorites store need is
//! carried in one [`ClientConfig`] value that is passed in explicitly.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::{MatchdayError, Result};

/// Public v1 endpoint with the free test key.
pub const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";
/// English Premier League.
pub const DEFAULT_LEAGUE_ID: &str = "4328";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_FAVORITES_PATH: &str = "matchday-favorites.json";
/// Storage key under which the favorite match ids are kept.
pub const FAVORITES_KEY: &str = "sports-hub-favorites";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// League used when the caller does not name one.
    pub default_league_id: String,
    /// Time between two live refreshes.
    pub poll_interval: Duration,
    /// Upper bound for a single HTTP request.
    pub request_timeout: Duration,
    /// File backing the favorites store.
    pub favorites_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_league_id: DEFAULT_LEAGUE_ID.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            favorites_path: PathBuf::from(DEFAULT_FAVORITES_PATH),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            base_url: value("SPORTSDB_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            default_league_id: value("SPORTSDB_LEAGUE_ID").unwrap_or(defaults.default_league_id),
            poll_interval: match value("SPORTSDB_POLL_SECS") {
                Some(raw) => parse_secs("SPORTSDB_POLL_SECS", &raw)?,
                None => defaults.poll_interval,
            },
            request_timeout: match value("SPORTSDB_TIMEOUT_SECS") {
                Some(raw) => parse_secs("SPORTSDB_TIMEOUT_SECS", &raw)?,
                None => defaults.request_timeout,
            },
            favorites_path: value("SPORTSDB_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_path),
        })
    }

    /// Build the HTTP client used by [`crate::SportsDbClient::new`].
    pub(crate) fn http_client(&self) -> reqwest::Client {
        self.http_client_from(reqwest::Client::builder())
    }

    /// Apply the request timeout to `builder`. If the builder is rejected the
    /// plain default client is used instead and the failure is logged.
    pub(crate) fn http_client_from(&self, builder: reqwest::ClientBuilder) -> reqwest::Client {
        builder
            .timeout(self.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "failed to build http client, falling back to defaults without timeout"
                );
                reqwest::Client::new()
            })
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<Duration> {
    match raw.parse::<u64>() {
        Ok(0) => Err(MatchdayError::Config {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(MatchdayError::Config {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.default_league_id, "4328");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SPORTSDB_BASE_URL", "http://localhost:8080/api/"),
            ("SPORTSDB_LEAGUE_ID", "4335"),
            ("SPORTSDB_POLL_SECS", "30"),
            ("SPORTSDB_TIMEOUT_SECS", " 5 "),
            ("SPORTSDB_FAVORITES_PATH", "/tmp/favs.json"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.default_league_id, "4335");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.favorites_path, PathBuf::from("/tmp/favs.json"));
    }

    #[tokio::test]
    async fn test_http_client_applies_request_timeout() {
        use axum::routing::get;
        use axum::Router;

        let router = Router::new().route(
            "/slow.php",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let base = crate::test_support::serve(router).await;
        let config = ClientConfig {
            request_timeout: Duration::from_millis(200),
            ..ClientConfig::default()
        };

        let client = config.http_client_from(reqwest::Client::builder().no_proxy());
        let err = client
            .get(format!("{base}/slow.php"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "got {err:?}");
    }

    #[test]
    fn test_rejected_builder_falls_back() {
        let config = ClientConfig::default();
        let builder = reqwest::Client::builder().user_agent("bad\nagent");

        let _client = config.http_client_from(builder);
    }

    #[test]
    fn test_rejects_bad_interval() {
        let err = ClientConfig::from_lookup(lookup(&[("SPORTSDB_POLL_SECS", "soon")])).unwrap_err();
        assert!(matches!(
            err,
            MatchdayError::Config {
                key: "SPORTSDB_POLL_SECS",
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[("SPORTSDB_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, MatchdayError::Config { .. }));
    }
}
