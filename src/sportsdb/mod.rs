pub(crate) mod catalog;
pub(crate) mod events;
pub(crate) mod match_detail;
pub mod raw;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{MatchdayError, Result};
use raw::Envelope;

/// The part of an error response the provider fills in.
#[derive(Deserialize)]
struct ProviderError {
    error: String,
}

/// Fetch a URL and decode the body as JSON. No retry.
///
/// A non-success status whose body still carries the provider's `error`
/// field becomes [`MatchdayError::Provider`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T> {
    debug!(url, "fetching");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MatchdayError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ProviderError>(&body) {
            Ok(provider) => MatchdayError::Provider(provider.error),
            Err(_) => MatchdayError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            },
        });
    }

    let body = response.text().await.map_err(|e| MatchdayError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| MatchdayError::Json {
        url: url.to_owned(),
        source: e,
    })
}

/// Fetch a provider envelope, turning an `error` field into
/// [`MatchdayError::Provider`] whatever the HTTP status was.
pub(crate) async fn get_envelope<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<Envelope<T>> {
    let mut envelope: Envelope<T> = get_json(client, url).await?;
    if let Some(message) = envelope.error.take() {
        return Err(MatchdayError::Provider(message));
    }
    Ok(envelope)
}

/// Join the configured base URL and an endpoint path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    use super::*;
    use crate::sportsdb::raw::RawEvent;
    use crate::test_support::{serve, test_http_client};

    fn router() -> Router {
        Router::new()
            .route("/ok.php", get(|| async { r#"{"events": [{"idEvent": "1"}]}"# }))
            .route(
                "/down.php",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            )
            .route("/html.php", get(|| async { "<html>not json</html>" }))
            .route(
                "/quota.php",
                get(|| async { r#"{"error": "Daily limit reached"}"# }),
            )
            .route(
                "/unauthorized.php",
                get(|| async { (StatusCode::UNAUTHORIZED, r#"{"error": "Invalid API key"}"#) }),
            )
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("https://example.test/api/", "all_leagues.php"),
            "https://example.test/api/all_leagues.php"
        );
    }

    #[tokio::test]
    async fn test_get_envelope_ok() {
        let base = serve(router()).await;
        let client = test_http_client();
        let envelope: Envelope<RawEvent> = get_envelope(&client, &endpoint(&base, "ok.php"))
            .await
            .unwrap();
        assert_eq!(envelope.into_list().len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = serve(router()).await;
        let client = test_http_client();
        let err = get_json::<serde_json::Value>(&client, &endpoint(&base, "down.php"))
            .await
            .unwrap_err();
        match err {
            MatchdayError::UnexpectedStatus { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let base = serve(router()).await;
        let client = test_http_client();
        let err = get_json::<serde_json::Value>(&client, &endpoint(&base, "html.php"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchdayError::Json { .. }), "got {err:?}");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_provider_error_short_circuits() {
        let base = serve(router()).await;
        let client = test_http_client();
        let err = get_envelope::<RawEvent>(&client, &endpoint(&base, "quota.php"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Daily limit reached");
    }

    #[tokio::test]
    async fn test_provider_error_with_failure_status() {
        let base = serve(router()).await;
        let client = test_http_client();
        let err = get_envelope::<RawEvent>(&client, &endpoint(&base, "unauthorized.php"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchdayError::Provider(_)), "got {err:?}");
        assert_eq!(err.to_string(), "Invalid API key");
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = test_http_client();
        let err = get_json::<serde_json::Value>(&client, &format!("http://{addr}/eventsday.php"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchdayError::Http { .. }), "got {err:?}");
    }
}
