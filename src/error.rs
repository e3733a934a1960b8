use std::path::PathBuf;

/// All errors that can occur while fetching, normalizing or persisting fixtures.
#[derive(thiserror::Error, Debug)]
pub enum MatchdayError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not valid JSON for the expected envelope.
    #[error("invalid json from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// The provider answered with an explicit `error` field.
    #[error("{0}")]
    Provider(String),

    /// A lookup returned an empty envelope.
    #[error("not found: {0}")]
    NotFound(String),

    /// A raw record is missing one of its identity fields.
    #[error("malformed record {}: missing {field}", id.as_deref().unwrap_or("<unknown>"))]
    MalformedRecord {
        field: &'static str,
        id: Option<String>,
    },

    /// Page and limit must both be at least 1.
    #[error("invalid pagination: page {page}, limit {limit}")]
    InvalidPagination { page: usize, limit: usize },

    /// Reading or writing the favorites file failed.
    #[error("favorites storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The favorites set could not be serialized.
    #[error("failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),

    /// An environment variable held an unusable value.
    #[error("invalid config value for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl MatchdayError {
    /// Whether the failure came from the network or the payload, i.e. a later
    /// attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MatchdayError::Http { .. }
                | MatchdayError::UnexpectedStatus { .. }
                | MatchdayError::ResponseBody { .. }
                | MatchdayError::Json { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchdayError>;
