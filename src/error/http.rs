use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}

/// Transport-level failure for one attempt: connection refused, timeout, DNS
/// failure, or a URL the client refuses to send. Scoped to that attempt; the
/// run continues. An HTTP error status is not a transport failure.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct TransportError {
    pub detail: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError {
            detail: err.to_string(),
        }
    }
}
