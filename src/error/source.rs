use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read endpoint file '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No valid endpoints loaded from '{path}'.")]
    NoTargets { path: PathBuf },
    #[error("Invalid target: {reason}")]
    InvalidTarget { reason: String },
    #[error("Endpoint '{url}' uses unsupported method '{method}'. Use GET or POST.")]
    UnsupportedMethod { url: String, method: String },
}
