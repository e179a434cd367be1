mod app;
mod config;
mod http;
mod source;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::{HttpError, TransportError};
pub use source::SourceError;
pub use validation::ValidationError;
