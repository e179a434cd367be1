//! HTTP dispatch: the transport capability consumed by the engine.
mod client;

pub use client::{ClientOptions, ReqwestClient};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::FuzzRequest;

/// Performs one request and observes only transport-level success or
/// failure. Implementations must drain and discard the response body;
/// inspecting it is out of scope for the fuzzer.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Dispatches one attempt's request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the network exchange cannot be
    /// completed. An HTTP error status is a successful exchange.
    async fn perform(&self, request: &FuzzRequest) -> Result<u16, TransportError>;
}
