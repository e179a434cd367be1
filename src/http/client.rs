use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::args::{DEFAULT_USER_AGENT, HttpMethod};
use crate::error::{HttpError, TransportError};
use crate::request::FuzzRequest;

use super::HttpClient;

/// Options for the shared reqwest client. One client (and its connection
/// pool) serves every attempt in a run.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds the shared client used for the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::BuildClientFailed`] when the underlying client
    /// cannot be constructed.
    pub fn new(options: &ClientOptions) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn perform(&self, request: &FuzzRequest) -> Result<u16, TransportError> {
        // Fresh reqwest request per attempt; method, URL, and body never
        // leak from one attempt into the next.
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.final_url),
            HttpMethod::Post => self
                .client
                .post(&request.final_url)
                .body(request.body.clone().unwrap_or_default()),
        };

        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();

        // Drain the body so the connection can be reused; content is
        // discarded. A read failure after the status line still counts the
        // exchange as completed.
        match response.bytes().await {
            Ok(bytes) => trace!("Response: {} byte(s)", bytes.len()),
            Err(err) => trace!("Response body read failed: {}", err),
        }

        Ok(status)
    }
}
