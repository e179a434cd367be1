//! Structured attempt reporting.
//!
//! The engine emits one event per attempt phase; rendering (and verbosity)
//! belongs to the sink, not to the engine.
use tracing::{debug, info, warn};

use crate::request::FuzzRequest;
use crate::source::Target;

/// One reporting event in the life of an attempt. Attempt indices are
/// 1-based and every event carries the target so a failure can be reproduced
/// from its log line alone.
#[derive(Debug)]
pub enum AttemptEvent<'a> {
    Started {
        target: &'a Target,
        attempt: u32,
        request: &'a FuzzRequest,
        payload: &'a str,
    },
    Succeeded {
        target: &'a Target,
        attempt: u32,
        status: u16,
    },
    Failed {
        target: &'a Target,
        attempt: u32,
        detail: &'a str,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: &AttemptEvent<'_>);
}

/// Renders attempt events through `tracing`.
pub struct LogReporter {
    verbose: bool,
}

impl LogReporter {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for LogReporter {
    fn report(&self, event: &AttemptEvent<'_>) {
        match event {
            AttemptEvent::Started {
                target,
                attempt,
                request,
                payload,
            } => {
                if self.verbose {
                    info!(
                        "Sending {} payload {} to {}: {}",
                        target.method, attempt, request.final_url, payload
                    );
                }
            }
            AttemptEvent::Succeeded {
                target,
                attempt,
                status,
            } => {
                debug!(
                    "{} {} attempt {} -> {}",
                    target.method, target.url, attempt, status
                );
            }
            AttemptEvent::Failed {
                target,
                attempt,
                detail,
            } => {
                warn!(
                    "Request failed for {} ({} attempt {}): {}",
                    target.url, target.method, attempt, detail
                );
            }
        }
    }
}
