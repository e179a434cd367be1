//! The fuzzing engine: drives the per-target attempt loop.
use std::num::{NonZeroU32, NonZeroUsize};
use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::{AppError, AppResult, ValidationError};
use crate::http::HttpClient;
use crate::payload::{MAX_PAYLOAD_LEN, PayloadGenerator};
use crate::report::{AttemptEvent, Reporter};
use crate::request::{self, FuzzRequest};
use crate::shutdown::ShutdownReceiver;
use crate::source::Target;


/// Attempts per target when none are configured.
pub const DEFAULT_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(25) {
    Some(value) => value,
    None => NonZeroU32::MIN,
};

const DEFAULT_MAX_PAYLOAD_LEN: NonZeroUsize = match NonZeroUsize::new(MAX_PAYLOAD_LEN) {
    Some(value) => value,
    None => NonZeroUsize::MIN,
};

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct FuzzConfig {
    /// Attempts per target.
    pub attempts: NonZeroU32,
    /// Max in-flight attempts per target. 1 keeps the strictly sequential
    /// reference ordering; anything larger is an explicit opt-in.
    pub concurrency: NonZeroUsize,
    /// Upper bound (inclusive) on payload length.
    pub max_payload_len: NonZeroUsize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            concurrency: NonZeroUsize::MIN,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

/// Counters surfaced at the end of a run. Individual attempt outcomes are
/// reported as they happen and never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempts_dispatched: u64,
    pub transport_errors: u64,
}

pub struct FuzzEngine<R: Rng> {
    config: FuzzConfig,
    generator: PayloadGenerator<R>,
}

impl FuzzEngine<StdRng> {
    #[must_use]
    pub fn new(config: FuzzConfig) -> Self {
        Self {
            config,
            generator: PayloadGenerator::from_entropy(),
        }
    }
}

impl<R: Rng> FuzzEngine<R> {
    /// Builds an engine around an injected payload generator (seeded in
    /// tests for reproducible payloads).
    pub const fn with_generator(config: FuzzConfig, generator: PayloadGenerator<R>) -> Self {
        Self { config, generator }
    }

    /// Runs the fuzzing loop over `targets` in order.
    ///
    /// Transport failures are attempt-scoped: they are reported through the
    /// sink and the loop continues. The shutdown receiver is polled between
    /// attempts, so cancellation is cooperative and never preemptive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoTargets`] when `targets` is empty; the
    /// run aborts before any client interaction.
    pub async fn run(
        &mut self,
        targets: &[Target],
        client: &Arc<dyn HttpClient>,
        reporter: &Arc<dyn Reporter>,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> AppResult<RunSummary> {
        if targets.is_empty() {
            return Err(AppError::validation(ValidationError::NoTargets));
        }

        let mut summary = RunSummary::default();
        for target in targets {
            let interrupted = if self.config.concurrency.get() > 1 {
                self.fuzz_target_concurrent(target, client, reporter, shutdown_rx, &mut summary)
                    .await
            } else {
                self.fuzz_target(target, client, reporter, shutdown_rx, &mut summary)
                    .await
            };
            if interrupted {
                info!("Shutdown requested; stopping run.");
                break;
            }
        }
        Ok(summary)
    }

    /// Sequential attempt loop: attempt N's outcome is observed before
    /// attempt N+1 begins. Returns true when shutdown interrupted the loop.
    async fn fuzz_target(
        &mut self,
        target: &Target,
        client: &Arc<dyn HttpClient>,
        reporter: &Arc<dyn Reporter>,
        shutdown_rx: &mut ShutdownReceiver,
        summary: &mut RunSummary,
    ) -> bool {
        for attempt in 1..=self.config.attempts.get() {
            if shutdown_requested(shutdown_rx) {
                return true;
            }

            let (request, payload) = self.next_request(target);
            reporter.report(&AttemptEvent::Started {
                target,
                attempt,
                request: &request,
                payload: &payload,
            });
            summary.attempts_dispatched += 1;

            match client.perform(&request).await {
                Ok(status) => {
                    reporter.report(&AttemptEvent::Succeeded {
                        target,
                        attempt,
                        status,
                    });
                }
                Err(err) => {
                    summary.transport_errors += 1;
                    reporter.report(&AttemptEvent::Failed {
                        target,
                        attempt,
                        detail: &err.detail,
                    });
                }
            }
        }
        false
    }

    /// Opt-in bounded concurrency: up to `concurrency` attempts of one
    /// target in flight at once. Attempt indices are still assigned in
    /// increasing order; completion events arrive in completion order.
    async fn fuzz_target_concurrent(
        &mut self,
        target: &Target,
        client: &Arc<dyn HttpClient>,
        reporter: &Arc<dyn Reporter>,
        shutdown_rx: &mut ShutdownReceiver,
        summary: &mut RunSummary,
    ) -> bool {
        let mut interrupted = false;
        let mut inflight: JoinSet<bool> = JoinSet::new();

        for attempt in 1..=self.config.attempts.get() {
            if shutdown_requested(shutdown_rx) {
                interrupted = true;
                break;
            }
            while inflight.len() >= self.config.concurrency.get() {
                drain_one(&mut inflight, summary).await;
            }

            let (request, payload) = self.next_request(target);
            reporter.report(&AttemptEvent::Started {
                target,
                attempt,
                request: &request,
                payload: &payload,
            });
            summary.attempts_dispatched += 1;

            let client = Arc::clone(client);
            let reporter = Arc::clone(reporter);
            let target = target.clone();
            inflight.spawn(async move {
                match client.perform(&request).await {
                    Ok(status) => {
                        reporter.report(&AttemptEvent::Succeeded {
                            target: &target,
                            attempt,
                            status,
                        });
                        false
                    }
                    Err(err) => {
                        reporter.report(&AttemptEvent::Failed {
                            target: &target,
                            attempt,
                            detail: &err.detail,
                        });
                        true
                    }
                }
            });
        }

        while !inflight.is_empty() {
            drain_one(&mut inflight, summary).await;
        }
        interrupted
    }

    fn next_request(&mut self, target: &Target) -> (FuzzRequest, String) {
        let len = self.generator.random_len(self.config.max_payload_len.get());
        let payload = self.generator.generate(len);
        let request = request::build(target, &payload);
        (request, payload)
    }
}

async fn drain_one(inflight: &mut JoinSet<bool>, summary: &mut RunSummary) {
    match inflight.join_next().await {
        Some(Ok(true)) => summary.transport_errors += 1,
        Some(Ok(false)) | None => {}
        Some(Err(err)) => error!("Attempt task failed: {}", err),
    }
}

fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Closed) => true,
        Err(TryRecvError::Empty | TryRecvError::Lagged(_)) => false,
    }
}
