//! Resilience Wrapper — retry with exponential backoff, then deterministic fallback.
//!
//! `resilient` never returns an error. Every generation step in the pipeline
//! runs through it, which is what makes `Enricher::enrich` total.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::enrichment::parsing::StepError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Retry budget for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// When false, a malformed response goes straight to the fallback.
    /// Transport failures are always retried.
    pub retry_malformed: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BACKOFF_BASE,
            retry_malformed: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, retry_malformed: bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            retry_malformed,
        }
    }

    /// Delay slept after failed attempt `attempt` (1-based): base * 2^(attempt-1).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cancellation and deadline
// ────────────────────────────────────────────────────────────────────────────

/// Caller-held side of a cancellation signal.
#[cfg(test)]
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

#[cfg(test)]
impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Pipeline-held side of a cancellation signal.
///
/// The HTTP host never fires one: a client disconnect drops the `enrich`
/// future, which abandons every pending call on its own.
#[derive(Debug, Clone)]
pub struct CancelSignal(Option<watch::Receiver<bool>>);

impl CancelSignal {
    #[cfg(test)]
    pub fn channel() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle(tx), CancelSignal(Some(rx)))
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        CancelSignal(None)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once cancelled. Pends forever if the handle is dropped uncancelled.
    pub async fn cancelled(&self) {
        if let Some(rx) = &self.0 {
            let mut rx = rx.clone();
            if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// Why a step stopped calling the generator early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Cancelled,
    DeadlineElapsed,
}

impl std::fmt::Display for Interruption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interruption::Cancelled => write!(f, "cancelled"),
            Interruption::DeadlineElapsed => write!(f, "deadline elapsed"),
        }
    }
}

/// Deadline and cancellation shared by every step of one enrichment run.
#[derive(Debug, Clone)]
pub struct RunGuard {
    deadline: Option<Instant>,
    cancel: CancelSignal,
}

impl RunGuard {
    pub fn new(deadline: Option<Duration>, cancel: CancelSignal) -> Self {
        Self {
            deadline: deadline.map(|d| Instant::now() + d),
            cancel,
        }
    }

    #[cfg(test)]
    pub fn unbounded() -> Self {
        Self::new(None, CancelSignal::never())
    }

    /// Non-blocking check, used before starting a new attempt.
    pub fn check(&self) -> Option<Interruption> {
        if self.cancel.is_cancelled() {
            return Some(Interruption::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interruption::DeadlineElapsed),
            _ => None,
        }
    }

    /// Resolves when the run is cancelled or its deadline passes.
    pub async fn interrupted(&self) -> Interruption {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Interruption::Cancelled,
            _ = deadline => Interruption::DeadlineElapsed,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Retry-then-fallback
// ────────────────────────────────────────────────────────────────────────────

/// Runs `operation` up to `policy.max_attempts` times, sleeping
/// `policy.backoff_delay(n)` after failed attempt n, and returns `fallback()`
/// if no attempt succeeds. An interruption from `guard` abandons the current
/// attempt or sleep and falls back immediately.
///
/// `fallback` must be pure and infallible.
pub async fn resilient<T, Op, Fut, Fb>(
    name: &str,
    policy: &RetryPolicy,
    guard: &RunGuard,
    mut operation: Op,
    fallback: Fb,
) -> T
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StepError>>,
    Fb: FnOnce() -> T,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if let Some(reason) = guard.check() {
            warn!(step = name, attempt, %reason, "skipping generation, using fallback");
            return fallback();
        }

        let outcome = tokio::select! {
            biased;
            reason = guard.interrupted() => {
                warn!(step = name, attempt, %reason, "generation interrupted, using fallback");
                return fallback();
            }
            outcome = operation() => outcome,
        };

        let error = match outcome {
            Ok(value) => {
                if attempt > 1 {
                    info!(step = name, attempt, "generation succeeded after retry");
                } else {
                    debug!(step = name, "generation succeeded on first attempt");
                }
                return value;
            }
            Err(error) => error,
        };

        warn!(
            step = name,
            attempt,
            max_attempts,
            malformed = error.is_malformed(),
            error = %error,
            "generation attempt failed"
        );

        if error.is_malformed() && !policy.retry_malformed {
            warn!(step = name, "malformed output and retries disabled, using fallback");
            return fallback();
        }

        if attempt < max_attempts {
            let delay = policy.backoff_delay(attempt);
            tokio::select! {
                biased;
                reason = guard.interrupted() => {
                    warn!(step = name, attempt, %reason, "backoff interrupted, using fallback");
                    return fallback();
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    warn!(step = name, max_attempts, "all attempts exhausted, using fallback");
    fallback()
}
