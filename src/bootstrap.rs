//! Host readiness polling for extension startup.
//!
//! The host exposes its menu and data APIs some time after process start;
//! registration has to wait until a readiness probe passes. This lives
//! entirely outside the resolution engine.

use std::thread;
use std::time::Duration;

/// Retry schedule for host readiness probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Maximum probe attempts; `None` retries until ready.
    pub max_attempts: Option<u32>,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl ReadinessPolicy {
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::unbounded()
        }
    }

    /// Retry-forever schedule.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Polls `probe` until it reports ready, sleeping between attempts with
/// doubling backoff capped at `max_delay`. Returns `false` when a bounded
/// policy runs out of attempts.
pub fn wait_for_host_ready<P>(mut probe: P, policy: ReadinessPolicy) -> bool
where
    P: FnMut() -> bool,
{
    let mut delay = policy.initial_delay;
    let mut attempts = 0u32;
    loop {
        if probe() {
            return true;
        }
        attempts = attempts.saturating_add(1);
        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return false;
        }
        thread::sleep(delay);
        delay = delay.saturating_mul(2).min(policy.max_delay);
    }
}
