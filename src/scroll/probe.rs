//! Bounded detection of an optional capability.

use web_time::Duration;

use crate::options::RetryPolicy;

/// Result of one availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The capability is present.
    Ready,
    /// Not yet present; check again after the delay.
    Retry(Duration),
    /// Attempts exhausted; the capability is treated as absent for good.
    GaveUp,
}

/// Checks immediately, then at a fixed interval, then gives up.
#[derive(Debug, Clone)]
pub struct BoundedProbe {
    policy: RetryPolicy,
    attempts: u32,
    outcome: Option<ProbeStatus>,
}

impl BoundedProbe {
    /// Probe following `policy`.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            outcome: None,
        }
    }

    /// Record one check. Once settled the outcome never changes, so extra
    /// polls are harmless.
    pub fn check(&mut self, available: bool) -> ProbeStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        self.attempts += 1;
        let status = if available {
            ProbeStatus::Ready
        } else if self.attempts >= self.policy.attempts() {
            ProbeStatus::GaveUp
        } else {
            return ProbeStatus::Retry(self.policy.interval());
        };
        self.outcome = Some(status);
        status
    }

    /// Whether the capability was found.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.outcome == Some(ProbeStatus::Ready)
    }

    /// Whether the probe has stopped checking.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of checks made so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            interval_ms: 100,
        }
    }

    #[test]
    fn immediate_hit() {
        let mut probe = BoundedProbe::new(policy(3));
        assert_eq!(probe.check(true), ProbeStatus::Ready);
        assert!(probe.is_ready());
        assert_eq!(probe.attempts(), 1);
    }

    #[test]
    fn retries_then_gives_up() {
        let mut probe = BoundedProbe::new(policy(3));
        let delay = Duration::from_millis(100);
        assert_eq!(probe.check(false), ProbeStatus::Retry(delay));
        assert_eq!(probe.check(false), ProbeStatus::Retry(delay));
        assert_eq!(probe.check(false), ProbeStatus::GaveUp);
        // Late availability does not revive it.
        assert_eq!(probe.check(true), ProbeStatus::GaveUp);
        assert!(!probe.is_ready());
        assert_eq!(probe.attempts(), 3);
    }

    #[test]
    fn found_on_a_later_attempt() {
        let mut probe = BoundedProbe::new(policy(5));
        assert!(matches!(probe.check(false), ProbeStatus::Retry(_)));
        assert_eq!(probe.check(true), ProbeStatus::Ready);
        assert_eq!(probe.check(false), ProbeStatus::Ready);
        assert_eq!(probe.attempts(), 2);
        assert!(probe.is_settled());
    }
}
