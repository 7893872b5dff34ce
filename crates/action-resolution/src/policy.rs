use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Probe budgets for one resolution pass. Uniqueness probes cap how long a
/// single frame/selector count may take; state probes cap the per-call
/// element checks that run after a unique match is accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    pub uniqueness_probe_timeout_ms: u64,
    pub state_probe_timeout_ms: u64,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            uniqueness_probe_timeout_ms: 250,
            state_probe_timeout_ms: 100,
        }
    }
}

impl ResolutionPolicy {
    pub fn uniqueness_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.uniqueness_probe_timeout_ms)
    }

    pub fn state_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.state_probe_timeout_ms)
    }
}
