use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

/// Most distinct sample values kept per unknown key.
const MAX_SAMPLES_PER_KEY: usize = 5;
/// Longest sample value kept, in characters.
const MAX_SAMPLE_LEN: usize = 50;

/// Aggregated view of the attribute keys normalization could not place,
/// produced by [`AttributeDiagnostics::flush`].
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UnknownAttributeReport {
    pub samples: BTreeMap<String, Vec<String>>,
}

impl UnknownAttributeReport {
    pub fn key_count(&self) -> usize {
        self.samples.len()
    }
}

/// Bounded buffer for attribute keys the normalizer does not recognize.
///
/// Ingesting a large page can hit the same vendor attribute thousands of
/// times; recording here is cheap and silent, and one aggregated record is
/// logged only when the owner flushes. Shared by reference across every
/// node built from one snapshot.
#[derive(Debug, Default)]
pub struct AttributeDiagnostics {
    buffer: Mutex<BTreeMap<String, Vec<String>>>,
}

impl AttributeDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed value for an unknown key. Values are truncated,
    /// deduplicated, and capped per key; past the cap new values are
    /// dropped without a trace until the next flush.
    pub fn record(&self, key: &str, value: &str) {
        let sample = truncate_sample(value);
        let mut buffer = self.buffer.lock();
        let samples = buffer.entry(key.to_string()).or_default();
        if samples.len() < MAX_SAMPLES_PER_KEY && !samples.contains(&sample) {
            samples.push(sample);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Drains the buffer. Emits one aggregated log record and returns the
    /// report; an empty buffer yields `None` and logs nothing.
    pub fn flush(&self) -> Option<UnknownAttributeReport> {
        let samples = std::mem::take(&mut *self.buffer.lock());
        if samples.is_empty() {
            return None;
        }
        let summary =
            serde_json::to_string(&samples).unwrap_or_else(|_| format!("{samples:?}"));
        warn!(
            target: "ax_graph.diagnostics",
            key_count = samples.len(),
            samples = %summary,
            "attributes.unknown_keys.flushed"
        );
        Some(UnknownAttributeReport { samples })
    }
}

fn truncate_sample(value: &str) -> String {
    value.chars().take(MAX_SAMPLE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_samples_per_key_and_dedups() {
        let diag = AttributeDiagnostics::new();
        for i in 0..8 {
            diag.record("jsslot", &format!("value-{i}"));
        }
        diag.record("jsslot", "value-0");

        let report = diag.flush().expect("buffer was not empty");
        assert_eq!(report.key_count(), 1);
        assert_eq!(report.samples["jsslot"].len(), MAX_SAMPLES_PER_KEY);
        assert_eq!(report.samples["jsslot"][0], "value-0");
    }

    #[test]
    fn truncates_long_values_on_char_boundaries() {
        let diag = AttributeDiagnostics::new();
        let long = "é".repeat(80);
        diag.record("aria-weird", &long);

        let report = diag.flush().expect("buffer was not empty");
        let sample = &report.samples["aria-weird"][0];
        assert_eq!(sample.chars().count(), MAX_SAMPLE_LEN);
    }

    #[test]
    fn flush_clears_and_empty_flush_is_none() {
        let diag = AttributeDiagnostics::new();
        diag.record("x-custom", "1");
        assert!(diag.flush().is_some());
        assert!(diag.is_empty());
        assert!(diag.flush().is_none());
    }
}
