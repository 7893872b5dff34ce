use std::time::Duration;

use sightline_core_types::{NodeId, PageId};
use tracing::debug;

use crate::errors::ResolveError;
use crate::metrics;

pub fn emit_resolved(
    id: &NodeId,
    page: &PageId,
    selector: &str,
    cache_hit: bool,
    duration: Duration,
) {
    metrics::record_resolution(cache_hit, duration);
    debug!(
        target: "resolution.events",
        %id,
        %page,
        selector,
        cache_hit,
        "resolution.node.resolved"
    );
}

pub fn emit_failed(id: &NodeId, page: &PageId, error: &ResolveError, duration: Duration) {
    metrics::record_failure(duration);
    debug!(
        target: "resolution.events",
        %id,
        %page,
        error = %error,
        retryable = error.is_retryable(),
        "resolution.node.failed"
    );
}
