use std::sync::Arc;
use std::time::Instant;

use ax_graph::{DomGraph, GraphError, ProcessedSnapshot};
use sightline_core_types::{NodeId, PageId};

use crate::cache::SelectorCache;
use crate::errors::ResolveError;
use crate::events;
use crate::policy::ResolutionPolicy;
use crate::ports::PageDriver;
use crate::resolver::SelectorResolver;
use crate::types::{ActionRequest, ResolvedAction, SelectorBundle};

/// Front door of the crate: takes an action request plus the snapshot it
/// was phrased against and returns a locator verified against the live
/// page. Owns the selector cache, so one pipe serves one page and runs
/// one resolution at a time.
pub struct ActionNodeResolutionPipe<D> {
    driver: Arc<D>,
    resolver: SelectorResolver<D>,
    cache: SelectorCache,
}

impl<D: PageDriver> ActionNodeResolutionPipe<D> {
    pub fn new(driver: Arc<D>, policy: ResolutionPolicy) -> Self {
        Self {
            resolver: SelectorResolver::new(Arc::clone(&driver), policy),
            driver,
            cache: SelectorCache::default(),
        }
    }

    pub async fn forward(
        &mut self,
        request: &ActionRequest,
        snapshot: &ProcessedSnapshot,
        page: &PageId,
    ) -> Result<ResolvedAction, ResolveError> {
        let started = Instant::now();
        match self.forward_inner(request, snapshot, page).await {
            Ok((action, cache_hit)) => {
                let primary = action
                    .locator
                    .selectors
                    .engine_selector
                    .as_deref()
                    .unwrap_or("");
                events::emit_resolved(&action.id, page, primary, cache_hit, started.elapsed());
                Ok(action)
            }
            Err(err) => {
                events::emit_failed(&request.id, page, &err, started.elapsed());
                Err(err)
            }
        }
    }

    async fn forward_inner(
        &mut self,
        request: &ActionRequest,
        snapshot: &ProcessedSnapshot,
        page: &PageId,
    ) -> Result<(ResolvedAction, bool), ResolveError> {
        let graph = &snapshot.graph;
        let node = match graph.find(&request.id) {
            Ok(Some(node)) => node,
            Ok(None) => {
                return Err(ResolveError::NodeNotFound {
                    id: request.id.clone(),
                })
            }
            Err(GraphError::ContractViolation { check }) => {
                return Err(ResolveError::ContractViolation { check })
            }
            Err(other) => return Err(ResolveError::contract(other.to_string())),
        };
        // find() already matched on id; a disagreement here means the graph
        // index is corrupt.
        if node.id() != &request.id {
            return Err(ResolveError::contract(format!(
                "graph returned node {} for requested id {}",
                node.id(),
                request.id
            )));
        }
        let (bundle, cache_hit) = self.ensure_bundle(graph, &request.id, page).await?;
        let locator = self.resolver.resolve(page, &node, &bundle).await?;
        Ok((
            ResolvedAction {
                id: request.id.clone(),
                description: request.description.clone(),
                locator,
            },
            cache_hit,
        ))
    }

    /// Cached bundle for the node, or the driver fallback: look the node id
    /// up in the engine, derive selectors from the locator, cache the
    /// result. Either driver step answering `None` fails the resolution.
    async fn ensure_bundle(
        &mut self,
        graph: &DomGraph,
        id: &NodeId,
        page: &PageId,
    ) -> Result<(SelectorBundle, bool), ResolveError> {
        if let Some(bundle) = self.cache.get(graph, id) {
            return Ok((bundle.clone(), true));
        }
        let locator = self
            .driver
            .locator_for_node_id(page, id)
            .await
            .map_err(|err| ResolveError::failed(id, format!("locator lookup: {err}")))?
            .ok_or_else(|| ResolveError::failed(id, "driver knows no locator for node id"))?;
        let derived = self
            .driver
            .derive_selectors(page, &locator)
            .await
            .map_err(|err| ResolveError::failed(id, format!("selector derivation: {err}")))?
            .ok_or_else(|| ResolveError::failed(id, "driver derived no selectors for locator"))?;
        let bundle = self.cache.fill(graph, id, SelectorBundle::from(derived));
        Ok((bundle.clone(), false))
    }

    pub fn cache(&self) -> &SelectorCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubPageDriver;
    use crate::types::DerivedSelectors;
    use ax_graph::{AttributeDiagnostics, RawAxNode, SnapshotMetadata};
    use serde_json::json;

    fn snapshot() -> ProcessedSnapshot {
        let raw: RawAxNode = serde_json::from_value(json!({
            "role": "WebArea",
            "name": "Checkout",
            "children": [ { "role": "button", "name": "Pay", "id": "B1" } ]
        }))
        .unwrap();
        let graph = DomGraph::from_raw(&raw, &AttributeDiagnostics::new());
        ProcessedSnapshot::new(SnapshotMetadata::new("https://shop.test/pay", "Checkout"), graph)
    }

    fn pipe(driver: &Arc<StubPageDriver>) -> ActionNodeResolutionPipe<StubPageDriver> {
        ActionNodeResolutionPipe::new(Arc::clone(driver), ResolutionPolicy::default())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_not_a_failure() {
        let driver = Arc::new(StubPageDriver::new());
        let mut pipe = pipe(&driver);

        let err = pipe
            .forward(&ActionRequest::new("ZZ"), &snapshot(), &PageId::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::NodeNotFound {
                id: NodeId::from("ZZ")
            }
        );
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn driver_fallback_fills_the_cache() {
        let driver = Arc::new(
            StubPageDriver::new()
                .locator("B1", "loc-b1")
                .derived_selectors(
                    "loc-b1",
                    DerivedSelectors {
                        css_selector: Some("#pay".to_string()),
                        ..Default::default()
                    },
                )
                .match_count("main", "#pay", 1),
        );
        let mut pipe = pipe(&driver);

        let action = pipe
            .forward(&ActionRequest::new("B1"), &snapshot(), &PageId::new())
            .await
            .unwrap();

        assert_eq!(
            action.locator.selectors.engine_selector.as_deref(),
            Some("#pay")
        );
        assert_eq!(pipe.cache().len(), 1);
        assert_eq!(driver.locator_lookups(), 1);
    }

    #[tokio::test]
    async fn second_pass_reuses_the_cached_bundle() {
        let driver = Arc::new(
            StubPageDriver::new()
                .locator("B1", "loc-b1")
                .derived_selectors(
                    "loc-b1",
                    DerivedSelectors {
                        css_selector: Some("#pay".to_string()),
                        ..Default::default()
                    },
                )
                .match_count("main", "#pay", 1),
        );
        let mut pipe = pipe(&driver);
        let snapshot = snapshot();
        let page = PageId::new();
        let request = ActionRequest::new("B1").with_description("pay for the cart");

        let first = pipe.forward(&request, &snapshot, &page).await.unwrap();
        let second = pipe.forward(&request, &snapshot, &page).await.unwrap();

        assert_eq!(first.locator.selectors, second.locator.selectors);
        assert_eq!(second.description.as_deref(), Some("pay for the cart"));
        assert_eq!(driver.locator_lookups(), 1);
    }

    #[tokio::test]
    async fn unknown_locator_fails_resolution() {
        let driver = Arc::new(StubPageDriver::new());
        let mut pipe = pipe(&driver);

        let err = pipe
            .forward(&ActionRequest::new("B1"), &snapshot(), &PageId::new())
            .await
            .unwrap_err();

        match err {
            ResolveError::ResolutionFailed { reason, .. } => {
                assert!(reason.contains("knows no locator"));
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
        assert_eq!(driver.locator_lookups(), 1);
    }

    #[tokio::test]
    async fn locator_without_selectors_fails_resolution() {
        let driver = Arc::new(StubPageDriver::new().locator("B1", "loc-b1"));
        let mut pipe = pipe(&driver);

        let err = pipe
            .forward(&ActionRequest::new("B1"), &snapshot(), &PageId::new())
            .await
            .unwrap_err();

        match err {
            ResolveError::ResolutionFailed { reason, .. } => {
                assert!(reason.contains("derived no selectors"));
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_probing_does_not_poison_the_cache() {
        let driver = Arc::new(
            StubPageDriver::new()
                .locator("B1", "loc-b1")
                .derived_selectors(
                    "loc-b1",
                    DerivedSelectors {
                        css_selector: Some("#pay".to_string()),
                        ..Default::default()
                    },
                )
                .match_count("main", "#pay", 2),
        );
        let mut pipe = pipe(&driver);
        let snapshot = snapshot();
        let page = PageId::new();

        let err = pipe
            .forward(&ActionRequest::new("B1"), &snapshot, &page)
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        // The derived bundle stays cached; only the live probe failed.
        assert_eq!(pipe.cache().len(), 1);
        let again = pipe
            .forward(&ActionRequest::new("B1"), &snapshot, &page)
            .await
            .unwrap_err();
        assert!(again.is_retryable());
        assert_eq!(driver.locator_lookups(), 1);
    }
}
