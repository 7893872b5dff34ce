use std::sync::Arc;

use ax_graph::InteractionNode;
use sightline_core_types::{FrameId, NodeId, PageId};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::errors::ResolveError;
use crate::policy::ResolutionPolicy;
use crate::ports::PageDriver;
use crate::types::{ResolvedLocator, SelectorBundle};

/// Turns a selector bundle into one verified, currently-unique element.
pub struct SelectorResolver<D> {
    driver: Arc<D>,
    policy: ResolutionPolicy,
}

struct ElementState {
    is_editable: bool,
    input_type: Option<String>,
}

impl<D: PageDriver> SelectorResolver<D> {
    pub fn new(driver: Arc<D>, policy: ResolutionPolicy) -> Self {
        Self { driver, policy }
    }

    /// Finds the first frame/selector pair matching exactly once, then
    /// verifies the element can actually be acted on right now.
    pub async fn resolve(
        &self,
        page: &PageId,
        node: &InteractionNode<'_>,
        bundle: &SelectorBundle,
    ) -> Result<ResolvedLocator, ResolveError> {
        let (frame, selector) = self.first_unique_match(page, node.id(), bundle).await?;
        let state = self.probe_state(page, &frame, &selector, node.id()).await?;
        Ok(ResolvedLocator {
            role: node.role().clone(),
            is_editable: state.is_editable,
            input_type: state.input_type,
            selectors: bundle.with_primary(&selector),
        })
    }

    /// Strictly sequential probing, bundle order outer, frame order inner.
    /// Exactly one match accepts the pair and stops everything; zero and
    /// many both reject, with no attempt to disambiguate. A driver error
    /// or a blown budget skips that pair only.
    async fn first_unique_match(
        &self,
        page: &PageId,
        id: &NodeId,
        bundle: &SelectorBundle,
    ) -> Result<(FrameId, String), ResolveError> {
        let candidates = bundle.candidates();
        if candidates.is_empty() {
            return Err(ResolveError::failed(
                id,
                "selector bundle has no candidates",
            ));
        }
        let frames = self
            .driver
            .frames(page)
            .await
            .map_err(|err| ResolveError::failed(id, format!("listing frames: {err}")))?;
        let budget = self.policy.uniqueness_probe_timeout();

        for &selector in &candidates {
            for frame in &frames {
                let probe = self.driver.count_matches(page, frame, selector);
                let count = match timeout(budget, probe).await {
                    Ok(Ok(count)) => count,
                    Ok(Err(err)) => {
                        warn!(
                            target: "resolution.resolver",
                            %id,
                            %frame,
                            selector,
                            error = %err,
                            "resolution.probe.error"
                        );
                        continue;
                    }
                    Err(_) => {
                        warn!(
                            target: "resolution.resolver",
                            %id,
                            %frame,
                            selector,
                            budget_ms = budget.as_millis() as u64,
                            "resolution.probe.timeout"
                        );
                        continue;
                    }
                };
                if count == 1 {
                    debug!(
                        target: "resolution.resolver",
                        %id,
                        %frame,
                        selector,
                        "resolution.probe.unique"
                    );
                    return Ok((frame.clone(), selector.to_string()));
                }
                debug!(
                    target: "resolution.resolver",
                    %id,
                    %frame,
                    selector,
                    count,
                    "resolution.probe.not_unique"
                );
            }
        }
        Err(ResolveError::failed(
            id,
            format!(
                "no unique match: {} candidates across {} frames",
                candidates.len(),
                frames.len()
            ),
        ))
    }

    /// Live state checks on the accepted pair. The input type is only
    /// fetched for editable elements; an element that is not visible or
    /// not enabled fails the resolution rather than producing a locator
    /// nothing can act on.
    async fn probe_state(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
        id: &NodeId,
    ) -> Result<ElementState, ResolveError> {
        let budget = self.policy.state_probe_timeout();
        let is_editable = self
            .driver
            .is_editable(page, frame, selector, budget)
            .await
            .map_err(|err| ResolveError::failed(id, format!("editable probe: {err}")))?;
        let input_type = if is_editable {
            self.driver
                .attribute(page, frame, selector, "type", budget)
                .await
                .map_err(|err| ResolveError::failed(id, format!("type probe: {err}")))?
        } else {
            None
        };
        let visible = self
            .driver
            .is_visible(page, frame, selector, budget)
            .await
            .map_err(|err| ResolveError::failed(id, format!("visible probe: {err}")))?;
        let enabled = self
            .driver
            .is_enabled(page, frame, selector, budget)
            .await
            .map_err(|err| ResolveError::failed(id, format!("enabled probe: {err}")))?;
        if !visible || !enabled {
            return Err(ResolveError::failed(
                id,
                format!("element not actionable: visible={visible} enabled={enabled}"),
            ));
        }
        Ok(ElementState {
            is_editable,
            input_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubElementState, StubPageDriver};
    use ax_graph::{AttributeDiagnostics, DomGraph, RawAxNode};
    use serde_json::json;

    fn graph_with_button() -> DomGraph {
        let raw: RawAxNode = serde_json::from_value(json!({
            "role": "WebArea",
            "name": "",
            "children": [ { "role": "button", "name": "Pay", "id": "B1" } ]
        }))
        .unwrap();
        DomGraph::from_raw(&raw, &AttributeDiagnostics::new())
    }

    fn bundle() -> SelectorBundle {
        SelectorBundle {
            engine_selector: Some("engine:B1".to_string()),
            css_selector: Some("#pay".to_string()),
            xpath_selector: Some("//button[@id='pay']".to_string()),
            ..Default::default()
        }
    }

    fn resolver(driver: &Arc<StubPageDriver>) -> SelectorResolver<StubPageDriver> {
        SelectorResolver::new(Arc::clone(driver), ResolutionPolicy::default())
    }

    fn pairs(log: &[(String, String)]) -> Vec<(&str, &str)> {
        log.iter()
            .map(|(frame, selector)| (frame.as_str(), selector.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn first_unique_pair_wins_and_probing_stops() {
        let driver = Arc::new(
            StubPageDriver::new()
                .with_frames(&["main", "checkout"])
                .match_count("main", "engine:B1", 0)
                .match_count("checkout", "engine:B1", 0)
                .match_count("main", "#pay", 1)
                .match_count("checkout", "#pay", 1),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let resolved = resolver(&driver)
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap();

        assert_eq!(resolved.selectors.engine_selector.as_deref(), Some("#pay"));
        assert_eq!(resolved.role.name(), "button");
        assert_eq!(
            pairs(&driver.probe_log()),
            vec![
                ("main", "engine:B1"),
                ("checkout", "engine:B1"),
                ("main", "#pay"),
            ]
        );
    }

    #[tokio::test]
    async fn zero_and_many_both_reject() {
        let driver = Arc::new(
            StubPageDriver::new()
                .match_count("main", "engine:B1", 2)
                .match_count("main", "#pay", 0)
                .match_count("main", "//button[@id='pay']", 3),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let err = resolver(&driver)
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::ResolutionFailed { .. }));
        assert!(err.is_retryable());
        assert_eq!(driver.probe_log().len(), 3);
    }

    #[tokio::test]
    async fn probe_errors_skip_the_pair_only() {
        let driver = Arc::new(
            StubPageDriver::new()
                .with_frames(&["main", "checkout"])
                .failing_probe("main", "engine:B1")
                .match_count("checkout", "engine:B1", 0)
                .match_count("main", "#pay", 1),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let resolved = resolver(&driver)
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap();

        assert_eq!(resolved.selectors.engine_selector.as_deref(), Some("#pay"));
        assert_eq!(driver.probe_log().len(), 3);
    }

    #[tokio::test]
    async fn slow_probes_are_skipped_within_budget() {
        let driver = Arc::new(
            StubPageDriver::new()
                .hanging_probe("main", "engine:B1")
                .match_count("main", "#pay", 1),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let policy = ResolutionPolicy {
            uniqueness_probe_timeout_ms: 20,
            ..Default::default()
        };
        let resolver = SelectorResolver::new(Arc::clone(&driver), policy);
        let resolved = resolver
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap();

        assert_eq!(resolved.selectors.engine_selector.as_deref(), Some("#pay"));
    }

    #[tokio::test]
    async fn editable_elements_get_their_input_type_probed() {
        let driver = Arc::new(
            StubPageDriver::new()
                .match_count("main", "engine:B1", 1)
                .element_state(
                    "main",
                    "engine:B1",
                    StubElementState {
                        editable: true,
                        input_type: Some("email".to_string()),
                        ..Default::default()
                    },
                ),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let resolved = resolver(&driver)
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap();

        assert!(resolved.is_editable);
        assert_eq!(resolved.input_type.as_deref(), Some("email"));
    }

    #[tokio::test]
    async fn non_actionable_elements_fail_resolution() {
        let driver = Arc::new(
            StubPageDriver::new()
                .match_count("main", "engine:B1", 1)
                .element_state(
                    "main",
                    "engine:B1",
                    StubElementState {
                        visible: false,
                        ..Default::default()
                    },
                ),
        );
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let err = resolver(&driver)
            .resolve(&PageId::new(), &node, &bundle())
            .await
            .unwrap_err();

        match err {
            ResolveError::ResolutionFailed { reason, .. } => {
                assert!(reason.contains("not actionable"));
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_bundle_fails_without_touching_the_driver() {
        let driver = Arc::new(StubPageDriver::new());
        let graph = graph_with_button();
        let node = graph.find(&NodeId::from("B1")).unwrap().unwrap();

        let err = resolver(&driver)
            .resolve(&PageId::new(), &node, &SelectorBundle::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::ResolutionFailed { .. }));
        assert!(driver.probe_log().is_empty());
    }
}
