use std::time::Duration;

use async_trait::async_trait;
use sightline_core_types::{FrameId, NodeId, PageId};

use crate::errors::DriverError;
use crate::types::{DerivedSelectors, EngineLocator};

/// Everything resolution needs from the browser layer, and nothing more.
///
/// State probes take an explicit per-call timeout the driver enforces;
/// uniqueness counting does not, because the resolver budgets it with its
/// own timer. Selector strings are interpreted by the driver, this crate
/// never parses them.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Frames currently attached to the page, main frame first.
    async fn frames(&self, page: &PageId) -> Result<Vec<FrameId>, DriverError>;

    /// How many elements the selector matches inside one frame right now.
    async fn count_matches(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
    ) -> Result<usize, DriverError>;

    async fn is_editable(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, DriverError>;

    async fn is_visible(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, DriverError>;

    async fn is_enabled(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, DriverError>;

    /// Value of one attribute of the matched element, `None` when unset.
    async fn attribute(
        &self,
        page: &PageId,
        frame: &FrameId,
        selector: &str,
        name: &str,
        timeout: Duration,
    ) -> Result<Option<String>, DriverError>;

    /// The driver's own handle for a node id, when it can still map it.
    async fn locator_for_node_id(
        &self,
        page: &PageId,
        id: &NodeId,
    ) -> Result<Option<EngineLocator>, DriverError>;

    /// Selector strings for a driver handle, when the element still exists.
    async fn derive_selectors(
        &self,
        page: &PageId,
        locator: &EngineLocator,
    ) -> Result<Option<DerivedSelectors>, DriverError>;
}
