use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sightline_core_types::{FrameId, NodeId, PageId};
use tokio::time::sleep;

use crate::errors::DriverError;
use crate::ports::PageDriver;
use crate::types::{DerivedSelectors, EngineLocator};

/// Scripted [`PageDriver`] with every answer configured up front. Probes
/// and locator lookups are logged so tests can assert call order and
/// call counts, not just outcomes.
#[derive(Debug, Default)]
pub struct StubPageDriver {
    frames: Vec<FrameId>,
    match_counts: HashMap<(String, String), usize>,
    failing_probes: HashSet<(String, String)>,
    hanging_probes: HashSet<(String, String)>,
    states: HashMap<(String, String), StubElementState>,
    locators: HashMap<String, EngineLocator>,
    derived: HashMap<String, DerivedSelectors>,
    probe_log: Mutex<Vec<(String, String)>>,
    locator_lookups: Mutex<Vec<String>>,
}

/// Element answers for one frame/selector pair. Unscripted pairs get the
/// default: visible, enabled, not editable.
#[derive(Clone, Debug)]
pub struct StubElementState {
    pub editable: bool,
    pub visible: bool,
    pub enabled: bool,
    pub input_type: Option<String>,
}

impl Default for StubElementState {
    fn default() -> Self {
        Self {
            editable: false,
            visible: true,
            enabled: true,
            input_type: None,
        }
    }
}

fn key(frame: &str, selector: &str) -> (String, String) {
    (frame.to_string(), selector.to_string())
}

impl StubPageDriver {
    /// Single frame named "main", no matches anywhere.
    pub fn new() -> Self {
        Self {
            frames: vec![FrameId("main".to_string())],
            ..Self::default()
        }
    }

    pub fn with_frames(mut self, names: &[&str]) -> Self {
        self.frames = names.iter().map(|name| FrameId(name.to_string())).collect();
        self
    }

    pub fn match_count(mut self, frame: &str, selector: &str, count: usize) -> Self {
        self.match_counts.insert(key(frame, selector), count);
        self
    }

    /// Scripts a transport error for one frame/selector pair.
    pub fn failing_probe(mut self, frame: &str, selector: &str) -> Self {
        self.failing_probes.insert(key(frame, selector));
        self
    }

    /// Scripts a count probe that outlives any sane budget.
    pub fn hanging_probe(mut self, frame: &str, selector: &str) -> Self {
        self.hanging_probes.insert(key(frame, selector));
        self
    }

    pub fn element_state(
        mut self,
        frame: &str,
        selector: &str,
        state: StubElementState,
    ) -> Self {
        self.states.insert(key(frame, selector), state);
        self
    }

    pub fn locator(mut self, id: &str, token: &str) -> Self {
        self.locators
            .insert(id.to_string(), EngineLocator(token.to_string()));
        self
    }

    pub fn derived_selectors(mut self, token: &str, derived: DerivedSelectors) -> Self {
        self.derived.insert(token.to_string(), derived);
        self
    }

    /// Every `count_matches` call so far, as (frame, selector) pairs.
    pub fn probe_log(&self) -> Vec<(String, String)> {
        self.probe_log.lock().clone()
    }

    pub fn locator_lookups(&self) -> usize {
        self.locator_lookups.lock().len()
    }

    fn state(&self, frame: &FrameId, selector: &str) -> StubElementState {
        self.states
            .get(&key(&frame.0, selector))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageDriver for StubPageDriver {
    async fn frames(&self, _page: &PageId) -> Result<Vec<FrameId>, DriverError> {
        Ok(self.frames.clone())
    }

    async fn count_matches(
        &self,
        _page: &PageId,
        frame: &FrameId,
        selector: &str,
    ) -> Result<usize, DriverError> {
        let key = key(&frame.0, selector);
        self.probe_log.lock().push(key.clone());
        if self.hanging_probes.contains(&key) {
            sleep(Duration::from_secs(5)).await;
        }
        if self.failing_probes.contains(&key) {
            return Err(DriverError::Transport(format!(
                "scripted probe failure for {selector}"
            )));
        }
        Ok(self.match_counts.get(&key).copied().unwrap_or(0))
    }

    async fn is_editable(
        &self,
        _page: &PageId,
        frame: &FrameId,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, DriverError> {
        Ok(self.state(frame, selector).editable)
    }

    async fn is_visible(
        &self,
        _page: &PageId,
        frame: &FrameId,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, DriverError> {
        Ok(self.state(frame, selector).visible)
    }

    async fn is_enabled(
        &self,
        _page: &PageId,
        frame: &FrameId,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, DriverError> {
        Ok(self.state(frame, selector).enabled)
    }

    async fn attribute(
        &self,
        _page: &PageId,
        frame: &FrameId,
        selector: &str,
        name: &str,
        _timeout: Duration,
    ) -> Result<Option<String>, DriverError> {
        if name == "type" {
            Ok(self.state(frame, selector).input_type.clone())
        } else {
            Ok(None)
        }
    }

    async fn locator_for_node_id(
        &self,
        _page: &PageId,
        id: &NodeId,
    ) -> Result<Option<EngineLocator>, DriverError> {
        self.locator_lookups.lock().push(id.0.clone());
        Ok(self.locators.get(&id.0).cloned())
    }

    async fn derive_selectors(
        &self,
        _page: &PageId,
        locator: &EngineLocator,
    ) -> Result<Option<DerivedSelectors>, DriverError> {
        Ok(self.derived.get(&locator.0).cloned())
    }
}
