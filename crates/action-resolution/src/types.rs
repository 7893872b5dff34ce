//! Core types for the node resolution pipeline

use ax_graph::Role;
use serde::{Deserialize, Serialize};
use sightline_core_types::NodeId;

/// Opaque element handle in the driver's own addressing scheme. Only the
/// driver that produced it can interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLocator(pub String);

/// Selector set the driver derived for one element, before any frame or
/// shadow-root context is attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedSelectors {
    pub engine_selector: Option<String>,
    pub css_selector: Option<String>,
    pub xpath_selector: Option<String>,
}

/// The selector candidates for one node, in fixed probe order, plus the
/// frame/shadow context needed to use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorBundle {
    /// Driver-native selector. When set it is the primary candidate.
    pub engine_selector: Option<String>,
    pub css_selector: Option<String>,
    pub xpath_selector: Option<String>,
    pub in_iframe: bool,
    pub in_shadow_root: bool,
    /// Selectors of enclosing iframes, outermost first.
    pub iframe_parent_selectors: Vec<String>,
}

impl SelectorBundle {
    /// Candidates in probe order: driver-native first, then structural,
    /// then path-based. The resolver tries them exactly in this order and
    /// never reorders them.
    pub fn candidates(&self) -> Vec<&str> {
        [
            self.engine_selector.as_deref(),
            self.css_selector.as_deref(),
            self.xpath_selector.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|selector| !selector.is_empty())
        .collect()
    }

    /// Copy of the bundle with the accepted selector promoted to primary.
    pub fn with_primary(&self, selector: &str) -> Self {
        let mut bundle = self.clone();
        bundle.engine_selector = Some(selector.to_string());
        bundle
    }
}

impl From<DerivedSelectors> for SelectorBundle {
    fn from(derived: DerivedSelectors) -> Self {
        Self {
            engine_selector: derived.engine_selector,
            css_selector: derived.css_selector,
            xpath_selector: derived.xpath_selector,
            in_iframe: false,
            in_shadow_root: false,
            iframe_parent_selectors: Vec::new(),
        }
    }
}

/// A node resolved to a unique, live element: the probed state plus the
/// bundle with the accepted selector marked primary.
#[derive(Debug, Clone)]
pub struct ResolvedLocator {
    pub role: Role,
    pub is_editable: bool,
    /// Input `type` attribute, probed only when the element is editable.
    pub input_type: Option<String>,
    pub selectors: SelectorBundle,
}

/// What the caller wants resolved: a node id picked from the graph, with
/// the caller's own description carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub id: NodeId,
    pub description: Option<String>,
}

impl ActionRequest {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A request the pipeline finished: same id and description, plus the
/// verified locator the automation layer can act on.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    pub id: NodeId,
    pub description: Option<String>,
    pub locator: ResolvedLocator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order_is_engine_css_xpath() {
        let bundle = SelectorBundle {
            engine_selector: Some("internal:B1".to_string()),
            css_selector: Some("#pay".to_string()),
            xpath_selector: Some("//button[1]".to_string()),
            ..Default::default()
        };
        assert_eq!(bundle.candidates(), vec!["internal:B1", "#pay", "//button[1]"]);
    }

    #[test]
    fn empty_and_missing_selectors_are_skipped() {
        let bundle = SelectorBundle {
            engine_selector: Some(String::new()),
            css_selector: Some("#pay".to_string()),
            xpath_selector: None,
            ..Default::default()
        };
        assert_eq!(bundle.candidates(), vec!["#pay"]);
    }

    #[test]
    fn with_primary_promotes_without_reordering_the_rest() {
        let bundle = SelectorBundle {
            css_selector: Some("#pay".to_string()),
            xpath_selector: Some("//button[1]".to_string()),
            ..Default::default()
        };
        let promoted = bundle.with_primary("//button[1]");
        assert_eq!(promoted.engine_selector.as_deref(), Some("//button[1]"));
        assert_eq!(promoted.css_selector.as_deref(), Some("#pay"));
        assert_eq!(
            promoted.candidates(),
            vec!["//button[1]", "#pay", "//button[1]"]
        );
    }
}
