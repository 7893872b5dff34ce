use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys in the raw payload that are capture bookkeeping, not element
/// attributes. They never reach the attribute normalizer.
const BOOKKEEPING_KEYS: &[&str] = &[
    "children",
    "children_roles_count",
    "nb_pruned_children",
    "group_role",
    "group_roles",
    "markdown",
    "id",
    "path",
    "role",
    "name",
    "level",
    "only_text_roles",
    "orientation",
    "eid",
    "method",
    "url",
];

/// One node of the raw accessibility snapshot, as the capture layer emits
/// it. The open-ended attribute vocabulary lands in `extra`; everything
/// typed here is contract.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawAxNode {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<RawAxNode>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub in_viewport: Option<bool>,
    #[serde(default)]
    pub is_interactive: Option<bool>,
    #[serde(default)]
    pub is_top_element: Option<bool>,
    #[serde(default)]
    pub shadow_root: Option<bool>,
    #[serde(default)]
    pub highlight_index: Option<i64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawAxNode {
    /// The attribute-like subset of `extra`: whatever is left after the
    /// bookkeeping keys are removed.
    pub fn attribute_keys(&self) -> BTreeMap<String, Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !BOOKKEEPING_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_payload_with_open_vocabulary() {
        let node: RawAxNode = serde_json::from_value(json!({
            "role": "button",
            "name": "Send",
            "id": "B3",
            "in_viewport": true,
            "required": "true",
            "path": "0.1.2",
            "children": []
        }))
        .unwrap();

        assert_eq!(node.role, "button");
        assert_eq!(node.id.as_deref(), Some("B3"));
        assert_eq!(node.in_viewport, Some(true));
        assert!(node.extra.contains_key("required"));
        assert!(node.extra.contains_key("path"));
    }

    #[test]
    fn attribute_keys_strips_bookkeeping() {
        let node: RawAxNode = serde_json::from_value(json!({
            "role": "textbox",
            "name": "Email",
            "path": "0.4",
            "level": 2,
            "url": "https://example.com",
            "placeholder": "you@example.com"
        }))
        .unwrap();

        let attrs = node.attribute_keys();
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains_key("placeholder"));
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let node: RawAxNode = serde_json::from_value(json!({ "role": "generic" })).unwrap();
        assert_eq!(node.name, "");
        assert!(node.children.is_empty());
        assert_eq!(node.id, None);
        assert_eq!(node.highlight_index, None);
    }
}
