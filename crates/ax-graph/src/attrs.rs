use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::diagnostics::AttributeDiagnostics;

/// Keys dropped on sight after normalization. Mostly engine bookkeeping and
/// framework noise that carries no signal for perception.
const IGNORED_KEYS: &[&str] = &[
    "browser_user_highlight_id",
    "class",
    "style",
    "id",
    "data_jsl10n",
    "keyshortcuts",
    "for",
    "rel",
    "ng_non_bindable",
    "c_wiz",
    "ssk",
    "soy_skip",
    "key",
    "method",
    "eid",
    "view",
    "pivot",
];

/// Hidden from the rendered attribute map unless a caller opts them in.
const DISABLED_DISPLAY_ATTRS: &[&str] = &[
    "tag_name",
    "class_name",
    "width",
    "height",
    "size",
    "lang",
    "dir",
    "action",
    "role",
    "aria_label",
    "name",
];

/// Typed attribute record for one node. Every field is optional: an absent
/// input key stays `None`, it is never defaulted to a falsy value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AttributeRecord {
    // State attributes
    pub modal: Option<bool>,
    pub required: Option<bool>,
    pub visible: Option<bool>,
    pub selected: Option<bool>,
    pub checked: Option<bool>,
    pub enabled: Option<bool>,
    pub focused: Option<bool>,
    pub disabled: Option<bool>,
    pub pressed: Option<bool>,
    pub r#type: Option<String>,

    // Value attributes
    pub value: Option<String>,
    pub valuemin: Option<String>,
    pub valuemax: Option<String>,
    pub description: Option<String>,
    pub autocomplete: Option<String>,
    pub haspopup: Option<bool>,
    pub accesskey: Option<String>,
    pub autofocus: Option<bool>,
    pub tabindex: Option<i64>,
    pub multiselectable: Option<bool>,

    // HTML element attributes
    pub tag_name: Option<String>,
    pub class_name: Option<String>,

    // Resource attributes
    pub href: Option<String>,
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub target: Option<String>,
    pub ping: Option<String>,
    pub data_src: Option<String>,
    pub data_srcset: Option<String>,

    // Text attributes
    pub placeholder: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
    pub name: Option<String>,
    pub autocorrect: Option<String>,
    pub autocapitalize: Option<String>,
    pub spellcheck: Option<bool>,
    pub maxlength: Option<i64>,

    // Layout attributes
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub size: Option<i64>,
    pub rows: Option<i64>,

    // Internationalization attributes
    pub lang: Option<String>,
    pub dir: Option<String>,

    // Aria attributes
    pub action: Option<String>,
    pub role: Option<String>,
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    pub aria_describedby: Option<String>,
    pub aria_hidden: Option<bool>,
    pub aria_expanded: Option<bool>,
    pub aria_controls: Option<String>,
    pub aria_haspopup: Option<bool>,
    pub aria_current: Option<String>,
    pub aria_autocomplete: Option<String>,
    pub aria_selected: Option<bool>,
    pub aria_modal: Option<bool>,
    pub aria_disabled: Option<bool>,
    pub aria_valuenow: Option<i64>,
    pub aria_live: Option<String>,
    pub aria_atomic: Option<bool>,
    pub aria_valuemax: Option<i64>,
    pub aria_valuemin: Option<i64>,
    pub aria_level: Option<i64>,
    pub aria_owns: Option<String>,
    pub aria_multiselectable: Option<bool>,
    pub aria_colindex: Option<i64>,
    pub aria_colspan: Option<i64>,
    pub aria_rowindex: Option<i64>,
    pub aria_rowspan: Option<i64>,
    pub aria_description: Option<String>,
    pub aria_activedescendant: Option<String>,
    pub hidden: Option<bool>,
    pub expanded: Option<bool>,
}

impl AttributeRecord {
    /// Normalizes a raw attribute map into a typed record.
    ///
    /// Steps, in order: `class` is renamed to `class_name`; keys starting
    /// with `data-`, `js`, `__` or `g-` are dropped; remaining hyphens
    /// become underscores; keys on the ignore list are dropped silently;
    /// known keys are coerced into their typed field; everything left is
    /// buffered in `diagnostics` instead of being logged per occurrence.
    pub fn from_raw_keys(
        raw: &BTreeMap<String, Value>,
        diagnostics: &AttributeDiagnostics,
    ) -> Self {
        let mut record = Self::default();
        for (raw_key, value) in raw {
            let key = if raw_key == "class" {
                "class_name".to_string()
            } else if raw_key.starts_with("data-")
                || raw_key.starts_with("js")
                || raw_key.starts_with("__")
                || raw_key.starts_with("g-")
            {
                continue;
            } else {
                raw_key.replace('-', "_")
            };

            if IGNORED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if !record.set_known(&key, value) {
                diagnostics.record(&key, &value_sample(value));
            }
        }
        record
    }

    /// Set fields as a display-ordered map, for collaborators that render
    /// nodes into text. `include` opts specific keys in (and is then the
    /// only filter); without it the default-disabled display set is hidden.
    /// String values longer than `max_len_per_attribute` characters are cut
    /// and marked with an ellipsis.
    pub fn relevant_attributes(
        &self,
        include: Option<&[&str]>,
        max_len_per_attribute: Option<usize>,
    ) -> BTreeMap<String, Value> {
        let object = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => return BTreeMap::new(),
        };

        let mut attrs = BTreeMap::new();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            let passes = match include {
                Some(keys) => keys.contains(&key.as_str()),
                None => !DISABLED_DISPLAY_ATTRS.contains(&key.as_str()),
            };
            if !passes {
                continue;
            }
            let value = match (max_len_per_attribute, value) {
                (Some(max_len), Value::String(text)) if text.chars().count() > max_len => {
                    let cut: String = text.chars().take(max_len).collect();
                    Value::String(format!("{cut}..."))
                }
                (_, value) => value,
            };
            attrs.insert(key, value);
        }
        attrs
    }

    fn set_known(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "modal" => self.modal = coerce_bool(key, value),
            "required" => self.required = coerce_bool(key, value),
            "visible" => self.visible = coerce_bool(key, value),
            "selected" => self.selected = coerce_bool(key, value),
            "checked" => self.checked = coerce_bool(key, value),
            "enabled" => self.enabled = coerce_bool(key, value),
            "focused" => self.focused = coerce_bool(key, value),
            "disabled" => self.disabled = coerce_bool(key, value),
            "pressed" => self.pressed = coerce_bool(key, value),
            "type" => self.r#type = coerce_string(key, value),

            "value" => self.value = coerce_string(key, value),
            "valuemin" => self.valuemin = coerce_string(key, value),
            "valuemax" => self.valuemax = coerce_string(key, value),
            "description" => self.description = coerce_string(key, value),
            "autocomplete" => self.autocomplete = coerce_string(key, value),
            "haspopup" => self.haspopup = coerce_bool(key, value),
            "accesskey" => self.accesskey = coerce_string(key, value),
            "autofocus" => self.autofocus = coerce_bool(key, value),
            "tabindex" => self.tabindex = coerce_int(key, value),
            "multiselectable" => self.multiselectable = coerce_bool(key, value),

            "tag_name" => self.tag_name = coerce_string(key, value),
            "class_name" => self.class_name = coerce_string(key, value),

            "href" => self.href = coerce_string(key, value),
            "src" => self.src = coerce_string(key, value),
            "srcset" => self.srcset = coerce_string(key, value),
            "target" => self.target = coerce_string(key, value),
            "ping" => self.ping = coerce_string(key, value),
            "data_src" => self.data_src = coerce_string(key, value),
            "data_srcset" => self.data_srcset = coerce_string(key, value),

            "placeholder" => self.placeholder = coerce_string(key, value),
            "title" => self.title = coerce_string(key, value),
            "alt" => self.alt = coerce_string(key, value),
            "name" => self.name = coerce_string(key, value),
            "autocorrect" => self.autocorrect = coerce_string(key, value),
            "autocapitalize" => self.autocapitalize = coerce_string(key, value),
            "spellcheck" => self.spellcheck = coerce_bool(key, value),
            "maxlength" => self.maxlength = coerce_int(key, value),

            "width" => self.width = coerce_int(key, value),
            "height" => self.height = coerce_int(key, value),
            "size" => self.size = coerce_int(key, value),
            "rows" => self.rows = coerce_int(key, value),

            "lang" => self.lang = coerce_string(key, value),
            "dir" => self.dir = coerce_string(key, value),

            "action" => self.action = coerce_string(key, value),
            "role" => self.role = coerce_string(key, value),
            "aria_label" => self.aria_label = coerce_string(key, value),
            "aria_labelledby" => self.aria_labelledby = coerce_string(key, value),
            "aria_describedby" => self.aria_describedby = coerce_string(key, value),
            "aria_hidden" => self.aria_hidden = coerce_bool(key, value),
            "aria_expanded" => self.aria_expanded = coerce_bool(key, value),
            "aria_controls" => self.aria_controls = coerce_string(key, value),
            "aria_haspopup" => self.aria_haspopup = coerce_bool(key, value),
            "aria_current" => self.aria_current = coerce_string(key, value),
            "aria_autocomplete" => self.aria_autocomplete = coerce_string(key, value),
            "aria_selected" => self.aria_selected = coerce_bool(key, value),
            "aria_modal" => self.aria_modal = coerce_bool(key, value),
            "aria_disabled" => self.aria_disabled = coerce_bool(key, value),
            "aria_valuenow" => self.aria_valuenow = coerce_int(key, value),
            "aria_live" => self.aria_live = coerce_string(key, value),
            "aria_atomic" => self.aria_atomic = coerce_bool(key, value),
            "aria_valuemax" => self.aria_valuemax = coerce_int(key, value),
            "aria_valuemin" => self.aria_valuemin = coerce_int(key, value),
            "aria_level" => self.aria_level = coerce_int(key, value),
            "aria_owns" => self.aria_owns = coerce_string(key, value),
            "aria_multiselectable" => self.aria_multiselectable = coerce_bool(key, value),
            "aria_colindex" => self.aria_colindex = coerce_int(key, value),
            "aria_colspan" => self.aria_colspan = coerce_int(key, value),
            "aria_rowindex" => self.aria_rowindex = coerce_int(key, value),
            "aria_rowspan" => self.aria_rowspan = coerce_int(key, value),
            "aria_description" => self.aria_description = coerce_string(key, value),
            "aria_activedescendant" => self.aria_activedescendant = coerce_string(key, value),
            "hidden" => self.hidden = coerce_bool(key, value),
            "expanded" => self.expanded = coerce_bool(key, value),
            _ => return false,
        }
        true
    }
}

fn coerce_bool(key: &str, value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => drop_malformed(key, value),
        },
        _ => drop_malformed(key, value),
    }
}

fn coerce_int(key: &str, value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| drop_malformed(key, value)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| drop_malformed(key, value)),
        _ => drop_malformed(key, value),
    }
}

fn coerce_string(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => drop_malformed(key, value),
    }
}

/// A known key with a value the field type cannot hold. The field stays
/// unset; this is a different signal than an unknown key and is not
/// buffered with them.
fn drop_malformed<T>(key: &str, value: &Value) -> Option<T> {
    debug!(
        target: "ax_graph.attrs",
        key,
        value = %value,
        "attributes.value_coercion_failed"
    );
    None
}

fn value_sample(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn renames_class_and_underscores_hyphens() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[
                ("class", json!("btn primary")),
                ("aria-label", json!("Send")),
                ("tag-name", json!("button")),
            ]),
            &diag,
        );
        assert_eq!(record.class_name.as_deref(), Some("btn primary"));
        assert_eq!(record.aria_label.as_deref(), Some("Send"));
        assert_eq!(record.tag_name.as_deref(), Some("button"));
        assert!(diag.is_empty());
    }

    #[test]
    fn drops_framework_prefixes_without_buffering() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[
                ("data-testid", json!("send")),
                ("jsaction", json!("click:trigger")),
                ("__reactid", json!("17")),
                ("g-toggle", json!("on")),
            ]),
            &diag,
        );
        assert_eq!(record, AttributeRecord::default());
        assert!(diag.is_empty());
    }

    #[test]
    fn ignore_list_is_silent() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[("style", json!("color: red")), ("keyshortcuts", json!("Ctrl+K"))]),
            &diag,
        );
        assert_eq!(record, AttributeRecord::default());
        assert!(diag.is_empty());
    }

    #[test]
    fn unknown_keys_are_buffered_not_set() {
        let diag = AttributeDiagnostics::new();
        let record =
            AttributeRecord::from_raw_keys(&raw(&[("x-custom-flag", json!("on"))]), &diag);
        assert_eq!(record, AttributeRecord::default());
        let report = diag.flush().expect("unknown key was buffered");
        assert_eq!(report.samples["x_custom_flag"], vec!["on".to_string()]);
    }

    #[test]
    fn coerces_stringly_typed_values() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[
                ("hidden", json!("true")),
                ("disabled", json!(false)),
                ("tabindex", json!("-1")),
                ("width", json!(32)),
                ("value", json!(42)),
            ]),
            &diag,
        );
        assert_eq!(record.hidden, Some(true));
        assert_eq!(record.disabled, Some(false));
        assert_eq!(record.tabindex, Some(-1));
        assert_eq!(record.width, Some(32));
        assert_eq!(record.value.as_deref(), Some("42"));
    }

    #[test]
    fn malformed_values_leave_the_field_unset() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[("tabindex", json!([])), ("hidden", json!("maybe"))]),
            &diag,
        );
        assert_eq!(record.tabindex, None);
        assert_eq!(record.hidden, None);
        assert!(diag.is_empty());
    }

    #[test]
    fn relevant_attributes_hides_display_disabled_keys() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[
                ("tag_name", json!("a")),
                ("href", json!("https://example.com/docs")),
                ("aria_label", json!("Documentation")),
            ]),
            &diag,
        );

        let attrs = record.relevant_attributes(None, None);
        assert!(attrs.contains_key("href"));
        assert!(!attrs.contains_key("tag_name"));
        assert!(!attrs.contains_key("aria_label"));

        let attrs = record.relevant_attributes(Some(&["aria_label"]), None);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["aria_label"], json!("Documentation"));
    }

    #[test]
    fn relevant_attributes_truncates_with_ellipsis() {
        let diag = AttributeDiagnostics::new();
        let record = AttributeRecord::from_raw_keys(
            &raw(&[("placeholder", json!("search the entire catalog"))]),
            &diag,
        );
        let attrs = record.relevant_attributes(None, Some(6));
        assert_eq!(attrs["placeholder"], json!("search..."));
    }
}
