//! Options returned by the REST API in brief mode, and how they are labelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query_params::QueryValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOption {
    pub id: QueryValue,
    pub display: String,
    /// Nesting level for tree models (regions, locations, ...).
    #[serde(default, alias = "_depth", skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// List envelope of the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResultsResponse {
    pub results: Vec<ApiOption>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ApiOption {
    pub fn new(id: impl Into<QueryValue>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            depth: None,
            parent: None,
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Name of the parent object, whether the API sent a plain string or a nested object.
    pub fn parent_label(&self) -> Option<String> {
        match self.parent.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(obj) => obj
                .get("display")
                .or_else(|| obj.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    pub fn description_label(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// `─` repeated once per nesting level, followed by a space.
    pub fn depth_prefix(&self) -> String {
        match self.depth {
            Some(depth) if depth > 0 => format!("{} ", "─".repeat(depth as usize)),
            _ => String::new(),
        }
    }

    /// Label shown in the dropdown list.
    pub fn option_label(&self) -> String {
        let mut label = format!("{}{}", self.depth_prefix(), self.display);
        if let Some(parent) = self.parent_label() {
            label.push(' ');
            label.push_str(&parent);
        }
        label
    }

    /// Label shown for a selected item.
    pub fn item_label(&self) -> String {
        match self.parent_label() {
            Some(parent) => format!("{} > {}", parent, self.display),
            None => self.display.clone(),
        }
    }

    /// Whether the field named by a select's `disabled-indicator` is set on this option.
    pub fn is_disabled(&self, indicator: &str) -> bool {
        match indicator {
            "depth" => self.depth.is_some_and(|d| d > 0),
            "parent" => self.parent.as_ref().is_some_and(is_truthy),
            "description" => self.description_label().is_some(),
            _ => self.extra.get(indicator).is_some_and(is_truthy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_brief_results_with_extra_fields() {
        let response: ApiResultsResponse = serde_json::from_str(
            r#"{"count": 2, "next": null, "previous": null, "results": [
                {"id": 1, "url": "http://x/api/dcim/sites/1/", "display": "DC1", "name": "DC1", "slug": "dc1"},
                {"id": 4, "display": "Row A", "_depth": 2, "parent": {"id": 3, "display": "Floor 1"}, "occupied": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.count, Some(2));
        let [dc1, row] = &response.results[..] else { panic!("expected two results") };
        assert_eq!(dc1.id, QueryValue::Int(1));
        assert_eq!(dc1.extra.get("slug"), Some(&Value::from("dc1")));
        assert_eq!(row.depth, Some(2));
        assert_eq!(row.option_label(), "── Row A Floor 1");
        assert_eq!(row.item_label(), "Floor 1 > Row A");
        assert!(row.is_disabled("occupied"));
        assert!(!dc1.is_disabled("occupied"));
    }

    #[test]
    fn plain_options_label_as_display() {
        let mut option = ApiOption::new(7, "Edge");
        option.description = Some(String::new());
        assert_eq!(option.option_label(), "Edge");
        assert_eq!(option.item_label(), "Edge");
        assert_eq!(option.description_label(), None);

        option.parent = Some(Value::from("Site A"));
        assert_eq!(option.item_label(), "Site A > Edge");
    }

    #[test]
    fn falsy_indicator_values_do_not_disable() {
        let mut option = ApiOption::new(1, "x");
        for value in [Value::Null, Value::from(false), Value::from(0), Value::from("")] {
            option.extra.insert("_occupied".into(), value);
            assert!(!option.is_disabled("_occupied"));
        }
        option.extra.insert("_occupied".into(), Value::from(1));
        assert!(option.is_disabled("_occupied"));
    }
}
