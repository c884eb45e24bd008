//! Attributes a server-rendered `<select class="api-select">` carries.

use common::declarations::{DATA_FILTER_FIELDS, DATA_STATIC_PARAMS};

pub const DATA_URL: &str = "data-url";
pub const DISABLED_INDICATOR: &str = "disabled-indicator";
pub const MULTIPLE: &str = "multiple";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectAttributes {
    /// Form field name of the select.
    pub name: String,
    pub data_url: Option<String>,
    pub static_params: Option<String>,
    pub filter_fields: Option<String>,
    pub disabled_indicator: Option<String>,
    pub multiple: bool,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

impl SelectAttributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Read the attribute contract from raw `(attribute, value)` pairs; unknown attributes are ignored.
    pub fn from_attributes<'a>(name: impl Into<String>, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut result = Self::new(name);
        for (attribute, value) in attributes {
            match attribute {
                DATA_URL => result.data_url = non_blank(value),
                DATA_STATIC_PARAMS => result.static_params = non_blank(value),
                DATA_FILTER_FIELDS => result.filter_fields = non_blank(value),
                DISABLED_INDICATOR => result.disabled_indicator = non_blank(value),
                MULTIPLE => result.multiple = true,
                _ => {}
            }
        }
        result
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = non_blank(&url.into());
        self
    }

    pub fn with_static_params(mut self, raw_json: impl Into<String>) -> Self {
        self.static_params = non_blank(&raw_json.into());
        self
    }

    pub fn with_filter_fields(mut self, raw_json: impl Into<String>) -> Self {
        self.filter_fields = non_blank(&raw_json.into());
        self
    }

    pub fn with_disabled_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.disabled_indicator = non_blank(&indicator.into());
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }
}
