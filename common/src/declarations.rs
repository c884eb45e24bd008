//! Parsing of the server-declared parameter payloads carried on select elements.

use serde::Deserialize;
use thiserror::Error;

use crate::query_params::{ParameterEntry, ParameterSet, QueryValue};

pub const DATA_STATIC_PARAMS: &str = "data-static-params";
pub const DATA_FILTER_FIELDS: &str = "data-filter-fields";

#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("`{attribute}` is improperly formatted: '{raw}'")]
    MalformedDeclaration {
        attribute: &'static str,
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("query parameter `{query_param}` of field `{field_name}` is already sent by field `{existing_field}`")]
    DuplicateQueryParam {
        query_param: String,
        field_name: String,
        existing_field: String,
    },
}

/// A default value as written by the server: one scalar or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeclaredValue {
    Many(Vec<Option<QueryValue>>),
    One(QueryValue),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterFieldDeclaration {
    query_param: String,
    field_name: String,
    #[serde(default)]
    default_value: Option<DeclaredValue>,
    #[serde(default)]
    include_null: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaticParamDeclaration {
    query_param: String,
    #[serde(default)]
    query_value: Option<DeclaredValue>,
}

/// Filter-field defaults: the server's empty markers mean "no value yet".
fn normalize(value: Option<DeclaredValue>) -> Vec<QueryValue> {
    match value {
        None => vec![],
        Some(DeclaredValue::One(v)) if v.is_empty_marker() => vec![],
        Some(DeclaredValue::One(v)) => vec![v],
        Some(DeclaredValue::Many(values)) => values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty_marker())
            .collect(),
    }
}

/// Static values are sent exactly as declared, so `"null"` stays a literal filter.
fn verbatim(value: Option<DeclaredValue>) -> Vec<QueryValue> {
    match value {
        None => vec![],
        Some(DeclaredValue::One(v)) => vec![v],
        Some(DeclaredValue::Many(values)) => values.into_iter().flatten().collect(),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(attribute: &'static str, raw: &str) -> Result<Vec<T>, DeclarationError> {
    serde_json::from_str::<Vec<T>>(raw).map_err(|source| DeclarationError::MalformedDeclaration {
        attribute,
        raw: raw.to_string(),
        source,
    })
}

impl ParameterSet {
    /// Populate from a `data-filter-fields` payload:
    /// `[{queryParam, fieldName, defaultValue, includeNull}, ...]`.
    ///
    /// Blank input is "nothing declared". On error the set is left as it was.
    pub fn load_from_declaration(&mut self, raw_json: &str) -> Result<(), DeclarationError> {
        if raw_json.trim().is_empty() {
            return Ok(());
        }
        let declared = parse::<FilterFieldDeclaration>(DATA_FILTER_FIELDS, raw_json)?;
        let mut staged = self.clone();
        for field in declared {
            let entry = ParameterEntry::new(field.query_param, normalize(field.default_value))
                .with_include_null(field.include_null.unwrap_or(false));
            staged.insert(field.field_name, entry)?;
        }
        *self = staged;
        Ok(())
    }

    /// Populate from a `data-static-params` payload: `[{queryParam, queryValue}, ...]`.
    ///
    /// Static entries are keyed by their own query parameter.
    pub fn load_static_declaration(&mut self, raw_json: &str) -> Result<(), DeclarationError> {
        if raw_json.trim().is_empty() {
            return Ok(());
        }
        let declared = parse::<StaticParamDeclaration>(DATA_STATIC_PARAMS, raw_json)?;
        let mut staged = self.clone();
        for param in declared {
            let entry = ParameterEntry::new(param.query_param.clone(), verbatim(param.query_value));
            staged.insert(param.query_param, entry)?;
        }
        *self = staged;
        Ok(())
    }
}
