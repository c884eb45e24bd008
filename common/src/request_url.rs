//! Composition of the option-loading request URL.

use url::form_urlencoded;

use crate::query_params::ParameterSet;

/// Marker sent for an empty parameter that asks for "no related object".
pub const NULL_MARKER: &str = "null";

/// Build the GET URL for one load.
///
/// Parameters come out in the set's insertion order, followed by `brief=true`
/// and, for a non-empty search, `q=<search>`. Empty entries are dropped unless
/// they carry `include_null`.
pub fn compose_request_url(endpoint_url: &str, params: &ParameterSet, search: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (_field_name, entry) in params.iter() {
        if entry.query_value.is_empty() {
            if entry.include_null {
                query.append_pair(&entry.query_param, NULL_MARKER);
            }
            continue;
        }
        for value in &entry.query_value {
            query.append_pair(&entry.query_param, &value.to_string());
        }
    }
    query.append_pair("brief", "true");
    if !search.is_empty() {
        query.append_pair("q", search);
    }
    let query = query.finish();

    let separator = match endpoint_url.split_once('?') {
        Some((_, existing)) if !existing.is_empty() && !existing.ends_with('&') => "&",
        Some(_) => "",
        None => "?",
    };
    format!("{endpoint_url}{separator}{query}")
}
