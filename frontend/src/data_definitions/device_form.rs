//! Select elements of the device edit form, as the server would render them.

use api_select::{ApiClientConfig, SelectAttributes};

pub fn device_form_elements() -> Vec<SelectAttributes> {
    vec![
        SelectAttributes::from_attributes("region", [("data-url", "/api/dcim/regions/")]),
        SelectAttributes::from_attributes(
            "site",
            [
                ("data-url", "/api/dcim/sites/"),
                ("data-filter-fields", r#"[{"fieldName": "region", "queryParam": "region_id"}]"#),
            ],
        ),
        SelectAttributes::from_attributes(
            "rack",
            [
                ("data-url", "/api/dcim/racks/"),
                ("data-static-params", r#"[{"queryParam": "status", "queryValue": ["active", "planned"]}]"#),
                ("data-filter-fields", r#"[{"fieldName": "site", "queryParam": "site_id"}]"#),
            ],
        ),
        SelectAttributes::from_attributes(
            "tenant",
            [
                ("data-url", "/api/tenancy/tenants/"),
                ("data-filter-fields", r#"[{"fieldName": "tenant_group", "queryParam": "group_id", "includeNull": true}]"#),
            ],
        ),
        SelectAttributes::from_attributes(
            "tags",
            [("data-url", "/api/extras/tags/"), ("multiple", "")],
        ),
    ]
}

/// API base url: the origin the page was served from.
pub fn api_client_config() -> ApiClientConfig {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    match origin {
        Some(origin) => ApiClientConfig::new(origin),
        None => ApiClientConfig::from_env(),
    }
}
