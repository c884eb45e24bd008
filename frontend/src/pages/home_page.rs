use dioxus::prelude::*;

use crate::components::select_components::{api_select::ApiSelect, select_form::SelectForm};
use crate::data_definitions::device_form::device_form_elements;


/// Device edit form: region, site and rack narrow each other down.
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "NetBox - Add a new device" }
        div {
            id: "x-form-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                max-width: 720px;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
            ",
            h1 {
                style: "font-size: 32px; font-weight: 500; color: #0F172A;",
                "Add a new device"
            }

            SelectForm {
                elements: device_form_elements(),
                notify_load_errors: true,

                h2 { class: "api-select-form-section", "Location" }
                ApiSelect { name: "region".to_string(), label: "Region".to_string() }
                ApiSelect { name: "site".to_string(), label: "Site".to_string() }
                ApiSelect { name: "rack".to_string(), label: "Rack".to_string() }

                h2 { class: "api-select-form-section", "Tenancy" }
                ApiSelect { name: "tenant".to_string(), label: "Tenant".to_string() }

                h2 { class: "api-select-form-section", "Tags" }
                ApiSelect { name: "tags".to_string(), label: "Tags".to_string() }
            }
        }
    }
}
