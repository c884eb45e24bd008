//! Form wrapper owning the select registry of one page.

use std::time::Duration;

use api_select::{HttpOptionFetcher, SelectAttributes, SelectRegistry};
use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorDisplay;
use crate::data_definitions::device_form::api_client_config;
use crate::data_definitions::select_form_context::SelectFormContext;

#[component]
pub fn SelectForm(elements: Vec<SelectAttributes>, #[props(default)] notify_load_errors: bool, children: Element) -> Element {
    let registry = use_signal(|| SelectRegistry::initialize(elements.clone()));
    let fetcher = use_hook(|| HttpOptionFetcher::new(api_client_config()).map_err(|e| format!("{e:#}")));
    let notify_failure = use_callback(move |message: String| {
        dioxus::logger::tracing::info!("Option load failed: {}", message);
        let toast_api = dioxus_primitives::toast::consume_toast();
        toast_api
                .info(
                    "Unable to load options.".to_string(),
                    dioxus_primitives::toast::ToastOptions::new()
                        .description(message.as_str())
                        .duration(Duration::from_secs(15))
                        .permanent(false),
                );
    });

    let context_fetcher = fetcher.clone().ok();
    use_context_provider(move || SelectFormContext {
        registry,
        fetcher: context_fetcher,
        notify_failure: notify_load_errors.then_some(notify_failure),
    });

    if let Err(e) = fetcher {
        return rsx! { ComponentErrorDisplay { error_txt: e } };
    }

    rsx! {
        form {
            class: "api-select-form",
            onsubmit: move |e| e.prevent_default(),
            {children}
        }
    }
}
