use dioxus::prelude::*;

/// Spinner shown inside a select while options are in flight.
#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            class: "api-select-spinner",
            role: "status",
            aria_label: "Loading...",
        }
    }
}
