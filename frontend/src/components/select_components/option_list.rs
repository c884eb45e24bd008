use common::query_params::QueryValue;
use dioxus::prelude::*;

use crate::data_definitions::select_form_context::SelectFormContext;

#[derive(Debug, Clone, PartialEq)]
struct OptionRow {
    id: QueryValue,
    label: String,
    description: Option<String>,
    disabled: bool,
    selected: bool,
}

/// Dropdown of the currently loaded options of one select.
#[component]
pub fn OptionList(name: ReadSignal<String>, on_choose: Callback<QueryValue>) -> Element {
    let form = use_context::<SelectFormContext>();
    let (rows, is_loading) = {
        let registry = form.registry.read();
        let Some(widget) = registry.get(&name.read()) else {
            return rsx! {};
        };
        let rows = widget
            .visible_options()
            .iter()
            .map(|option| OptionRow {
                id: option.id.clone(),
                label: option.option_label(),
                description: option.description_label().map(str::to_string),
                disabled: widget.is_option_disabled(option),
                selected: widget.selected().iter().any(|s| s.id == option.id),
            })
            .collect::<Vec<_>>();
        (rows, widget.is_loading())
    };

    rsx! {
        ul {
            class: "api-select-dropdown",
            role: "listbox",
            if rows.is_empty() {
                li {
                    class: "api-select-empty",
                    if is_loading { "Loading..." } else { "No results found" }
                }
            }
            for row in rows {
                OptionItem { key: "{row.id}", row, on_choose }
            }
        }
    }
}

#[component]
fn OptionItem(row: OptionRow, on_choose: Callback<QueryValue>) -> Element {
    let class = match (row.disabled, row.selected) {
        (true, _) => "api-select-option disabled",
        (false, true) => "api-select-option selected",
        (false, false) => "api-select-option",
    };
    let id = row.id.clone();
    let disabled = row.disabled;
    rsx! {
        li {
            class: "{class}",
            role: "option",
            aria_disabled: "{row.disabled}",
            aria_selected: "{row.selected}",
            onclick: move |_| {
                if !disabled {
                    on_choose.call(id.clone());
                }
            },
            div { "{row.label}" }
            {row.description.map(|description| rsx! {
                small { class: "text-secondary", "{description}" }
            })}
        }
    }
}
