//! A single REST-backed select control.

use common::api_option::ApiOption;
use common::query_params::QueryValue;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowDropDown, MdClose}};
use gloo_timers::future::TimeoutFuture;

use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::loading_indicator::LoadingIndicator;
use crate::components::select_components::option_list::OptionList;
use crate::data_definitions::select_form_context::SelectFormContext;

const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn ApiSelect(name: ReadSignal<String>, label: ReadSignal<String>) -> Element {
    let form = use_context::<SelectFormContext>();
    let registry = form.registry;
    let mut search = use_signal(String::new);
    let mut is_open = use_signal(|| false);
    let mut search_generation = use_signal(|| 0_u64);

    // options are fetched whenever the dropdown opens, not on mount
    let open_form = form.clone();
    let open = use_callback(move |_: ()| {
        if !is_open() {
            is_open.set(true);
            open_form.spawn_load(name.peek().clone(), search.peek().clone());
        }
    });

    let search_form = form.clone();
    let oninput = move |event: Event<FormData>| {
        let term = event.value();
        search.set(term.clone());
        is_open.set(true);
        *search_generation.write() += 1;
        let generation = *search_generation.peek();
        let search_form = search_form.clone();
        spawn(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if *search_generation.peek() == generation {
                search_form.spawn_load(name.peek().clone(), term);
            }
        });
    };

    let choose_form = form.clone();
    let choose = use_callback(move |id: QueryValue| {
        let mut registry = choose_form.registry;
        let widget_name = name.peek().clone();
        let (values, multiple) = {
            let mut registry = registry.write();
            let Some(widget) = registry.get_mut(&widget_name) else { return };
            if !widget.select(&id) {
                return;
            }
            (widget.selected_values(), widget.is_multiple())
        };
        if !multiple {
            is_open.set(false);
        }
        search.set(String::new());
        choose_form.field_changed(&widget_name, values);
    });

    let deselect_form = form.clone();
    let deselect = use_callback(move |id: QueryValue| {
        let mut registry = deselect_form.registry;
        let widget_name = name.peek().clone();
        let values = {
            let mut registry = registry.write();
            let Some(widget) = registry.get_mut(&widget_name) else { return };
            if !widget.deselect(&id) {
                return;
            }
            widget.selected_values()
        };
        deselect_form.field_changed(&widget_name, values);
    });

    let clear_form = form.clone();
    let clear = use_callback(move |_: ()| {
        let mut registry = clear_form.registry;
        let widget_name = name.peek().clone();
        let cleared = registry.write().get_mut(&widget_name).is_some_and(|w| w.clear_selection());
        if cleared {
            clear_form.field_changed(&widget_name, Vec::new());
        }
    });

    let (is_loading, is_inert, selected) = {
        let registry = registry.read();
        match registry.get(&name.read()) {
            Some(widget) => (widget.is_loading(), widget.is_inert(), widget.selected().to_vec()),
            None => return rsx! { ComponentErrorDisplay { error_txt: format!("No select field named '{}'", name) } },
        }
    };
    let selected_is_empty = selected.is_empty();
    let wrapper_class = if is_loading { "api-select loading" } else { "api-select" };

    rsx! {
        div {
            class: wrapper_class,
            label {
                class: "api-select-label",
                "{label}"
            }
            for item in selected.iter() {
                input { r#type: "hidden", name: "{name}", value: "{item.id}" }
            }
            div {
                class: "api-select-control",
                for item in selected {
                    SelectedItem { key: "{item.id}", option: item, on_remove: deselect }
                }
                input {
                    r#type: "text",
                    class: "api-select-search",
                    placeholder: if is_inert { "Unavailable" } else { "Search" },
                    disabled: is_inert,
                    value: "{search}",
                    onfocus: move |_| open.call(()),
                    oninput: oninput,
                    onkeydown: move |event: Event<KeyboardData>| {
                        if event.key() == Key::Escape {
                            is_open.set(false);
                        }
                    },
                }
                if is_loading {
                    LoadingIndicator {}
                }
                if !selected_is_empty {
                    button {
                        r#type: "button",
                        class: "api-select-clear",
                        title: "Clear selection",
                        onclick: move |_| clear.call(()),
                        Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
                    }
                }
                button {
                    r#type: "button",
                    class: "api-select-toggle",
                    disabled: is_inert,
                    onclick: move |_| {
                        if is_open() {
                            is_open.set(false);
                        } else {
                            open.call(());
                        }
                    },
                    Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px;" }
                }
            }
            if is_open() && !is_inert {
                OptionList { name, on_choose: choose }
            }
        }
    }
}

#[component]
fn SelectedItem(option: ApiOption, on_remove: Callback<QueryValue>) -> Element {
    let id = option.id.clone();
    rsx! {
        span {
            class: "api-select-item",
            "{option.item_label()}"
            button {
                r#type: "button",
                class: "api-select-remove",
                onclick: move |_| on_remove.call(id.clone()),
                Icon { icon: MdClose, style: "width: 14px; height: 14px;" }
            }
        }
    }
}
