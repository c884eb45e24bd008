//! Shared state of a form holding dynamic selects.

use api_select::{HttpOptionFetcher, LoadOutcome, OptionFetcher, SelectRegistry};
use common::query_params::QueryValue;
use dioxus::prelude::*;

#[derive(Clone)]
pub struct SelectFormContext {
    pub registry: Signal<SelectRegistry>,
    /// `None` when the HTTP client could not be built; loads are then skipped.
    pub fetcher: Option<HttpOptionFetcher>,
    /// Only set when the form wants load failures surfaced to the user.
    pub notify_failure: Option<Callback<String>>,
}

impl SelectFormContext {
    /// Start a load for one widget; the response is applied whenever it lands.
    pub fn spawn_load(&self, widget_name: String, search: String) {
        let Some(fetcher) = self.fetcher.clone() else {
            return;
        };
        let mut registry = self.registry;
        let Some(ticket) = registry.write().get_mut(&widget_name).and_then(|w| w.begin_load(&search)) else {
            return;
        };
        let notify_failure = self.notify_failure;
        spawn(async move {
            let result = fetcher.fetch_options(&ticket.url).await;
            let outcome = registry.write().get_mut(&widget_name).map(|w| w.finish_load(ticket, result));
            if let (Some(LoadOutcome::Failed(e)), Some(notify)) = (outcome, notify_failure) {
                notify.call(format!("{}: {}", widget_name, e));
            }
        });
    }

    /// Record a new value for `field_name` and reload every select filtering on it.
    pub fn field_changed(&self, field_name: &str, values: Vec<QueryValue>) {
        let mut registry = self.registry;
        let dependents = registry.write().field_changed(field_name, &values);
        for name in dependents {
            self.spawn_load(name, String::new());
        }
    }
}
