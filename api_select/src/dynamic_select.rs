//! A select bound to a REST endpoint whose option list follows the current filter state.

use common::api_option::ApiOption;
use common::query_params::{ParameterSet, QueryValue};
use common::request_url::compose_request_url;
use common::select_const::MAX_OPTIONS;

use crate::attributes::SelectAttributes;
use crate::fetch::{LoadError, OptionFetcher};

/// Called with the widget name whenever a load fails.
pub type ErrorHook = Box<dyn Fn(&str, &LoadError)>;

/// One issued request. Hand it back to [`DynamicSelect::finish_load`] with the fetch result.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    request_id: u64,
    pub url: String,
}

impl LoadTicket {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Applied { count: usize },
    Failed(LoadError),
    /// A newer response was already applied; this one was dropped.
    Stale,
}

pub struct DynamicSelect {
    name: String,
    endpoint_url: Option<String>,
    static_params: ParameterSet,
    query_params: ParameterSet,
    disabled_indicator: Option<String>,
    multiple: bool,
    options: Vec<ApiOption>,
    selected: Vec<ApiOption>,
    in_flight: usize,
    last_issued: u64,
    last_applied: u64,
    on_error: Option<ErrorHook>,
}

impl std::fmt::Debug for DynamicSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicSelect")
            .field("name", &self.name)
            .field("endpoint_url", &self.endpoint_url)
            .field("query_params", &self.query_params)
            .field("options", &self.options.len())
            .field("selected", &self.selected.len())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl DynamicSelect {
    /// Build a widget from its element attributes.
    ///
    /// Never fails: without `data-url` the widget is inert, and a malformed
    /// declaration is logged and skipped.
    pub fn new(attributes: &SelectAttributes) -> Self {
        let name = attributes.name.clone();
        if attributes.data_url.is_none() {
            tracing::warn!("select field '{}' has no data-url; it will not load options", name);
        }

        let mut static_params = ParameterSet::new();
        if let Some(raw) = &attributes.static_params {
            if let Err(e) = static_params.load_static_declaration(raw) {
                tracing::warn!("Unable to determine static query parameters for select field '{}': {}", name, e);
            }
        }

        let mut query_params = ParameterSet::new();
        query_params.merge_from(&static_params);
        if let Some(raw) = &attributes.filter_fields {
            let mut filter_fields = ParameterSet::new();
            match filter_fields.load_from_declaration(raw) {
                Ok(()) => query_params.merge_from(&filter_fields),
                Err(e) => tracing::warn!("Unable to determine filter fields for select field '{}': {}", name, e),
            }
        }

        Self {
            name,
            endpoint_url: attributes.data_url.clone(),
            static_params,
            query_params,
            disabled_indicator: attributes.disabled_indicator.clone(),
            multiple: attributes.multiple,
            options: Vec::new(),
            selected: Vec::new(),
            in_flight: 0,
            last_issued: 0,
            last_applied: 0,
            on_error: None,
        }
    }

    pub fn with_error_hook(mut self, hook: impl Fn(&str, &LoadError) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inert(&self) -> bool {
        self.endpoint_url.is_none()
    }

    pub fn static_params(&self) -> &ParameterSet {
        &self.static_params
    }

    pub fn query_params(&self) -> &ParameterSet {
        &self.query_params
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn options(&self) -> &[ApiOption] {
        &self.options
    }

    /// Options to render, capped at [`MAX_OPTIONS`].
    pub fn visible_options(&self) -> &[ApiOption] {
        &self.options[..self.options.len().min(MAX_OPTIONS)]
    }

    pub fn is_option_disabled(&self, option: &ApiOption) -> bool {
        match &self.disabled_indicator {
            Some(indicator) => option.is_disabled(indicator),
            None => false,
        }
    }

    /// Drop every loaded option. Selected items are kept.
    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    /// URL the next load with `search` would request.
    pub fn request_url(&self, search: &str) -> Option<String> {
        let endpoint_url = self.endpoint_url.as_deref()?;
        Some(compose_request_url(endpoint_url, &self.query_params, search))
    }

    /// Change the value of a tracked filter. Static parameters are left alone.
    pub fn update_filter(&mut self, field_name: &str, values: Vec<QueryValue>) -> bool {
        self.query_params.update_value(field_name, values)
    }

    /// First half of a load: clear stale options for a search, mark loading, compose the URL.
    ///
    /// Returns `None` for an inert widget.
    pub fn begin_load(&mut self, search: &str) -> Option<LoadTicket> {
        let url = self.request_url(search)?;
        if !search.is_empty() {
            self.clear_options();
        }
        self.in_flight += 1;
        self.last_issued += 1;
        tracing::debug!("select '{}' loading #{}: {}", self.name, self.last_issued, url);
        Some(LoadTicket { request_id: self.last_issued, url })
    }

    /// Second half of a load: apply the fetch result unless a newer one already landed.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<ApiOption>, LoadError>) -> LoadOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.request_id < self.last_applied {
            tracing::debug!("select '{}' dropped stale response #{}", self.name, ticket.request_id);
            return LoadOutcome::Stale;
        }
        self.last_applied = ticket.request_id;
        match result {
            Ok(options) => {
                let count = options.len();
                tracing::debug!("select '{}' loaded {} options", self.name, count);
                self.options = options;
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!("select '{}' failed to load options: {}", self.name, e);
                self.options.clear();
                if let Some(hook) = &self.on_error {
                    hook(&self.name, &e);
                }
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Load options for `search`. `None` if the widget is inert.
    pub async fn load<F: OptionFetcher>(&mut self, fetcher: &F, search: &str) -> Option<LoadOutcome> {
        let ticket = self.begin_load(search)?;
        let result = fetcher.fetch_options(&ticket.url).await;
        Some(self.finish_load(ticket, result))
    }

    pub fn selected(&self) -> &[ApiOption] {
        &self.selected
    }

    /// Values of the selected options, as fed to dependent filters.
    pub fn selected_values(&self) -> Vec<QueryValue> {
        self.selected.iter().map(|o| o.id.clone()).collect()
    }

    /// Select a loaded option by id. Single selects replace their selection.
    pub fn select(&mut self, id: &QueryValue) -> bool {
        let Some(option) = self.options.iter().find(|o| &o.id == id) else {
            return false;
        };
        if self.is_option_disabled(option) {
            return false;
        }
        let option = option.clone();
        if self.multiple {
            if !self.selected.iter().any(|o| o.id == option.id) {
                self.selected.push(option);
            }
        } else {
            self.selected = vec![option];
        }
        true
    }

    pub fn deselect(&mut self, id: &QueryValue) -> bool {
        let before = self.selected.len();
        self.selected.retain(|o| &o.id != id);
        self.selected.len() != before
    }

    /// Drop the whole selection. Returns `false` if nothing was selected.
    pub fn clear_selection(&mut self) -> bool {
        let had_selection = !self.selected.is_empty();
        self.selected.clear();
        had_selection
    }
}
