//! All dynamic selects of one page, and the propagation of field changes between them.

use common::query_params::QueryValue;

use crate::attributes::SelectAttributes;
use crate::dynamic_select::{DynamicSelect, LoadOutcome};
use crate::fetch::OptionFetcher;

#[derive(Debug, Default)]
pub struct SelectRegistry {
    widgets: Vec<DynamicSelect>,
}

impl SelectRegistry {
    /// Build one widget per declared element, in declaration order.
    pub fn initialize(elements: impl IntoIterator<Item = SelectAttributes>) -> Self {
        let mut registry = Self::default();
        for attributes in elements {
            registry.register(DynamicSelect::new(&attributes));
        }
        tracing::debug!("initialized {} dynamic selects", registry.len());
        registry
    }

    /// Add a widget, replacing any previous widget with the same name.
    pub fn register(&mut self, widget: DynamicSelect) -> &mut DynamicSelect {
        let index = match self.widgets.iter().position(|w| w.name() == widget.name()) {
            Some(index) => {
                self.widgets[index] = widget;
                index
            }
            None => {
                self.widgets.push(widget);
                self.widgets.len() - 1
            }
        };
        &mut self.widgets[index]
    }

    pub fn get(&self, name: &str) -> Option<&DynamicSelect> {
        self.widgets.iter().find(|w| w.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DynamicSelect> {
        self.widgets.iter_mut().find(|w| w.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicSelect> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Push a changed field value into every widget filtering on it.
    ///
    /// Returns the names of the widgets that need a reload.
    pub fn field_changed(&mut self, field_name: &str, values: &[QueryValue]) -> Vec<String> {
        let mut changed = Vec::new();
        for widget in self.widgets.iter_mut() {
            if widget.update_filter(field_name, values.to_vec()) {
                changed.push(widget.name().to_string());
            }
        }
        tracing::debug!("field '{}' changed, dependents: {:?}", field_name, changed);
        changed
    }

    /// [`Self::field_changed`] followed by a blank load of each dependent.
    pub async fn refresh_dependents<F: OptionFetcher>(
        &mut self,
        fetcher: &F,
        field_name: &str,
        values: &[QueryValue],
    ) -> Vec<(String, LoadOutcome)> {
        let mut outcomes = Vec::new();
        for name in self.field_changed(field_name, values) {
            if let Some(widget) = self.get_mut(&name) {
                if let Some(outcome) = widget.load(fetcher, "").await {
                    outcomes.push((name, outcome));
                }
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use common::api_option::ApiOption;

    use super::*;
    use crate::fetch::LoadError;

    #[derive(Default)]
    struct RecordingFetcher {
        requests: RefCell<Vec<String>>,
    }

    impl OptionFetcher for RecordingFetcher {
        async fn fetch_options(&self, url: &str) -> Result<Vec<ApiOption>, LoadError> {
            self.requests.borrow_mut().push(url.to_string());
            Ok(vec![ApiOption::new(1, "one")])
        }
    }

    fn page() -> SelectRegistry {
        SelectRegistry::initialize([
            SelectAttributes::new("region").with_url("/api/dcim/regions/"),
            SelectAttributes::new("site")
                .with_url("/api/dcim/sites/")
                .with_filter_fields(r#"[{"queryParam": "region_id", "fieldName": "region"}]"#),
            SelectAttributes::new("rack")
                .with_url("/api/dcim/racks/")
                .with_filter_fields(
                    r#"[{"queryParam": "region_id", "fieldName": "region"}, {"queryParam": "site_id", "fieldName": "site"}]"#,
                ),
            SelectAttributes::new("broken"),
        ])
    }

    #[test]
    fn initialize_keeps_declaration_order() {
        let registry = page();
        let names: Vec<_> = registry.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["region", "site", "rack", "broken"]);
        assert!(registry.get("broken").unwrap().is_inert());
        assert!(registry.get("tenant").is_none());
    }

    #[test]
    fn field_change_reaches_only_tracking_widgets() {
        let mut registry = page();
        let changed = registry.field_changed("site", &[QueryValue::Int(4)]);
        assert_eq!(changed, vec!["rack"]);
        assert_eq!(registry.get("rack").unwrap().query_params().query_value("site"), &[QueryValue::Int(4)]);
        assert!(registry.field_changed("tenant", &[QueryValue::Int(1)]).is_empty());
    }

    #[tokio::test]
    async fn refresh_dependents_reloads_with_the_new_filter() {
        let mut registry = page();
        let fetcher = RecordingFetcher::default();
        let outcomes = registry.refresh_dependents(&fetcher, "region", &[QueryValue::Int(2)]).await;

        let names: Vec<_> = outcomes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["site", "rack"]);
        assert_eq!(
            fetcher.requests.borrow().as_slice(),
            ["/api/dcim/sites/?region_id=2&brief=true", "/api/dcim/racks/?region_id=2&brief=true"]
        );
        assert_eq!(registry.get("site").unwrap().options().len(), 1);
    }

    #[test]
    fn register_replaces_widgets_by_name() {
        let mut registry = page();
        registry.register(DynamicSelect::new(&SelectAttributes::new("site")));
        assert_eq!(registry.len(), 4);
        assert!(registry.get("site").unwrap().is_inert());
    }
}
