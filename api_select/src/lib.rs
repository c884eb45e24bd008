//! REST-backed select widgets: option fetching, filter state and the page registry.

pub mod config;
pub mod fetch;
pub mod attributes;
pub mod dynamic_select;
pub mod registry;

pub use attributes::SelectAttributes;
pub use config::ApiClientConfig;
pub use dynamic_select::{DynamicSelect, LoadOutcome, LoadTicket};
pub use fetch::{HttpOptionFetcher, LoadError, OptionFetcher};
pub use registry::SelectRegistry;
