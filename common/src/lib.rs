//! Common library exports shared between the select core and the frontend.

extern crate serde;


pub mod query_params;
pub mod declarations;
pub mod request_url;
pub mod api_option;
pub mod select_const;
