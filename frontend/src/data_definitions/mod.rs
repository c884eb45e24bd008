pub mod select_form_context;
pub mod device_form;
