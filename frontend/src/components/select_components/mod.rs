pub mod select_form;
pub mod api_select;
pub mod option_list;
