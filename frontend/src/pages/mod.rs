pub mod home_page;
