pub mod api;
pub mod auth;
pub mod excel_write;
pub mod files;
