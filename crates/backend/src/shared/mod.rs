pub mod api_error;
pub mod config;
pub mod dimension_editor;
pub mod field_support;
pub mod format;
pub mod layer_store;
pub mod operations;
pub mod workspace;
