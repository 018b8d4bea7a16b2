pub mod api_utils;
pub mod components;
pub mod grid_handle;
pub mod http_repository;
pub mod modal;
