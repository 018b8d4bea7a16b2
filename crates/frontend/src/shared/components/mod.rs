pub mod date_input;
pub mod error_banner;
pub mod select_field;
pub mod text_field;
