//! Декларативная валидация полей формы.
//!
//! Форма (DTO) проверяется целиком: либо все поля корректны и значения
//! записываются в сущность, либо сущность не меняется и вызывающий получает
//! ошибки по каждому полю.

mod binder;
mod errors;
mod rules;

pub use binder::Bindable;
pub use errors::{FieldError, ValidationErrors};
pub use rules::{is_valid_phone, Rule, PHONE_PATTERN};
