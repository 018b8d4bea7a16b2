//! Общие типы предметной области больницы: сущности, правила валидации,
//! обобщённый контроллер таблиц и контракт репозитория.
//!
//! Крейт собирается и для сервера, и для `wasm32` фронтенда.

pub mod domain;
pub mod enums;
pub mod shared;
