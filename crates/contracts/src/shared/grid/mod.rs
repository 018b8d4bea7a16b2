//! Обобщённый контроллер таблицы (CRUD-грид) для одного типа сущностей.
//!
//! Контроллер держит последний полностью загруженный список, сессию
//! построчного редактирования с буфером и набор фильтров. Любая успешная
//! запись завершается полной перезагрузкой списка из репозитория.

mod cache;
mod controller;
mod editor;
mod filter;
mod repository;

#[cfg(test)]
pub(crate) mod memory;

pub use cache::VersionedCache;
pub use controller::{GridController, GridError, DELETE_BLOCKED_MESSAGE};
pub use editor::EditState;
pub use filter::{FilterSet, Predicate};
pub use repository::{Repository, RepositoryError};

use crate::domain::common::AggregateRoot;
use crate::shared::validation::Bindable;

/// Сущность, которой может управлять [`GridController`]
pub trait GridEntity: AggregateRoot + Clone + Send + Sync + 'static {
    /// Форма для создания и построчного редактирования
    type Dto: Bindable<Entity = Self> + Send + Sync + 'static;
}
