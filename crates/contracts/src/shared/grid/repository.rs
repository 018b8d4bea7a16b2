use thiserror::Error;

use crate::domain::common::AggregateRoot;
use crate::shared::validation::ValidationErrors;

/// Ошибки хранилища
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Запись используется другой записью и не может быть удалена
    #[error("referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("record not found")]
    NotFound,

    /// Хранилище отклонило запись по правилам валидации
    #[error("rejected: {0}")]
    Rejected(ValidationErrors),

    #[error("storage error: {0}")]
    Other(String),
}

/// Хранилище сущностей одного типа с числовым ключом.
///
/// Реализации: SQLite на сервере, HTTP-клиент во фронтенде.
#[allow(async_fn_in_trait)]
pub trait Repository<E: AggregateRoot> {
    /// Все записи в порядке хранения
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Сохранить запись; новой записи назначается ID
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    async fn delete_by_id(&self, id: E::Id) -> Result<(), RepositoryError>;
}
