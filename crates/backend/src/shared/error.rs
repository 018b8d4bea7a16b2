use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api_error::{ApiError, ApiErrorKind};
use contracts::shared::grid::DELETE_BLOCKED_MESSAGE;
use contracts::shared::validation::ValidationErrors;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Ошибки сервисного слоя
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[source] DbErr),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        if is_foreign_key_violation(&err) {
            ServiceError::ReferentialIntegrity(err.to_string())
        } else {
            ServiceError::Database(err)
        }
    }
}

/// SQLite сообщает о нарушении внешнего ключа кодом 787
fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        || err.to_string().contains("FOREIGN KEY constraint failed")
}

impl ServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::ReferentialIntegrity(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiError {
        match self {
            ServiceError::Validation(errors) => ApiError::validation(errors),
            ServiceError::ReferentialIntegrity(_) => {
                ApiError::new(ApiErrorKind::ReferentialIntegrity, DELETE_BLOCKED_MESSAGE)
            }
            ServiceError::NotFound(what) => {
                ApiError::new(ApiErrorKind::NotFound, format!("{} не найден", what))
            }
            ServiceError::Database(_) => ApiError::new(ApiErrorKind::Internal, "Ошибка базы данных"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let validation = ServiceError::from(ValidationErrors::single("name", "Имя не корректно"));
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(validation.body().fields.len(), 1);

        let blocked = ServiceError::ReferentialIntegrity("doctor 1".into());
        assert_eq!(blocked.status(), StatusCode::CONFLICT);
        assert_eq!(blocked.body().message, DELETE_BLOCKED_MESSAGE);

        assert_eq!(
            ServiceError::NotFound("Доктор".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn foreign_key_message_becomes_conflict() {
        let err = DbErr::Custom("error returned from database: (code: 787) FOREIGN KEY constraint failed".into());
        assert!(matches!(
            ServiceError::from(err),
            ServiceError::ReferentialIntegrity(_)
        ));
        assert!(matches!(
            ServiceError::from(DbErr::Custom("disk I/O error".into())),
            ServiceError::Database(_)
        ));
    }
}
