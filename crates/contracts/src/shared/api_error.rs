use serde::{Deserialize, Serialize};

use crate::shared::grid::RepositoryError;
use crate::shared::validation::{FieldError, ValidationErrors};

/// Тип ошибки API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Validation,
    ReferentialIntegrity,
    NotFound,
    Internal,
}

/// Тело ответа с ошибкой
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<FieldError>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            message: errors.to_string(),
            fields: errors.fields.clone(),
        }
    }
}

impl From<ApiError> for RepositoryError {
    fn from(e: ApiError) -> Self {
        match e.kind {
            ApiErrorKind::Validation => RepositoryError::Rejected(ValidationErrors { fields: e.fields }),
            ApiErrorKind::ReferentialIntegrity => RepositoryError::ReferentialIntegrity(e.message),
            ApiErrorKind::NotFound => RepositoryError::NotFound,
            ApiErrorKind::Internal => RepositoryError::Other(e.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_into_repository_error() {
        let body = r#"{"kind":"referential_integrity","message":"doctor 1 is used"}"#;
        let error: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(
            RepositoryError::from(error),
            RepositoryError::ReferentialIntegrity("doctor 1 is used".into())
        );
    }

    #[test]
    fn validation_keeps_field_errors() {
        let errors = ValidationErrors::single("name", "Имя не корректно");
        let api = ApiError::validation(&errors);
        assert_eq!(api.message, "Имя не корректно");
        assert_eq!(RepositoryError::from(api), RepositoryError::Rejected(errors));
    }
}
