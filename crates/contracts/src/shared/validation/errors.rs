use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Rule;

/// Ошибка одного поля формы
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Набор ошибок валидации формы. Пустой набор означает успех.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.fields.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Проверить текстовое поле набором правил; при первом нарушении
    /// записывается одна ошибка с сообщением `message`
    pub fn check(&mut self, field: &str, value: &str, rules: &[Rule], message: &str) -> &mut Self {
        if rules.iter().any(|rule| !rule.check(value)) {
            self.push(field, message);
        }
        self
    }

    /// Обязательная дата
    pub fn require_date(&mut self, field: &str, value: Option<NaiveDate>) -> &mut Self {
        if value.is_none() {
            self.push(field, "Выберите дату");
        }
        self
    }

    /// Обязательное значение (ссылка, выбор из списка)
    pub fn require<T>(&mut self, field: &str, value: Option<&T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.push(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Сообщение для указанного поля (для индикатора рядом с полем ввода)
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_failures() {
        let mut errors = ValidationErrors::new();
        errors
            .check("description", "ab", &[Rule::Length { min: 3, max: 200 }], "Слишком короткое описание")
            .require_date("creationDate", None)
            .require::<i64>("doctorId", None, "Выберите доктора");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.message_for("creationDate"), Some("Выберите дату"));
        assert_eq!(
            errors.to_string(),
            "Слишком короткое описание; Выберите дату; Выберите доктора"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_set_is_success() {
        let mut errors = ValidationErrors::new();
        errors.check("name", "Иван", &[Rule::Required], "Имя не корректно");
        assert!(errors.into_result().is_ok());
    }
}
