use serde::{Deserialize, Serialize};

use crate::shared::validation::{Rule, ValidationErrors};

/// Минимальная длина имени, фамилии и отчества
pub const NAME_MIN_LEN: usize = 3;
/// Максимальная длина имени, фамилии и отчества
pub const NAME_MAX_LEN: usize = 20;

const NAME_RULES: [Rule; 2] = [
    Rule::Required,
    Rule::Length {
        min: NAME_MIN_LEN,
        max: NAME_MAX_LEN,
    },
];

/// ФИО человека. Встраивается в доктора и пациента.
///
/// Сеттеры обрезают пробелы по краям; проверка значений выполняется
/// отдельно, в момент записи формы (см. [`PersonNameDto`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub name: String,
    pub last_name: String,
    pub patronymic: String,
}

impl PersonName {
    pub fn new(name: &str, last_name: &str, patronymic: &str) -> Self {
        let mut person = Self::default();
        person.set_name(name);
        person.set_last_name(last_name);
        person.set_patronymic(patronymic);
        person
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn set_last_name(&mut self, last_name: &str) {
        self.last_name = last_name.trim().to_string();
    }

    pub fn set_patronymic(&mut self, patronymic: &str) {
        self.patronymic = patronymic.trim().to_string();
    }

    /// Краткое представление: "Фамилия Имя"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.name)
    }

    /// Полное ФИО
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.name, self.patronymic)
    }
}

/// Сущность, у которой есть ФИО
pub trait NameBearing {
    fn person_name(&self) -> &PersonName;

    fn display_name(&self) -> String {
        self.person_name().display_name()
    }
}

/// Поля формы для ФИО
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNameDto {
    pub name: String,
    pub last_name: String,
    pub patronymic: String,
}

impl PersonNameDto {
    pub fn read(person: &PersonName) -> Self {
        Self {
            name: person.name.clone(),
            last_name: person.last_name.clone(),
            patronymic: person.patronymic.clone(),
        }
    }

    pub fn validate_into(&self, errors: &mut ValidationErrors) {
        errors.check("lastName", &self.last_name, &NAME_RULES, "Фамилия не корректна");
        errors.check("name", &self.name, &NAME_RULES, "Имя не корректно");
        errors.check(
            "patronymic",
            &self.patronymic,
            &NAME_RULES,
            "Отчество не корректно",
        );
    }

    pub fn write(&self, person: &mut PersonName) {
        person.set_name(&self.name);
        person.set_last_name(&self.last_name);
        person.set_patronymic(&self.patronymic);
    }

    pub fn to_person_name(&self) -> PersonName {
        PersonName::new(&self.name, &self.last_name, &self.patronymic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_trim_whitespace() {
        let person = PersonName::new("  Иван ", "\tПетров", "Сергеевич  ");
        assert_eq!(person.name, "Иван");
        assert_eq!(person.last_name, "Петров");
        assert_eq!(person.patronymic, "Сергеевич");
        assert_eq!(person.display_name(), "Петров Иван");
        assert_eq!(person.full_name(), "Петров Иван Сергеевич");
    }

    #[test]
    fn dto_reports_every_invalid_field() {
        let dto = PersonNameDto {
            name: "Ив".into(),
            last_name: "   ".into(),
            patronymic: "Сергеевич".into(),
        };
        let mut errors = ValidationErrors::new();
        dto.validate_into(&mut errors);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for("name"), Some("Имя не корректно"));
        assert_eq!(errors.message_for("lastName"), Some("Фамилия не корректна"));
        assert_eq!(errors.message_for("patronymic"), None);
    }
}
