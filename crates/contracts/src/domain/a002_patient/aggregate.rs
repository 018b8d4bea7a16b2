use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, NameBearing, PersonName, PersonNameDto};
use crate::shared::grid::GridEntity;
use crate::shared::validation::{Bindable, Rule, ValidationErrors};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор пациента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub i64);

impl PatientId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for PatientId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        <i64 as AggregateId>::from_string(s).map(PatientId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Пациент
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Option<PatientId>,

    #[serde(flatten)]
    pub person: PersonName,

    /// Мобильный номер
    pub phone_number: String,
}

impl Patient {
    /// Новый пациент для вставки в БД
    pub fn new_for_insert(person: PersonName, phone_number: &str) -> Self {
        let mut patient = Self {
            id: None,
            person,
            phone_number: String::new(),
        };
        patient.set_phone_number(phone_number);
        patient
    }

    pub fn set_phone_number(&mut self, phone_number: &str) {
        self.phone_number = phone_number.trim().to_string();
    }
}

impl NameBearing for Patient {
    fn person_name(&self) -> &PersonName {
        &self.person
    }
}

impl AggregateRoot for Patient {
    type Id = PatientId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "patient"
    }

    fn element_name() -> &'static str {
        "Пациент"
    }

    fn list_name() -> &'static str {
        "Пациенты"
    }
}

impl GridEntity for Patient {
    type Dto = PatientDto;
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Форма создания/редактирования пациента
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    #[serde(flatten)]
    pub person: PersonNameDto,
    pub phone_number: String,
}

impl Bindable for PatientDto {
    type Entity = Patient;

    fn read_bean(entity: &Patient) -> Self {
        Self {
            person: PersonNameDto::read(&entity.person),
            phone_number: entity.phone_number.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.person.validate_into(&mut errors);
        errors.check(
            "phoneNumber",
            &self.phone_number,
            &[Rule::Required, Rule::Phone],
            "Невалидный номер",
        );
        errors.into_result()
    }

    fn write_bean(&self, target: &mut Patient) {
        self.person.write(&mut target.person);
        target.set_phone_number(&self.phone_number);
    }

    fn create_bean(&self) -> Result<Patient, ValidationErrors> {
        self.validate()?;
        Ok(Patient::new_for_insert(
            self.person.to_person_name(),
            &self.phone_number,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(phone: &str) -> PatientDto {
        PatientDto {
            person: PersonNameDto {
                name: "Анна".into(),
                last_name: "Смирнова".into(),
                patronymic: "Олеговна".into(),
            },
            phone_number: phone.into(),
        }
    }

    #[test]
    fn phone_is_validated_and_trimmed() {
        let patient = dto("  +7 (904) 330-28-66 ").create_bean().unwrap();
        assert_eq!(patient.phone_number, "+7 (904) 330-28-66");

        let errors = dto("123").create_bean().unwrap_err();
        assert_eq!(errors.message_for("phoneNumber"), Some("Невалидный номер"));
    }

    #[test]
    fn display_name_is_last_name_first() {
        let patient = dto("89043302866").create_bean().unwrap();
        assert_eq!(patient.display_name(), "Смирнова Анна");
    }
}
