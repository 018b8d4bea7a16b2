use serde::{Deserialize, Serialize};

use crate::domain::common::person_name::{NAME_MAX_LEN, NAME_MIN_LEN};
use crate::domain::common::{AggregateId, AggregateRoot, NameBearing, PersonName, PersonNameDto};
use crate::shared::grid::GridEntity;
use crate::shared::validation::{Bindable, Rule, ValidationErrors};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор доктора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub i64);

impl DoctorId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for DoctorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        <i64 as AggregateId>::from_string(s).map(DoctorId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Доктор
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Option<DoctorId>,

    #[serde(flatten)]
    pub person: PersonName,

    pub specialization: String,

    /// Количество выписанных рецептов; меняется только при создании рецепта
    #[serde(default)]
    pub formula_count: i32,
}

impl Doctor {
    /// Новый доктор для вставки в БД
    pub fn new_for_insert(person: PersonName, specialization: &str) -> Self {
        let mut doctor = Self {
            id: None,
            person,
            specialization: String::new(),
            formula_count: 0,
        };
        doctor.set_specialization(specialization);
        doctor
    }

    pub fn set_specialization(&mut self, specialization: &str) {
        self.specialization = specialization.trim().to_string();
    }

    /// Строка деталей: "Иван Петров выписал 3 рецептов."
    pub fn formula_summary(&self) -> String {
        format!(
            "{} {} выписал {} рецептов.",
            self.person.name, self.person.last_name, self.formula_count
        )
    }
}

impl NameBearing for Doctor {
    fn person_name(&self) -> &PersonName {
        &self.person
    }
}

impl AggregateRoot for Doctor {
    type Id = DoctorId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "doctor"
    }

    fn element_name() -> &'static str {
        "Доктор"
    }

    fn list_name() -> &'static str {
        "Доктора"
    }
}

impl GridEntity for Doctor {
    type Dto = DoctorDto;
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Форма создания/редактирования доктора
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDto {
    #[serde(flatten)]
    pub person: PersonNameDto,
    pub specialization: String,
}

impl Bindable for DoctorDto {
    type Entity = Doctor;

    fn read_bean(entity: &Doctor) -> Self {
        Self {
            person: PersonNameDto::read(&entity.person),
            specialization: entity.specialization.clone(),
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.person.validate_into(&mut errors);
        errors.check(
            "specialization",
            &self.specialization,
            &[
                Rule::Required,
                Rule::Length {
                    min: NAME_MIN_LEN,
                    max: NAME_MAX_LEN,
                },
            ],
            "Специализация не корректна",
        );
        errors.into_result()
    }

    fn write_bean(&self, target: &mut Doctor) {
        self.person.write(&mut target.person);
        target.set_specialization(&self.specialization);
    }

    fn create_bean(&self) -> Result<Doctor, ValidationErrors> {
        self.validate()?;
        Ok(Doctor::new_for_insert(
            self.person.to_person_name(),
            &self.specialization,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, last_name: &str, patronymic: &str, specialization: &str) -> DoctorDto {
        DoctorDto {
            person: PersonNameDto {
                name: name.into(),
                last_name: last_name.into(),
                patronymic: patronymic.into(),
            },
            specialization: specialization.into(),
        }
    }

    #[test]
    fn create_bean_trims_and_starts_counter_at_zero() {
        let doctor = dto(" Иван ", "Петров ", " Сергеевич", " Терапевт ")
            .create_bean()
            .unwrap();
        assert_eq!(doctor.id, None);
        assert_eq!(doctor.person.name, "Иван");
        assert_eq!(doctor.person.last_name, "Петров");
        assert_eq!(doctor.specialization, "Терапевт");
        assert_eq!(doctor.formula_count, 0);
    }

    #[test]
    fn name_length_bounds() {
        assert!(dto("Ив", "Петров", "Сергеевич", "Терапевт").validate().is_err());
        assert!(dto(&"и".repeat(20), "Петров", "Сергеевич", "Терапевт")
            .validate()
            .is_ok());
        assert!(dto(&"и".repeat(21), "Петров", "Сергеевич", "Терапевт")
            .validate()
            .is_err());
    }

    #[test]
    fn commit_leaves_entity_untouched_on_failure() {
        let mut doctor = dto("Иван", "Петров", "Сергеевич", "Терапевт")
            .create_bean()
            .unwrap();
        let before = doctor.clone();

        let mut form = DoctorDto::read_bean(&doctor);
        form.person.name = "Александр".into();
        form.specialization = "X".into();

        let errors = form.commit(&mut doctor).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("specialization"), Some("Специализация не корректна"));
        assert_eq!(doctor, before);
    }

    #[test]
    fn edit_does_not_touch_counter() {
        let mut doctor = dto("Иван", "Петров", "Сергеевич", "Терапевт")
            .create_bean()
            .unwrap();
        doctor.formula_count = 4;

        let mut form = DoctorDto::read_bean(&doctor);
        form.specialization = "Хирург".into();
        form.commit(&mut doctor).unwrap();

        assert_eq!(doctor.specialization, "Хирург");
        assert_eq!(doctor.formula_count, 4);
    }

    #[test]
    fn json_shape() {
        let mut doctor = dto("Иван", "Петров", "Сергеевич", "Терапевт")
            .create_bean()
            .unwrap();
        doctor.id = Some(DoctorId(3));
        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["lastName"], "Петров");
        assert_eq!(json["formulaCount"], 0);
        assert_eq!(doctor.formula_summary(), "Иван Петров выписал 0 рецептов.");
    }
}
