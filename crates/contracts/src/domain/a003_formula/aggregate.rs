use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_doctor::aggregate::DoctorId;
use crate::domain::a002_patient::aggregate::PatientId;
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::enums::FormulaPriority;
use crate::shared::grid::GridEntity;
use crate::shared::validation::{Bindable, Rule, ValidationErrors};

pub const DESCRIPTION_MIN_LEN: usize = 3;
pub const DESCRIPTION_MAX_LEN: usize = 200;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор рецепта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormulaId(pub i64);

impl FormulaId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for FormulaId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        <i64 as AggregateId>::from_string(s).map(FormulaId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Рецепт
///
/// Порядок дат создания и срока годности не проверяется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub id: Option<FormulaId>,
    pub description: String,
    pub priority: FormulaPriority,
    pub doctor_id: DoctorId,
    pub patient_id: Option<PatientId>,
    pub creation_date: NaiveDate,
    pub validity_date: NaiveDate,
}

impl Formula {
    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }
}

impl AggregateRoot for Formula {
    type Id = FormulaId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "formula"
    }

    fn element_name() -> &'static str {
        "Рецепт"
    }

    fn list_name() -> &'static str {
        "Рецепты"
    }
}

impl GridEntity for Formula {
    type Dto = FormulaDto;
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Форма создания/редактирования рецепта
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormulaDto {
    pub description: String,
    pub priority: Option<FormulaPriority>,
    pub doctor_id: Option<DoctorId>,
    pub patient_id: Option<PatientId>,
    pub creation_date: Option<NaiveDate>,
    pub validity_date: Option<NaiveDate>,
}

/// Значения формы после успешной проверки
struct CheckedFormula {
    priority: FormulaPriority,
    doctor_id: DoctorId,
    creation_date: NaiveDate,
    validity_date: NaiveDate,
}

impl FormulaDto {
    fn check(&self) -> Result<CheckedFormula, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .check(
                "description",
                &self.description,
                &[
                    Rule::Required,
                    Rule::Length {
                        min: DESCRIPTION_MIN_LEN,
                        max: DESCRIPTION_MAX_LEN,
                    },
                ],
                "Описание должно содержать от 3 до 200 символов",
            )
            .require("doctorId", self.doctor_id.as_ref(), "Выберите доктора")
            .require("priority", self.priority.as_ref(), "Выберите приоритет")
            .require_date("creationDate", self.creation_date)
            .require_date("validityDate", self.validity_date);

        match (
            self.priority,
            self.doctor_id,
            self.creation_date,
            self.validity_date,
        ) {
            (Some(priority), Some(doctor_id), Some(creation_date), Some(validity_date))
                if errors.is_empty() =>
            {
                Ok(CheckedFormula {
                    priority,
                    doctor_id,
                    creation_date,
                    validity_date,
                })
            }
            _ => Err(errors),
        }
    }
}

impl Bindable for FormulaDto {
    type Entity = Formula;

    fn read_bean(entity: &Formula) -> Self {
        Self {
            description: entity.description.clone(),
            priority: Some(entity.priority),
            doctor_id: Some(entity.doctor_id),
            patient_id: entity.patient_id,
            creation_date: Some(entity.creation_date),
            validity_date: Some(entity.validity_date),
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.check().map(|_| ())
    }

    fn write_bean(&self, target: &mut Formula) {
        target.set_description(&self.description);
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
        if let Some(doctor_id) = self.doctor_id {
            target.doctor_id = doctor_id;
        }
        target.patient_id = self.patient_id;
        if let Some(date) = self.creation_date {
            target.creation_date = date;
        }
        if let Some(date) = self.validity_date {
            target.validity_date = date;
        }
    }

    fn create_bean(&self) -> Result<Formula, ValidationErrors> {
        let checked = self.check()?;
        let mut formula = Formula {
            id: None,
            description: String::new(),
            priority: checked.priority,
            doctor_id: checked.doctor_id,
            patient_id: self.patient_id,
            creation_date: checked.creation_date,
            validity_date: checked.validity_date,
        };
        formula.set_description(&self.description);
        Ok(formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_dto() -> FormulaDto {
        FormulaDto {
            description: " Аспирин 500 мг ".into(),
            priority: Some(FormulaPriority::Normal),
            doctor_id: Some(DoctorId(1)),
            patient_id: None,
            creation_date: Some(date(2024, 3, 1)),
            validity_date: Some(date(2024, 4, 1)),
        }
    }

    #[test]
    fn create_bean_builds_transient_formula() {
        let formula = valid_dto().create_bean().unwrap();
        assert_eq!(formula.id, None);
        assert_eq!(formula.description, "Аспирин 500 мг");
        assert_eq!(formula.doctor_id, DoctorId(1));
        assert_eq!(formula.patient_id, None);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = FormulaDto::default().create_bean().unwrap_err();
        for field in [
            "description",
            "doctorId",
            "priority",
            "creationDate",
            "validityDate",
        ] {
            assert!(errors.message_for(field).is_some(), "{field} not reported");
        }
        assert!(errors.message_for("patientId").is_none());
    }

    #[test]
    fn description_bounds() {
        let mut dto = valid_dto();
        dto.description = "ab".into();
        assert!(dto.validate().is_err());
        dto.description = "a".repeat(200);
        assert!(dto.validate().is_ok());
        dto.description = "a".repeat(201);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn validity_may_predate_creation() {
        let mut dto = valid_dto();
        dto.validity_date = Some(date(2023, 1, 1));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn json_uses_camel_case_and_iso_dates() {
        let mut formula = valid_dto().create_bean().unwrap();
        formula.id = Some(FormulaId(9));
        let json = serde_json::to_value(&formula).unwrap();
        assert_eq!(json["doctorId"], 1);
        assert_eq!(json["priority"], "normal");
        assert_eq!(json["creationDate"], "2024-03-01");
        assert!(json["patientId"].is_null());
    }
}
