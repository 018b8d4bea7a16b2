//! Тестовый адаптер: хранилище SQLite за общим трейтом `Repository`.
//!
//! Позволяет вести `GridController` прямо над базой, минуя HTTP.
//! Собирается только для тестов.

use std::marker::PhantomData;

use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorId};
use contracts::domain::a002_patient::aggregate::{Patient, PatientId};
use contracts::domain::a003_formula::aggregate::{Formula, FormulaId};
use contracts::shared::grid::{Repository, RepositoryError};
use sea_orm::DatabaseConnection;

use crate::domain::{a001_doctor, a002_patient, a003_formula};
use crate::shared::error::ServiceError;

pub struct DbRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> DbRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl From<ServiceError> for RepositoryError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => RepositoryError::Rejected(errors),
            ServiceError::ReferentialIntegrity(reason) => RepositoryError::ReferentialIntegrity(reason),
            ServiceError::NotFound(_) => RepositoryError::NotFound,
            ServiceError::Database(err) => RepositoryError::Other(err.to_string()),
        }
    }
}

impl Repository<Doctor> for DbRepository<Doctor> {
    async fn find_all(&self) -> Result<Vec<Doctor>, RepositoryError> {
        Ok(a001_doctor::service::list_all(&self.db).await?)
    }

    async fn save(&self, entity: Doctor) -> Result<Doctor, RepositoryError> {
        Ok(a001_doctor::service::save(&self.db, entity).await?)
    }

    async fn delete_by_id(&self, id: DoctorId) -> Result<(), RepositoryError> {
        Ok(a001_doctor::service::delete(&self.db, id).await?)
    }
}

impl Repository<Patient> for DbRepository<Patient> {
    async fn find_all(&self) -> Result<Vec<Patient>, RepositoryError> {
        Ok(a002_patient::service::list_all(&self.db).await?)
    }

    async fn save(&self, entity: Patient) -> Result<Patient, RepositoryError> {
        Ok(a002_patient::service::save(&self.db, entity).await?)
    }

    async fn delete_by_id(&self, id: PatientId) -> Result<(), RepositoryError> {
        Ok(a002_patient::service::delete(&self.db, id).await?)
    }
}

impl Repository<Formula> for DbRepository<Formula> {
    async fn find_all(&self) -> Result<Vec<Formula>, RepositoryError> {
        Ok(a003_formula::service::list_all(&self.db).await?)
    }

    async fn save(&self, entity: Formula) -> Result<Formula, RepositoryError> {
        Ok(a003_formula::service::save(&self.db, entity).await?)
    }

    async fn delete_by_id(&self, id: FormulaId) -> Result<(), RepositoryError> {
        Ok(a003_formula::service::delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::open_test_database;
    use chrono::NaiveDate;
    use contracts::domain::a001_doctor::aggregate::DoctorDto;
    use contracts::domain::a003_formula::aggregate::FormulaDto;
    use contracts::domain::common::PersonNameDto;
    use contracts::enums::FormulaPriority;
    use contracts::shared::grid::{EditState, GridController, GridError, DELETE_BLOCKED_MESSAGE};

    fn doctor_form(name: &str) -> DoctorDto {
        DoctorDto {
            person: PersonNameDto {
                name: name.into(),
                last_name: "Петров".into(),
                patronymic: "Сергеевич".into(),
            },
            specialization: "Терапевт".into(),
        }
    }

    #[tokio::test]
    async fn controller_over_sqlite_keeps_referenced_doctor() {
        let (_dir, db) = open_test_database().await;
        let doctors = GridController::<Doctor, _>::load(DbRepository::<Doctor>::new(db.clone()))
            .await
            .unwrap();
        let formulas = GridController::<Formula, _>::load(DbRepository::<Formula>::new(db.clone()))
            .await
            .unwrap();

        doctors.create(&doctor_form("Иван")).await.unwrap();
        doctors.create(&doctor_form("Ольга")).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1);
        formulas
            .create(&FormulaDto {
                description: "Аспирин".into(),
                priority: Some(FormulaPriority::Normal),
                doctor_id: Some(DoctorId(1)),
                patient_id: None,
                creation_date: day,
                validity_date: day,
            })
            .await
            .unwrap();

        doctors.refresh().await.unwrap();
        let before = doctors.rows();
        assert_eq!(before[0].formula_count, 1);

        doctors.begin_edit(DoctorId(1)).unwrap();
        let err = doctors.delete(DoctorId(1)).await.unwrap_err();

        assert_eq!(err, GridError::ReferentialIntegrity);
        assert_eq!(err.to_string(), DELETE_BLOCKED_MESSAGE);
        assert_eq!(doctors.edit_state(), EditState::Idle);
        doctors.refresh().await.unwrap();
        assert_eq!(doctors.rows(), before);

        doctors.delete(DoctorId(2)).await.unwrap();
        assert_eq!(doctors.rows().len(), 1);
    }

    #[tokio::test]
    async fn server_side_validation_reaches_controller() {
        let (_dir, db) = open_test_database().await;
        let repo = DbRepository::<Doctor>::new(db);

        let mut doctor = Doctor::new_for_insert(Default::default(), "Терапевт");
        doctor.person.name = "Ив".into();
        let err = repo.save(doctor).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Rejected(_)));
    }
}
