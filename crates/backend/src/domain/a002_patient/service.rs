use super::repository;
use crate::domain::a003_formula;
use crate::shared::error::ServiceError;
use contracts::domain::a002_patient::aggregate::{Patient, PatientDto, PatientId};
use contracts::domain::common::{AggregateRoot, PersonNameDto};
use contracts::shared::validation::Bindable;
use sea_orm::DatabaseConnection;

/// Создание нового пациента
pub async fn create(db: &DatabaseConnection, dto: &PatientDto) -> Result<Patient, ServiceError> {
    let aggregate = dto.create_bean()?;
    let saved = repository::insert(db, &aggregate).await?;
    tracing::info!("{}: created {:?}", Patient::full_name(), saved.id);
    Ok(saved)
}

/// Обновление существующего пациента
pub async fn update(
    db: &DatabaseConnection,
    id: PatientId,
    dto: &PatientDto,
) -> Result<Patient, ServiceError> {
    dto.validate()?;

    let mut aggregate = get_by_id(db, id).await?;
    dto.write_bean(&mut aggregate);

    let saved = repository::update(db, id, &aggregate).await?;
    tracing::info!("{}: updated {:?}", Patient::full_name(), id);
    Ok(saved)
}

pub async fn save(db: &DatabaseConnection, patient: Patient) -> Result<Patient, ServiceError> {
    let dto = PatientDto::read_bean(&patient);
    match patient.id {
        Some(id) => update(db, id, &dto).await,
        None => create(db, &dto).await,
    }
}

/// Удаление пациента без рецептов
pub async fn delete(db: &DatabaseConnection, id: PatientId) -> Result<(), ServiceError> {
    let used_by = a003_formula::repository::count_by_patient(db, id).await?;
    if used_by > 0 {
        return Err(ServiceError::ReferentialIntegrity(format!(
            "patient {} is referenced by {} formulas",
            id.value(),
            used_by
        )));
    }

    if repository::delete(db, id).await? {
        tracing::info!("{}: deleted {:?}", Patient::full_name(), id);
        Ok(())
    } else {
        Err(ServiceError::NotFound(Patient::element_name().into()))
    }
}

pub async fn get_by_id(db: &DatabaseConnection, id: PatientId) -> Result<Patient, ServiceError> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(Patient::element_name().into()))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Patient>, ServiceError> {
    Ok(repository::list_all(db).await?)
}

fn test_patient(name: &str, last_name: &str, patronymic: &str, phone_number: &str) -> PatientDto {
    PatientDto {
        person: PersonNameDto {
            name: name.into(),
            last_name: last_name.into(),
            patronymic: patronymic.into(),
        },
        phone_number: phone_number.into(),
    }
}

/// Вставка тестовых данных
pub async fn insert_test_data(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let data = vec![
        test_patient("Анна", "Васильева", "Игоревна", "+7 (904) 330-28-66"),
        test_patient("Пётр", "Соколов", "Ильич", "89043302866"),
        test_patient("Елена", "Морозова", "Павловна", "+7 912 000-11-22"),
    ];

    for dto in data {
        create(db, &dto).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::open_test_database;

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let (_dir, db) = open_test_database().await;
        let dto = test_patient("Анна", "Васильева", "Игоревна", "123");

        let err = create(&db, &dto).await.unwrap_err();

        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.message_for("phoneNumber"), Some("Невалидный номер"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_through_save_persists_trimmed_values() {
        let (_dir, db) = open_test_database().await;
        insert_test_data(&db).await.unwrap();

        let mut patient = get_by_id(&db, PatientId(1)).await.unwrap();
        patient.person.last_name = "  Кузнецова ".into();
        save(&db, patient).await.unwrap();

        let reloaded = get_by_id(&db, PatientId(1)).await.unwrap();
        assert_eq!(reloaded.person.last_name, "Кузнецова");
        assert_eq!(reloaded.phone_number, "+7 (904) 330-28-66");
    }

    #[tokio::test]
    async fn delete_of_missing_patient_is_not_found() {
        let (_dir, db) = open_test_database().await;
        assert!(matches!(
            delete(&db, PatientId(7)).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
