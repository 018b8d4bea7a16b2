use super::repository;
use crate::domain::a003_formula;
use crate::shared::error::ServiceError;
use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorDto, DoctorId};
use contracts::domain::common::{AggregateRoot, PersonNameDto};
use contracts::shared::validation::Bindable;
use sea_orm::DatabaseConnection;

/// Создание нового доктора
pub async fn create(db: &DatabaseConnection, dto: &DoctorDto) -> Result<Doctor, ServiceError> {
    let aggregate = dto.create_bean()?;
    let saved = repository::insert(db, &aggregate).await?;
    tracing::info!("{}: created {:?}", Doctor::full_name(), saved.id);
    Ok(saved)
}

/// Обновление существующего доктора
pub async fn update(
    db: &DatabaseConnection,
    id: DoctorId,
    dto: &DoctorDto,
) -> Result<Doctor, ServiceError> {
    dto.validate()?;

    let mut aggregate = get_by_id(db, id).await?;
    dto.write_bean(&mut aggregate);

    let saved = repository::update(db, id, &aggregate).await?;
    tracing::info!("{}: updated {:?}", Doctor::full_name(), id);
    Ok(saved)
}

/// Сохранение записи из API: без ID создаётся новая запись
pub async fn save(db: &DatabaseConnection, doctor: Doctor) -> Result<Doctor, ServiceError> {
    let dto = DoctorDto::read_bean(&doctor);
    match doctor.id {
        Some(id) => update(db, id, &dto).await,
        None => create(db, &dto).await,
    }
}

/// Удаление доктора, на которого не ссылается ни один рецепт
pub async fn delete(db: &DatabaseConnection, id: DoctorId) -> Result<(), ServiceError> {
    let used_by = a003_formula::repository::count_by_doctor(db, id).await?;
    if used_by > 0 {
        return Err(ServiceError::ReferentialIntegrity(format!(
            "doctor {} is referenced by {} formulas",
            id.value(),
            used_by
        )));
    }

    if repository::delete(db, id).await? {
        tracing::info!("{}: deleted {:?}", Doctor::full_name(), id);
        Ok(())
    } else {
        Err(ServiceError::NotFound(Doctor::element_name().into()))
    }
}

/// Получение доктора по ID
pub async fn get_by_id(db: &DatabaseConnection, id: DoctorId) -> Result<Doctor, ServiceError> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(Doctor::element_name().into()))
}

/// Получение списка всех докторов в порядке ID
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Doctor>, ServiceError> {
    Ok(repository::list_all(db).await?)
}

fn test_doctor(name: &str, last_name: &str, patronymic: &str, specialization: &str) -> DoctorDto {
    DoctorDto {
        person: PersonNameDto {
            name: name.into(),
            last_name: last_name.into(),
            patronymic: patronymic.into(),
        },
        specialization: specialization.into(),
    }
}

/// Вставка тестовых данных
pub async fn insert_test_data(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let data = vec![
        test_doctor("Иван", "Петров", "Сергеевич", "Терапевт"),
        test_doctor("Ольга", "Смирнова", "Андреевна", "Кардиолог"),
        test_doctor("Михаил", "Кузнецов", "Олегович", "Хирург"),
    ];

    for dto in data {
        create(db, &dto).await?;
    }

    Ok(())
}
