use super::repository;
use crate::domain::{a001_doctor, a002_patient};
use crate::shared::error::ServiceError;
use chrono::{Duration, Local};
use contracts::domain::a003_formula::aggregate::{Formula, FormulaDto, FormulaId};
use contracts::domain::common::AggregateRoot;
use contracts::enums::FormulaPriority;
use contracts::shared::validation::{Bindable, ValidationErrors};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

/// Ссылки рецепта должны указывать на существующие записи
async fn check_references<C: ConnectionTrait>(db: &C, formula: &Formula) -> Result<(), ServiceError> {
    if a001_doctor::repository::get_by_id(db, formula.doctor_id)
        .await?
        .is_none()
    {
        return Err(ValidationErrors::single("doctorId", "Врач не найден").into());
    }
    if let Some(patient_id) = formula.patient_id {
        if a002_patient::repository::get_by_id(db, patient_id)
            .await?
            .is_none()
        {
            return Err(ValidationErrors::single("patientId", "Пациент не найден").into());
        }
    }
    Ok(())
}

/// Создание рецепта.
///
/// Вставка рецепта и увеличение счётчика доктора выполняются в одной
/// транзакции: либо применяются оба изменения, либо ни одного.
pub async fn create(db: &DatabaseConnection, dto: &FormulaDto) -> Result<Formula, ServiceError> {
    let aggregate = dto.create_bean()?;

    let txn = db.begin().await?;
    check_references(&txn, &aggregate).await?;
    let saved = repository::insert(&txn, &aggregate).await?;
    a001_doctor::repository::increment_formula_count(&txn, aggregate.doctor_id).await?;
    txn.commit().await?;

    tracing::info!(
        "{}: created {:?} for doctor {:?}",
        Formula::full_name(),
        saved.id,
        saved.doctor_id
    );
    Ok(saved)
}

/// Обновление рецепта; счётчики докторов не пересчитываются
pub async fn update(
    db: &DatabaseConnection,
    id: FormulaId,
    dto: &FormulaDto,
) -> Result<Formula, ServiceError> {
    dto.validate()?;

    let mut aggregate = get_by_id(db, id).await?;
    dto.write_bean(&mut aggregate);
    check_references(db, &aggregate).await?;

    let saved = repository::update(db, id, &aggregate).await?;
    tracing::info!("{}: updated {:?}", Formula::full_name(), id);
    Ok(saved)
}

pub async fn save(db: &DatabaseConnection, formula: Formula) -> Result<Formula, ServiceError> {
    let dto = FormulaDto::read_bean(&formula);
    match formula.id {
        Some(id) => update(db, id, &dto).await,
        None => create(db, &dto).await,
    }
}

pub async fn delete(db: &DatabaseConnection, id: FormulaId) -> Result<(), ServiceError> {
    if repository::delete(db, id).await? {
        tracing::info!("{}: deleted {:?}", Formula::full_name(), id);
        Ok(())
    } else {
        Err(ServiceError::NotFound(Formula::element_name().into()))
    }
}

pub async fn get_by_id(db: &DatabaseConnection, id: FormulaId) -> Result<Formula, ServiceError> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(Formula::element_name().into()))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Formula>, ServiceError> {
    Ok(repository::list_all(db).await?)
}

/// Вставка тестовых данных; при пустых справочниках сначала заполняет их
pub async fn insert_test_data(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let mut doctors = a001_doctor::service::list_all(db).await?;
    if doctors.is_empty() {
        a001_doctor::service::insert_test_data(db).await?;
        doctors = a001_doctor::service::list_all(db).await?;
    }
    let mut patients = a002_patient::service::list_all(db).await?;
    if patients.is_empty() {
        a002_patient::service::insert_test_data(db).await?;
        patients = a002_patient::service::list_all(db).await?;
    }

    let today = Local::now().date_naive();
    let data = [
        ("Аспирин 100 мг, 1 раз в день", FormulaPriority::Normal, 30),
        ("Амоксициллин 500 мг, 3 раза в день", FormulaPriority::Urgent, 7),
        ("Нитроглицерин под язык", FormulaPriority::Immediate, 1),
    ];

    for (i, (description, priority, days)) in data.into_iter().enumerate() {
        let dto = FormulaDto {
            description: description.into(),
            priority: Some(priority),
            doctor_id: doctors.get(i % doctors.len()).and_then(|d| d.id),
            patient_id: patients.get(i % patients.len()).and_then(|p| p.id),
            creation_date: Some(today),
            validity_date: Some(today + Duration::days(days)),
        };
        create(db, &dto).await?;
    }

    Ok(())
}
