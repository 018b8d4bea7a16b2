use chrono::NaiveDate;
use contracts::domain::a001_doctor::aggregate::DoctorId;
use contracts::domain::a002_patient::aggregate::PatientId;
use contracts::domain::a003_formula::aggregate::{Formula, FormulaId};
use contracts::enums::FormulaPriority;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_formula")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    /// Код приоритета, см. `FormulaPriority::code`
    pub priority: String,
    pub doctor_id: i64,
    pub patient_id: Option<i64>,
    pub creation_date: NaiveDate,
    pub validity_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Formula {
    fn from(m: Model) -> Self {
        let priority = FormulaPriority::from_code(&m.priority).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown priority '{}' in formula {}, using normal",
                m.priority,
                m.id
            );
            FormulaPriority::Normal
        });

        Formula {
            id: Some(FormulaId(m.id)),
            description: m.description,
            priority,
            doctor_id: DoctorId(m.doctor_id),
            patient_id: m.patient_id.map(PatientId),
            creation_date: m.creation_date,
            validity_date: m.validity_date,
        }
    }
}

fn active_model(aggregate: &Formula) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        description: Set(aggregate.description.clone()),
        priority: Set(aggregate.priority.code().to_string()),
        doctor_id: Set(aggregate.doctor_id.value()),
        patient_id: Set(aggregate.patient_id.map(|p| p.value())),
        creation_date: Set(aggregate.creation_date),
        validity_date: Set(aggregate.validity_date),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Formula>, DbErr> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: FormulaId) -> Result<Option<Formula>, DbErr> {
    let result = Entity::find_by_id(id.value()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Formula) -> Result<Formula, DbErr> {
    Ok(active_model(aggregate).insert(db).await?.into())
}

pub async fn update<C: ConnectionTrait>(db: &C, id: FormulaId, aggregate: &Formula) -> Result<Formula, DbErr> {
    let mut active = active_model(aggregate);
    active.id = Set(id.value());
    Ok(active.update(db).await?.into())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: FormulaId) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.value()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Количество рецептов, выписанных доктором
pub async fn count_by_doctor<C: ConnectionTrait>(db: &C, id: DoctorId) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::DoctorId.eq(id.value()))
        .count(db)
        .await
}

/// Количество рецептов пациента
pub async fn count_by_patient<C: ConnectionTrait>(db: &C, id: PatientId) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::PatientId.eq(id.value()))
        .count(db)
        .await
}
