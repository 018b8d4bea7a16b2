use contracts::domain::a002_patient::aggregate::{Patient, PatientId};
use contracts::domain::common::PersonName;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_patient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub patronymic: String,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Patient {
    fn from(m: Model) -> Self {
        Patient {
            id: Some(PatientId(m.id)),
            person: PersonName {
                name: m.name,
                last_name: m.last_name,
                patronymic: m.patronymic,
            },
            phone_number: m.phone_number,
        }
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Patient>, DbErr> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: PatientId) -> Result<Option<Patient>, DbErr> {
    let result = Entity::find_by_id(id.value()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Patient) -> Result<Patient, DbErr> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(aggregate.person.name.clone()),
        last_name: Set(aggregate.person.last_name.clone()),
        patronymic: Set(aggregate.person.patronymic.clone()),
        phone_number: Set(aggregate.phone_number.clone()),
    };
    Ok(active.insert(db).await?.into())
}

pub async fn update<C: ConnectionTrait>(db: &C, id: PatientId, aggregate: &Patient) -> Result<Patient, DbErr> {
    let active = ActiveModel {
        id: Set(id.value()),
        name: Set(aggregate.person.name.clone()),
        last_name: Set(aggregate.person.last_name.clone()),
        patronymic: Set(aggregate.person.patronymic.clone()),
        phone_number: Set(aggregate.phone_number.clone()),
    };
    Ok(active.update(db).await?.into())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: PatientId) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.value()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
