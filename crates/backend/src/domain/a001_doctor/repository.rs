use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorId};
use contracts::domain::common::PersonName;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::NotSet, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_doctor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub patronymic: String,
    pub specialization: String,
    pub formula_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Doctor {
    fn from(m: Model) -> Self {
        Doctor {
            id: Some(DoctorId(m.id)),
            person: PersonName {
                name: m.name,
                last_name: m.last_name,
                patronymic: m.patronymic,
            },
            specialization: m.specialization,
            formula_count: m.formula_count,
        }
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Doctor>, DbErr> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: DoctorId) -> Result<Option<Doctor>, DbErr> {
    let result = Entity::find_by_id(id.value()).one(db).await?;
    Ok(result.map(Into::into))
}

/// Новый доктор всегда начинает с нулевым счётчиком рецептов
pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Doctor) -> Result<Doctor, DbErr> {
    let active = ActiveModel {
        id: NotSet,
        name: Set(aggregate.person.name.clone()),
        last_name: Set(aggregate.person.last_name.clone()),
        patronymic: Set(aggregate.person.patronymic.clone()),
        specialization: Set(aggregate.specialization.clone()),
        formula_count: Set(0),
    };
    Ok(active.insert(db).await?.into())
}

/// Счётчик рецептов не перезаписывается при редактировании
pub async fn update<C: ConnectionTrait>(db: &C, id: DoctorId, aggregate: &Doctor) -> Result<Doctor, DbErr> {
    let active = ActiveModel {
        id: Set(id.value()),
        name: Set(aggregate.person.name.clone()),
        last_name: Set(aggregate.person.last_name.clone()),
        patronymic: Set(aggregate.person.patronymic.clone()),
        specialization: Set(aggregate.specialization.clone()),
        formula_count: NotSet,
    };
    Ok(active.update(db).await?.into())
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: DoctorId) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.value()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Увеличить счётчик рецептов на единицу на стороне БД
pub async fn increment_formula_count<C: ConnectionTrait>(db: &C, id: DoctorId) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::FormulaCount, Expr::col(Column::FormulaCount).add(1))
        .filter(Column::Id.eq(id.value()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
