use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_formula::aggregate::{Formula, FormulaId};

use crate::domain::a003_formula;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

/// GET /api/formula
pub async fn list_all() -> Result<Json<Vec<Formula>>, ServiceError> {
    a003_formula::service::list_all(get_connection())
        .await
        .map(Json)
}

/// GET /api/formula/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Formula>, ServiceError> {
    a003_formula::service::get_by_id(get_connection(), FormulaId(id))
        .await
        .map(Json)
}

/// POST /api/formula
///
/// Новый рецепт увеличивает счётчик рецептов доктора
pub async fn upsert(Json(formula): Json<Formula>) -> Result<Json<Formula>, ServiceError> {
    a003_formula::service::save(get_connection(), formula)
        .await
        .map(Json)
}

/// DELETE /api/formula/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ServiceError> {
    a003_formula::service::delete(get_connection(), FormulaId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/formula/testdata
pub async fn insert_test_data() -> Result<StatusCode, ServiceError> {
    a003_formula::service::insert_test_data(get_connection()).await?;
    Ok(StatusCode::OK)
}
