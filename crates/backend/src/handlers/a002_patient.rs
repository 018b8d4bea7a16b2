use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_patient::aggregate::{Patient, PatientId};

use crate::domain::a002_patient;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

/// GET /api/patient
pub async fn list_all() -> Result<Json<Vec<Patient>>, ServiceError> {
    a002_patient::service::list_all(get_connection())
        .await
        .map(Json)
}

/// GET /api/patient/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Patient>, ServiceError> {
    a002_patient::service::get_by_id(get_connection(), PatientId(id))
        .await
        .map(Json)
}

/// POST /api/patient
pub async fn upsert(Json(patient): Json<Patient>) -> Result<Json<Patient>, ServiceError> {
    a002_patient::service::save(get_connection(), patient)
        .await
        .map(Json)
}

/// DELETE /api/patient/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ServiceError> {
    a002_patient::service::delete(get_connection(), PatientId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/patient/testdata
pub async fn insert_test_data() -> Result<StatusCode, ServiceError> {
    a002_patient::service::insert_test_data(get_connection()).await?;
    Ok(StatusCode::OK)
}
