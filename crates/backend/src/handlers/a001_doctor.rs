use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorId};

use crate::domain::a001_doctor;
use crate::shared::data::db::get_connection;
use crate::shared::error::ServiceError;

/// GET /api/doctor
pub async fn list_all() -> Result<Json<Vec<Doctor>>, ServiceError> {
    a001_doctor::service::list_all(get_connection())
        .await
        .map(Json)
}

/// GET /api/doctor/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Doctor>, ServiceError> {
    a001_doctor::service::get_by_id(get_connection(), DoctorId(id))
        .await
        .map(Json)
}

/// POST /api/doctor
pub async fn upsert(Json(doctor): Json<Doctor>) -> Result<Json<Doctor>, ServiceError> {
    a001_doctor::service::save(get_connection(), doctor)
        .await
        .map(Json)
}

/// DELETE /api/doctor/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ServiceError> {
    a001_doctor::service::delete(get_connection(), DoctorId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/doctor/testdata
pub async fn insert_test_data() -> Result<StatusCode, ServiceError> {
    a001_doctor::service::insert_test_data(get_connection()).await?;
    Ok(StatusCode::OK)
}
