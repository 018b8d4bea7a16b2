use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Doctor handlers
        .route(
            "/api/doctor",
            get(handlers::a001_doctor::list_all).post(handlers::a001_doctor::upsert),
        )
        .route(
            "/api/doctor/testdata",
            post(handlers::a001_doctor::insert_test_data),
        )
        .route(
            "/api/doctor/:id",
            get(handlers::a001_doctor::get_by_id).delete(handlers::a001_doctor::delete),
        )
        // A002 Patient handlers
        .route(
            "/api/patient",
            get(handlers::a002_patient::list_all).post(handlers::a002_patient::upsert),
        )
        .route(
            "/api/patient/testdata",
            post(handlers::a002_patient::insert_test_data),
        )
        .route(
            "/api/patient/:id",
            get(handlers::a002_patient::get_by_id).delete(handlers::a002_patient::delete),
        )
        // A003 Formula handlers
        .route(
            "/api/formula",
            get(handlers::a003_formula::list_all).post(handlers::a003_formula::upsert),
        )
        .route(
            "/api/formula/testdata",
            post(handlers::a003_formula::insert_test_data),
        )
        .route(
            "/api/formula/:id",
            get(handlers::a003_formula::get_by_id).delete(handlers::a003_formula::delete),
        )
}
