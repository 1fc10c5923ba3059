use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use medstock_inventory::InventoryStore;

use crate::app::dto::{self, MedicineFields};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/list", get(list_medicines))
        .route("/add", post(add_medicine))
}

pub async fn list_medicines(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn add_medicine(
    Extension(services): Extension<Arc<AppServices>>,
    MedicineFields(form): MedicineFields,
) -> axum::response::Response {
    match services.store().insert(&form) {
        Ok(medicine) => (
            StatusCode::OK,
            Json(dto::AddMedicineResponse {
                message: dto::MEDICINE_ADDED,
                medicine,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "add medicine rejected");
            errors::store_error_to_response(e)
        }
    }
}
