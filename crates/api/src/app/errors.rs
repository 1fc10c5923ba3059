use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use medstock_inventory::StoreError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Invalid(e) if e.is_validation() => {
            json_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        other => {
            error!(error = %other, "inventory store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
