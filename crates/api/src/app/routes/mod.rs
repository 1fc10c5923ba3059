use axum::Router;

pub mod catalog;
pub mod medicine;
pub mod system;

/// Router for all application endpoints (everything except `/health`).
pub fn router() -> Router {
    Router::new()
        .nest("/medicine", medicine::router())
        .nest("/catalog", catalog::router())
}
