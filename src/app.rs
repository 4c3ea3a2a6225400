use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/devotional", get(handlers::get_devotional))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/checklist/toggle", post(handlers::toggle_item))
        .route("/api/complete", post(handlers::complete))
        .with_state(state)
}
