use axum::{Router, extract::DefaultBodyLimit, routing::post};

use super::handlers::upload_csv;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload_csv/", post(upload_csv))
        .layer(DefaultBodyLimit::disable())
}
