use axum::{Router, routing::get};

use super::handlers::{
    create_participant, delete_participant, get_participant, list_participants,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/participants/", get(list_participants).post(create_participant))
        .route(
            "/participants/:id/",
            get(get_participant).delete(delete_participant),
        )
}
