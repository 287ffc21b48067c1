use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers::{delete_all_winners, list_winners, save_winners};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/winners/", get(list_winners).post(save_winners))
        .route("/winners/delete-all/", delete(delete_all_winners))
}
