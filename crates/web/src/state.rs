use axum::extract::FromRef;
use raffle_storage::Database;

use crate::features::winners::services::WinnerImportMode;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub winner_import_mode: WinnerImportMode,
}

impl AppState {
    pub fn new(db: Database, winner_import_mode: WinnerImportMode) -> Self {
        Self {
            db,
            winner_import_mode,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for WinnerImportMode {
    fn from_ref(state: &AppState) -> Self {
        state.winner_import_mode
    }
}
