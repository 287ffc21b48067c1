use anyhow::Context;
use raffle_storage::Database;
use utoipa::OpenApi;

mod app;
mod config;
mod error;
mod features;
mod state;

use config::Config;
use features::{participants, uploads, winners};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::create_participant,
        participants::handlers::delete_participant,
        uploads::handlers::upload_csv,
        winners::handlers::list_winners,
        winners::handlers::save_winners,
        winners::handlers::delete_all_winners,
    ),
    components(
        schemas(
            raffle_storage::dto::participant::CreateParticipantRequest,
            raffle_storage::dto::participant::ParticipantResponse,
            raffle_storage::dto::upload::UploadResponse,
            raffle_storage::dto::upload::UploadCsvForm,
            raffle_storage::dto::winner::CreateWinnerRequest,
            raffle_storage::dto::winner::SaveWinnersRequest,
            raffle_storage::dto::winner::SaveWinnersResponse,
            raffle_storage::dto::winner::DeleteWinnersResponse,
            raffle_storage::dto::winner::InvalidWinnerResponse,
            raffle_storage::dto::winner::WinnerResponse,
            raffle_storage::dto::common::ErrorResponse,
            raffle_storage::dto::common::ValidationErrorResponse,
            raffle_storage::dto::common::FieldErrors,
        )
    ),
    tags(
        (name = "participants", description = "Participant records and CSV import"),
        (name = "winners", description = "Drawing outcomes recorded by the client"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting raffle records API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match &config.database_url {
        Some(database_url) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            Database::with_max_connections(database_url, config.database_max_connections)
                .await
                .context("Failed to initialize database")?
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, records are kept in memory only");
            Database::in_memory()
        }
    };
    tracing::info!("Record store ready ({})", db.backend_name());

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    tracing::info!(mode = ?config.winner_import_mode, "Winner import mode");

    let cors = app::cors_layer(&config.cors_allowed_origins)?;
    let app = app::router(AppState::new(db, config.winner_import_mode), cors);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
