pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::Result;
use crate::repository::{
    MemoryStore, ParticipantRepository, ParticipantStore, WinnerRepository, WinnerStore,
};

/// Handle to the Record Store, cloned into every request.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory(Arc<MemoryStore>),
}

impl Database {
    /// Connect to Postgres
    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self {
            backend: Backend::Postgres(pool),
        })
    }

    /// Volatile store living as long as the process
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// Apply embedded migrations. No-op for the in-memory backend.
    pub async fn run_migrations(&self) -> Result<()> {
        if let Backend::Postgres(pool) = &self.backend {
            sqlx::migrate!("./migrations").run(pool).await?;
        }

        Ok(())
    }

    pub fn participants(&self) -> Box<dyn ParticipantStore + '_> {
        match &self.backend {
            Backend::Postgres(pool) => Box::new(ParticipantRepository::new(pool)),
            Backend::Memory(store) => Box::new(&**store),
        }
    }

    pub fn winners(&self) -> Box<dyn WinnerStore + '_> {
        match &self.backend {
            Backend::Postgres(pool) => Box::new(WinnerRepository::new(pool)),
            Backend::Memory(store) => Box::new(&**store),
        }
    }
}
