use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{INSERT_CHUNK_SIZE, ParticipantStore};
use crate::dto::participant::CreateParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::Participant;

/// Repository for Participant database operations
pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    /// Create a new ParticipantRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for ParticipantRepository<'_> {
    /// Create a new participant
    async fn insert(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (name, designation)
            VALUES ($1, $2)
            RETURNING id, name, designation, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.designation)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_database)?;

        Ok(participant)
    }

    /// Create many participants inside a single transaction
    async fn insert_many(&self, reqs: &[CreateParticipantRequest]) -> Result<u64> {
        if reqs.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in reqs.chunks(INSERT_CHUNK_SIZE) {
            let mut builder =
                QueryBuilder::<Postgres>::new("INSERT INTO participants (name, designation) ");
            builder.push_values(chunk, |mut row, req| {
                row.push_bind(req.name.clone())
                    .push_bind(req.designation.clone());
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from_database)?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }

    /// List all participants
    async fn list(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, designation, created_at
            FROM participants
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    /// Get a participant by ID
    async fn find_by_id(&self, id: i64) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, designation, created_at
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Delete a participant by ID
    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM participants")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
