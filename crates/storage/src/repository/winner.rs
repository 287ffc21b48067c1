use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{INSERT_CHUNK_SIZE, WinnerStore};
use crate::dto::winner::CreateWinnerRequest;
use crate::error::{Result, StorageError};
use crate::models::Winner;

pub struct WinnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WinnerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WinnerStore for WinnerRepository<'_> {
    async fn insert(&self, req: &CreateWinnerRequest) -> Result<Winner> {
        let winner = sqlx::query_as::<_, Winner>(
            r#"
            INSERT INTO winners (name, designation)
            VALUES ($1, $2)
            RETURNING id, name, designation, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.designation)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_database)?;

        Ok(winner)
    }

    async fn insert_many(&self, reqs: &[CreateWinnerRequest]) -> Result<u64> {
        if reqs.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in reqs.chunks(INSERT_CHUNK_SIZE) {
            let mut builder =
                QueryBuilder::<Postgres>::new("INSERT INTO winners (name, designation) ");
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

    async fn list(&self) -> Result<Vec<Winner>> {
        let winners = sqlx::query_as::<_, Winner>(
            r#"
            SELECT id, name, designation, created_at
            FROM winners
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(winners)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM winners")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM winners")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
