//! Record Store contract and its backends.
//!
//! Each entity has its own collection. Inserts assign `id` and `created_at`;
//! `insert_many` commits every row or none of them.

use async_trait::async_trait;

use crate::dto::participant::CreateParticipantRequest;
use crate::dto::winner::CreateWinnerRequest;
use crate::error::Result;
use crate::models::{Participant, Winner};

pub mod memory;
pub mod participant;
pub mod winner;

pub use memory::MemoryStore;
pub use participant::ParticipantRepository;
pub use winner::WinnerRepository;

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn insert(&self, req: &CreateParticipantRequest) -> Result<Participant>;

    /// Returns the number of rows stored
    async fn insert_many(&self, reqs: &[CreateParticipantRequest]) -> Result<u64>;

    /// All participants in insertion order
    async fn list(&self) -> Result<Vec<Participant>>;

    async fn find_by_id(&self, id: i64) -> Result<Participant>;

    async fn delete(&self, id: i64) -> Result<()>;

    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait WinnerStore: Send + Sync {
    async fn insert(&self, req: &CreateWinnerRequest) -> Result<Winner>;

    /// Returns the number of rows stored
    async fn insert_many(&self, reqs: &[CreateWinnerRequest]) -> Result<u64>;

    /// All winners in insertion order
    async fn list(&self) -> Result<Vec<Winner>>;

    /// Returns the number of rows removed
    async fn delete_all(&self) -> Result<u64>;

    async fn count(&self) -> Result<i64>;
}

#[async_trait]
impl<T: ParticipantStore + ?Sized> ParticipantStore for &T {
    async fn insert(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        (**self).insert(req).await
    }

    async fn insert_many(&self, reqs: &[CreateParticipantRequest]) -> Result<u64> {
        (**self).insert_many(reqs).await
    }

    async fn list(&self) -> Result<Vec<Participant>> {
        (**self).list().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Participant> {
        (**self).find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        (**self).delete(id).await
    }

    async fn count(&self) -> Result<i64> {
        (**self).count().await
    }
}

#[async_trait]
impl<T: WinnerStore + ?Sized> WinnerStore for &T {
    async fn insert(&self, req: &CreateWinnerRequest) -> Result<Winner> {
        (**self).insert(req).await
    }

    async fn insert_many(&self, reqs: &[CreateWinnerRequest]) -> Result<u64> {
        (**self).insert_many(reqs).await
    }

    async fn list(&self) -> Result<Vec<Winner>> {
        (**self).list().await
    }

    async fn delete_all(&self) -> Result<u64> {
        (**self).delete_all().await
    }

    async fn count(&self) -> Result<i64> {
        (**self).count().await
    }
}

/// Rows per multi-row `INSERT`, well under the Postgres bind parameter limit
pub(crate) const INSERT_CHUNK_SIZE: usize = 1000;
