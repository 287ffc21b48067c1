use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use parking_lot::Mutex;

use super::{ParticipantStore, WinnerStore};
use crate::dto::participant::CreateParticipantRequest;
use crate::dto::winner::CreateWinnerRequest;
use crate::error::{Result, StorageError};
use crate::models::{Participant, Winner};

/// Process-local Record Store. Ids start at 1 and are never reused, matching
/// the `BIGSERIAL` columns of the Postgres backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    participants: Mutex<Table<Participant>>,
    winners: Mutex<Table<Winner>>,
}

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn insert(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let mut table = self.participants.lock();
        let participant = Participant {
            id: table.allocate_id(),
            name: req.name.clone(),
            designation: req.designation.clone(),
            created_at: now(),
        };
        table.rows.push(participant.clone());

        Ok(participant)
    }

    async fn insert_many(&self, reqs: &[CreateParticipantRequest]) -> Result<u64> {
        let mut table = self.participants.lock();
        let created_at = now();
        for req in reqs {
            let id = table.allocate_id();
            table.rows.push(Participant {
                id,
                name: req.name.clone(),
                designation: req.designation.clone(),
                created_at,
            });
        }

        Ok(reqs.len() as u64)
    }

    async fn list(&self) -> Result<Vec<Participant>> {
        Ok(self.participants.lock().rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Participant> {
        self.participants
            .lock()
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.participants.lock();
        let position = table
            .rows
            .iter()
            .position(|p| p.id == id)
            .ok_or(StorageError::NotFound)?;
        table.rows.remove(position);

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.participants.lock().rows.len() as i64)
    }
}

#[async_trait]
impl WinnerStore for MemoryStore {
    async fn insert(&self, req: &CreateWinnerRequest) -> Result<Winner> {
        let mut table = self.winners.lock();
        let winner = Winner {
            id: table.allocate_id(),
            name: req.name.clone(),
            designation: req.designation.clone(),
            created_at: now(),
        };
        table.rows.push(winner.clone());

        Ok(winner)
    }

    async fn insert_many(&self, reqs: &[CreateWinnerRequest]) -> Result<u64> {
        let mut table = self.winners.lock();
        let created_at = now();
        for req in reqs {
            let id = table.allocate_id();
            table.rows.push(Winner {
                id,
                name: req.name.clone(),
                designation: req.designation.clone(),
                created_at,
            });
        }

        Ok(reqs.len() as u64)
    }

    async fn list(&self) -> Result<Vec<Winner>> {
        Ok(self.winners.lock().rows.clone())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut table = self.winners.lock();
        let removed = table.rows.len() as u64;
        table.rows.clear();

        Ok(removed)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.winners.lock().rows.len() as i64)
    }
}
