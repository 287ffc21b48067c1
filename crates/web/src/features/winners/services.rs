use std::str::FromStr;

use raffle_storage::{
    dto::{common::FieldErrors, winner::CreateWinnerRequest},
    error::{Result, StorageError},
    models::Winner,
    repository::WinnerStore,
};
use serde_json::Value;
use thiserror::Error;

/// How a winner batch is committed when one of its items is invalid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WinnerImportMode {
    /// Store items one by one and stop at the first invalid item. Items
    /// before it stay stored.
    #[default]
    Sequential,
    /// Validate every item first, then store all of them or none.
    Atomic,
}

#[derive(Debug, Error)]
#[error("unknown winner import mode `{0}`, expected `sequential` or `atomic`")]
pub struct ParseImportModeError(String);

impl FromStr for WinnerImportMode {
    type Err = ParseImportModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "atomic" => Ok(Self::Atomic),
            other => Err(ParseImportModeError(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum WinnerImportError {
    #[error("Invalid winner at index {index}")]
    Invalid {
        index: usize,
        saved: usize,
        details: FieldErrors,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Validate and store a batch of winners. Returns the number stored.
pub async fn import_winners(
    store: &dyn WinnerStore,
    items: &[Value],
    mode: WinnerImportMode,
) -> std::result::Result<usize, WinnerImportError> {
    let saved = match mode {
        WinnerImportMode::Sequential => import_sequential(store, items).await?,
        WinnerImportMode::Atomic => import_atomic(store, items).await?,
    };

    tracing::info!(saved, ?mode, "Winners saved");

    Ok(saved)
}

async fn import_sequential(
    store: &dyn WinnerStore,
    items: &[Value],
) -> std::result::Result<usize, WinnerImportError> {
    let mut saved = 0;

    for (index, item) in items.iter().enumerate() {
        match CreateWinnerRequest::from_value(item) {
            Ok(winner) => {
                store.insert(&winner).await?;
                saved += 1;
            }
            Err(details) => {
                tracing::info!(index, saved, "Winner import stopped at invalid item");
                return Err(WinnerImportError::Invalid {
                    index,
                    saved,
                    details,
                });
            }
        }
    }

    Ok(saved)
}

async fn import_atomic(
    store: &dyn WinnerStore,
    items: &[Value],
) -> std::result::Result<usize, WinnerImportError> {
    let mut winners = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match CreateWinnerRequest::from_value(item) {
            Ok(winner) => winners.push(winner),
            Err(details) => {
                tracing::info!(index, "Winner batch rejected, nothing stored");
                return Err(WinnerImportError::Invalid {
                    index,
                    saved: 0,
                    details,
                });
            }
        }
    }

    store.insert_many(&winners).await?;

    Ok(winners.len())
}

/// List all winners in the order they were stored
pub async fn list_winners(store: &dyn WinnerStore) -> Result<Vec<Winner>> {
    store.list().await
}

/// Remove every winner
pub async fn delete_all_winners(store: &dyn WinnerStore) -> Result<u64> {
    let deleted = store.delete_all().await?;
    tracing::info!(deleted, "All winners deleted");

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raffle_storage::repository::MemoryStore;
    use serde_json::json;

    fn batch_with_invalid_third_item() -> Vec<Value> {
        vec![
            json!({"name": "Alice", "designation": "HR"}),
            json!({"name": "Bob"}),
            json!({"designation": "Eng"}),
            json!({"name": "Dan", "designation": "Ops"}),
        ]
    }

    async fn stored_names(store: &MemoryStore) -> Vec<String> {
        WinnerStore::list(store)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect()
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "sequential".parse::<WinnerImportMode>().unwrap(),
            WinnerImportMode::Sequential
        );
        assert_eq!(
            " Atomic ".parse::<WinnerImportMode>().unwrap(),
            WinnerImportMode::Atomic
        );
        assert!("partial".parse::<WinnerImportMode>().is_err());
    }

    #[tokio::test]
    async fn test_all_valid_items_are_saved() {
        for mode in [WinnerImportMode::Sequential, WinnerImportMode::Atomic] {
            let store = MemoryStore::new();
            let items = vec![json!({"name": "Alice"}), json!({"name": "Bob", "designation": null})];

            let saved = import_winners(&store, &items, mode).await.unwrap();

            assert_eq!(saved, 2);
            assert_eq!(stored_names(&store).await, ["Alice", "Bob"]);
        }
    }

    #[tokio::test]
    async fn test_empty_batch_succeeds() {
        let store = MemoryStore::new();
        let saved = import_winners(&store, &[], WinnerImportMode::Sequential)
            .await
            .unwrap();

        assert_eq!(saved, 0);
        assert_eq!(WinnerStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sequential_keeps_items_before_first_invalid() {
        let store = MemoryStore::new();

        let error = import_winners(
            &store,
            &batch_with_invalid_third_item(),
            WinnerImportMode::Sequential,
        )
        .await
        .unwrap_err();

        match error {
            WinnerImportError::Invalid {
                index,
                saved,
                details,
            } => {
                assert_eq!(index, 2);
                assert_eq!(saved, 2);
                assert_eq!(
                    details.get("name"),
                    Some(&["This field is required.".to_string()][..])
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Items 0 and 1 stay stored, item 3 is never reached
        assert_eq!(stored_names(&store).await, ["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_atomic_stores_nothing_on_invalid_item() {
        let store = MemoryStore::new();

        let error = import_winners(
            &store,
            &batch_with_invalid_third_item(),
            WinnerImportMode::Atomic,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            error,
            WinnerImportError::Invalid {
                index: 2,
                saved: 0,
                ..
            }
        ));
        assert_eq!(WinnerStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let store = MemoryStore::new();
        import_winners(
            &store,
            &[json!({"name": "Alice"}), json!({"name": "Bob"})],
            WinnerImportMode::Sequential,
        )
        .await
        .unwrap();

        assert_eq!(delete_all_winners(&store).await.unwrap(), 2);
        assert_eq!(delete_all_winners(&store).await.unwrap(), 0);
        assert!(list_winners(&store).await.unwrap().is_empty());
    }
}
