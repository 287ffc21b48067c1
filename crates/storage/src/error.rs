use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Maps Postgres check/length violations raised by the server into
    /// `ConstraintViolation`, leaving every other error untouched.
    pub fn from_database(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(e) if e.code().as_deref() == Some("22001") => {
                Self::ConstraintViolation(e.message().to_string())
            }
            sqlx::Error::Database(e) if e.code().as_deref() == Some("23502") => {
                Self::ConstraintViolation(e.message().to_string())
            }
            _ => Self::Database(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_stays_database_error() {
        let error = StorageError::from_database(sqlx::Error::RowNotFound);
        assert!(matches!(error, StorageError::Database(_)));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(StorageError::NotFound.to_string(), "Not found");
    }
}
