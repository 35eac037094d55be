use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DBError {
    #[error(transparent)]
    Relational(#[from] DbErr),
    #[error("category name already exists")]
    DuplicateCategory,
    #[error("product {0} not found")]
    ProductNotFound(i32),
    #[error("no live connection to the database")]
    Unavailable,
    #[error("failed to connect after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("in-memory storage lock poisoned")]
    Poisoned,
}

impl DBError {
    /// Maps a failed category insert, keeping unique violations distinct.
    pub fn from_category_insert(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DBError::DuplicateCategory,
            _ => DBError::Relational(err),
        }
    }
}

/// Whether the error means the pool lost its backend, as opposed to a
/// statement that the backend rejected.
pub fn is_connection_failure(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}
