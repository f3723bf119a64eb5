//! Error type for repository operations that enforce domain rules.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Operations that check
//! a rule inside their transaction (stock levels, already-sold animals)
//! return [`RepoError`] so the rule violation reaches the caller intact.

use agronexo_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
