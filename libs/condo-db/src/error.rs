use std::time::Duration;

use sea_orm::DbErr;
use thiserror::Error;

use crate::secure::ScopeError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("scope rejected: {0}")]
    Scope(&'static str),

    #[error(transparent)]
    Sea(#[from] DbErr),
}

impl DbError {
    /// Timeouts and connection failures may succeed on retry; everything else
    /// is terminal.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Sea(DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
        )
    }
}

impl From<ScopeError> for DbError {
    fn from(e: ScopeError) -> Self {
        match e {
            ScopeError::Db(e) => Self::Sea(e),
            ScopeError::Invalid(msg) => Self::Scope(msg),
        }
    }
}
