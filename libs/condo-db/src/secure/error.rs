use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("invalid scope usage: {0}")]
    Invalid(&'static str),
}
