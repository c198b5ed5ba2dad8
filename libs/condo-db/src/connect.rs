use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};

use crate::error::DbError;

/// Pool options for [`connect_db`].
///
/// `sqlite::memory:` gives every pooled connection its own database; callers
/// that rely on a shared in-memory schema must pin `max_conns` to 1.
#[derive(Debug, Clone, Default)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    pub connect_timeout: Option<Duration>,
    pub sqlx_logging: bool,
}

/// Handle to a pooled database connection.
#[derive(Debug, Clone)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    #[must_use]
    pub fn backend(&self) -> DbBackend {
        self.conn.get_database_backend()
    }
}

/// Open a connection pool for `url`.
///
/// # Errors
/// Returns [`DbError::InvalidConfig`] for an empty URL and [`DbError::Sea`]
/// when the driver cannot connect.
pub async fn connect_db(url: &str, opts: ConnectOpts) -> Result<Db, DbError> {
    if url.trim().is_empty() {
        return Err(DbError::InvalidConfig("database url is empty".to_owned()));
    }

    let mut options = ConnectOptions::new(url.to_owned());
    if let Some(max) = opts.max_conns {
        options.max_connections(max);
    }
    if let Some(min) = opts.min_conns {
        options.min_connections(min);
    }
    if let Some(timeout) = opts.connect_timeout {
        options.connect_timeout(timeout);
    }
    options.sqlx_logging(opts.sqlx_logging);

    let conn = Database::connect(options).await?;
    tracing::debug!(backend = ?conn.get_database_backend(), "database connected");
    Ok(Db { conn })
}
