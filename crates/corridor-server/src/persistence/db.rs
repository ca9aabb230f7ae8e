//! Database connection pool.

use sqlx::{postgres::PgPoolOptions, ConnectOptions, Connection, PgPool};
use std::time::Duration;
use tracing::info;

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    connect_timeout: Duration,
}

impl Database {
    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Trivial connectivity check used by `/health`.
    ///
    /// Opens its own connection instead of going through the pool, whose
    /// retries would hide the connect error behind `PoolTimedOut`.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let check = async {
            let mut conn = self.pool.connect_options().connect().await?;
            sqlx::query("SELECT 1").execute(&mut conn).await?;
            conn.close().await
        };

        match tokio::time::timeout(self.connect_timeout, check).await {
            Ok(result) => result,
            Err(_) => Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("no response from database within {:?}", self.connect_timeout),
            ))),
        }
    }
}

/// Build a pool without opening a connection.
///
/// Fails only when the URL itself is invalid. Connection problems show up
/// on first use as `sqlx::Error`.
pub fn connect_lazy(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<Database, sqlx::Error> {
    info!(
        "Configuring database pool (max {} connections, acquire timeout {:?})",
        max_connections, acquire_timeout
    );

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;

    Ok(Database {
        pool,
        connect_timeout: acquire_timeout,
    })
}
