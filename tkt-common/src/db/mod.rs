//! Database models and queries
//!
//! [`Database`] is the storage handle passed to the booking workflow and the
//! query façade. Every mutating call runs as a single SQLite transaction.

pub mod attendees;
pub mod events;
pub mod init;
pub mod models;
pub mod store;
pub mod tickets;

pub use init::*;
pub use models::*;
pub use store::Record;

use sqlx::SqlitePool;

/// Handle to the ticketing database
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Wrap an already-initialized pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections, flushing the WAL
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
