//! Kind-generic record operations
//!
//! `get_all`, `find_by_id` and `delete` work the same way for every table;
//! each record kind describes its table through [`Record`]. Inserts are
//! kind-specific and live next to their model (`events.rs`, ...).

use crate::db::{Attendee, Database, Event, Ticket};
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

/// A record kind stored in its own table with an integer `id` primary key
pub trait Record: Sized + Send + Unpin {
    /// Table name
    const TABLE: &'static str;

    /// Comma-separated column list read by [`Record::from_row`]
    const COLUMNS: &'static str;

    /// `(table, column)` pairs of rows that reference this kind and are
    /// removed along with it
    const DEPENDENTS: &'static [(&'static str, &'static str)] = &[];

    /// Human-readable kind name used in error messages
    const KIND: &'static str;

    fn from_row(row: &SqliteRow) -> Result<Self>;
}

impl Record for Event {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static str = "id, name, location, date, capacity";
    const DEPENDENTS: &'static [(&'static str, &'static str)] = &[("tickets", "event_id")];
    const KIND: &'static str = "Event";

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Event {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            date: row.try_get("date")?,
            capacity: row.try_get("capacity")?,
        })
    }
}

impl Record for Attendee {
    const TABLE: &'static str = "attendees";
    const COLUMNS: &'static str = "id, name, contact";
    const DEPENDENTS: &'static [(&'static str, &'static str)] = &[("tickets", "attendee_id")];
    const KIND: &'static str = "Attendee";

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Attendee {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            contact: row.try_get("contact")?,
        })
    }
}

impl Record for Ticket {
    const TABLE: &'static str = "tickets";
    const COLUMNS: &'static str = "id, event_id, attendee_id, booked_at";
    const KIND: &'static str = "Ticket";

    fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Ticket {
            id: row.try_get("id")?,
            event_id: row.try_get("event_id")?,
            attendee_id: row.try_get("attendee_id")?,
            booked_at: row.try_get("booked_at")?,
        })
    }
}

/// Decode every row, stopping at the first failure
pub(crate) fn decode_rows<R: Record>(rows: &[SqliteRow]) -> Result<Vec<R>> {
    rows.iter().map(R::from_row).collect()
}

impl Database {
    /// All records of a kind in insertion order
    pub async fn get_all<R: Record>(&self) -> Result<Vec<R>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", R::COLUMNS, R::TABLE);
        let rows = sqlx::query(&sql).fetch_all(self.pool()).await?;
        decode_rows(&rows)
    }

    /// Record with the given id, if any
    pub async fn find_by_id<R: Record>(&self, id: i64) -> Result<Option<R>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", R::COLUMNS, R::TABLE);
        let row = sqlx::query(&sql).bind(id).fetch_optional(self.pool()).await?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// Delete a record and, first, every row that depends on it
    ///
    /// Runs as one transaction. Returns `false` when no record had that id.
    pub async fn delete<R: Record>(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool().begin().await?;

        for (table, column) in R::DEPENDENTS {
            let sql = format!("DELETE FROM {} WHERE {} = ?", table, column);
            let removed = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
            if removed.rows_affected() > 0 {
                debug!(
                    "Cascading delete of {} {}: {} row(s) from {}",
                    R::KIND,
                    id,
                    removed.rows_affected(),
                    table
                );
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;

        debug!("Deleted {} {} ({} row)", R::KIND, id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}
