//! Ticket persistence

use crate::db::store::decode_rows;
use crate::db::{Database, NewTicket, Record, Ticket};
use crate::Result;
use tracing::debug;

impl Database {
    /// Insert a ticket and return it with its assigned id
    ///
    /// Missing event/attendee or a repeated (event, attendee) pair is an
    /// integrity error; the booking workflow checks both beforehand.
    pub async fn insert_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let result = sqlx::query(
            r#"
            INSERT INTO tickets (event_id, attendee_id, booked_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(ticket.event_id)
        .bind(ticket.attendee_id)
        .bind(ticket.booked_at)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!(
            "Inserted ticket {} (event {}, attendee {})",
            id, ticket.event_id, ticket.attendee_id
        );

        Ok(Ticket {
            id,
            event_id: ticket.event_id,
            attendee_id: ticket.attendee_id,
            booked_at: ticket.booked_at,
        })
    }

    /// Number of tickets booked for an event
    pub async fn count_tickets_for_event(&self, event_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }

    /// Ticket linking this event and attendee, if any
    pub async fn find_ticket(&self, event_id: i64, attendee_id: i64) -> Result<Option<Ticket>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE event_id = ? AND attendee_id = ?",
            Ticket::COLUMNS,
            Ticket::TABLE
        );
        let row = sqlx::query(&sql)
            .bind(event_id)
            .bind(attendee_id)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(Ticket::from_row).transpose()
    }

    /// Tickets for an event in booking order
    pub async fn tickets_where_event(&self, event_id: i64) -> Result<Vec<Ticket>> {
        self.tickets_where("event_id", event_id).await
    }

    /// Tickets held by an attendee in booking order
    pub async fn tickets_where_attendee(&self, attendee_id: i64) -> Result<Vec<Ticket>> {
        self.tickets_where("attendee_id", attendee_id).await
    }

    async fn tickets_where(&self, column: &str, id: i64) -> Result<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY id ASC",
            Ticket::COLUMNS,
            Ticket::TABLE,
            column
        );
        let rows = sqlx::query(&sql).bind(id).fetch_all(self.pool()).await?;
        decode_rows(&rows)
    }
}
