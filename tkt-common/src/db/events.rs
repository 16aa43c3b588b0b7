//! Event persistence

use crate::db::{Database, Event, NewEvent};
use crate::Result;
use tracing::debug;

impl Database {
    /// Insert an event and return it with its assigned id
    pub async fn insert_event(&self, event: &NewEvent) -> Result<Event> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (name, location, date, capacity)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.date)
        .bind(event.capacity)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted event {} ({})", id, event.name);

        Ok(Event {
            id,
            name: event.name.clone(),
            location: event.location.clone(),
            date: event.date,
            capacity: event.capacity,
        })
    }
}
