//! Booking workflow
//!
//! Creates events and books/cancels tickets, enforcing capacity and
//! one-ticket-per-attendee rules on top of the storage engine.
//!
//! # Booking order
//! 1. Event must exist
//! 2. Event must have a free spot
//! 3. Attendee name and contact must validate
//! 4. Attendee is looked up by contact, created if unknown
//! 5. Attendee must not already hold a ticket for the event
//! 6. Ticket is inserted with the current timestamp
//!
//! Step 4 runs before step 5, so a rejected duplicate from a new contact
//! still leaves the new attendee behind. Steps 4 and 6 are separate
//! transactions.

use crate::db::{Attendee, Database, Event, NewAttendee, NewEvent, NewTicket, Record, Ticket};
use crate::{time, validators, Error, Result};
use tracing::{info, warn};

/// Result of a successful booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub ticket: Ticket,
    pub attendee: Attendee,
    /// `true` when the attendee was registered by this booking
    pub attendee_created: bool,
}

/// Booking workflow bound to a storage handle
#[derive(Debug, Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Validate all event fields, then persist
    ///
    /// Validators run in field order; the first failure is returned and
    /// nothing is written.
    pub async fn create_event(
        &self,
        name: &str,
        location: &str,
        date: &str,
        capacity: &str,
    ) -> Result<Event> {
        let new_event = NewEvent {
            name: validators::validate_event_name(name)?,
            location: validators::validate_location(location)?,
            date: validators::validate_date(date)?,
            capacity: validators::validate_capacity(capacity)?,
        };

        let event = self.db.insert_event(&new_event).await?;
        info!(
            "Created event {} '{}' on {} (capacity {})",
            event.id, event.name, event.date, event.capacity
        );
        Ok(event)
    }

    /// Book a ticket, returning only the ticket
    pub async fn book_ticket(
        &self,
        event_id: i64,
        attendee_name: &str,
        attendee_contact: &str,
    ) -> Result<Ticket> {
        let booking = self
            .book_ticket_detailed(event_id, attendee_name, attendee_contact)
            .await?;
        Ok(booking.ticket)
    }

    /// Book a ticket, also reporting which attendee holds it
    pub async fn book_ticket_detailed(
        &self,
        event_id: i64,
        attendee_name: &str,
        attendee_contact: &str,
    ) -> Result<Booking> {
        let event: Event = self
            .db
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("event {}", event_id)))?;

        let booked = self.db.count_tickets_for_event(event.id).await?;
        if booked >= event.capacity {
            warn!(
                "Booking rejected: event {} full ({}/{})",
                event.id, booked, event.capacity
            );
            return Err(Error::Capacity {
                event_id: event.id,
                capacity: event.capacity,
            });
        }

        let name = validators::validate_attendee_name(attendee_name)?;
        let contact = validators::validate_contact(attendee_contact)?;

        let (attendee, attendee_created) = match self.db.find_attendee_by_contact(&contact).await? {
            Some(existing) => (existing, false),
            None => {
                let created = self
                    .db
                    .insert_attendee(&NewAttendee { name, contact })
                    .await?;
                info!("Registered attendee {} ({})", created.id, created.contact);
                (created, true)
            }
        };

        if self.db.find_ticket(event.id, attendee.id).await?.is_some() {
            warn!(
                "Booking rejected: attendee {} already holds a ticket for event {}",
                attendee.id, event.id
            );
            return Err(Error::DuplicateBooking {
                event_id: event.id,
                attendee_id: attendee.id,
            });
        }

        let ticket = self
            .db
            .insert_ticket(&NewTicket {
                event_id: event.id,
                attendee_id: attendee.id,
                booked_at: time::now(),
            })
            .await?;

        info!(
            "Booked ticket {} for attendee {} at event {}",
            ticket.id, attendee.id, event.id
        );

        Ok(Booking {
            ticket,
            attendee,
            attendee_created,
        })
    }

    /// Delete a single ticket
    pub async fn cancel_ticket(&self, ticket_id: i64) -> Result<()> {
        self.remove::<Ticket>(ticket_id, "ticket").await?;
        info!("Cancelled ticket {}", ticket_id);
        Ok(())
    }

    /// Delete an event together with its tickets
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        self.remove::<Event>(event_id, "event").await?;
        info!("Deleted event {} and its tickets", event_id);
        Ok(())
    }

    /// Delete an attendee together with their tickets
    pub async fn delete_attendee(&self, attendee_id: i64) -> Result<()> {
        self.remove::<Attendee>(attendee_id, "attendee").await?;
        info!("Deleted attendee {} and their tickets", attendee_id);
        Ok(())
    }

    async fn remove<R: Record>(&self, id: i64, what: &str) -> Result<()> {
        if self.db.find_by_id::<R>(id).await?.is_none() {
            return Err(Error::NotFound(format!("{} {}", what, id)));
        }
        if !self.db.delete::<R>(id).await? {
            // Row vanished between lookup and delete
            return Err(Error::NotFound(format!("{} {}", what, id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    async fn service() -> BookingService {
        BookingService::new(init_memory_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_event_normalizes_fields() {
        let svc = service().await;

        let event = svc
            .create_event("  Concert ", " Hall A ", "2099-01-01", " 1 ")
            .await
            .unwrap();

        assert_eq!(event.name, "Concert");
        assert_eq!(event.location, "Hall A");
        assert_eq!(event.date.to_string(), "2099-01-01");
        assert_eq!(event.capacity, 1);
    }

    #[tokio::test]
    async fn test_create_event_first_failure_wins() {
        let svc = service().await;

        // Both location and capacity are bad; location is checked first
        let err = svc
            .create_event("Concert", "", "2099-01-01", "0")
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::Validation { field: "event location", .. }),
            "got {:?}",
            err
        );

        let events: Vec<Event> = svc.database().get_all().await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_book_unknown_event() {
        let svc = service().await;

        let err = svc.book_ticket(5, "Ann", "ann@x.com").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_capacity_checked_before_attendee_validation() {
        let svc = service().await;
        let event = svc
            .create_event("Concert", "Hall A", "2099-01-01", "1")
            .await
            .unwrap();
        svc.book_ticket(event.id, "Ann", "ann@x.com").await.unwrap();

        // Invalid contact, but the event is already full
        let err = svc
            .book_ticket(event.id, "Bob", "not-a-contact")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Capacity { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_existing_attendee_reused() {
        let svc = service().await;
        let first = svc
            .create_event("Concert", "Hall A", "2099-01-01", "10")
            .await
            .unwrap();
        let second = svc
            .create_event("Play", "Hall B", "2099-02-01", "10")
            .await
            .unwrap();

        let a = svc
            .book_ticket_detailed(first.id, "Ann", "ann@x.com")
            .await
            .unwrap();
        let b = svc
            .book_ticket_detailed(second.id, "Ann Smith", "ann@x.com")
            .await
            .unwrap();

        assert!(a.attendee_created);
        assert!(!b.attendee_created);
        assert_eq!(a.attendee.id, b.attendee.id);
        // Existing record is reused as-is
        assert_eq!(b.attendee.name, "Ann");
    }

    #[tokio::test]
    async fn test_cancel_missing_ticket() {
        let svc = service().await;
        let err = svc.cancel_ticket(1).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_delete_event_and_attendee() {
        let svc = service().await;
        let event = svc
            .create_event("Concert", "Hall A", "2099-01-01", "3")
            .await
            .unwrap();
        let booking = svc
            .book_ticket_detailed(event.id, "Ann", "ann@x.com")
            .await
            .unwrap();

        svc.delete_attendee(booking.attendee.id).await.unwrap();
        assert_eq!(svc.database().count_tickets_for_event(event.id).await.unwrap(), 0);

        svc.delete_event(event.id).await.unwrap();
        assert!(matches!(
            svc.delete_event(event.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}
