//! Read-only queries for presentation code
//!
//! Everything here is recomputed from current storage on each call.

use crate::db::{
    Attendee, AttendeeSummary, Database, Event, EventSummary, Ticket, TicketDetails,
};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Queries {
    db: Database,
}

impl Queries {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.db.get_all().await
    }

    pub async fn list_attendees(&self) -> Result<Vec<Attendee>> {
        self.db.get_all().await
    }

    pub async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        self.db.find_by_id(id).await
    }

    pub async fn find_attendee(&self, id: i64) -> Result<Option<Attendee>> {
        self.db.find_by_id(id).await
    }

    pub async fn find_ticket(&self, id: i64) -> Result<Option<Ticket>> {
        self.db.find_by_id(id).await
    }

    /// Tickets for an event in booking order
    pub async fn tickets_for_event(&self, event_id: i64) -> Result<Vec<Ticket>> {
        self.db.tickets_where_event(event_id).await
    }

    /// Tickets held by an attendee in booking order
    pub async fn tickets_for_attendee(&self, attendee_id: i64) -> Result<Vec<Ticket>> {
        self.db.tickets_where_attendee(attendee_id).await
    }

    /// Capacity minus tickets booked
    pub async fn available_spots(&self, event: &Event) -> Result<i64> {
        let booked = self.db.count_tickets_for_event(event.id).await?;
        Ok(event.capacity - booked)
    }

    pub async fn is_full(&self, event: &Event) -> Result<bool> {
        Ok(self.available_spots(event).await? <= 0)
    }

    pub async fn has_ticket_for_event(&self, attendee_id: i64, event_id: i64) -> Result<bool> {
        Ok(self.db.find_ticket(event_id, attendee_id).await?.is_some())
    }

    /// Every event with its booked and available counts
    pub async fn event_summaries(&self) -> Result<Vec<EventSummary>> {
        let events = self.list_events().await?;
        let mut summaries = Vec::with_capacity(events.len());

        for event in events {
            let booked = self.db.count_tickets_for_event(event.id).await?;
            summaries.push(EventSummary {
                available: event.capacity - booked,
                booked,
                event,
            });
        }

        Ok(summaries)
    }

    /// Every attendee with the number of tickets they hold
    pub async fn attendee_summaries(&self) -> Result<Vec<AttendeeSummary>> {
        let attendees = self.list_attendees().await?;
        let mut summaries = Vec::with_capacity(attendees.len());

        for attendee in attendees {
            let tickets = self.tickets_for_attendee(attendee.id).await?.len() as i64;
            summaries.push(AttendeeSummary { attendee, tickets });
        }

        Ok(summaries)
    }

    /// Ticket with its event and attendee, if the ticket exists
    pub async fn ticket_details(&self, ticket_id: i64) -> Result<Option<TicketDetails>> {
        let Some(ticket) = self.find_ticket(ticket_id).await? else {
            return Ok(None);
        };
        let event = self.require_event(ticket.event_id).await?;
        let attendee = self.require_attendee(ticket.attendee_id).await?;

        Ok(Some(TicketDetails {
            ticket,
            event,
            attendee,
        }))
    }

    /// Tickets for an event with each holder resolved, in booking order
    pub async fn attendees_for_event(&self, event_id: i64) -> Result<Vec<TicketDetails>> {
        let event = self.require_event(event_id).await?;
        let tickets = self.tickets_for_event(event_id).await?;

        let mut details = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let attendee = self.require_attendee(ticket.attendee_id).await?;
            details.push(TicketDetails {
                ticket,
                event: event.clone(),
                attendee,
            });
        }

        Ok(details)
    }

    /// Tickets held by an attendee with each event resolved, in booking order
    pub async fn events_for_attendee(&self, attendee_id: i64) -> Result<Vec<TicketDetails>> {
        let attendee = self.require_attendee(attendee_id).await?;
        let tickets = self.tickets_for_attendee(attendee_id).await?;

        let mut details = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let event = self.require_event(ticket.event_id).await?;
            details.push(TicketDetails {
                ticket,
                event,
                attendee: attendee.clone(),
            });
        }

        Ok(details)
    }

    async fn require_event(&self, id: i64) -> Result<Event> {
        self.find_event(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("event {}", id)))
    }

    async fn require_attendee(&self, id: i64) -> Result<Attendee> {
        self.find_attendee(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("attendee {}", id)))
    }
}
