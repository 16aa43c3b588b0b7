//! Database models
//!
//! Plain records keyed by integer id. Relationships are foreign-key fields;
//! the joined views at the bottom are assembled by [`crate::queries`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub capacity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub event_id: i64,
    pub attendee_id: i64,
    pub booked_at: DateTime<Utc>,
}

/// Event fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub capacity: i64,
}

/// Attendee fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendee {
    pub name: String,
    pub contact: String,
}

/// Ticket fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub event_id: i64,
    pub attendee_id: i64,
    pub booked_at: DateTime<Utc>,
}

/// One row of the event listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub event: Event,
    pub booked: i64,
    pub available: i64,
}

impl EventSummary {
    pub fn is_full(&self) -> bool {
        self.available <= 0
    }
}

/// Ticket with its event and attendee resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDetails {
    pub ticket: Ticket,
    pub event: Event,
    pub attendee: Attendee,
}

/// One row of the attendee listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeeSummary {
    pub attendee: Attendee,
    pub tickets: i64,
}
