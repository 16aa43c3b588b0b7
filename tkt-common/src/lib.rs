//! # TKT Common Library
//!
//! Core of the event ticketing record-keeper:
//! - Storage engine for events, attendees and tickets (SQLite)
//! - Field validators
//! - Booking workflow (capacity and duplicate enforcement)
//! - Read-only query helpers for presentation code
//! - Configuration loading

pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod queries;
pub mod time;
pub mod validators;

pub use booking::{Booking, BookingService};
pub use db::{Attendee, Database, Event, Ticket};
pub use error::{Error, Result};
pub use queries::Queries;
