//! Interactive main menu
//!
//! One screen per menu entry. Each screen prompts for what it needs, calls
//! into `tkt_common` and renders the result. Core errors are printed and the
//! menu loop continues; end of input leaves the loop.

use crate::error::{MenuError, MenuResult};
use std::io::{BufRead, Write};
use tkt_common::time::format_booked_at;
use tkt_common::validators::parse_id;
use tkt_common::{BookingService, Database, Error, Queries};

const WIDE_RULE: usize = 100;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    CreateEvent,
    BookTicket,
    CancelTicket,
    ViewEvents,
    ViewEventAttendees,
    ViewAllAttendees,
    FindEvent,
    FindAttendee,
}

impl MenuChoice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0" => Some(Self::Exit),
            "1" => Some(Self::CreateEvent),
            "2" => Some(Self::BookTicket),
            "3" => Some(Self::CancelTicket),
            "4" => Some(Self::ViewEvents),
            "5" => Some(Self::ViewEventAttendees),
            "6" => Some(Self::ViewAllAttendees),
            "7" => Some(Self::FindEvent),
            "8" => Some(Self::FindAttendee),
            _ => None,
        }
    }

    /// Phrase used in "Error <context>: ..." lines
    fn failure_context(self) -> &'static str {
        match self {
            Self::Exit => "exiting",
            Self::CreateEvent => "creating event",
            Self::BookTicket => "booking ticket",
            Self::CancelTicket => "cancelling ticket",
            Self::ViewEvents => "retrieving events",
            Self::ViewEventAttendees | Self::ViewAllAttendees => "retrieving attendees",
            Self::FindEvent => "finding event",
            Self::FindAttendee => "finding attendee",
        }
    }
}

/// Text menu bound to a database and a pair of streams
pub struct Menu<R, W> {
    booking: BookingService,
    queries: Queries,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(db: Database, input: R, output: W) -> Self {
        Self {
            booking: BookingService::new(db.clone()),
            queries: Queries::new(db),
            input,
            output,
        }
    }

    /// Give back the output stream (scripted sessions read it afterwards)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends
    pub async fn run(&mut self) -> MenuResult<()> {
        writeln!(self.output, "\n{}", "=".repeat(50))?;
        writeln!(self.output, "    WELCOME TO EVENT TICKETING SYSTEM")?;
        writeln!(self.output, "{}", "=".repeat(50))?;

        loop {
            self.display_menu()?;

            let choice = match self.prompt("\nEnter your choice (0-8): ") {
                Ok(choice) => choice,
                Err(MenuError::EndOfInput) => break,
                Err(e) => return Err(e),
            };

            let Some(choice) = MenuChoice::parse(&choice) else {
                writeln!(
                    self.output,
                    "\nInvalid choice! Please select a number between 0-8."
                )?;
                continue;
            };

            if choice == MenuChoice::Exit {
                break;
            }

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(MenuError::Core(err)) => {
                    writeln!(self.output, "\nError {}: {}", choice.failure_context(), err)?;
                }
                Err(MenuError::EndOfInput) => break,
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "\nThank you for using Event Ticketing System!")?;
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Run a single menu entry
    pub async fn dispatch(&mut self, choice: MenuChoice) -> MenuResult<()> {
        match choice {
            MenuChoice::Exit => Ok(()),
            MenuChoice::CreateEvent => self.create_event().await,
            MenuChoice::BookTicket => self.book_ticket().await,
            MenuChoice::CancelTicket => self.cancel_ticket().await,
            MenuChoice::ViewEvents => self.view_events().await,
            MenuChoice::ViewEventAttendees => self.view_event_attendees().await,
            MenuChoice::ViewAllAttendees => self.view_all_attendees().await,
            MenuChoice::FindEvent => self.find_event().await,
            MenuChoice::FindAttendee => self.find_attendee().await,
        }
    }

    fn display_menu(&mut self) -> MenuResult<()> {
        writeln!(self.output, "\n{}", "-".repeat(50))?;
        writeln!(self.output, "              MAIN MENU")?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        writeln!(self.output, "1. Create New Event")?;
        writeln!(self.output, "2. Book Ticket")?;
        writeln!(self.output, "3. Cancel Ticket")?;
        writeln!(self.output, "4. View All Events")?;
        writeln!(self.output, "5. View Attendees for Event")?;
        writeln!(self.output, "6. View All Attendees")?;
        writeln!(self.output, "7. Find Event by ID")?;
        writeln!(self.output, "8. Find Attendee by ID")?;
        writeln!(self.output, "0. Exit")?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        Ok(())
    }

    fn header(&mut self, title: &str) -> MenuResult<()> {
        writeln!(self.output, "\n{}", "=".repeat(40))?;
        writeln!(self.output, "{:^40}", title)?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        Ok(())
    }

    fn rule(&mut self, width: usize) -> MenuResult<()> {
        writeln!(self.output, "{}", "-".repeat(width))?;
        Ok(())
    }

    /// Print `label`, read one line, return it trimmed
    fn prompt(&mut self, label: &str) -> MenuResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    async fn create_event(&mut self) -> MenuResult<()> {
        self.header("CREATE NEW EVENT")?;

        let name = self.prompt("Event name: ")?;
        let location = self.prompt("Event location: ")?;
        let date = self.prompt("Event date (YYYY-MM-DD): ")?;
        let capacity = self.prompt("Event capacity: ")?;

        let event = self
            .booking
            .create_event(&name, &location, &date, &capacity)
            .await?;

        writeln!(self.output, "\nEvent created successfully!")?;
        writeln!(self.output, "Event ID: {}", event.id)?;
        writeln!(self.output, "Name: {}", event.name)?;
        writeln!(self.output, "Location: {}", event.location)?;
        writeln!(self.output, "Date: {}", event.date)?;
        writeln!(self.output, "Capacity: {}", event.capacity)?;
        Ok(())
    }

    async fn book_ticket(&mut self) -> MenuResult<()> {
        self.header("BOOK TICKET")?;

        let summaries = self.queries.event_summaries().await?;
        if summaries.is_empty() {
            writeln!(self.output, "No events available!")?;
            return Ok(());
        }

        writeln!(self.output, "\nAvailable Events:")?;
        self.rule(80)?;
        for s in &summaries {
            writeln!(
                self.output,
                "ID: {} | {} | {} | {} | Spots: {}/{} | {}",
                s.event.id,
                s.event.name,
                s.event.location,
                s.event.date,
                s.available,
                s.event.capacity,
                status(s.is_full())
            )?;
        }
        self.rule(80)?;

        let event_id = parse_id("event ID", &self.prompt("\nEnter Event ID: ")?)?;
        let event = self
            .queries
            .find_event(event_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("event {}", event_id)))?;

        writeln!(self.output, "\nBooking ticket for: {}", event.name)?;
        let name = self.prompt("Attendee name: ")?;
        let contact = self.prompt("Attendee contact (email or phone): ")?;

        let booking = self
            .booking
            .book_ticket_detailed(event.id, &name, &contact)
            .await?;

        if booking.attendee_created {
            writeln!(self.output, "New attendee created: {}", booking.attendee.name)?;
        } else {
            writeln!(self.output, "Found existing attendee: {}", booking.attendee.name)?;
        }

        writeln!(self.output, "\nTicket booked successfully!")?;
        writeln!(self.output, "Ticket ID: {}", booking.ticket.id)?;
        writeln!(self.output, "Event: {}", event.name)?;
        writeln!(self.output, "Attendee: {}", booking.attendee.name)?;
        writeln!(self.output, "Contact: {}", booking.attendee.contact)?;
        writeln!(
            self.output,
            "Booked at: {}",
            format_booked_at(&booking.ticket.booked_at)
        )?;
        Ok(())
    }

    async fn cancel_ticket(&mut self) -> MenuResult<()> {
        self.header("CANCEL TICKET")?;

        let ticket_id = parse_id("ticket ID", &self.prompt("Enter Ticket ID to cancel: ")?)?;
        let details = self
            .queries
            .ticket_details(ticket_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("ticket {}", ticket_id)))?;

        writeln!(self.output, "\nTicket Details:")?;
        writeln!(self.output, "Ticket ID: {}", details.ticket.id)?;
        writeln!(self.output, "Event: {}", details.event.name)?;
        writeln!(self.output, "Attendee: {}", details.attendee.name)?;
        writeln!(self.output, "Contact: {}", details.attendee.contact)?;

        let confirm = self
            .prompt("\nAre you sure you want to cancel this ticket? (yes/no): ")?
            .to_lowercase();

        if confirm == "yes" || confirm == "y" {
            self.booking.cancel_ticket(ticket_id).await?;
            writeln!(self.output, "\nTicket cancelled successfully!")?;
        } else {
            writeln!(self.output, "\nTicket cancellation aborted.")?;
        }
        Ok(())
    }

    async fn view_events(&mut self) -> MenuResult<()> {
        self.header("ALL EVENTS")?;

        let summaries = self.queries.event_summaries().await?;
        if summaries.is_empty() {
            writeln!(self.output, "No events found!")?;
            return Ok(());
        }

        writeln!(self.output, "\nTotal Events: {}", summaries.len())?;
        self.rule(WIDE_RULE)?;
        writeln!(
            self.output,
            "{:<4} {:<25} {:<20} {:<12} {:<10} {:<8} {:<10}",
            "ID", "Name", "Location", "Date", "Capacity", "Booked", "Available"
        )?;
        self.rule(WIDE_RULE)?;
        for s in &summaries {
            writeln!(
                self.output,
                "{:<4} {:<25} {:<20} {:<12} {:<10} {:<8} {:<10}",
                s.event.id,
                clip(&s.event.name, 24),
                clip(&s.event.location, 19),
                s.event.date.to_string(),
                s.event.capacity,
                s.booked,
                s.available
            )?;
        }
        self.rule(WIDE_RULE)?;
        Ok(())
    }

    async fn view_event_attendees(&mut self) -> MenuResult<()> {
        self.header("VIEW EVENT ATTENDEES")?;

        let summaries = self.queries.event_summaries().await?;
        if summaries.is_empty() {
            writeln!(self.output, "No events available!")?;
            return Ok(());
        }

        writeln!(self.output, "\nAvailable Events:")?;
        self.rule(60)?;
        for s in &summaries {
            writeln!(
                self.output,
                "ID: {} | {} | Attendees: {}",
                s.event.id, s.event.name, s.booked
            )?;
        }
        self.rule(60)?;

        let event_id = parse_id("event ID", &self.prompt("\nEnter Event ID: ")?)?;
        let event = self
            .queries
            .find_event(event_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("event {}", event_id)))?;

        let holders = self.queries.attendees_for_event(event.id).await?;
        if holders.is_empty() {
            writeln!(self.output, "\nNo attendees registered for '{}'", event.name)?;
            return Ok(());
        }

        writeln!(self.output, "\nAttendees for '{}':", event.name)?;
        writeln!(self.output, "Total Attendees: {}", holders.len())?;
        self.rule(80)?;
        writeln!(
            self.output,
            "{:<10} {:<25} {:<25} {:<20}",
            "Ticket ID", "Name", "Contact", "Booked At"
        )?;
        self.rule(80)?;
        for d in &holders {
            writeln!(
                self.output,
                "{:<10} {:<25} {:<25} {:<20}",
                d.ticket.id,
                clip(&d.attendee.name, 24),
                clip(&d.attendee.contact, 24),
                format_booked_at(&d.ticket.booked_at)
            )?;
        }
        self.rule(80)?;
        Ok(())
    }

    async fn view_all_attendees(&mut self) -> MenuResult<()> {
        self.header("ALL ATTENDEES")?;

        let summaries = self.queries.attendee_summaries().await?;
        if summaries.is_empty() {
            writeln!(self.output, "No attendees found!")?;
            return Ok(());
        }

        writeln!(self.output, "\nTotal Attendees: {}", summaries.len())?;
        self.rule(80)?;
        writeln!(
            self.output,
            "{:<4} {:<25} {:<25} {:<20}",
            "ID", "Name", "Contact", "Events Registered"
        )?;
        self.rule(80)?;
        for s in &summaries {
            writeln!(
                self.output,
                "{:<4} {:<25} {:<25} {:<20}",
                s.attendee.id,
                clip(&s.attendee.name, 24),
                clip(&s.attendee.contact, 24),
                s.tickets
            )?;
        }
        self.rule(80)?;
        Ok(())
    }

    async fn find_event(&mut self) -> MenuResult<()> {
        self.header("FIND EVENT BY ID")?;

        let event_id = parse_id("event ID", &self.prompt("Enter Event ID: ")?)?;
        let Some(event) = self.queries.find_event(event_id).await? else {
            writeln!(self.output, "Event not found!")?;
            return Ok(());
        };

        let sold = self.queries.tickets_for_event(event.id).await?.len();
        let available = self.queries.available_spots(&event).await?;

        writeln!(self.output, "\nEvent Found:")?;
        self.rule(50)?;
        writeln!(self.output, "ID: {}", event.id)?;
        writeln!(self.output, "Name: {}", event.name)?;
        writeln!(self.output, "Location: {}", event.location)?;
        writeln!(self.output, "Date: {}", event.date)?;
        writeln!(self.output, "Capacity: {}", event.capacity)?;
        writeln!(self.output, "Tickets Sold: {}", sold)?;
        writeln!(self.output, "Available Spots: {}", available)?;
        writeln!(self.output, "Status: {}", status(available <= 0))?;
        self.rule(50)?;
        Ok(())
    }

    async fn find_attendee(&mut self) -> MenuResult<()> {
        self.header("FIND ATTENDEE BY ID")?;

        let attendee_id = parse_id("attendee ID", &self.prompt("Enter Attendee ID: ")?)?;
        let Some(attendee) = self.queries.find_attendee(attendee_id).await? else {
            writeln!(self.output, "Attendee not found!")?;
            return Ok(());
        };

        let registered = self.queries.events_for_attendee(attendee.id).await?;

        writeln!(self.output, "\nAttendee Found:")?;
        self.rule(60)?;
        writeln!(self.output, "ID: {}", attendee.id)?;
        writeln!(self.output, "Name: {}", attendee.name)?;
        writeln!(self.output, "Contact: {}", attendee.contact)?;
        writeln!(self.output, "Total Events Registered: {}", registered.len())?;

        if !registered.is_empty() {
            writeln!(self.output, "\nRegistered Events:")?;
            self.rule(60)?;
            for d in &registered {
                writeln!(
                    self.output,
                    "- {} (Ticket ID: {}) - {}",
                    d.event.name, d.ticket.id, d.event.date
                )?;
            }
        }
        self.rule(60)?;
        Ok(())
    }
}

fn status(full: bool) -> &'static str {
    if full {
        "FULL"
    } else {
        "AVAILABLE"
    }
}

/// First `width` characters of `s`
fn clip(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}
