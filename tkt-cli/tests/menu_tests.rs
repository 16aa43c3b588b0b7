//! Scripted menu sessions
//!
//! Each test feeds a fixed stdin script to the menu over an in-memory
//! database and checks the rendered output.

use std::io::Cursor;
use tkt_cli::{Menu, MenuChoice};
use tkt_common::db::{init_memory_database, Database};
use tkt_common::{BookingService, Queries};

async fn run_script(db: Database, script: &str) -> String {
    let mut menu = Menu::new(db, Cursor::new(script.as_bytes().to_vec()), Vec::new());
    menu.run().await.expect("menu session should finish cleanly");
    String::from_utf8(menu.into_output()).expect("menu output is UTF-8")
}

#[tokio::test]
async fn test_exit_immediately() {
    let db = init_memory_database().await.unwrap();
    let out = run_script(db, "0\n").await;

    assert!(out.contains("WELCOME TO EVENT TICKETING SYSTEM"));
    assert!(out.contains("1. Create New Event"));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let db = init_memory_database().await.unwrap();
    // Input ends in the middle of the create-event prompts
    let out = run_script(db.clone(), "1\nConcert\n").await;

    assert!(out.contains("Event location: "));
    assert!(out.contains("Goodbye!"));
    assert!(Queries::new(db).list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_choice_reprompts() {
    let db = init_memory_database().await.unwrap();
    let out = run_script(db, "42\n0\n").await;

    assert!(out.contains("Invalid choice! Please select a number between 0-8."));
    assert_eq!(out.matches("MAIN MENU").count(), 2);
}

#[tokio::test]
async fn test_create_event_and_book() {
    let db = init_memory_database().await.unwrap();
    let script = "\
1
Concert
Hall A
2099-01-01
1
2
1
Ann
ann@x.com
2
1
Bob
bob@x.com
0
";
    let out = run_script(db.clone(), script).await;

    assert!(out.contains("Event created successfully!"));
    assert!(out.contains("Event ID: 1"));
    assert!(out.contains("ID: 1 | Concert | Hall A | 2099-01-01 | Spots: 1/1 | AVAILABLE"));
    assert!(out.contains("New attendee created: Ann"));
    assert!(out.contains("Ticket booked successfully!"));
    assert!(out.contains("Spots: 0/1 | FULL"));
    assert!(out.contains("Error booking ticket: Event 1 is at full capacity (1 tickets)"));

    let q = Queries::new(db);
    assert_eq!(q.tickets_for_event(1).await.unwrap().len(), 1);
    assert_eq!(q.list_attendees().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_event_validation_error_continues() {
    let db = init_memory_database().await.unwrap();
    let script = "1\nConcert\nHall A\n01/01/2099\n10\n4\n0\n";
    let out = run_script(db, script).await;

    assert!(out.contains("Error creating event: Invalid event date: invalid format, use YYYY-MM-DD"));
    assert!(out.contains("No events found!"));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn test_book_with_no_events() {
    let db = init_memory_database().await.unwrap();
    let out = run_script(db, "2\n0\n").await;

    assert!(out.contains("No events available!"));
}

#[tokio::test]
async fn test_existing_attendee_is_reused() {
    let db = init_memory_database().await.unwrap();
    let svc = BookingService::new(db.clone());
    let first = svc
        .create_event("Concert", "Hall A", "2099-01-01", "5")
        .await
        .unwrap();
    let second = svc
        .create_event("Play", "Hall B", "2099-02-01", "5")
        .await
        .unwrap();
    svc.book_ticket(first.id, "Ann", "ann@x.com").await.unwrap();

    let script = format!("2\n{}\nAnn\nann@x.com\n0\n", second.id);
    let out = run_script(db, &script).await;

    assert!(out.contains("Found existing attendee: Ann"));
}

#[tokio::test]
async fn test_cancel_ticket_confirmed_and_aborted() {
    let db = init_memory_database().await.unwrap();
    let svc = BookingService::new(db.clone());
    let event = svc
        .create_event("Concert", "Hall A", "2099-01-01", "5")
        .await
        .unwrap();
    let ann = svc.book_ticket(event.id, "Ann", "ann@x.com").await.unwrap();
    let bob = svc.book_ticket(event.id, "Bob", "bob@x.com").await.unwrap();

    let script = format!("3\n{}\nno\n3\n{}\nY\n3\n999\n0\n", ann.id, bob.id);
    let out = run_script(db.clone(), &script).await;

    assert!(out.contains("Ticket cancellation aborted."));
    assert!(out.contains("Ticket cancelled successfully!"));
    assert!(out.contains("Attendee: Bob"));
    assert!(out.contains("Error cancelling ticket: Not found: ticket 999"));

    let remaining: Vec<i64> = Queries::new(db)
        .tickets_for_event(event.id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(remaining, vec![ann.id]);
}

#[tokio::test]
async fn test_listings_and_lookups() {
    let db = init_memory_database().await.unwrap();
    let svc = BookingService::new(db.clone());
    let gala = svc
        .create_event("Gala", "Ballroom", "2099-12-31", "2")
        .await
        .unwrap();
    let ann = svc.book_ticket(gala.id, "Ann", "ann@x.com").await.unwrap();

    let script = format!(
        "4\n5\n{gala}\n6\n7\n{gala}\n7\n77\n8\n{ann}\n8\nabc\n0\n",
        gala = gala.id,
        ann = ann.attendee_id
    );
    let out = run_script(db, &script).await;

    // 4: all events
    assert!(out.contains("Total Events: 1"));
    // 5: attendees for event
    assert!(out.contains("ID: 1 | Gala | Attendees: 1"));
    assert!(out.contains("Attendees for 'Gala':"));
    // 6: all attendees
    assert!(out.contains("Total Attendees: 1"));
    // 7: find event
    assert!(out.contains("Tickets Sold: 1"));
    assert!(out.contains("Available Spots: 1"));
    assert!(out.contains("Status: AVAILABLE"));
    assert!(out.contains("Event not found!"));
    // 8: find attendee
    assert!(out.contains("Total Events Registered: 1"));
    assert!(out.contains(&format!("- Gala (Ticket ID: {}) - 2099-12-31", ann.id)));
    assert!(out.contains("Error finding attendee: Invalid attendee ID: must be a valid number"));
}

#[tokio::test]
async fn test_dispatch_single_entry() {
    let db = init_memory_database().await.unwrap();
    let mut menu = Menu::new(db, Cursor::new(Vec::new()), Vec::new());

    menu.dispatch(MenuChoice::ViewAllAttendees).await.unwrap();

    let out = String::from_utf8(menu.into_output()).unwrap();
    assert!(out.contains("No attendees found!"));
}

#[tokio::test]
async fn test_file_database_survives_sessions() {
    use tkt_common::config::StorageConfig;
    use tkt_common::db::init_database;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.db");

    let db = init_database(&path, &StorageConfig::default()).await.unwrap();
    run_script(db.clone(), "1\nConcert\nHall A\n2099-01-01\n3\n0\n").await;
    db.close().await;

    let db = init_database(&path, &StorageConfig::default()).await.unwrap();
    let out = run_script(db.clone(), "5\n1\n0\n").await;
    db.close().await;

    assert!(out.contains("ID: 1 | Concert | Attendees: 0"));
    assert!(out.contains("No attendees registered for 'Concert'"));
}
