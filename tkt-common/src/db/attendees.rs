//! Attendee persistence

use crate::db::{Attendee, Database, NewAttendee, Record};
use crate::Result;
use tracing::debug;

impl Database {
    /// Insert an attendee and return it with its assigned id
    ///
    /// A contact that is already registered is an integrity error.
    pub async fn insert_attendee(&self, attendee: &NewAttendee) -> Result<Attendee> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendees (name, contact)
            VALUES (?, ?)
            "#,
        )
        .bind(&attendee.name)
        .bind(&attendee.contact)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted attendee {} ({})", id, attendee.contact);

        Ok(Attendee {
            id,
            name: attendee.name.clone(),
            contact: attendee.contact.clone(),
        })
    }

    /// Attendee registered under exactly this contact (case-sensitive)
    pub async fn find_attendee_by_contact(&self, contact: &str) -> Result<Option<Attendee>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE contact = ?",
            Attendee::COLUMNS,
            Attendee::TABLE
        );
        let row = sqlx::query(&sql)
            .bind(contact)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(Attendee::from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use crate::Error;

    fn ann() -> NewAttendee {
        NewAttendee {
            name: "Ann".to_string(),
            contact: "ann@x.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_contact_exact_match() {
        let db = init_memory_database().await.unwrap();
        let ann = db.insert_attendee(&ann()).await.unwrap();

        let found = db.find_attendee_by_contact("ann@x.com").await.unwrap();
        assert_eq!(found, Some(ann));

        // Case-sensitive
        let missing = db.find_attendee_by_contact("ANN@x.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_contact_is_integrity_error() {
        let db = init_memory_database().await.unwrap();
        db.insert_attendee(&ann()).await.unwrap();

        let err = db.insert_attendee(&ann()).await.unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {:?}", err);

        let all: Vec<Attendee> = db.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
