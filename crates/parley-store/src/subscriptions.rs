//! CRUD operations for [`Subscription`] records.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use parley_shared::types::RoomId;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::Subscription;

impl Database {
    /// Insert a subscription, replacing any existing row for the same room.
    pub fn upsert_subscription(&self, sub: &Subscription) -> Result<()> {
        self.conn().execute(
            "INSERT INTO subscriptions (rid, t, name, fname, open, unread, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(rid) DO UPDATE SET
                t = excluded.t,
                name = excluded.name,
                fname = excluded.fname,
                open = excluded.open,
                unread = excluded.unread,
                updated_at = excluded.updated_at",
            params![
                sub.rid.as_str(),
                sub.t,
                sub.name,
                sub.fname,
                sub.open,
                sub.unread,
                sub.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Look up the subscription for a room.  `None` when the user has not
    /// joined it.
    pub fn get_subscription(&self, rid: &RoomId) -> Result<Option<Subscription>> {
        let sub = self
            .conn()
            .query_row(
                "SELECT rid, t, name, fname, open, unread, updated_at
                 FROM subscriptions
                 WHERE rid = ?1",
                params![rid.as_str()],
                row_to_subscription,
            )
            .optional()?;
        Ok(sub)
    }

    /// List all subscriptions ordered by name.
    pub fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let mut stmt = self.conn().prepare(
            "SELECT rid, t, name, fname, open, unread, updated_at
             FROM subscriptions
             ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], row_to_subscription)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }
}

/// Map a `rusqlite::Row` to a [`Subscription`].
fn row_to_subscription(row: &rusqlite::Row<'_>) -> rusqlite::Result<Subscription> {
    let rid: String = row.get(0)?;
    let updated_str: String = row.get(6)?;

    let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&updated_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Subscription {
        rid: RoomId(rid),
        t: row.get(1)?,
        name: row.get(2)?,
        fname: row.get(3)?,
        open: row.get(4)?,
        unread: row.get(5)?,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(rid: &str, t: &str, name: &str) -> Subscription {
        Subscription {
            rid: RoomId::new(rid),
            t: t.into(),
            name: name.into(),
            fname: None,
            open: true,
            unread: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn get_missing_subscription_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_subscription(&RoomId::new("nope")).unwrap().is_none());
    }

    #[test]
    fn upsert_then_get() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_subscription(&sub("abc", "c", "general")).unwrap();

        let found = db.get_subscription(&RoomId::new("abc")).unwrap().unwrap();
        assert_eq!(found.t, "c");
        assert_eq!(found.name, "general");
        assert!(found.open);
    }

    #[test]
    fn upsert_replaces_existing_row() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_subscription(&sub("abc", "c", "general")).unwrap();

        let mut renamed = sub("abc", "p", "staff");
        renamed.unread = 4;
        db.upsert_subscription(&renamed).unwrap();

        let all = db.list_subscriptions().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].t, "p");
        assert_eq!(all[0].unread, 4);
    }

    #[test]
    fn list_is_ordered_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_subscription(&sub("2", "c", "random")).unwrap();
        db.upsert_subscription(&sub("1", "c", "general")).unwrap();

        let names: Vec<_> = db
            .list_subscriptions()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["general", "random"]);
    }

    #[test]
    fn descriptor_carries_dispatch_fields() {
        let s = sub("abc", "c", "general");
        let d = s.descriptor();
        assert_eq!(d.id, RoomId::new("abc"));
        assert_eq!(d.t, "c");
        assert_eq!(d.name.as_deref(), Some("general"));
    }
}
