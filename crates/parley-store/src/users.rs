//! Persistence of the signed-in [`User`].

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::User;

impl Database {
    /// Insert or replace a user record.
    pub fn save_user(&self, user: &User) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO users (id, username, default_room, saved_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id,
                user.username,
                user.default_room,
                user.saved_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                "SELECT id, username, default_room, saved_at FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// The most recently saved user, i.e. whoever signed in last.
    pub fn current_user(&self) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                "SELECT id, username, default_room, saved_at
                 FROM users
                 ORDER BY saved_at DESC
                 LIMIT 1",
                [],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let saved_str: String = row.get(3)?;
    let saved_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&saved_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        default_room: row.get(2)?,
        saved_at,
    })
}
