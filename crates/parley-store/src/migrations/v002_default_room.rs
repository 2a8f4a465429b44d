use rusqlite::Connection;

const UP_SQL: &str = r#"
ALTER TABLE users ADD COLUMN default_room TEXT;   -- "<route>/<name>", e.g. "channel/general"
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
