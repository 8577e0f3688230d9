//! Sqlite setup for the single `kv` table that backs persisted
//! settings and the API credential.

use anyhow::{Error, Result};
use rusqlite::Connection;

/// Create the db schema. Idempotent so it can run on every startup.
pub fn initialize_db(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
        [],
    )?;
    Ok(())
}

/// Open an async connection to the db stored at `db_path`, creating
/// the directory and initializing the schema if needed.
pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection, Error> {
    std::fs::create_dir_all(db_path)?;
    let path = format!("{}/davinci.db", db_path.trim_end_matches('/'));
    let db = tokio_rusqlite::Connection::open(path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    Ok(db)
}
