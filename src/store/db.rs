//! Raw kv queries used by the credential store

use anyhow::{Error, Result};
use rusqlite::OptionalExtension;
use tokio_rusqlite::{Connection, params};

pub async fn kv_get(db: &Connection, key: &str) -> Result<Option<String>, Error> {
    let key = key.to_string();
    let value = db
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
            let value: Option<String> = stmt.query_row(params![key], |row| row.get(0)).optional()?;
            Ok(value)
        })
        .await?;
    Ok(value)
}

pub async fn kv_set(db: &Connection, key: &str, value: &str) -> Result<(), Error> {
    let key = key.to_string();
    let value = value.to_string();
    db.call(move |conn| {
        conn.execute(
            r#"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

pub async fn kv_delete(db: &Connection, key: &str) -> Result<(), Error> {
    let key = key.to_string();
    db.call(move |conn| {
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    })
    .await?;
    Ok(())
}
