use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

pub const DB_FILE_NAME: &str = "yatina.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value_json TEXT NOT NULL
        )",
        [],
    )?;

    // Early workspaces stored values without an update stamp.
    ensure_settings_updated_at(&conn)?;

    Ok(conn)
}

pub fn settings_get_json(conn: &Connection, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value_json FROM settings WHERE key = ?",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => Ok(Some(serde_json::from_str(&s)?)),
        None => Ok(None),
    }
}

pub fn settings_set_json(conn: &Connection, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO settings(key, value_json, updated_at) VALUES(?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json, updated_at = excluded.updated_at",
        (key, serde_json::to_string(value)?, now),
    )?;
    Ok(())
}

pub fn settings_delete(conn: &Connection, key: &str) -> anyhow::Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?", [key])?;
    Ok(())
}

fn ensure_settings_updated_at(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "settings", "updated_at")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE settings ADD COLUMN updated_at TEXT", [])?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(prefix: &str) -> std::path::PathBuf {
        let p = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn settings_roundtrip_and_delete() {
        let dir = scratch_dir("yatina-db");
        let conn = open_db(&dir).expect("open db");

        assert!(settings_get_json(&conn, "missing").expect("get").is_none());

        settings_set_json(&conn, "setup.lessonPlan", &json!({ "generationDelayMs": 10 }))
            .expect("set");
        settings_set_json(&conn, "setup.lessonPlan", &json!({ "generationDelayMs": 20 }))
            .expect("overwrite");
        let v = settings_get_json(&conn, "setup.lessonPlan")
            .expect("get")
            .expect("present");
        assert_eq!(v["generationDelayMs"], 20);

        settings_delete(&conn, "setup.lessonPlan").expect("delete");
        assert!(settings_get_json(&conn, "setup.lessonPlan").expect("get").is_none());
    }

    #[test]
    fn reopening_adds_missing_updated_at_column() {
        let dir = scratch_dir("yatina-db-migrate");
        {
            let conn = Connection::open(dir.join(DB_FILE_NAME)).expect("raw open");
            conn.execute(
                "CREATE TABLE settings(key TEXT PRIMARY KEY, value_json TEXT NOT NULL)",
                [],
            )
            .expect("old settings table");
            conn.execute(
                "INSERT INTO settings(key, value_json) VALUES('k', '1')",
                [],
            )
            .expect("old settings row");
        }
        let conn = open_db(&dir).expect("open db");
        assert!(table_has_column(&conn, "settings", "updated_at").expect("pragma"));
        assert_eq!(settings_get_json(&conn, "k").expect("get"), Some(json!(1)));
    }
}
