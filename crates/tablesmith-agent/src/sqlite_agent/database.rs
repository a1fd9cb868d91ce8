use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rusqlite::{Connection, Result as SqliteResult};
use tablesmith_core::{Error, Result};

/// Result of applying generated SQL to a fresh database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Schema and seed applied; lists the tables now present
    Built(Vec<String>),
    /// SQLite refused the SQL; the database file has been removed
    Rejected(String),
}

/// Create `path` from scratch and apply `schema_sql` then `seed_sql` in one transaction.
///
/// A previous file at `path` is replaced. When SQLite rejects the statements
/// nothing is left behind.
///
/// # Errors
/// Returns [`Error::Database`] if the file cannot be created or queried, and
/// [`Error::Io`] if a stale file cannot be removed.
pub fn build_database(path: &Path, schema_sql: &str, seed_sql: &str) -> Result<BuildOutcome> {
    remove_if_present(path)?;

    let mut conn = Connection::open(path).map_err(|err| {
        Error::Database(format!("Failed to open {}: {err}", path.display()))
    })?;

    if let Err(err) = apply(&mut conn, schema_sql, seed_sql) {
        drop(conn);
        remove_if_present(path)?;
        tracing::warn!("Generated SQL rejected by SQLite: {err}");
        return Ok(BuildOutcome::Rejected(err.to_string()));
    }

    let tables = list_tables(&conn)
        .map_err(|err| Error::Database(format!("Failed to list tables: {err}")))?;
    tracing::debug!("Built {} with {} tables", path.display(), tables.len());

    Ok(BuildOutcome::Built(tables))
}

fn apply(conn: &mut Connection, schema_sql: &str, seed_sql: &str) -> SqliteResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let tx = conn.transaction()?;
    tx.execute_batch(schema_sql)?;
    if !seed_sql.trim().is_empty() {
        tx.execute_batch(seed_sql)?;
    }
    tx.commit()
}

fn list_tables(conn: &Connection) -> SqliteResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
    names.collect()
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCHEMA: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL UNIQUE);
        CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL REFERENCES users(id), title TEXT);";
    const SEED: &str = "INSERT INTO users (email) VALUES ('ada@example.com');
        INSERT INTO posts (user_id, title) VALUES (1, 'Hello');";

    #[test]
    fn test_build_applies_schema_and_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.db");

        let outcome = build_database(&path, SCHEMA, SEED).unwrap();
        assert_eq!(
            outcome,
            BuildOutcome::Built(vec!["posts".to_owned(), "users".to_owned()])
        );

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_build_replaces_previous_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.db");
        build_database(&path, "CREATE TABLE legacy (id INTEGER);", "").unwrap();

        let outcome = build_database(&path, SCHEMA, "").unwrap();
        assert_eq!(
            outcome,
            BuildOutcome::Built(vec!["posts".to_owned(), "users".to_owned()])
        );
    }

    #[test]
    fn test_bad_seed_removes_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.db");

        let outcome = build_database(&path, SCHEMA, "INSERT INTO missing VALUES (1);").unwrap();
        match outcome {
            BuildOutcome::Rejected(reason) => assert!(reason.contains("missing")),
            BuildOutcome::Built(tables) => panic!("expected rejection, built {tables:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.db");

        let outcome = build_database(
            &path,
            SCHEMA,
            "INSERT INTO posts (user_id, title) VALUES (42, 'orphan');",
        )
        .unwrap();
        assert!(matches!(outcome, BuildOutcome::Rejected(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_unopenable_path_is_database_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("app.db");

        let error = build_database(&path, SCHEMA, "").unwrap_err();
        assert!(matches!(error, Error::Database(_)));
    }
}
