use rusqlite::Connection;
use studybuddy_core::db::migrations::latest_version;
use studybuddy_core::db::{open_db, open_db_in_memory, DbError};
use studybuddy_core::{
    DocumentStore, KvStorage, NewSubject, Priority, SqliteKvStorage, Theme, STORAGE_KEY,
};

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_items');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn document_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studybuddy.db");

    let subject_id = {
        let conn = open_db(&path).unwrap();
        let mut store = DocumentStore::open(SqliteKvStorage::new(&conn)).unwrap();
        let id = store
            .add_subject(NewSubject::new("Math", "#4CAF50", Priority::High))
            .unwrap();
        store.toggle_theme().unwrap();
        id
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = DocumentStore::open(SqliteKvStorage::new(&conn)).unwrap();
    let subjects = store.subjects().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].id, subject_id);
    assert_eq!(store.settings().unwrap().theme, Theme::Dark);
}

#[test]
fn reset_rewrites_single_blob() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::open(SqliteKvStorage::new(&conn)).unwrap();
    store
        .add_subject(NewSubject::new("Math", "#4CAF50", Priority::High))
        .unwrap();

    store.reset().unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    let blob = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
    assert!(blob.contains("\"subjects\":[]"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
