use std::path::{Path, PathBuf};

use dbpager::backend::sqlite::SqliteSource;
use dbpager::backend::{QuerySource, RawValue, TableName};
use dbpager::catalog::{DisplayCase, TableCatalog};
use dbpager::error::DbpagerError;
use dbpager::grid::{GridSink, MemoryGrid};
use dbpager::navigator::Navigator;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

/// Build a throwaway SQLite file from DDL/DML statements.
fn build_db(name: &str, statements: &[&str]) -> PathBuf {
    let dir = std::env::temp_dir().join("dbpager-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}-{}.db", name, std::process::id()));
    std::fs::remove_file(&path).ok();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();
        for sql in statements {
            sqlx::query(sql).execute(&mut conn).await.unwrap();
        }
        conn.close().await.unwrap();
    });
    path
}

fn users_db(name: &str) -> PathBuf {
    build_db(
        name,
        &[
            "CREATE TABLE users (ID INTEGER, NAME TEXT, CREATED DATE)",
            "INSERT INTO users VALUES (1, 'ann', '2020-01-01')",
            "INSERT INTO users VALUES (2, NULL, '2021-06-15 10:30:00')",
        ],
    )
}

fn cleanup(path: &Path) {
    std::fs::remove_file(path).ok();
}

#[test]
fn test_open_missing_file_is_connection_error() {
    let path = std::env::temp_dir().join("dbpager-test-does-not-exist.db");
    let err = SqliteSource::open(&path).err().unwrap();
    assert!(matches!(err, DbpagerError::Connection { .. }));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_list_tables_returns_stored_names() {
    let path = build_db(
        "catalog",
        &[
            "CREATE TABLE zeta (x INTEGER)",
            "CREATE TABLE Alpha (x INTEGER)",
            "CREATE VIEW not_a_table AS SELECT 1",
        ],
    );
    let mut source = SqliteSource::open(&path).unwrap();
    let catalog = TableCatalog::load(&mut source, DisplayCase::Upper).unwrap();

    let names: Vec<&str> = catalog.tables().iter().map(TableName::as_str).collect();
    assert_eq!(names, vec!["Alpha", "zeta"]);
    assert_eq!(catalog.display_names(), vec!["ALPHA".to_string(), "ZETA".to_string()]);
    cleanup(&path);
}

#[test]
fn test_query_batch_maps_storage_classes() {
    let path = build_db(
        "types",
        &[
            "CREATE TABLE mixed (i INTEGER, r REAL, t TEXT, b BLOB, n TEXT, d DATETIME, f BOOLEAN)",
            "INSERT INTO mixed VALUES (42, 3.14159, 'hi', X'68656C6C6F', NULL, 86400, 1)",
        ],
    );
    let mut source = SqliteSource::open(&path).unwrap();
    let batch = source.query_batch(&TableName::from("mixed"), 0, 10).unwrap();

    assert_eq!(batch.columns, vec!["i", "r", "t", "b", "n", "d", "f"]);
    let row = &batch.rows[0];
    assert_eq!(row[0], RawValue::Integer(42));
    assert_eq!(row[1], RawValue::Float(3.14159));
    assert_eq!(row[2], RawValue::Text("hi".to_string()));
    assert_eq!(row[3], RawValue::Bytes(b"hello".to_vec()));
    assert_eq!(row[4], RawValue::Null);
    assert!(matches!(&row[5], RawValue::DateTime(dt) if dt.to_string().starts_with("1970-01-02")));
    assert_eq!(
        row[6],
        RawValue::Unknown {
            type_name: Some("bool".to_string())
        }
    );
    cleanup(&path);
}

#[test]
fn test_users_table_through_navigator() {
    let path = users_db("users");
    let mut source = SqliteSource::open(&path).unwrap();
    let catalog = TableCatalog::load(&mut source, DisplayCase::Upper).unwrap();
    let mut nav = Navigator::new(source, MemoryGrid::new(), catalog, 100).with_row_counts(true);

    nav.on_table_selected(&TableName::from("users")).unwrap();

    let grid = nav.sink();
    assert_eq!(grid.header_texts(), vec!["ID", "NAME", "CREATED"]);
    assert_eq!(
        grid.row_texts(),
        vec![
            vec!["1", "ann", "2020-01-01"],
            vec!["2", "NULL", "2021-06-15"],
        ]
    );
    assert_eq!(grid.current_row_count(), 3);
    assert_eq!(nav.status().unwrap().total_rows, Some(2));
    cleanup(&path);
}

#[test]
fn test_pagination_against_sqlite() {
    let mut statements = vec!["CREATE TABLE nums (n INTEGER)".to_string()];
    statements.extend((0..25).map(|i| format!("INSERT INTO nums VALUES ({})", i)));
    let refs: Vec<&str> = statements.iter().map(String::as_str).collect();
    let path = build_db("pages", &refs);

    let mut source = SqliteSource::open(&path).unwrap();
    let catalog = TableCatalog::load(&mut source, DisplayCase::Upper).unwrap();
    let mut nav = Navigator::new(source, MemoryGrid::new(), catalog, 10);

    nav.on_table_selected(&TableName::from("nums")).unwrap();
    nav.on_load_more_requested().unwrap();
    nav.on_load_more_requested().unwrap();

    let status = nav.status().unwrap();
    assert_eq!(status.rows_loaded, 25);
    assert!(status.exhausted);
    assert_eq!(nav.sink().row_texts()[24], vec!["24"]);
    cleanup(&path);
}

#[test]
fn test_quoted_table_name() {
    let path = build_db(
        "quoted",
        &[
            "CREATE TABLE \"odd \"\"name\"\"\" (v TEXT)",
            "INSERT INTO \"odd \"\"name\"\"\" VALUES ('ok')",
        ],
    );
    let mut source = SqliteSource::open(&path).unwrap();
    let tables = source.list_tables().unwrap();
    assert_eq!(tables, vec!["odd \"name\"".to_string()]);
    let batch = source.query_batch(&TableName::new(tables[0].as_str()), 0, 5).unwrap();
    assert_eq!(batch.rows, vec![vec![RawValue::Text("ok".to_string())]]);
    assert_eq!(source.count_rows(&TableName::new(tables[0].as_str())).unwrap(), 1);
    cleanup(&path);
}

#[test]
fn test_missing_table_is_source_error() {
    let path = users_db("missing");
    let mut source = SqliteSource::open(&path).unwrap();
    let err = source.query_batch(&TableName::from("ghosts"), 0, 5).unwrap_err();
    assert!(matches!(err, DbpagerError::Source { .. }));
    assert!(err.to_string().contains("ghosts"));
    cleanup(&path);
}
