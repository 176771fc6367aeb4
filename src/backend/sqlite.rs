use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Executor, Row, Statement, TypeInfo, ValueRef};
use tokio::runtime::{Builder, Runtime};

use crate::backend::{QueryBatch, QuerySource, RawValue, TableName};
use crate::error::DbpagerError;

const CATALOG_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";

/// Layouts SQLite applications commonly store timestamps in, most specific first.
const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Read-only query source over a SQLite database file.
///
/// sqlx is async, so the source owns a current-thread runtime and blocks on
/// each query. The connection is used by one caller at a time.
pub struct SqliteSource {
    conn: SqliteConnection,
    runtime: Runtime,
}

impl SqliteSource {
    pub fn open(path: &Path) -> Result<Self, DbpagerError> {
        if !path.exists() {
            return Err(DbpagerError::Connection {
                message: format!("database file not found: {}", path.display()),
            });
        }

        let runtime = Builder::new_current_thread().enable_all().build()?;
        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        let conn = runtime
            .block_on(options.connect())
            .map_err(|e| DbpagerError::Connection {
                message: format!("cannot open {}: {}", path.display(), e),
            })?;

        Ok(Self { conn, runtime })
    }
}

impl QuerySource for SqliteSource {
    fn list_tables(&mut self) -> Result<Vec<String>, DbpagerError> {
        let Self { runtime, conn, .. } = self;
        let names: Vec<(String,)> = runtime
            .block_on(sqlx::query_as(CATALOG_SQL).fetch_all(&mut *conn))
            .map_err(|e| DbpagerError::Source {
                message: format!("table list query failed: {}", e),
            })?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    fn query_batch(
        &mut self,
        table: &TableName,
        offset: usize,
        limit: usize,
    ) -> Result<QueryBatch, DbpagerError> {
        let sql = format!(
            "SELECT * FROM {} LIMIT ? OFFSET ?",
            quote_identifier(table.as_str())
        );
        let Self { runtime, conn, .. } = self;

        runtime.block_on(async {
            let statement = (&mut *conn)
                .prepare(sql.as_str())
                .await
                .map_err(|e| source_error(table, e))?;
            let columns: Vec<String> = statement
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            let declared: Vec<String> = statement
                .columns()
                .iter()
                .map(|c| c.type_info().name().to_string())
                .collect();

            let rows = sqlx::query(sql.as_str())
                .bind(to_sql_int(limit))
                .bind(to_sql_int(offset))
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| source_error(table, e))?;

            let rows = rows
                .iter()
                .map(|row| scan_row(row, &declared))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| source_error(table, e))?;

            Ok(QueryBatch { columns, rows })
        })
    }

    fn count_rows(&mut self, table: &TableName) -> Result<u64, DbpagerError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table.as_str()));
        let Self { runtime, conn, .. } = self;
        let count: i64 = runtime
            .block_on(sqlx::query_scalar(sql.as_str()).fetch_one(&mut *conn))
            .map_err(|e| source_error(table, e))?;
        Ok(count.max(0) as u64)
    }
}

fn source_error(table: &TableName, err: sqlx::Error) -> DbpagerError {
    DbpagerError::Source {
        message: format!("query on {} failed: {}", table, err),
    }
}

fn to_sql_int(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Quote a table name as a SQLite identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Scan every column of a row. A row is only produced when all columns decode.
fn scan_row(row: &SqliteRow, declared: &[String]) -> Result<Vec<RawValue>, sqlx::Error> {
    (0..row.len())
        .map(|index| {
            let declared = declared.get(index).map(String::as_str).unwrap_or("");
            scan_value(row, index).map(|plain| refine_declared(plain, declared))
        })
        .collect()
}

/// Decode a value by its storage class.
fn scan_value(row: &SqliteRow, index: usize) -> Result<RawValue, sqlx::Error> {
    let storage = {
        let value = row.try_get_raw(index)?;
        if value.is_null() {
            return Ok(RawValue::Null);
        }
        value.type_info().name().to_string()
    };

    let raw = match storage.as_str() {
        "INTEGER" => RawValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => RawValue::Float(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" => RawValue::Text(row.try_get_unchecked::<String, _>(index)?),
        "BLOB" => RawValue::Bytes(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        other => RawValue::Unknown {
            type_name: Some(other.to_lowercase()),
        },
    };
    Ok(raw)
}

/// Apply the column's declared type on top of the storage-class value.
///
/// Date columns become date/time when the stored value parses; otherwise the
/// storage value is kept. Boolean columns have no rendering rule of their own.
fn refine_declared(plain: RawValue, declared: &str) -> RawValue {
    match declared.to_ascii_uppercase().as_str() {
        "DATE" | "DATETIME" | "TIMESTAMP" => {
            let parsed = match &plain {
                RawValue::Text(s) => parse_timestamp(s),
                RawValue::Integer(secs) => {
                    DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc())
                }
                _ => None,
            };
            parsed.map(RawValue::DateTime).unwrap_or(plain)
        }
        "BOOLEAN" | "BOOL" => match plain {
            RawValue::Integer(_) => RawValue::Unknown {
                type_name: Some("bool".to_string()),
            },
            other => other,
        },
        _ => plain,
    }
}

/// Parse a stored timestamp. An offset, when present, is kept as written.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim().trim_end_matches('Z');

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, layout) {
            return Some(dt.naive_local());
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
