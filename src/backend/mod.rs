pub mod memory;
pub mod sqlite;

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::DbpagerError;

/// Name of a relation exactly as the data source reported it.
///
/// Display casing lives in the catalog; queries always use this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A single value as received from the data source, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
    Null,
    /// A value the driver produced but no formatting rule covers.
    Unknown { type_name: Option<String> },
}

/// Rows returned by one bounded fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBatch {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

/// Boundary to the relational data source.
///
/// Every call runs to completion before returning; callers never have more
/// than one query outstanding.
pub trait QuerySource {
    /// Names of all browsable tables, in whatever order the source keeps them.
    fn list_tables(&mut self) -> Result<Vec<String>, DbpagerError>;

    /// Fetch at most `limit` rows of `table`, skipping the first `offset`.
    /// Each row has one value per entry in `columns`, in the same order.
    fn query_batch(
        &mut self,
        table: &TableName,
        offset: usize,
        limit: usize,
    ) -> Result<QueryBatch, DbpagerError>;

    /// Total rows in `table`.
    fn count_rows(&mut self, table: &TableName) -> Result<u64, DbpagerError>;
}

impl<Q: QuerySource + ?Sized> QuerySource for Box<Q> {
    fn list_tables(&mut self) -> Result<Vec<String>, DbpagerError> {
        (**self).list_tables()
    }

    fn query_batch(
        &mut self,
        table: &TableName,
        offset: usize,
        limit: usize,
    ) -> Result<QueryBatch, DbpagerError> {
        (**self).query_batch(table, offset, limit)
    }

    fn count_rows(&mut self, table: &TableName) -> Result<u64, DbpagerError> {
        (**self).count_rows(table)
    }
}
