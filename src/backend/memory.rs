//! In-memory query source.

use super::{QueryBatch, QuerySource, RawValue, TableName};
use crate::error::DbpagerError;

/// One table held by [`MemorySource`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

/// A bounded fetch that [`MemorySource`] served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub table: String,
    pub offset: usize,
    pub limit: usize,
}

/// A query source backed by tables kept in memory.
///
/// Useful for tests and demos where no database file is available. Every
/// batch fetch is recorded so callers can check which offsets were asked for.
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: Vec<MemoryTable>,
    queries: Vec<RecordedQuery>,
    fail_catalog: Option<String>,
    fail_count: Option<String>,
    fail_next_batch: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Tables are listed in the order they were added.
    pub fn with_table(
        mut self,
        name: &str,
        columns: &[&str],
        rows: Vec<Vec<RawValue>>,
    ) -> Self {
        self.tables.push(MemoryTable {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        });
        self
    }

    /// Make every `list_tables` call fail with `message`.
    pub fn failing_catalog(mut self, message: &str) -> Self {
        self.fail_catalog = Some(message.to_string());
        self
    }

    /// Make every `count_rows` call fail with `message`.
    pub fn failing_count(mut self, message: &str) -> Self {
        self.fail_count = Some(message.to_string());
        self
    }

    /// Make the next `query_batch` call fail with `message`.
    pub fn fail_next_batch(&mut self, message: &str) {
        self.fail_next_batch = Some(message.to_string());
    }

    /// Batch fetches served so far, oldest first.
    pub fn queries(&self) -> &[RecordedQuery] {
        &self.queries
    }

    fn table(&self, name: &TableName) -> Result<&MemoryTable, DbpagerError> {
        self.tables
            .iter()
            .find(|t| t.name == name.as_str())
            .ok_or_else(|| DbpagerError::Source {
                message: format!("no such table: {}", name),
            })
    }
}

impl QuerySource for MemorySource {
    fn list_tables(&mut self) -> Result<Vec<String>, DbpagerError> {
        if let Some(message) = &self.fail_catalog {
            return Err(DbpagerError::Source {
                message: message.clone(),
            });
        }
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn query_batch(
        &mut self,
        table: &TableName,
        offset: usize,
        limit: usize,
    ) -> Result<QueryBatch, DbpagerError> {
        if let Some(message) = self.fail_next_batch.take() {
            return Err(DbpagerError::Source { message });
        }
        let found = self.table(table)?;
        let batch = QueryBatch {
            columns: found.columns.clone(),
            rows: found.rows.iter().skip(offset).take(limit).cloned().collect(),
        };
        self.queries.push(RecordedQuery {
            table: table.as_str().to_string(),
            offset,
            limit,
        });
        Ok(batch)
    }

    fn count_rows(&mut self, table: &TableName) -> Result<u64, DbpagerError> {
        if let Some(message) = &self.fail_count {
            return Err(DbpagerError::Source {
                message: message.clone(),
            });
        }
        Ok(self.table(table)?.rows.len() as u64)
    }
}
