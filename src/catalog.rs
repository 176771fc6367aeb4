use std::str::FromStr;

use serde::Deserialize;

use crate::backend::{QuerySource, TableName};
use crate::error::DbpagerError;

/// How table names are shown. Queries always use the name as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCase {
    #[default]
    Upper,
    Verbatim,
}

impl FromStr for DisplayCase {
    type Err = DbpagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "verbatim" => Ok(Self::Verbatim),
            other => Err(DbpagerError::Config {
                message: format!(
                    "unknown display case: '{}' (expected 'upper' or 'verbatim')",
                    other
                ),
            }),
        }
    }
}

/// The sorted list of browsable tables, fetched once per session.
#[derive(Debug, Clone)]
pub struct TableCatalog {
    tables: Vec<TableName>,
    display_case: DisplayCase,
}

impl TableCatalog {
    /// Fetch and sort the table list. Any failure here is fatal to the session.
    pub fn load<Q: QuerySource + ?Sized>(
        source: &mut Q,
        display_case: DisplayCase,
    ) -> Result<Self, DbpagerError> {
        let names = source.list_tables().map_err(|e| DbpagerError::Catalog {
            message: e.to_string(),
        })?;
        Ok(Self::from_names(names, display_case))
    }

    pub fn from_names(names: Vec<String>, display_case: DisplayCase) -> Self {
        let mut tables: Vec<TableName> = names.into_iter().map(TableName::new).collect();
        // Byte-wise ordering on the stored names, before any display casing.
        tables.sort_unstable();
        Self {
            tables,
            display_case,
        }
    }

    pub fn tables(&self) -> &[TableName] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TableName> {
        self.tables.get(index)
    }

    pub fn contains(&self, table: &TableName) -> bool {
        self.position(table).is_some()
    }

    pub fn position(&self, table: &TableName) -> Option<usize> {
        self.tables.binary_search(table).ok()
    }

    pub fn display_name(&self, table: &TableName) -> String {
        match self.display_case {
            DisplayCase::Upper => table.as_str().to_uppercase(),
            DisplayCase::Verbatim => table.as_str().to_string(),
        }
    }

    /// Display names in catalog order.
    pub fn display_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| self.display_name(t)).collect()
    }
}
