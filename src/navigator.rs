use crate::backend::{QuerySource, TableName};
use crate::catalog::TableCatalog;
use crate::error::DbpagerError;
use crate::grid::GridSink;
use crate::loader::{BatchOutcome, RowBatchLoader};

/// What a navigation intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Loaded(BatchOutcome),
    /// The selected table has no more rows; nothing was fetched.
    Exhausted,
    /// Load-more with no table selected; nothing was fetched.
    NoTableSelected,
}

/// Load progress for the selected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStatus {
    pub table: TableName,
    pub rows_loaded: usize,
    pub total_rows: Option<u64>,
    pub exhausted: bool,
}

impl LoadStatus {
    /// More rows can still be fetched.
    pub fn has_more(&self) -> bool {
        match self.total_rows {
            Some(total) => !self.exhausted && (self.rows_loaded as u64) < total,
            None => !self.exhausted,
        }
    }

    /// `Loaded N of M rows`, with `?` when the total is unknown.
    pub fn summary_counts(&self) -> String {
        let total = self
            .total_rows
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!("Loaded {} of {} rows", self.rows_loaded, total)
    }

    /// Status line for the browser footer.
    pub fn summary(&self) -> String {
        if self.has_more() {
            format!("{} - press Enter to load more", self.summary_counts())
        } else {
            self.summary_counts()
        }
    }
}

/// Owns the session: source, grid, catalog and pagination.
pub struct Navigator<Q: QuerySource, G: GridSink> {
    source: Q,
    sink: G,
    catalog: TableCatalog,
    loader: RowBatchLoader,
    selected: Option<TableName>,
    total_rows: Option<u64>,
    count_rows: bool,
    last_count_error: Option<DbpagerError>,
}

impl<Q: QuerySource, G: GridSink> Navigator<Q, G> {
    pub fn new(source: Q, sink: G, catalog: TableCatalog, batch_size: usize) -> Self {
        Self {
            source,
            sink,
            catalog,
            loader: RowBatchLoader::new(batch_size),
            selected: None,
            total_rows: None,
            count_rows: false,
            last_count_error: None,
        }
    }

    /// Ask the source for a row total on every selection.
    pub fn with_row_counts(mut self, enabled: bool) -> Self {
        self.count_rows = enabled;
        self
    }

    pub fn catalog(&self) -> &TableCatalog {
        &self.catalog
    }

    pub fn sink(&self) -> &G {
        &self.sink
    }

    pub fn source(&self) -> &Q {
        &self.source
    }

    pub fn loader(&self) -> &RowBatchLoader {
        &self.loader
    }

    pub fn selected(&self) -> Option<&TableName> {
        self.selected.as_ref()
    }

    /// Error from the last row count attempt, if it failed.
    pub fn take_count_error(&mut self) -> Option<DbpagerError> {
        self.last_count_error.take()
    }

    /// Clear the grid and load the first batch of `table`.
    pub fn on_table_selected(&mut self, table: &TableName) -> Result<NavOutcome, DbpagerError> {
        if !self.catalog.contains(table) {
            return Err(DbpagerError::UnknownTable {
                name: table.as_str().to_string(),
            });
        }

        self.sink.clear();
        self.selected = Some(table.clone());
        self.loader.reset(table.clone());
        self.total_rows = None;
        self.last_count_error = None;

        if self.count_rows {
            match self.source.count_rows(table) {
                Ok(total) => self.total_rows = Some(total),
                Err(e) => self.last_count_error = Some(e),
            }
        }

        let outcome = self
            .loader
            .load_batch(&mut self.source, &mut self.sink, table, 0)?;
        Ok(NavOutcome::Loaded(outcome))
    }

    /// Select the catalog entry at `index`.
    pub fn select_index(&mut self, index: usize) -> Result<NavOutcome, DbpagerError> {
        let table = self
            .catalog
            .get(index)
            .cloned()
            .ok_or_else(|| DbpagerError::UnknownTable {
                name: format!("#{}", index),
            })?;
        self.on_table_selected(&table)
    }

    /// Fetch the next batch of the selected table.
    pub fn on_load_more_requested(&mut self) -> Result<NavOutcome, DbpagerError> {
        let Some(table) = self.selected.clone() else {
            return Ok(NavOutcome::NoTableSelected);
        };
        let offset = match self.loader.state() {
            Some(state) if state.exhausted => return Ok(NavOutcome::Exhausted),
            Some(state) => state.rows_loaded,
            None => 0,
        };
        let outcome = self
            .loader
            .load_batch(&mut self.source, &mut self.sink, &table, offset)?;
        Ok(NavOutcome::Loaded(outcome))
    }

    pub fn status(&self) -> Option<LoadStatus> {
        let state = self.loader.state()?;
        Some(LoadStatus {
            table: state.table.clone(),
            rows_loaded: state.rows_loaded,
            total_rows: self.total_rows,
            exhausted: state.exhausted,
        })
    }

    /// Hand back the source and grid, ending the session.
    pub fn into_parts(self) -> (Q, G) {
        (self.source, self.sink)
    }
}
