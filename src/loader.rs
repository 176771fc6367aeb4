use crate::backend::{QuerySource, TableName};
use crate::error::DbpagerError;
use crate::format::{FormattedCell, format_value};
use crate::grid::GridSink;

/// Rows fetched per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Grid rows taken by the header before the first data row.
const HEADER_ROWS: usize = 1;

/// Pagination bookkeeping for the selected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    pub table: TableName,
    pub rows_loaded: usize,
    /// The last batch came back short; there is nothing more to fetch.
    pub exhausted: bool,
}

impl LoadState {
    pub fn new(table: TableName) -> Self {
        Self {
            table,
            rows_loaded: 0,
            exhausted: false,
        }
    }
}

/// Result of one successful batch load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub rows_fetched: usize,
    pub exhausted: bool,
}

/// Fetches a table in fixed-size batches and feeds formatted cells to a grid.
#[derive(Debug)]
pub struct RowBatchLoader {
    batch_size: usize,
    state: Option<LoadState>,
}

impl RowBatchLoader {
    /// A batch size of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            state: None,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn state(&self) -> Option<&LoadState> {
        self.state.as_ref()
    }

    /// Start over on `table` with nothing loaded.
    pub fn reset(&mut self, table: TableName) {
        self.state = Some(LoadState::new(table));
    }

    /// Load one batch of `table` starting at `offset`.
    ///
    /// Offset 0 starts the table over: the sink is cleared, the header row is
    /// written and the load state is reset. Any other offset must equal the
    /// rows already loaded for `table`. On error nothing from this batch
    /// reaches the sink and the load state is left as it was.
    pub fn load_batch<Q, G>(
        &mut self,
        source: &mut Q,
        sink: &mut G,
        table: &TableName,
        offset: usize,
    ) -> Result<BatchOutcome, DbpagerError>
    where
        Q: QuerySource + ?Sized,
        G: GridSink + ?Sized,
    {
        let loaded = self
            .state
            .as_ref()
            .filter(|s| &s.table == table)
            .map_or(0, |s| s.rows_loaded);
        if offset != 0 && offset != loaded {
            return Err(DbpagerError::Source {
                message: format!(
                    "offset {} does not follow the {} rows loaded from {}",
                    offset, loaded, table
                ),
            });
        }

        let batch = source.query_batch(table, offset, self.batch_size)?;

        if offset == 0 {
            sink.clear();
            self.reset(table.clone());
            for (column, name) in batch.columns.iter().enumerate() {
                sink.set_header_cell(column, FormattedCell::header(name));
            }
        }

        let state = self
            .state
            .get_or_insert_with(|| LoadState::new(table.clone()));
        let first_row = HEADER_ROWS + state.rows_loaded;
        for (i, row) in batch.rows.iter().enumerate() {
            for (column, value) in row.iter().enumerate() {
                sink.append_cell(first_row + i, column, format_value(value));
            }
        }

        let rows_fetched = batch.rows.len();
        state.rows_loaded += rows_fetched;
        state.exhausted = rows_fetched < self.batch_size;

        Ok(BatchOutcome {
            rows_fetched,
            exhausted: state.exhausted,
        })
    }
}
