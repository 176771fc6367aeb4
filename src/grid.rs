use crate::format::FormattedCell;

/// Display surface that receives formatted cells.
///
/// Row 0 is the header row; data rows start at 1. The core never reads cells
/// back, only the row count.
pub trait GridSink {
    fn set_header_cell(&mut self, column: usize, cell: FormattedCell);
    fn append_cell(&mut self, row: usize, column: usize, cell: FormattedCell);
    fn clear(&mut self);
    /// Rows currently materialized, header included.
    fn current_row_count(&self) -> usize;
}

impl<G: GridSink + ?Sized> GridSink for &mut G {
    fn set_header_cell(&mut self, column: usize, cell: FormattedCell) {
        (**self).set_header_cell(column, cell)
    }

    fn append_cell(&mut self, row: usize, column: usize, cell: FormattedCell) {
        (**self).append_cell(row, column, cell)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn current_row_count(&self) -> usize {
        (**self).current_row_count()
    }
}

/// A grid kept in memory: one header row plus data rows.
///
/// Cells written past the end of a row pad the gap with empty plain cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    header: Vec<FormattedCell>,
    rows: Vec<Vec<FormattedCell>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> &[FormattedCell] {
        &self.header
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<FormattedCell>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Header texts, for output formats that only carry strings.
    pub fn header_texts(&self) -> Vec<&str> {
        self.header.iter().map(|c| c.text.as_str()).collect()
    }

    /// Data row texts, for output formats that only carry strings.
    pub fn row_texts(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }
}

fn place(row: &mut Vec<FormattedCell>, column: usize, cell: FormattedCell) {
    if row.len() <= column {
        row.resize_with(column + 1, blank);
    }
    row[column] = cell;
}

fn blank() -> FormattedCell {
    FormattedCell::new(
        String::new(),
        crate::format::Alignment::Left,
        crate::format::CellTag::Plain,
    )
}

impl GridSink for MemoryGrid {
    fn set_header_cell(&mut self, column: usize, cell: FormattedCell) {
        place(&mut self.header, column, cell);
    }

    fn append_cell(&mut self, row: usize, column: usize, cell: FormattedCell) {
        // Row 0 belongs to the header.
        let Some(index) = row.checked_sub(1) else {
            self.set_header_cell(column, cell);
            return;
        };
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, Vec::new);
        }
        place(&mut self.rows[index], column, cell);
    }

    fn clear(&mut self) {
        self.header.clear();
        self.rows.clear();
    }

    fn current_row_count(&self) -> usize {
        let header = usize::from(!self.header.is_empty());
        header + self.rows.len()
    }
}
