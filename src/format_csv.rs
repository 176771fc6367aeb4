use std::io::Write;
use std::path::Path;

use crate::error::DbpagerError;
use crate::grid::MemoryGrid;

/// Write a formatted grid as RFC 4180 CSV to a file.
pub fn write_csv(grid: &MemoryGrid, path: &Path) -> Result<(), DbpagerError> {
    let file = std::fs::File::create(path)?;
    write_csv_to_writer(grid, file)
}

/// Write a formatted grid as RFC 4180 CSV: header line, then one line per row.
/// Lines end in CRLF and fields are quoted only when needed.
pub fn write_csv_to_writer<W: Write>(grid: &MemoryGrid, writer: W) -> Result<(), DbpagerError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(writer);

    let header = grid.header_texts();
    if !header.is_empty() {
        csv_writer.write_record(&header).map_err(csv_error)?;
    }
    for row in grid.row_texts() {
        csv_writer.write_record(&row).map_err(csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> DbpagerError {
    DbpagerError::Format {
        message: format!("csv: {}", err),
    }
}
