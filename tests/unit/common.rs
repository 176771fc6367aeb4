use chrono::NaiveDate;
use dbpager::backend::RawValue;
use dbpager::backend::memory::MemorySource;
use dbpager::catalog::{DisplayCase, TableCatalog};
use dbpager::format::{FormattedCell, format_value};
use dbpager::grid::{GridSink, MemoryGrid};
use dbpager::navigator::Navigator;

/// Single-column rows holding 0..n.
pub fn numbered_rows(n: i64) -> Vec<Vec<RawValue>> {
    (0..n).map(|i| vec![RawValue::Integer(i)]).collect()
}

pub fn date(y: i32, m: u32, d: u32) -> RawValue {
    RawValue::DateTime(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

/// The USERS table: (ID int, NAME text, CREATED date).
pub fn users_source() -> MemorySource {
    MemorySource::new().with_table(
        "USERS",
        &["ID", "NAME", "CREATED"],
        vec![
            vec![
                RawValue::Integer(1),
                RawValue::Text("ann".to_string()),
                date(2020, 1, 1),
            ],
            vec![RawValue::Integer(2), RawValue::Null, date(2021, 6, 15)],
        ],
    )
}

pub fn navigator(
    mut source: MemorySource,
    batch_size: usize,
) -> Navigator<MemorySource, MemoryGrid> {
    let catalog = TableCatalog::load(&mut source, DisplayCase::Upper).unwrap();
    Navigator::new(source, MemoryGrid::new(), catalog, batch_size)
}

/// A grid built straight from strings, bypassing any source.
pub fn text_grid(header: &[&str], rows: &[&[&str]]) -> MemoryGrid {
    let mut grid = MemoryGrid::new();
    for (col, name) in header.iter().enumerate() {
        grid.set_header_cell(col, FormattedCell::header(name));
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, text) in row.iter().enumerate() {
            grid.append_cell(i + 1, col, format_value(&RawValue::Text(text.to_string())));
        }
    }
    grid
}
