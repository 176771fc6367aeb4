use crate::catalog::TableCatalog;
use crate::error::DbpagerError;
use crate::grid::MemoryGrid;

/// Convert a formatted grid to a TOON-formatted string.
///
/// Each data row becomes an object keyed by the header texts. Cells are
/// emitted as the strings shown on screen, so `NULL` stays the marker text.
pub fn grid_to_toon(grid: &MemoryGrid) -> Result<String, DbpagerError> {
    let header = grid.header_texts();

    // toon_format can't infer columns from an empty array, so the header is
    // produced by hand.
    if grid.rows().is_empty() && !header.is_empty() {
        return Ok(format!("[0]{{{}}}:\n", header.join(",")));
    }

    let array: Vec<serde_json::Value> = grid
        .row_texts()
        .into_iter()
        .map(|row| {
            let mut map = serde_json::Map::new();
            for (i, name) in header.iter().enumerate() {
                let value = match row.get(i) {
                    Some(text) => serde_json::Value::String(text.to_string()),
                    None => serde_json::Value::Null,
                };
                map.insert(name.to_string(), value);
            }
            serde_json::Value::Object(map)
        })
        .collect();

    encode(&serde_json::Value::Array(array))
}

/// Convert the catalog to TOON: one `{name, display}` object per table.
pub fn catalog_to_toon(catalog: &TableCatalog) -> Result<String, DbpagerError> {
    if catalog.is_empty() {
        return Ok("[0]{name,display}:\n".to_string());
    }

    let array: Vec<serde_json::Value> = catalog
        .tables()
        .iter()
        .map(|table| {
            let mut map = serde_json::Map::new();
            map.insert(
                "name".to_string(),
                serde_json::Value::String(table.as_str().to_string()),
            );
            map.insert(
                "display".to_string(),
                serde_json::Value::String(catalog.display_name(table)),
            );
            serde_json::Value::Object(map)
        })
        .collect();

    encode(&serde_json::Value::Array(array))
}

pub(crate) fn encode(value: &serde_json::Value) -> Result<String, DbpagerError> {
    toon_format::encode_default(value).map_err(|e| DbpagerError::Format {
        message: e.to_string(),
    })
}
