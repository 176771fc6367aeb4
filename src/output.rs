use crate::error::DbpagerError;
use crate::format_toon;
use std::path::Path;

/// Print TOON result to stdout.
pub fn print_result(toon_string: &str) {
    print!("{}", toon_string);
}

/// Print error to stderr in the contract format: error: <category>: <message>
pub fn print_error(err: &DbpagerError) {
    eprintln!("error: {}", err);
}

/// Print a non-fatal warning to stderr.
pub fn print_warning(message: &str) {
    eprintln!("warning: {}", message);
}

/// Build the file output summary as a TOON object.
///
/// Summary includes: rows_written (number), file (string), exhausted (bool),
/// and message (string, only when more rows remain).
pub fn summary_toon(
    rows: usize,
    path: &Path,
    exhausted: bool,
    message: Option<&str>,
) -> Result<String, DbpagerError> {
    let mut map = serde_json::Map::new();
    map.insert(
        "rows_written".to_string(),
        serde_json::Value::Number(serde_json::Number::from(rows)),
    );
    map.insert(
        "file".to_string(),
        serde_json::Value::String(path.display().to_string()),
    );
    map.insert("exhausted".to_string(), serde_json::Value::Bool(exhausted));
    if let Some(msg) = message {
        map.insert(
            "message".to_string(),
            serde_json::Value::String(msg.to_string()),
        );
    }
    format_toon::encode(&serde_json::Value::Object(map))
}

/// Print file output summary to stdout as a valid TOON object.
pub fn print_summary(
    rows: usize,
    path: &Path,
    exhausted: bool,
    message: Option<&str>,
) -> Result<(), DbpagerError> {
    let toon = summary_toon(rows, path, exhausted, message)?;
    print!("{}", toon);
    Ok(())
}

/// Write TOON string to a file.
pub fn write_file(toon_string: &str, path: &Path) -> Result<(), DbpagerError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(DbpagerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("parent directory does not exist: {}", parent.display()),
        )));
    }
    std::fs::write(path, toon_string)?;
    Ok(())
}
