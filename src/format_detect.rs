use std::path::{Path, PathBuf};

use crate::error::DbpagerError;

/// Supported dump file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Toon,
    Csv,
}

/// Detect the output format from a file path extension.
/// Returns the format and the (possibly normalized) path.
///
/// - `.toon`, `.txt` → Toon
/// - `.csv` → Csv
/// - No extension → appends `.toon`, returns Toon
/// - Unrecognized → error with supported format list
pub fn detect_format(path: &Path) -> Result<(OutputFormat, PathBuf), DbpagerError> {
    let ext = match path.extension() {
        Some(e) => e.to_ascii_lowercase(),
        None => {
            let mut p = path.to_path_buf();
            p.set_extension("toon");
            return Ok((OutputFormat::Toon, p));
        }
    };

    let format = match ext.to_str().unwrap_or("") {
        "toon" | "txt" => OutputFormat::Toon,
        "csv" => OutputFormat::Csv,
        other => {
            return Err(DbpagerError::Format {
                message: format!(
                    "unsupported output format \".{other}\"; supported: .toon, .txt, .csv"
                ),
            });
        }
    };

    Ok((format, path.to_path_buf()))
}
