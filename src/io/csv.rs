//! Delimited text tables

use std::fs;
use std::path::Path;

use crate::error::FEAResult;

/// Render rows as delimited text, one line per row, values in scientific
/// notation with `precision` digits after the point
pub fn format_rows<R>(rows: &[R], precision: usize, delimiter: &str) -> String
where
    R: AsRef<[f64]>,
{
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .as_ref()
            .iter()
            .map(|v| format!("{v:.precision$e}"))
            .collect();
        out.push_str(&line.join(delimiter));
        out.push('\n');
    }
    out
}

/// Write rows to `path`, creating parent directories as needed
pub fn write_rows<R>(path: &Path, rows: &[R], precision: usize, delimiter: &str) -> FEAResult<()>
where
    R: AsRef<[f64]>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format_rows(rows, precision, delimiter))?;
    Ok(())
}
