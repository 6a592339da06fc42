//! Input path list: the `Path` column of a CSV export.

use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{info, warn};

use super::FetchError;

pub const PATH_COLUMN: &str = "Path";

/// Read every non-blank value of the `Path` column from a CSV file.
pub fn load_paths(file: &Path) -> Result<Vec<String>, FetchError> {
    let reader = csv::Reader::from_path(file).map_err(|source| FetchError::Input {
        path: file.to_path_buf(),
        source,
    })?;
    let paths = read_paths(reader, file)?;
    info!(count = paths.len(), file = %file.display(), "Loaded content paths");
    Ok(paths)
}

fn read_paths<R: Read>(mut reader: csv::Reader<R>, file: &Path) -> Result<Vec<String>, FetchError> {
    let input_err = |source| FetchError::Input {
        path: file.to_path_buf(),
        source,
    };

    let column = reader
        .headers()
        .map_err(input_err)?
        .iter()
        .position(|h| h.trim() == PATH_COLUMN)
        .ok_or_else(|| FetchError::MissingColumn {
            path: file.to_path_buf(),
            column: PATH_COLUMN,
        })?;

    let mut paths = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(input_err)?;
        match record.get(column).map(str::trim) {
            Some(value) if !value.is_empty() => paths.push(value.to_string()),
            _ => warn!(row = row + 1, "Skipping row with empty path"),
        }
    }
    Ok(paths)
}

/// Drop repeated paths, keeping the first occurrence of each in input order.
pub fn dedupe_paths(paths: impl IntoIterator<Item = String>) -> Vec<String> {
    paths.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
