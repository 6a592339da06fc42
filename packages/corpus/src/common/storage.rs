//! JSON persistence for record sequences.
//!
//! Both pipelines end by writing the full ordered sequence as a pretty-printed
//! UTF-8 JSON array; the synthesizer starts by reading one back.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::models::{count_by_document_type, ContentRecord};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_records(path: &Path) -> Result<Vec<ContentRecord>, StorageError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            error!(path = %path.display(), "File not found");
            StorageError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            error!(path = %path.display(), error = %source, "Error opening record file");
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records: Vec<ContentRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            error!(path = %path.display(), error = %source, "Error decoding JSON");
            StorageError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;

    info!(count = records.len(), path = %path.display(), "Loaded records from JSON");
    for (document_type, count) in count_by_document_type(&records) {
        info!(document_type = %document_type, count, "Loaded document type");
    }

    Ok(records)
}

pub fn save_records(path: &Path, records: &[ContentRecord]) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(count = records.len(), path = %path.display(), "Saved records");
    Ok(())
}
