//! CSV input helpers shared by the filter and the lookup.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::{Reader, StringRecord};

use crate::error::AisFileError;

/// Opens `path` as a headed, comma-delimited file and returns the reader
/// together with its header row.
pub fn open(path: &Path) -> Result<(Reader<File>, StringRecord), AisFileError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AisFileError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => AisFileError::InputRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);
    let headers = rdr.headers().map_err(|e| read_error(path, e))?.clone();

    Ok((rdr, headers))
}

/// Position of each name in `headers`, in the order asked for.
pub fn column_indices(
    path: &Path,
    headers: &StringRecord,
    names: &[&str],
) -> Result<Vec<usize>, AisFileError> {
    names
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == *name)
                .ok_or_else(|| AisFileError::InputParse {
                    path: path.to_path_buf(),
                    line: 1,
                    reason: format!("header is missing required column `{name}`"),
                })
        })
        .collect()
}

/// Maps a `csv` error raised while reading `path` to the crate's error kinds.
pub fn read_error(path: &Path, err: csv::Error) -> AisFileError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => AisFileError::InputRead {
            path: path.to_path_buf(),
            source,
        },
        _ => AisFileError::InputParse {
            path: path.to_path_buf(),
            line,
            reason,
        },
    }
}

pub fn line_of(row: &StringRecord) -> u64 {
    row.position().map_or(0, |p| p.line())
}
