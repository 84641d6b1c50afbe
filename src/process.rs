use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::FilterConfig;
use crate::error::AisFileError;
use crate::filter::is_valid_record;
use crate::model::{Column, Record};
use crate::reader;

pub const PROCESSED_SUFFIX: &str = "_processed";

/// Outcome of filtering one day file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub records_read: usize,
    pub records_kept: usize,
}

/// `dir/name.ext` -> `dir/name{suffix}.ext`. The suffix goes before the last
/// extension only, and is appended when there is none.
pub fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

pub fn output_path_for(input: &Path) -> PathBuf {
    derived_path(input, PROCESSED_SUFFIX)
}

/// Filters `input` with `config` and writes the projection to the
/// `_processed` sibling, overwriting it if present.
pub fn process_file(input: &Path, config: &FilterConfig) -> Result<FilterSummary, AisFileError> {
    let columns = config.required_columns();
    debug!("{}: loading columns {:?}", input.display(), columns);

    let mut records = read_records(input, &columns)?;
    let records_read = records.len();

    records.retain(|record| is_valid_record(record, config));

    let output = output_path_for(input);
    write_records(&output, &records, &config.output_columns)?;

    info!(
        "{} has {} of {} records passed, written to {}",
        input.display(),
        records.len(),
        records_read,
        output.display()
    );

    Ok(FilterSummary {
        input: input.to_path_buf(),
        output,
        records_read,
        records_kept: records.len(),
    })
}

/// Loads every row of `path`, copying only `columns` into each record.
pub fn read_records(path: &Path, columns: &[Column]) -> Result<Vec<Record>, AisFileError> {
    let (mut rdr, headers) = reader::open(path)?;
    let names: Vec<&str> = columns.iter().map(|c| c.header()).collect();
    let indices = reader::column_indices(path, &headers, &names)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| reader::read_error(path, e))?;
        let mut record = Record::default();
        for (column, index) in columns.iter().zip(&indices) {
            let value = row.get(*index).unwrap_or_default();
            match column {
                Column::Latitude => record.lat = parse_coordinate(path, &row, "latitude", value)?,
                Column::Longitude => record.lon = parse_coordinate(path, &row, "longitude", value)?,
                _ => {}
            }
            record.set_field(*column, value);
        }
        records.push(record);
    }

    Ok(records)
}

fn parse_coordinate(
    path: &Path,
    row: &csv::StringRecord,
    what: &str,
    value: &str,
) -> Result<Option<f64>, AisFileError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| AisFileError::InputParse {
            path: path.to_path_buf(),
            line: reader::line_of(row),
            reason: format!("non-numeric {what} `{value}`"),
        })
}

/// Writes `columns` of each record to `path`: comma-delimited, no header,
/// `\n` line endings.
pub fn write_records(
    path: &Path,
    records: &[Record],
    columns: &[Column],
) -> Result<(), AisFileError> {
    let write_error = |source: csv::Error| AisFileError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(write_error)?;

    for record in records {
        wtr.write_record(columns.iter().map(|c| record.field(*c)))
            .map_err(write_error)?;
    }
    wtr.flush().map_err(|e| write_error(e.into()))?;

    Ok(())
}
