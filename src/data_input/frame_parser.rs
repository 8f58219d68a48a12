// src/data_input/frame_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::FRAME_FIELD_COUNT;
use crate::data_input::frame_data::{Dataset, Frame};

/// Why a single data row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowFault {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("column {column} value '{value}' is not a number")]
    NotNumeric { column: usize, value: String },
}

/// Errors that abort a session load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("session file not found at '{}'", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file has no header row")]
    MissingHeader,
    #[error("header has {found} columns, at least {expected} required")]
    Schema { expected: usize, found: usize },
    #[error("malformed data row {row}: {fault}")]
    MalformedRow {
        row: usize,
        #[source]
        fault: RowFault,
    },
    #[error("session file contains a header but no data rows")]
    EmptyDataset,
    #[error("failed to read session file: {0}")]
    Read(#[from] csv::Error),
}

/// Opens and parses a session recording.
pub fn load_dataset(input_file_path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(input_file_path).map_err(|source| LoadError::SourceNotFound {
        path: input_file_path.to_path_buf(),
        source,
    })?;
    info!(path = %input_file_path.display(), "loading session");
    parse_dataset(BufReader::new(file))
}

/// Data-row number of the first empty line that has data rows after it.
///
/// The csv reader skips empty lines, so these are found up front.
/// Empty lines after the last row are not rows.
fn first_interior_blank_row(text: &str) -> Option<usize> {
    let mut lines = text.lines().enumerate().skip_while(|(_, l)| l.is_empty());
    let (header_index, _) = lines.next()?;
    let mut pending_blank = None;
    for (index, line) in lines {
        if line.is_empty() {
            if pending_blank.is_none() {
                pending_blank = Some(index - header_index);
            }
        } else if pending_blank.is_some() {
            return pending_blank;
        }
    }
    None
}

/// Parses a session recording from any reader.
///
/// The first line is the header; it fixes the field count every data row
/// must match. Any malformed row fails the whole load, including an empty
/// line between data rows.
pub fn parse_dataset<R: Read>(mut reader: R) -> Result<Dataset, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(csv::Error::from)?;
    let blank_row = first_interior_blank_row(&text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let header_record = reader.headers()?.clone();
    if header_record.is_empty() || header_record.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    let expected_fields = header_record.len();
    if expected_fields < FRAME_FIELD_COUNT {
        return Err(LoadError::Schema {
            expected: FRAME_FIELD_COUNT,
            found: expected_fields,
        });
    }
    let header: Vec<String> = header_record.iter().map(str::to_string).collect();
    debug!(columns = expected_fields, "header accepted");

    let mut frames: Vec<Frame> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_index + 1;

        if blank_row == Some(row) {
            return Err(LoadError::MalformedRow {
                row,
                fault: RowFault::FieldCount {
                    expected: expected_fields,
                    found: 0,
                },
            });
        }

        if record.len() != expected_fields {
            return Err(LoadError::MalformedRow {
                row,
                fault: RowFault::FieldCount {
                    expected: expected_fields,
                    found: record.len(),
                },
            });
        }

        let mut fields = Vec::with_capacity(expected_fields);
        for (column, val_str) in record.iter().enumerate() {
            let value = match val_str.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(LoadError::MalformedRow {
                        row,
                        fault: RowFault::NotNumeric {
                            column,
                            value: val_str.to_string(),
                        },
                    })
                }
            };
            fields.push(value);
        }

        // The header check above guarantees the minimum width.
        let frame = Frame::from_fields(fields).ok_or(LoadError::Schema {
            expected: FRAME_FIELD_COUNT,
            found: expected_fields,
        })?;
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(LoadError::EmptyDataset);
    }

    info!(frames = frames.len(), "finished reading session rows");
    Ok(Dataset::new(header, frames))
}
