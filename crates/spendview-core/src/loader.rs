//! CSV statement loader.

use crate::error::LoadError;
use crate::options::AnalysisOptions;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw rows of a statement, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Where the rows were read from.
    pub source: PathBuf,
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// One entry per data row, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read a statement from disk.
pub fn load_table(path: &Path, options: &AnalysisOptions) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(BufReader::new(file), path, options)
}

/// Parse a statement from any reader. `source` is only used in error messages.
pub fn parse_table<R: Read>(
    reader: R,
    source: &Path,
    options: &AnalysisOptions,
) -> Result<Table, LoadError> {
    let csv_error = |err: csv::Error| LoadError::Csv {
        path: source.to_path_buf(),
        source: err,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.is_empty() {
        return Err(LoadError::MissingHeader {
            path: source.to_path_buf(),
        });
    }

    for column in [&options.category_column, &options.amount_column] {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: source.to_path_buf(),
                column: column.clone(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        source = %source.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded statement"
    );

    Ok(Table {
        source: source.to_path_buf(),
        headers,
        rows,
    })
}
