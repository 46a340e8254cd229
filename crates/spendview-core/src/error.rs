//! Error types for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a statement or listing the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading a file or directory.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid delimited text (bad row length, invalid UTF-8, ...).
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        /// The file being parsed.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: csv::Error,
    },

    /// The file has no header row.
    #[error("{path} has no header row")]
    MissingHeader {
        /// The file being parsed.
        path: PathBuf,
    },

    /// A required column is absent from the header.
    #[error("{path} has no '{column}' column")]
    MissingColumn {
        /// The file being parsed.
        path: PathBuf,
        /// The column that was expected.
        column: String,
    },

    /// A user-supplied file name does not name a CSV file inside the catalog.
    #[error("'{name}' is not a selectable CSV file")]
    InvalidSelection {
        /// The rejected name.
        name: String,
    },
}

/// Errors that can occur while drawing the category chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The directory that should hold the chart does not exist.
    #[error("chart directory {path} does not exist")]
    MissingDirectory {
        /// The missing directory.
        path: PathBuf,
    },

    /// Drawing or writing the image failed.
    #[error("failed to draw chart to {path}: {message}")]
    Draw {
        /// The chart output path.
        path: PathBuf,
        /// Message from the drawing backend.
        message: String,
    },
}

/// Errors that can occur while totalling amounts.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A running total left the range `Decimal` can represent.
    #[error("total of '{total}' overflows")]
    Overflow {
        /// Which total overflowed: `income`, `expenses`, `net` or a category name.
        total: String,
    },
}

/// Failure of a whole analysis run.
///
/// Callers facing end users are expected to show a single generic message;
/// the variant is kept so logs can tell which stage failed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Loading or parsing the statement failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Totalling the amounts failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Rendering the chart failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AnalysisError {
    /// Name of the pipeline stage that failed.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Aggregate(_) => "aggregate",
            Self::Render(_) => "render",
        }
    }
}
