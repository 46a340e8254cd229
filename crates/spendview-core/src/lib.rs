//! Spending analysis for monthly CSV statements.
//!
//! This crate turns a CSV export of personal transactions into a report:
//!
//! - [`loader`] - read the statement into raw rows
//! - [`normalize`] - coerce the amount column and drop rows that are not numeric
//! - [`aggregate`] - income, expenses, net position and per-category totals
//! - [`chart`] - bar chart of the category totals
//! - [`report`] - the [`analyze`] entry point and the [`AnalysisResult`] it returns
//! - [`catalog`] - list the statements available in a directory
//!
//! # Example
//!
//! ```no_run
//! use spendview_core::{analyze, AnalysisOptions};
//! use std::path::Path;
//!
//! let options = AnalysisOptions::builder()
//!     .chart_path("static/chart.svg")
//!     .build();
//! let result = analyze(Path::new("transactions/01-02-2024.csv"), &options)?;
//! println!("net position: {}", result.net_position);
//! # Ok::<(), spendview_core::AnalysisError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod catalog;
pub mod chart;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod options;
pub mod report;

pub use aggregate::{summarize, CategoryTotals, Summary};
pub use catalog::{
    day_month_year, list_available_files, resolve_selection, CatalogEntry, CatalogKey, SortKey,
};
pub use chart::{render_category_chart, CHART_TITLE, UNCATEGORIZED_LABEL};
pub use error::{AggregateError, AnalysisError, LoadError, RenderError};
pub use loader::{load_table, parse_table, Table};
pub use normalize::{normalize_amounts, parse_amount, retain_parsed, Retained, Transaction};
pub use options::AnalysisOptions;
pub use report::{analyze, assemble, AnalysisResult};

// Re-export commonly used external types
pub use rust_decimal::Decimal;
