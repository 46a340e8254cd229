//! Report assembly and the analysis entry point.

use crate::aggregate::{summarize, CategoryTotals, Summary};
use crate::chart::render_category_chart;
use crate::error::AnalysisError;
use crate::loader::load_table;
use crate::normalize::{normalize_amounts, retain_parsed, Retained, Transaction};
use crate::options::AnalysisOptions;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a report page shows for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Column names of the statement, in source order.
    pub columns: Vec<String>,
    /// Rows with a numeric amount.
    pub transactions: Vec<Transaction>,
    /// Rows dropped because their amount was not numeric.
    pub dropped_rows: usize,
    /// Sum of all positive amounts.
    pub total_income: Decimal,
    /// Sum of all negative amounts.
    pub total_expenses: Decimal,
    /// `total_income + total_expenses`.
    pub net_position: Decimal,
    /// Per-category sums.
    pub category_totals: CategoryTotals,
    /// Where the category chart was written.
    pub chart: PathBuf,
}

/// Combine pipeline outputs into an [`AnalysisResult`].
pub fn assemble(
    columns: Vec<String>,
    retained: Retained,
    summary: Summary,
    chart: PathBuf,
) -> AnalysisResult {
    AnalysisResult {
        columns,
        transactions: retained.transactions,
        dropped_rows: retained.dropped,
        total_income: summary.total_income,
        total_expenses: summary.total_expenses,
        net_position: summary.net_position,
        category_totals: summary.category_totals,
        chart,
    }
}

/// Load, normalize, aggregate and chart one statement.
///
/// Rows with a non-numeric amount are dropped silently. Any other failure,
/// including a total that overflows, aborts the run and nothing partial is
/// returned.
pub fn analyze(path: &Path, options: &AnalysisOptions) -> Result<AnalysisResult, AnalysisError> {
    let table = load_table(path, options)?;
    let rows = normalize_amounts(&table, &options.amount_column)?;
    let retained = retain_parsed(
        rows,
        &table.headers,
        &options.category_column,
        &options.amount_column,
    );
    let summary = summarize(&retained.transactions)?;
    let chart = render_category_chart(&summary.category_totals, &options.chart_path)?;

    debug!(
        file = %path.display(),
        kept = retained.transactions.len(),
        dropped = retained.dropped,
        net = %summary.net_position,
        "analysis complete"
    );

    Ok(assemble(table.headers, retained, summary, chart))
}
