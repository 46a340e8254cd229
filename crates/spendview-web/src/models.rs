use serde::{Deserialize, Serialize};
use spendview_core::{AnalysisResult, Decimal, UNCATEGORIZED_LABEL};

/// Form posted from the home page.
#[derive(Deserialize, Debug, Default)]
pub struct ReportForm {
    /// Selected statement file name.
    pub csv_file: Option<String>,
}

/// Query parameters of the home page.
#[derive(Deserialize, Debug, Default)]
pub struct HomeQuery {
    /// One-shot message carried across a redirect.
    pub flash: Option<String>,
}

/// JSON body returned by the API on failure.
#[derive(Serialize, Debug)]
pub struct ApiError {
    /// User-facing message.
    pub error: String,
}

/// A row of the category totals table.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    /// Display label.
    pub name: String,
    /// Formatted total.
    pub total: String,
}

/// Everything the report template needs, already formatted.
#[derive(Serialize, Debug)]
pub struct ReportView {
    /// Selected file name.
    pub file: String,
    /// Statement column names.
    pub columns: Vec<String>,
    /// Statement rows that were kept.
    pub rows: Vec<Vec<String>>,
    /// Category totals in chart order.
    pub categories: Vec<CategoryRow>,
    /// Sum of positive amounts.
    pub total_income: String,
    /// Sum of negative amounts.
    pub total_expenses: String,
    /// Income plus expenses.
    pub net_position: String,
    /// Whether the net position is below zero.
    pub net_negative: bool,
    /// Rows dropped for a non-numeric amount.
    pub dropped_rows: usize,
    /// URL of the chart image.
    pub chart_url: String,
}

impl ReportView {
    pub fn new(file: &str, result: AnalysisResult, chart_url: String) -> Self {
        let categories = result
            .category_totals
            .iter()
            .map(|(name, total)| CategoryRow {
                name: if name.is_empty() {
                    UNCATEGORIZED_LABEL.to_string()
                } else {
                    name.clone()
                },
                total: money(*total),
            })
            .collect();

        Self {
            file: file.to_string(),
            columns: result.columns,
            rows: result.transactions.into_iter().map(|t| t.values).collect(),
            categories,
            total_income: money(result.total_income),
            total_expenses: money(result.total_expenses),
            net_position: money(result.net_position),
            net_negative: result.net_position < Decimal::ZERO,
            dropped_rows: result.dropped_rows,
            chart_url,
        }
    }
}

/// Format an amount with two decimal places.
pub fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}
