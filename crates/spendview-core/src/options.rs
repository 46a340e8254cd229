//! Configuration for an analysis run.

use std::path::PathBuf;

/// Default name of the column holding the transaction category.
pub const DEFAULT_CATEGORY_COLUMN: &str = "Category";

/// Default name of the column holding the signed amount.
pub const DEFAULT_AMOUNT_COLUMN: &str = "Amount";

/// Default location of the rendered chart.
pub const DEFAULT_CHART_PATH: &str = "static/chart.svg";

/// Options controlling how a statement is read and where the chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Header name of the category column.
    pub category_column: String,
    /// Header name of the amount column.
    pub amount_column: String,
    /// The field delimiter.
    pub delimiter: u8,
    /// Where the category chart is written. Overwritten on every run.
    pub chart_path: PathBuf,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            amount_column: DEFAULT_AMOUNT_COLUMN.to_string(),
            delimiter: b',',
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
        }
    }
}

impl AnalysisOptions {
    /// Start building a set of options from the defaults.
    pub fn builder() -> AnalysisOptionsBuilder {
        AnalysisOptionsBuilder::new()
    }
}

/// Builder for [`AnalysisOptions`].
#[derive(Debug, Default)]
pub struct AnalysisOptionsBuilder {
    options: AnalysisOptions,
}

impl AnalysisOptionsBuilder {
    /// Create a builder holding the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category column by name.
    pub fn category_column(mut self, name: impl Into<String>) -> Self {
        self.options.category_column = name.into();
        self
    }

    /// Set the amount column by name.
    pub fn amount_column(mut self, name: impl Into<String>) -> Self {
        self.options.amount_column = name.into();
        self
    }

    /// Set the field delimiter.
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    /// Set the chart output path.
    pub fn chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.chart_path = path.into();
        self
    }

    /// Build the options.
    pub fn build(self) -> AnalysisOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnalysisOptions::default();
        assert_eq!(options.category_column, "Category");
        assert_eq!(options.amount_column, "Amount");
        assert_eq!(options.delimiter, b',');
        assert_eq!(options.chart_path, PathBuf::from("static/chart.svg"));
    }

    #[test]
    fn test_builder_overrides() {
        let options = AnalysisOptions::builder()
            .category_column("Type")
            .amount_column("Value")
            .delimiter(b';')
            .chart_path("/tmp/out.svg")
            .build();

        assert_eq!(options.category_column, "Type");
        assert_eq!(options.amount_column, "Value");
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.chart_path, PathBuf::from("/tmp/out.svg"));
    }
}
