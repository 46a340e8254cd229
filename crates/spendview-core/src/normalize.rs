//! Amount coercion and row filtering.
//!
//! Amounts are coerced one row at a time. A value that does not parse as a
//! number is treated as missing and the whole row is later dropped; this is
//! never reported as an error.

use crate::error::LoadError;
use crate::loader::Table;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// A row whose amount column has been coerced to a number, if possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Cell values aligned with the table headers.
    pub values: Vec<String>,
    /// The parsed amount, or `None` when the cell was not numeric.
    pub amount: Option<Decimal>,
}

/// A row that survived normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Category label; empty when the cell was blank.
    pub category: String,
    /// Signed amount. Positive is income, negative is spending.
    pub amount: Decimal,
    /// Cell values aligned with the table headers. The amount cell holds
    /// the normalized number.
    pub values: Vec<String>,
}

/// Rows kept after filtering, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retained {
    /// Rows with a numeric amount, in source order.
    pub transactions: Vec<Transaction>,
    /// Number of rows dropped because the amount was missing.
    pub dropped: usize,
}

/// Parse a cell as a decimal number.
///
/// Accepts a single optional sign, plain decimals and scientific notation.
/// Everything else (blank, `NaN`, repeated signs, currency symbols, grouping
/// separators) yields `None`.
///
/// Values are limited to the range of [`Decimal`], a magnitude of at most
/// `Decimal::MAX` (about `7.9e28`). Larger numbers such as `1e30` also yield
/// `None`, so their rows are dropped like any other non-numeric cell.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if body.starts_with(['+', '-']) {
        return None;
    }
    // Decimal::from_str tolerates '_' separators; a plain number never has them.
    if body.contains('_') {
        return None;
    }
    let unsigned = s.strip_prefix('+').unwrap_or(s);

    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .ok()
        .map(|d| d.normalize())
}

/// Coerce the named column of every row.
pub fn normalize_amounts(table: &Table, column: &str) -> Result<Vec<NormalizedRow>, LoadError> {
    let index = table
        .column_index(column)
        .ok_or_else(|| LoadError::MissingColumn {
            path: table.source.clone(),
            column: column.to_string(),
        })?;

    Ok(table
        .rows
        .iter()
        .map(|values| NormalizedRow {
            amount: values.get(index).and_then(|cell| parse_amount(cell)),
            values: values.clone(),
        })
        .collect())
}

/// Drop rows without an amount and turn the rest into transactions.
///
/// `headers` must be the headers of the table the rows came from.
pub fn retain_parsed(
    rows: Vec<NormalizedRow>,
    headers: &[String],
    category_column: &str,
    amount_column: &str,
) -> Retained {
    let category_index = headers.iter().position(|h| h == category_column);
    let amount_index = headers.iter().position(|h| h == amount_column);

    let mut retained = Retained::default();
    for (row_num, row) in rows.into_iter().enumerate() {
        let Some(amount) = row.amount else {
            debug!(row = row_num + 1, "dropping row without numeric amount");
            retained.dropped += 1;
            continue;
        };

        let mut values = row.values;
        if let Some(cell) = amount_index.and_then(|i| values.get_mut(i)) {
            *cell = amount.to_string();
        }
        let category = category_index
            .and_then(|i| values.get(i))
            .cloned()
            .unwrap_or_default();

        retained.transactions.push(Transaction {
            category,
            amount,
            values,
        });
    }
    retained
}
