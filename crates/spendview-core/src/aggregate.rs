//! Income, expense and per-category totals.

use crate::error::AggregateError;
use crate::normalize::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sum of amounts per category, ordered by category name.
///
/// Blank categories are kept under the empty-string key.
pub type CategoryTotals = BTreeMap<String, Decimal>;

/// Totals computed from a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of all positive amounts.
    pub total_income: Decimal,
    /// Sum of all negative amounts (zero or negative).
    pub total_expenses: Decimal,
    /// `total_income + total_expenses`.
    pub net_position: Decimal,
    /// Sum of amounts grouped by category.
    pub category_totals: CategoryTotals,
}

/// Compute totals over already-filtered transactions.
///
/// Zero amounts count towards their category but towards neither income
/// nor expenses. Fails if any running total leaves the `Decimal` range.
pub fn summarize(transactions: &[Transaction]) -> Result<Summary, AggregateError> {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut category_totals = CategoryTotals::new();

    for txn in transactions {
        if txn.amount > Decimal::ZERO {
            total_income = checked_add(total_income, txn.amount, "income")?;
        } else if txn.amount < Decimal::ZERO {
            total_expenses = checked_add(total_expenses, txn.amount, "expenses")?;
        }

        let total = category_totals
            .entry(txn.category.clone())
            .or_insert(Decimal::ZERO);
        *total = checked_add(*total, txn.amount, &txn.category)?;
    }

    Ok(Summary {
        total_income,
        total_expenses,
        net_position: checked_add(total_income, total_expenses, "net")?,
        category_totals,
    })
}

fn checked_add(total: Decimal, amount: Decimal, name: &str) -> Result<Decimal, AggregateError> {
    total
        .checked_add(amount)
        .ok_or_else(|| AggregateError::Overflow {
            total: name.to_string(),
        })
}
