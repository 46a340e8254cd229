//! Property-based tests for normalization and aggregation.
//!
//! Statements are generated as CSV text, so these exercise the loader,
//! normalizer and aggregator together.

use proptest::prelude::*;
use rust_decimal::Decimal;
use spendview_core::{
    normalize_amounts, parse_table, retain_parsed, summarize, AnalysisOptions, Retained,
};
use std::path::Path;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Food".to_string()),
        Just("Rent".to_string()),
        Just("Salary".to_string()),
        Just("Travel".to_string()),
    ]
}

/// An amount cell: either a number or something that must be dropped.
fn arb_cell() -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        4 => arb_decimal().prop_map(|d| (d.to_string(), true)),
        1 => prop_oneof![
            Just("abc".to_string()),
            Just(String::new()),
            Just("N/A".to_string()),
            Just("$5".to_string()),
            Just("+-5".to_string()),
        ]
        .prop_map(|s| (s, false)),
    ]
}

fn arb_statement() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec((arb_category(), arb_cell()), 0..40).prop_map(|rows| {
        let mut csv = String::from("Category,Amount\n");
        let mut numeric = 0;
        for (category, (cell, valid)) in rows {
            csv.push_str(&format!("{category},{cell}\n"));
            if valid {
                numeric += 1;
            }
        }
        (csv, numeric)
    })
}

fn run(csv: &str) -> Retained {
    let options = AnalysisOptions::default();
    let table = parse_table(csv.as_bytes(), Path::new("prop.csv"), &options).unwrap();
    let rows = normalize_amounts(&table, &options.amount_column).unwrap();
    retain_parsed(
        rows,
        &table.headers,
        &options.category_column,
        &options.amount_column,
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_net_is_income_plus_expenses((csv, _) in arb_statement()) {
        let summary = summarize(&run(&csv).transactions).unwrap();
        prop_assert_eq!(summary.net_position, summary.total_income + summary.total_expenses);
        prop_assert!(summary.total_income >= Decimal::ZERO);
        prop_assert!(summary.total_expenses <= Decimal::ZERO);
    }

    #[test]
    fn prop_category_totals_sum_to_net((csv, _) in arb_statement()) {
        let summary = summarize(&run(&csv).transactions).unwrap();
        let sum: Decimal = summary.category_totals.values().copied().sum();
        prop_assert_eq!(sum, summary.net_position);
    }

    #[test]
    fn prop_only_numeric_rows_survive((csv, numeric) in arb_statement()) {
        let retained = run(&csv);
        let total_rows = csv.lines().count() - 1;
        prop_assert_eq!(retained.transactions.len(), numeric);
        prop_assert_eq!(retained.transactions.len() + retained.dropped, total_rows);
        for txn in &retained.transactions {
            prop_assert_eq!(txn.values[1].parse::<Decimal>().unwrap(), txn.amount);
        }
    }

    #[test]
    fn prop_every_category_bucket_is_present((csv, _) in arb_statement()) {
        let retained = run(&csv);
        let summary = summarize(&retained.transactions).unwrap();
        for txn in &retained.transactions {
            prop_assert!(summary.category_totals.contains_key(&txn.category));
        }
    }

    #[test]
    fn prop_summarize_is_deterministic((csv, _) in arb_statement()) {
        let retained = run(&csv);
        prop_assert_eq!(
            summarize(&retained.transactions).unwrap(),
            summarize(&retained.transactions).unwrap()
        );
    }
}
