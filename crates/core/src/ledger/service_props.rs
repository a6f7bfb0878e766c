//! Property-based tests for LedgerService.
//!
//! - Accepted entries always balance to the cent
//! - Any mismatch is rejected with both totals

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::Money;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{CreateEntryInput, EntryLineInput};

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_input(lines: Vec<EntryLineInput>) -> CreateEntryInput {
    CreateEntryInput {
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        concept: "Generated".to_string(),
        lines,
    }
}

fn any_account(_: &str) -> Result<bool, LedgerError> {
    Ok(true)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Debits split over several lines against one matching credit always validate.
    #[test]
    fn prop_balanced_entries_accepted(debits in prop::collection::vec(positive_amount(), 1..10)) {
        let total: Decimal = debits.iter().copied().sum();
        let mut lines: Vec<EntryLineInput> =
            debits.iter().map(|d| EntryLineInput::debit("600", *d)).collect();
        lines.push(EntryLineInput::credit("570", total));

        let validated = LedgerService::validate_entry(&make_input(lines), any_account).unwrap();
        prop_assert!(validated.totals.is_balanced());
        prop_assert_eq!(validated.totals.debit, Money::new(total));
        prop_assert_eq!(validated.lines.len(), debits.len() + 1);
    }

    /// Any difference of at least one cent is rejected, citing both sides.
    #[test]
    fn prop_unbalanced_entries_rejected(debit in positive_amount(), credit in positive_amount()) {
        prop_assume!(debit != credit);
        let input = make_input(vec![
            EntryLineInput::debit("570", debit),
            EntryLineInput::credit("100", credit),
        ]);

        match LedgerService::validate_entry(&input, any_account) {
            Err(LedgerError::UnbalancedEntry { debit: d, credit: c }) => {
                prop_assert_eq!(d, Money::new(debit));
                prop_assert_eq!(c, Money::new(credit));
            }
            other => prop_assert!(false, "expected unbalanced, got {:?}", other),
        }
    }

    /// Line order is preserved.
    #[test]
    fn prop_line_order_preserved(amounts in prop::collection::vec(positive_amount(), 1..8)) {
        let mut lines = Vec::new();
        for (i, amount) in amounts.iter().enumerate() {
            lines.push(EntryLineInput::debit(format!("D{i}"), *amount));
            lines.push(EntryLineInput::credit(format!("C{i}"), *amount));
        }
        let expected: Vec<String> = lines.iter().map(|l| l.account_code.clone()).collect();

        let validated = LedgerService::validate_entry(&make_input(lines), any_account).unwrap();
        let actual: Vec<String> = validated.lines.into_iter().map(|l| l.account_code).collect();
        prop_assert_eq!(actual, expected);
    }
}
