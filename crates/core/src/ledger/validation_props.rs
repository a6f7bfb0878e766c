//! Property-based tests for line validation rules.
//!
//! Every accepted line has exactly one positive side; every rejected line
//! names the rule it broke.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::EntryLineInput;
use super::validation::validate_line;

/// Strategy to generate a positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn make_line(debit: Decimal, credit: Decimal) -> EntryLineInput {
    EntryLineInput {
        account_code: "570".to_string(),
        debit,
        credit,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A single positive side is accepted unchanged.
    #[test]
    fn prop_one_sided_line_accepted(amount in positive_amount(), as_debit in any::<bool>()) {
        let input = if as_debit {
            make_line(amount, Decimal::ZERO)
        } else {
            make_line(Decimal::ZERO, amount)
        };
        let line = validate_line(1, &input).unwrap();

        prop_assert!(line.debit.is_positive() != line.credit.is_positive());
        let posted = if as_debit { line.debit } else { line.credit };
        prop_assert_eq!(posted.amount(), amount);
    }

    /// Both sides positive is rejected.
    #[test]
    fn prop_both_sides_rejected(debit in positive_amount(), credit in positive_amount()) {
        let result = validate_line(4, &make_line(debit, credit));
        prop_assert!(matches!(result, Err(LedgerError::BothSides { line: 4 })), "got {:?}", result);
    }

    /// Any negative side is rejected, whatever the other side holds.
    #[test]
    fn prop_negative_rejected(negative in negative_amount(), other in positive_amount(), flip in any::<bool>()) {
        let input = if flip { make_line(negative, other) } else { make_line(other, negative) };
        let result = validate_line(1, &input);
        prop_assert!(matches!(result, Err(LedgerError::NegativeAmount { .. })), "got {:?}", result);
    }
}

#[test]
fn test_zero_line_rejected() {
    assert!(matches!(
        validate_line(1, &make_line(Decimal::ZERO, Decimal::ZERO)),
        Err(LedgerError::ZeroLine { line: 1 })
    ));
}
