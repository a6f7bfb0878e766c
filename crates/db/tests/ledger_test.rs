//! Integration tests for the ledger repository.
//!
//! Covers entry creation and deletion, listing, detail views, balances, and
//! the audit records written along the way.

mod common;

use rust_decimal_macros::dec;
use tally_core::ledger::{
    AccountType, AuditAction, AuditStatus, CreateEntryInput, EntryFilter, EntryLineInput, LedgerError,
    UNKNOWN_ACCOUNT_LABEL,
};
use tally_db::{AuditRepository, LedgerRepository, ReportRepository};
use tally_shared::types::{EntryId, Money};

use common::{date, fail_on, seeded_store, transfer};

// ============================================================================
// create_entry
// ============================================================================

#[tokio::test]
async fn test_initial_capital_updates_balances() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());

    let recorded = repo
        .create_entry(&transfer(
            date(2024, 1, 15),
            "Initial capital",
            "570",
            "100",
            dec!(1000),
        ))
        .await
        .expect("Failed to create entry");

    assert!(recorded.audit.is_logged());
    let detail = recorded.value;
    assert_eq!(detail.entry.concept, "Initial capital");
    assert_eq!(detail.entry.total_debit, Money::new(dec!(1000.00)));
    assert_eq!(detail.entry.total_credit, Money::new(dec!(1000.00)));
    assert_eq!(detail.lines.len(), 2);
    assert_eq!(detail.lines[0].account_name, "Cash");
    assert!(detail.lines.iter().all(|l| l.line.entry_id == detail.entry.id));

    assert_eq!(
        repo.account_balance("570", None).await.unwrap(),
        Money::new(dec!(1000.00))
    );
    assert_eq!(
        repo.account_balance("100", None).await.unwrap(),
        Money::new(dec!(-1000.00))
    );
}

#[tokio::test]
async fn test_unbalanced_entry_writes_nothing() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());

    let input = CreateEntryInput {
        date: date(2024, 2, 1),
        concept: "Purchase".into(),
        lines: vec![
            EntryLineInput::debit("600", dec!(500)),
            EntryLineInput::credit("570", dec!(450)),
        ],
    };
    let err = repo.create_entry(&input).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Entry is not balanced: debit 500.00 != credit 450.00"
    );

    assert!(repo.list_entries(&EntryFilter::default()).await.unwrap().is_empty());
    assert!(repo.lines_for_account("600").await.unwrap().is_empty());
    let audit = AuditRepository::new(store);
    assert!(audit.by_action(AuditAction::CreateEntry).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_failures() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);
    let on = date(2024, 3, 1);

    let blank = transfer(on, "   ", "570", "100", dec!(10));
    assert!(matches!(
        repo.create_entry(&blank).await,
        Err(LedgerError::EmptyConcept)
    ));

    let no_lines = CreateEntryInput {
        date: on,
        concept: "Nothing".into(),
        lines: vec![],
    };
    assert!(matches!(
        repo.create_entry(&no_lines).await,
        Err(LedgerError::NoLines)
    ));

    let unknown = transfer(on, "Typo", "570", "999", dec!(10));
    match repo.create_entry(&unknown).await {
        Err(LedgerError::UnknownAccount { line, code }) => {
            assert_eq!(line, 2);
            assert_eq!(code, "999");
        }
        other => panic!("expected unknown account, got {other:?}"),
    }

    let both = CreateEntryInput {
        date: on,
        concept: "Both".into(),
        lines: vec![EntryLineInput {
            account_code: "570".into(),
            debit: dec!(5),
            credit: dec!(5),
        }],
    };
    assert!(matches!(
        repo.create_entry(&both).await,
        Err(LedgerError::BothSides { line: 1 })
    ));
}

#[tokio::test]
async fn test_amounts_rounded_to_cents() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    let detail = repo
        .create_entry(&transfer(date(2024, 1, 2), "Rounding", "571", "100", dec!(10.005)))
        .await
        .unwrap()
        .into_value();

    assert_eq!(detail.entry.total_debit, Money::new(dec!(10.01)));
    assert_eq!(
        repo.account_balance("571", None).await.unwrap(),
        Money::new(dec!(10.01))
    );
}

// ============================================================================
// get_entry_detail / list_entries
// ============================================================================

#[tokio::test]
async fn test_entry_detail_round_trip() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    let input = CreateEntryInput {
        date: date(2024, 4, 10),
        concept: "Sale split".into(),
        lines: vec![
            EntryLineInput::debit("570", dec!(70)),
            EntryLineInput::debit("571", dec!(30)),
            EntryLineInput::credit("700", dec!(100)),
        ],
    };
    let created = repo.create_entry(&input).await.unwrap().into_value();
    let fetched = repo.get_entry_detail(created.entry.id).await.unwrap();

    assert_eq!(fetched.entry, created.entry);
    let codes: Vec<&str> = fetched
        .lines
        .iter()
        .map(|l| l.line.account_code.as_str())
        .collect();
    assert_eq!(codes, ["570", "571", "700"]);
    assert_eq!(fetched.lines[2].account_name, "Merchandise sales");
    assert_eq!(fetched.lines[2].line.credit, Money::new(dec!(100)));
    assert_ne!(fetched.lines[2].account_name, UNKNOWN_ACCOUNT_LABEL);
}

#[tokio::test]
async fn test_entry_detail_not_found() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    let err = repo.get_entry_detail(EntryId::new(42)).await.unwrap_err();
    assert!(matches!(err, LedgerError::EntryNotFound(id) if id == EntryId::new(42)));
}

#[tokio::test]
async fn test_list_entries_filters_and_order() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    for (on, concept) in [
        (date(2024, 1, 10), "Initial capital"),
        (date(2024, 2, 5), "Rent February"),
        (date(2024, 2, 5), "Capital top-up"),
        (date(2024, 3, 1), "Rent March"),
    ] {
        repo.create_entry(&transfer(on, concept, "570", "100", dec!(100)))
            .await
            .unwrap();
    }

    let all = repo.list_entries(&EntryFilter::default()).await.unwrap();
    let concepts: Vec<&str> = all.iter().map(|e| e.concept.as_str()).collect();
    assert_eq!(
        concepts,
        ["Rent March", "Capital top-up", "Rent February", "Initial capital"]
    );

    let february = EntryFilter {
        from_date: Some(date(2024, 2, 1)),
        to_date: Some(date(2024, 2, 29)),
        concept_contains: None,
    };
    assert_eq!(repo.list_entries(&february).await.unwrap().len(), 2);

    let open_start = EntryFilter {
        to_date: Some(date(2024, 2, 5)),
        ..EntryFilter::default()
    };
    assert_eq!(repo.list_entries(&open_start).await.unwrap().len(), 3);

    let capital = EntryFilter {
        concept_contains: Some("capital".into()),
        ..EntryFilter::default()
    };
    let found = repo.list_entries(&capital).await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].concept, "Capital top-up");

    let inverted = EntryFilter {
        from_date: Some(date(2024, 3, 1)),
        to_date: Some(date(2024, 1, 1)),
        concept_contains: None,
    };
    assert!(matches!(
        repo.list_entries(&inverted).await,
        Err(LedgerError::InvalidDateRange { .. })
    ));
}

// ============================================================================
// delete_entry
// ============================================================================

#[tokio::test]
async fn test_delete_removes_entry_and_lines() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());

    let keep = repo
        .create_entry(&transfer(date(2024, 1, 1), "Keep", "570", "100", dec!(300)))
        .await
        .unwrap()
        .into_value();
    let drop = repo
        .create_entry(&transfer(date(2024, 1, 2), "Drop", "570", "100", dec!(200)))
        .await
        .unwrap()
        .into_value();

    let recorded = repo.delete_entry(drop.entry.id).await.unwrap();
    assert!(recorded.audit.is_logged());

    assert!(matches!(
        repo.get_entry_detail(drop.entry.id).await,
        Err(LedgerError::EntryNotFound(_))
    ));
    let remaining = repo.lines_for_account("570").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].entry_id, keep.entry.id);
    assert_eq!(
        repo.account_balance("570", None).await.unwrap(),
        Money::new(dec!(300))
    );

    let trail = AuditRepository::new(store)
        .for_entry(drop.entry.id)
        .await
        .unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].details, format!("Entry #{}: Drop", drop.entry.id));
    assert_eq!(trail[1].action, AuditAction::DeleteEntry);
    assert_eq!(
        trail[1].details,
        format!("Deleted entry #{}: Drop", drop.entry.id)
    );
}

#[tokio::test]
async fn test_delete_missing_entry() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());

    let err = repo.delete_entry(EntryId::new(999)).await.unwrap_err();
    assert!(matches!(err, LedgerError::EntryNotFound(_)));
    assert!(
        AuditRepository::new(store)
            .by_action(AuditAction::DeleteEntry)
            .await
            .unwrap()
            .is_empty()
    );
}

// ============================================================================
// balances and line lookups
// ============================================================================

#[tokio::test]
async fn test_account_balance_as_of() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    repo.create_entry(&transfer(date(2024, 1, 1), "Capital", "570", "100", dec!(1000)))
        .await
        .unwrap();
    repo.create_entry(&transfer(date(2024, 2, 1), "Rent", "621", "570", dec!(250)))
        .await
        .unwrap();

    assert_eq!(
        repo.account_balance("570", Some(date(2024, 1, 31))).await.unwrap(),
        Money::new(dec!(1000))
    );
    assert_eq!(
        repo.account_balance("570", Some(date(2024, 2, 1))).await.unwrap(),
        Money::new(dec!(750))
    );
    assert_eq!(
        repo.account_balance("570", Some(date(2023, 12, 31))).await.unwrap(),
        Money::ZERO
    );
    assert_eq!(repo.account_balance("571", None).await.unwrap(), Money::ZERO);
    assert!(matches!(
        repo.account_balance("999", None).await,
        Err(LedgerError::AccountNotFound(code)) if code == "999"
    ));
}

#[tokio::test]
async fn test_balances_by_type_skips_zero() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    repo.create_entry(&transfer(date(2024, 1, 1), "Capital", "570", "100", dec!(1000)))
        .await
        .unwrap();
    repo.create_entry(&transfer(date(2024, 1, 2), "Deposit", "571", "570", dec!(400)))
        .await
        .unwrap();
    repo.create_entry(&transfer(date(2024, 1, 3), "Withdraw", "570", "571", dec!(400)))
        .await
        .unwrap();

    let assets = repo.balances_by_type(AccountType::Asset, None).await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].account.code, "570");
    assert_eq!(assets[0].balance, Money::new(dec!(1000)));

    let equity = repo.balances_by_type(AccountType::Equity, None).await.unwrap();
    assert_eq!(equity.len(), 1);
    assert_eq!(equity[0].balance, Money::new(dec!(-1000)));
    assert_eq!(equity[0].presented(), Money::new(dec!(1000)));

    assert!(
        repo.balances_by_type(AccountType::Income, None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_lines_for_entry_and_account() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    let input = CreateEntryInput {
        date: date(2024, 5, 1),
        concept: "Two cash lines".into(),
        lines: vec![
            EntryLineInput::debit("570", dec!(10)),
            EntryLineInput::debit("570", dec!(15)),
            EntryLineInput::credit("700", dec!(25)),
        ],
    };
    let id = repo.create_entry(&input).await.unwrap().into_value().entry.id;

    let cash = repo.lines_for_entry_and_account(id, "570").await.unwrap();
    assert_eq!(cash.len(), 2);
    assert!(cash[0].id < cash[1].id);
    assert!(
        repo.lines_for_entry_and_account(id, "571")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_log_audit_free_form() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());

    let id = repo
        .log_audit(AuditAction::System, "Backup exported", None)
        .await
        .unwrap();

    let recent = AuditRepository::new(store).recent(1).await.unwrap();
    assert_eq!(recent[0].id, id);
    assert_eq!(recent[0].action, AuditAction::System);
    assert_eq!(recent[0].details, "Backup exported");
    assert!(recent[0].entry_id.is_none());
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn test_audit_failure_keeps_entry() {
    let (_dir, store) = seeded_store().await;
    fail_on(&store, "INSERT", "audit_log", "audit down").await;
    let repo = LedgerRepository::new(store);

    let recorded = repo
        .create_entry(&transfer(date(2024, 1, 1), "Capital", "570", "100", dec!(300)))
        .await
        .expect("entry must commit without its audit record");

    match &recorded.audit {
        AuditStatus::Failed(message) => assert!(message.contains("audit down")),
        AuditStatus::Logged(id) => panic!("audit unexpectedly logged as {id}"),
    }
    let stored = repo.get_entry_detail(recorded.value.entry.id).await.unwrap();
    assert_eq!(stored.lines.len(), 2);
    assert_eq!(
        repo.account_balance("570", None).await.unwrap(),
        Money::new(dec!(300))
    );
}

#[tokio::test]
async fn test_failed_line_delete_keeps_entry() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());
    let id = repo
        .create_entry(&transfer(date(2024, 1, 1), "Capital", "570", "100", dec!(300)))
        .await
        .unwrap()
        .value
        .entry
        .id;

    fail_on(&store, "DELETE", "entry_lines", "line locked").await;
    let err = repo.delete_entry(id).await.unwrap_err();
    assert!(matches!(err, LedgerError::StoreUnavailable(ref m) if m.contains("line locked")));

    let detail = repo.get_entry_detail(id).await.unwrap();
    assert_eq!(detail.lines.len(), 2);
    let trail = AuditRepository::new(store).for_entry(id).await.unwrap();
    assert!(trail.iter().all(|r| r.action == AuditAction::CreateEntry));
}

#[tokio::test]
async fn test_balances_past_cents_column_range() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store.clone());
    let amount = dec!(50000000000000000);

    for day in [1, 2] {
        repo.create_entry(&transfer(date(2024, 1, day), "Capital", "570", "100", amount))
            .await
            .unwrap();
    }

    assert_eq!(
        repo.account_balance("570", None).await.unwrap(),
        Money::new(dec!(100000000000000000))
    );
    let equity = repo.balances_by_type(AccountType::Equity, None).await.unwrap();
    assert_eq!(equity[0].presented(), Money::new(dec!(100000000000000000)));

    let trial = ReportRepository::new(store).trial_balance(None).await.unwrap();
    assert!(trial.is_balanced);
    assert_eq!(trial.total_debit, Money::new(dec!(100000000000000000)));
}
