//! Concurrent access tests.
//!
//! The store serialises transactions over one connection, so concurrent
//! writers queue instead of interleaving. These tests verify that:
//! - Every concurrent `create_entry` commits
//! - Final balances equal the sum of what was posted
//! - Readers running alongside writers always see balanced books

use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::ledger::{AccountType, EntryFilter};
use tally_db::{LedgerRepository, ReportRepository};
use tally_shared::types::Money;

mod common;

use common::{date, seeded_store, transfer};

const WRITERS: u32 = 50;

#[tokio::test]
async fn test_concurrent_entries_all_commit() {
    let (_dir, store) = seeded_store().await;
    let repo = LedgerRepository::new(store);

    let tasks = (1..=WRITERS).map(|n| {
        let repo = repo.clone();
        tokio::spawn(async move {
            let input = transfer(
                date(2024, 1, 1 + n % 28),
                &format!("Sale #{n}"),
                "570",
                "700",
                Decimal::from(n),
            );
            repo.create_entry(&input).await
        })
    });

    let results = join_all(tasks).await;
    for result in results {
        let recorded = result.expect("task panicked").expect("entry rejected");
        assert!(recorded.audit.is_logged());
    }

    let expected: Money = (1..=WRITERS).map(|n| Money::new(Decimal::from(n))).sum();
    assert_eq!(repo.account_balance("570", None).await.unwrap(), expected);
    assert_eq!(repo.account_balance("700", None).await.unwrap(), -expected);

    let entries = repo.list_entries(&EntryFilter::default()).await.unwrap();
    assert_eq!(entries.len(), WRITERS as usize);
    let mut ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), WRITERS as usize);
}

#[tokio::test]
async fn test_reports_consistent_during_writes() {
    let (_dir, store) = seeded_store().await;
    let ledger = LedgerRepository::new(store.clone());
    let reports = ReportRepository::new(store);

    let writers = (0..20u32).map(|n| {
        let ledger = ledger.clone();
        tokio::spawn(async move {
            ledger
                .create_entry(&transfer(
                    date(2024, 3, 1),
                    "Capital call",
                    "571",
                    "100",
                    dec!(12.34),
                ))
                .await
                .map(|_| n)
        })
    });
    let readers = (0..20).map(|_| {
        let reports = reports.clone();
        tokio::spawn(async move { reports.trial_balance(None).await })
    });

    let (written, read) = futures::join!(join_all(writers), join_all(readers));
    assert!(written.into_iter().all(|r| r.expect("task panicked").is_ok()));
    for report in read {
        let report = report.expect("task panicked").expect("report failed");
        assert!(report.is_balanced);
    }

    let equity = ledger
        .balances_by_type(AccountType::Equity, None)
        .await
        .unwrap();
    assert_eq!(equity[0].presented(), Money::new(dec!(246.80)));
}
