//! Integration tests for the transactional store adapter.

mod common;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use tally_db::entities::{
    accounting_entries, chart_of_accounts, entry_lines, sea_orm_active_enums::AccountType,
};
use tally_db::{KeyRange, Store, StoreError};

use common::{date, empty_store};

fn account(code: &str, parent: &str) -> chart_of_accounts::ActiveModel {
    chart_of_accounts::ActiveModel {
        code: Set(code.to_string()),
        name: Set(format!("Account {code}")),
        parent_code: Set(parent.to_string()),
        account_type: Set(AccountType::Asset),
        editable: Set(true),
    }
}

fn entry(day: u32, concept: &str) -> accounting_entries::ActiveModel {
    accounting_entries::ActiveModel {
        id: NotSet,
        date: Set(date(2024, 1, day)),
        concept: Set(concept.to_string()),
        total_debit_cents: Set(100),
        total_credit_cents: Set(100),
        created_at: Set(Utc::now()),
    }
}

fn line(entry_id: i64, code: &str, debit: i64, credit: i64) -> entry_lines::ActiveModel {
    entry_lines::ActiveModel {
        id: NotSet,
        entry_id: Set(entry_id),
        account_code: Set(code.to_string()),
        debit_cents: Set(debit),
        credit_cents: Set(credit),
    }
}

async fn with_accounts(store: &Store, codes: &[&str]) {
    let txn = store.begin().await.unwrap();
    for code in codes {
        txn.create(account(code, "")).await.unwrap();
    }
    txn.commit().await.unwrap();
}

#[tokio::test]
async fn test_create_assigns_keys_and_reads_back() {
    let (_dir, store) = empty_store().await;

    let txn = store.begin().await.unwrap();
    let first = txn.create(entry(1, "First")).await.unwrap();
    let second = txn.create(entry(2, "Second")).await.unwrap();
    txn.commit().await.unwrap();
    assert!(second.id > first.id);

    let txn = store.begin().await.unwrap();
    let read = txn
        .read::<accounting_entries::Entity>(first.id)
        .await
        .unwrap();
    assert_eq!(read, Some(first));
    assert!(
        txn.read::<accounting_entries::Entity>(999)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_key_rejected() {
    let (_dir, store) = empty_store().await;
    with_accounts(&store, &["570"]).await;

    let txn = store.begin().await.unwrap();
    let err = txn.create(account("570", "")).await.unwrap_err();
    match err {
        StoreError::DuplicateKey { collection, .. } => assert_eq!(collection, "chart_of_accounts"),
        other => panic!("expected duplicate key, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_upserts() {
    let (_dir, store) = empty_store().await;

    let txn = store.begin().await.unwrap();
    txn.update(account("570", "")).await.unwrap();
    let mut renamed = account("570", "");
    renamed.name = Set("Petty cash".into());
    txn.update(renamed).await.unwrap();
    txn.commit().await.unwrap();

    let txn = store.begin().await.unwrap();
    let all = txn.read_all::<chart_of_accounts::Entity>().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Petty cash");
}

#[tokio::test]
async fn test_drop_without_commit_rolls_back() {
    let (_dir, store) = empty_store().await;

    {
        let txn = store.begin().await.unwrap();
        txn.create(account("570", "")).await.unwrap();
    }

    let txn = store.begin().await.unwrap();
    assert!(
        txn.read_all::<chart_of_accounts::Entity>()
            .await
            .unwrap()
            .is_empty()
    );
    txn.rollback().await.unwrap();
}

#[tokio::test]
async fn test_savepoint_rolls_back_alone() {
    let (_dir, store) = empty_store().await;

    let txn = store.begin().await.unwrap();
    txn.create(account("570", "")).await.unwrap();
    let savepoint = txn.savepoint().await.unwrap();
    savepoint.create(account("571", "")).await.unwrap();
    savepoint.rollback().await.unwrap();
    txn.commit().await.unwrap();

    let txn = store.begin().await.unwrap();
    let codes: Vec<String> = txn
        .read_all::<chart_of_accounts::Entity>()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.code)
        .collect();
    assert_eq!(codes, ["570"]);
}

#[tokio::test]
async fn test_delete_reports_rows() {
    let (_dir, store) = empty_store().await;
    with_accounts(&store, &["570"]).await;

    let txn = store.begin().await.unwrap();
    assert_eq!(
        txn.delete::<chart_of_accounts::Entity>("570".to_string())
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        txn.delete::<chart_of_accounts::Entity>("570".to_string())
            .await
            .unwrap(),
        0
    );
    txn.commit().await.unwrap();
}

#[tokio::test]
async fn test_date_index_ranges_inclusive() {
    let (_dir, store) = empty_store().await;

    let txn = store.begin().await.unwrap();
    for (day, concept) in [(3, "c"), (1, "a"), (2, "b"), (2, "b2"), (5, "e")] {
        txn.create(entry(day, concept)).await.unwrap();
    }

    let between = txn
        .read_all_by_index(
            &accounting_entries::BY_DATE,
            &KeyRange::between(date(2024, 1, 2), date(2024, 1, 3)),
        )
        .await
        .unwrap();
    let concepts: Vec<&str> = between.iter().map(|e| e.concept.as_str()).collect();
    assert_eq!(concepts, ["b", "b2", "c"]);

    let at_least = txn
        .read_all_by_index(
            &accounting_entries::BY_DATE,
            &KeyRange::at_least(date(2024, 1, 3)),
        )
        .await
        .unwrap();
    assert_eq!(at_least.len(), 2);

    let at_most = txn
        .read_all_by_index(
            &accounting_entries::BY_DATE,
            &KeyRange::at_most(date(2024, 1, 1)),
        )
        .await
        .unwrap();
    assert_eq!(at_most.len(), 1);
    assert_eq!(at_most[0].concept, "a");
}

#[tokio::test]
async fn test_composite_index_ranges() {
    let (_dir, store) = empty_store().await;
    with_accounts(&store, &["570", "571", "700"]).await;

    let txn = store.begin().await.unwrap();
    let first = txn.create(entry(1, "one")).await.unwrap().id;
    let second = txn.create(entry(2, "two")).await.unwrap().id;
    txn.create(line(first, "700", 0, 100)).await.unwrap();
    txn.create(line(first, "570", 100, 0)).await.unwrap();
    txn.create(line(second, "570", 40, 0)).await.unwrap();
    txn.create(line(second, "571", 60, 0)).await.unwrap();
    txn.create(line(second, "700", 0, 100)).await.unwrap();

    let exact = txn
        .read_all_by_index(
            &entry_lines::BY_ENTRY_ACCOUNT,
            &KeyRange::Only(vec![second.into(), "571".into()]),
        )
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].debit_cents, 60);

    let prefix = txn
        .read_all_by_index(
            &entry_lines::BY_ENTRY_ACCOUNT,
            &KeyRange::Only(vec![first.into()]),
        )
        .await
        .unwrap();
    let codes: Vec<&str> = prefix.iter().map(|l| l.account_code.as_str()).collect();
    assert_eq!(codes, ["570", "700"]);

    let range = txn
        .read_all_by_index(
            &entry_lines::BY_ENTRY_ACCOUNT,
            &KeyRange::Between {
                lower: vec![first.into(), "700".into()],
                upper: vec![second.into(), "570".into()],
            },
        )
        .await
        .unwrap();
    let keys: Vec<(i64, &str)> = range
        .iter()
        .map(|l| (l.entry_id, l.account_code.as_str()))
        .collect();
    assert_eq!(keys, [(first, "700"), (second, "570")]);
}

#[tokio::test]
async fn test_oversized_key_rejected() {
    let (_dir, store) = empty_store().await;

    let txn = store.begin().await.unwrap();
    let err = txn
        .read_all_by_index(
            &accounting_entries::BY_DATE,
            &KeyRange::Only(vec![date(2024, 1, 1).into(), "extra".into()]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidKey(_)));
}
