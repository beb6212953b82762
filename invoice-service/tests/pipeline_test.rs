//! Save-pipeline integration tests against the in-memory store.

mod common;

use chrono::NaiveDate;
use common::{draft_item, test_user, valid_draft, MemoryStore};
use invoice_service::services::{save_draft, SaveOutcome};
use rust_decimal_macros::dec;
use service_core::error::AppError;

#[tokio::test]
async fn unauthenticated_save_fails_before_any_store_call() {
    let store = MemoryStore::new();
    let draft = valid_draft();

    let result = save_draft(&store, None, &draft).await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert_eq!(store.calls(), (0, 0));
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_persistence() {
    let store = MemoryStore::new();
    let user = test_user();
    let mut draft = valid_draft();
    draft.company = String::new();
    draft.items.clear();

    let outcome = save_draft(&store, Some(&user), &draft)
        .await
        .expect("pipeline should not error");

    match outcome {
        SaveOutcome::Rejected(report) => {
            assert_eq!(report.error_count(), 2);
            assert!(report.fields.contains_key("company"));
            assert!(report.fields.contains_key("items"));
        }
        SaveOutcome::Saved(_) => panic!("invalid draft must not be saved"),
    }
    assert_eq!(store.calls(), (0, 0));
}

#[tokio::test]
async fn item_error_is_positional_and_blocks_the_save() {
    let store = MemoryStore::new();
    let user = test_user();
    let mut draft = valid_draft();
    draft.items = vec![
        draft_item("First", "1", "5", "0"),
        draft_item("Second", "0", "5", "0"),
        draft_item("Third", "3", "5", "0"),
    ];

    let outcome = save_draft(&store, Some(&user), &draft)
        .await
        .expect("pipeline should not error");

    match outcome {
        SaveOutcome::Rejected(report) => {
            assert_eq!(report.items.len(), 3);
            assert_eq!(report.items[0], None);
            assert!(report.items[1].as_deref().unwrap().contains("Line 2"));
            assert_eq!(report.items[2], None);
        }
        SaveOutcome::Saved(_) => panic!("draft with a zero quantity must not be saved"),
    }
    assert_eq!(store.calls(), (0, 0));
}

#[tokio::test]
async fn round_trip_returns_canonical_record_with_normalized_due_date() {
    let store = MemoryStore::new();
    let user = test_user();
    let mut draft = valid_draft();
    draft.due_date = "2026-04-01T15:45:00Z".into();
    draft.items = vec![
        draft_item("Consulting", "2", "10", "10"),
        draft_item("Hosting", "1", "49.99", ""),
    ];

    let outcome = save_draft(&store, Some(&user), &draft)
        .await
        .expect("save should succeed");

    let record = match outcome {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };

    assert!(!record.invoice.id.is_nil());
    assert_eq!(
        record.invoice.due_date,
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
    );
    assert_eq!(record.invoice.due_date.to_string(), "2026-04-01");

    assert_eq!(record.items.len(), 2);
    assert_eq!(record.items[0].description, "Consulting");
    assert_eq!(record.items[0].quantity, dec!(2));
    assert_eq!(record.items[0].unit_price, dec!(10));
    assert_eq!(record.items[0].tax_rate, dec!(10));
    assert_eq!(record.items[1].description, "Hosting");
    // Blank tax rate persists as zero, never null.
    assert_eq!(record.items[1].tax_rate, dec!(0));

    assert_eq!(record.invoice.subtotal, dec!(69.99));
    assert_eq!(record.invoice.tax_total, dec!(2));
    assert_eq!(record.invoice.total, dec!(71.99));

    // One header write, one canonical fetch.
    assert_eq!(store.calls(), (1, 1));
}

#[tokio::test]
async fn updating_with_a_reduced_item_list_leaves_no_orphans() {
    let store = MemoryStore::new();
    let user = test_user();
    let mut draft = valid_draft();
    draft.items = vec![
        draft_item("One", "1", "10", "0"),
        draft_item("Two", "1", "20", "0"),
        draft_item("Three", "1", "30", "0"),
    ];

    let first = match save_draft(&store, Some(&user), &draft).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };

    draft.id = Some(first.invoice.id);
    draft.items.truncate(1);

    let second = match save_draft(&store, Some(&user), &draft).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };

    assert_eq!(second.invoice.id, first.invoice.id);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].description, "One");
    assert_eq!(second.invoice.subtotal, dec!(10));
}

#[tokio::test]
async fn updating_someone_elses_invoice_is_not_found() {
    let store = MemoryStore::new();
    let owner = test_user();
    let intruder = test_user();

    let record = match save_draft(&store, Some(&owner), &valid_draft()).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };

    let mut draft = valid_draft();
    draft.id = Some(record.invoice.id);

    let result = save_draft(&store, Some(&intruder), &draft).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn hidden_discount_and_shipping_do_not_change_the_total() {
    let store = MemoryStore::new();
    let user = test_user();
    let mut draft = valid_draft();
    draft.items = vec![draft_item("Flat", "1", "100", "0")];
    draft.discount_percent = dec!(50);
    draft.shipping.cost = dec!(25);
    draft.show_discount = false;
    draft.show_shipping = false;

    let record = match save_draft(&store, Some(&user), &draft).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };
    assert_eq!(record.invoice.total, dec!(100));

    draft.id = Some(record.invoice.id);
    draft.show_discount = true;
    draft.show_shipping = true;

    let record = match save_draft(&store, Some(&user), &draft).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };
    assert_eq!(record.invoice.total, dec!(75));
}
