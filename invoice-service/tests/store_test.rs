//! PostgreSQL store tests. These need a provisioned database; run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use common::{test_user, valid_draft};
use invoice_service::services::{save_draft, Database, SaveOutcome};

async fn test_database() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let db = Database::new(&url, 5, 1).await.expect("connect");
    db.run_migrations().await.expect("migrate");
    db
}

#[tokio::test]
#[ignore]
async fn save_fetch_delete_round_trip_against_postgres() {
    let db = test_database().await;
    let user = test_user();

    let record = match save_draft(&db, Some(&user), &valid_draft()).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };
    assert!(!record.invoice.id.is_nil());
    assert_eq!(record.items.len(), 1);

    let mut draft = valid_draft();
    draft.id = Some(record.invoice.id);
    draft.items.clear();
    draft.items.push(common::draft_item("Replacement", "1", "5", "0"));

    let updated = match save_draft(&db, Some(&user), &draft).await.unwrap() {
        SaveOutcome::Saved(record) => record,
        SaveOutcome::Rejected(report) => panic!("unexpected rejection: {:?}", report),
    };
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].description, "Replacement");

    use invoice_service::services::InvoiceStore;
    assert!(db.delete_invoice(user.user_id, record.invoice.id).await.unwrap());
    assert!(db
        .fetch_invoice(user.user_id, record.invoice.id)
        .await
        .is_err());
}
