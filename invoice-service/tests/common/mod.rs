//! Shared test support: draft builders and an in-memory invoice store.

use async_trait::async_trait;
use chrono::Utc;
use invoice_service::models::{
    AuthUser, DraftInvoice, DraftLineItem, Invoice, InvoiceRecord, LineItem, SaveInvoice,
};
use invoice_service::services::InvoiceStore;
use service_core::error::AppError;
use sqlx::types::Json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub fn test_user() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
    }
}

pub fn draft_item(description: &str, quantity: &str, unit_price: &str, tax_rate: &str) -> DraftLineItem {
    DraftLineItem {
        description: description.to_string(),
        quantity: quantity.to_string(),
        unit_price: unit_price.to_string(),
        tax_rate: tax_rate.to_string(),
        ..Default::default()
    }
}

pub fn valid_draft() -> DraftInvoice {
    DraftInvoice {
        company: "Acme Inc".into(),
        company_address: "1 Acme Way".into(),
        client: "Globex".into(),
        client_address: "2 Globex Blvd".into(),
        invoice_number: "INV-0001".into(),
        due_date: "2026-04-01".into(),
        items: vec![draft_item("Consulting", "2", "10", "10")],
        ..Default::default()
    }
}

/// In-memory [`InvoiceStore`] with call counters, mirroring the canonical
/// behavior of the PostgreSQL implementation: id assignment on insert,
/// owner scoping, full item replacement per save.
#[derive(Default)]
pub struct MemoryStore {
    invoices: Mutex<HashMap<Uuid, InvoiceRecord>>,
    pub save_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.save_calls.load(Ordering::SeqCst),
            self.fetch_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn save_invoice(&self, user_id: Uuid, input: &SaveInvoice) -> Result<Uuid, AppError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let mut invoices = self.invoices.lock().expect("store poisoned");

        let (id, created_at) = match input.id {
            None => (Uuid::new_v4(), Utc::now()),
            Some(id) => {
                let existing = invoices
                    .get(&id)
                    .filter(|record| record.invoice.user_id == user_id)
                    .ok_or_else(|| {
                        AppError::NotFound(anyhow::anyhow!("Invoice {} not found for this user", id))
                    })?;
                (id, existing.invoice.created_at)
            }
        };

        let now = Utc::now();
        let invoice = Invoice {
            id,
            user_id,
            company: input.company.clone(),
            company_address: input.company_address.clone(),
            client: input.client.clone(),
            client_address: input.client_address.clone(),
            invoice_number: input.invoice_number.clone(),
            due_date: input.due_date,
            notes: input.notes.clone(),
            terms: input.terms.clone(),
            logo: input.logo.clone(),
            logo_zoom: input.logo_zoom,
            status: input.status.as_str().to_string(),
            customer_id: input.customer_id,
            template_id: input.template_id.clone(),
            currency: Json(input.currency.clone()),
            show_shipping: input.show_shipping,
            show_discount: input.show_discount,
            show_tax_column: input.show_tax_column,
            show_signature: input.show_signature,
            show_payment_details: input.show_payment_details,
            shipping: Json(input.shipping.clone()),
            taxes: Json(input.taxes.clone()),
            discount_percent: input.discount_percent,
            subtotal: input.totals.subtotal,
            tax_total: input.totals.tax_total,
            total: input.totals.total,
            created_at,
            updated_at: now,
        };

        let items = input
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| LineItem {
                id: Uuid::new_v4(),
                invoice_id: id,
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                tax_rate: item.tax_rate,
                position: position as i32,
                product_id: item.product_id,
                created_at: now,
                updated_at: now,
            })
            .collect();

        invoices.insert(id, InvoiceRecord { invoice, items });
        Ok(id)
    }

    async fn fetch_invoice(
        &self,
        user_id: Uuid,
        invoice_id: Uuid,
    ) -> Result<InvoiceRecord, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let invoices = self.invoices.lock().expect("store poisoned");
        invoices
            .get(&invoice_id)
            .filter(|record| record.invoice.user_id == user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }

    async fn delete_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<bool, AppError> {
        let mut invoices = self.invoices.lock().expect("store poisoned");
        let owned = invoices
            .get(&invoice_id)
            .is_some_and(|record| record.invoice.user_id == user_id);
        if owned {
            invoices.remove(&invoice_id);
        }
        Ok(owned)
    }
}
