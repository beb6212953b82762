//! In-memory draft state for the invoice form.
//!
//! Numeric item fields are kept as the raw text the form supplied; they are
//! parsed by validation and again when the draft is converted into a store
//! input. Header aggregates never live on the draft: they are derived.

use crate::models::customer::Customer;
use crate::models::invoice::{Currency, InvoiceStatus, SaveInvoice, ShippingInfo, TaxLine};
use crate::models::line_item::LineItemInput;
use crate::models::product::Product;
use crate::totals::compute_totals;
use crate::validation::parse_amount;
use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;

/// One editable invoice row. `id` exists only so editor actions can target
/// a row; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftLineItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax_rate: String,
    pub product_id: Option<Uuid>,
}

impl Default for DraftLineItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            quantity: "1".to_string(),
            unit_price: String::new(),
            tax_rate: String::new(),
            product_id: None,
        }
    }
}

impl DraftLineItem {
    /// Seed a row from a product's defaults. Copies values; later edits to
    /// the product do not flow back into the draft.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: product.name.clone(),
            quantity: "1".to_string(),
            unit_price: product.price.to_string(),
            tax_rate: product.tax_rate.to_string(),
            product_id: Some(product.id),
        }
    }
}

/// Draft invoice as assembled by the client before a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftInvoice {
    pub id: Option<Uuid>,
    pub company: String,
    pub company_address: String,
    pub client: String,
    pub client_address: String,
    pub invoice_number: String,
    pub due_date: String,
    pub notes: String,
    pub terms: String,
    pub logo: Option<String>,
    pub logo_zoom: f64,
    pub status: InvoiceStatus,
    pub customer_id: Option<Uuid>,
    pub template_id: Option<String>,
    pub currency: Currency,
    pub show_shipping: bool,
    pub show_discount: bool,
    pub show_tax_column: bool,
    pub show_signature: bool,
    pub show_payment_details: bool,
    pub shipping: ShippingInfo,
    pub taxes: Vec<TaxLine>,
    pub discount_percent: Decimal,
    pub items: Vec<DraftLineItem>,
}

impl Default for DraftInvoice {
    fn default() -> Self {
        Self {
            id: None,
            company: String::new(),
            company_address: String::new(),
            client: String::new(),
            client_address: String::new(),
            invoice_number: String::new(),
            due_date: String::new(),
            notes: String::new(),
            terms: String::new(),
            logo: None,
            logo_zoom: 1.0,
            status: InvoiceStatus::Draft,
            customer_id: None,
            template_id: None,
            currency: Currency::default(),
            show_shipping: false,
            show_discount: false,
            show_tax_column: false,
            show_signature: false,
            show_payment_details: false,
            shipping: ShippingInfo::default(),
            taxes: Vec::new(),
            discount_percent: Decimal::ZERO,
            items: Vec::new(),
        }
    }
}

impl DraftInvoice {
    /// Seed the client block from a customer. Copies values; the invoice
    /// keeps only an informational customer id, never a live reference.
    pub fn apply_customer(&mut self, customer: &Customer) {
        self.client = customer.name.clone();
        self.client_address = customer.address.clone().unwrap_or_default();
        self.customer_id = Some(customer.id);
    }

    /// Due date normalized to a bare calendar date, or None when the field
    /// is blank or unparseable.
    pub fn normalized_due_date(&self) -> Option<NaiveDate> {
        normalize_due_date(&self.due_date)
    }

    /// Convert a validated draft into a store input: normalized due date,
    /// parsed items (tax rate defaulted to zero), recomputed aggregates.
    pub fn to_save_input(&self) -> Result<SaveInvoice, AppError> {
        let due_date = self
            .normalized_due_date()
            .ok_or_else(|| AppError::BadRequest(anyhow!("Invalid due date: {:?}", self.due_date)))?;

        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let quantity = parse_amount(&item.quantity).ok_or_else(|| {
                AppError::BadRequest(anyhow!("Line {}: invalid quantity", index + 1))
            })?;
            let unit_price = parse_amount(&item.unit_price).ok_or_else(|| {
                AppError::BadRequest(anyhow!("Line {}: invalid price", index + 1))
            })?;
            let tax_rate = parse_amount(&item.tax_rate).ok_or_else(|| {
                AppError::BadRequest(anyhow!("Line {}: invalid tax rate", index + 1))
            })?;
            items.push(LineItemInput {
                description: item.description.trim().to_string(),
                quantity,
                unit_price,
                tax_rate,
                product_id: item.product_id,
            });
        }

        let totals = compute_totals(
            &items,
            self.discount_percent,
            self.shipping.cost,
            self.show_discount,
            self.show_shipping,
        );

        Ok(SaveInvoice {
            id: self.id,
            company: self.company.trim().to_string(),
            company_address: self.company_address.trim().to_string(),
            client: self.client.trim().to_string(),
            client_address: self.client_address.trim().to_string(),
            invoice_number: self.invoice_number.trim().to_string(),
            due_date,
            notes: none_if_blank(&self.notes),
            terms: none_if_blank(&self.terms),
            logo: self.logo.clone(),
            logo_zoom: self.logo_zoom,
            status: self.status,
            customer_id: self.customer_id,
            template_id: self.template_id.clone(),
            currency: self.currency.clone(),
            show_shipping: self.show_shipping,
            show_discount: self.show_discount,
            show_tax_column: self.show_tax_column,
            show_signature: self.show_signature,
            show_payment_details: self.show_payment_details,
            shipping: self.shipping.clone(),
            taxes: self.taxes.clone(),
            discount_percent: self.discount_percent,
            totals,
            items,
        })
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a form-supplied due date to a bare calendar date. Accepts
/// `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS`;
/// the time component is dropped in all cases.
pub fn normalize_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(timestamp.date());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn normalize_accepts_bare_date() {
        assert_eq!(
            normalize_due_date("2026-03-01"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn normalize_drops_time_from_rfc3339_timestamp() {
        assert_eq!(
            normalize_due_date("2026-03-01T10:30:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(
            normalize_due_date("2026-03-01T23:59:59+05:00"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn normalize_rejects_blank_and_garbage() {
        assert_eq!(normalize_due_date(""), None);
        assert_eq!(normalize_due_date("   "), None);
        assert_eq!(normalize_due_date("next tuesday"), None);
    }

    #[test]
    fn seeding_from_customer_and_product_copies_values() {
        use chrono::Utc;

        let customer = Customer {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Globex".into(),
            email: None,
            phone: None,
            address: Some("2 Globex Blvd".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let product = Product {
            id: Uuid::new_v4(),
            user_id: customer.user_id,
            name: "Support plan".into(),
            description: None,
            price: dec!(99.50),
            tax_rate: dec!(21),
            category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut draft = DraftInvoice::default();
        draft.apply_customer(&customer);
        draft.items.push(DraftLineItem::from_product(&product));

        assert_eq!(draft.client, "Globex");
        assert_eq!(draft.client_address, "2 Globex Blvd");
        assert_eq!(draft.customer_id, Some(customer.id));
        assert_eq!(draft.items[0].description, "Support plan");
        assert_eq!(draft.items[0].unit_price, "99.50");
        assert_eq!(draft.items[0].tax_rate, "21");
        assert_eq!(draft.items[0].product_id, Some(product.id));
    }

    #[test]
    fn to_save_input_defaults_blank_tax_rate_to_zero() {
        let draft = DraftInvoice {
            company: "Acme".into(),
            company_address: "1 Acme Way".into(),
            client: "Client".into(),
            client_address: "2 Client Rd".into(),
            invoice_number: "INV-1".into(),
            due_date: "2026-03-01".into(),
            items: vec![DraftLineItem {
                description: "Widget".into(),
                quantity: "2".into(),
                unit_price: "10".into(),
                tax_rate: String::new(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let input = draft.to_save_input().expect("valid draft");
        assert_eq!(input.items.len(), 1);
        assert_eq!(input.items[0].tax_rate, Decimal::ZERO);
        assert_eq!(input.totals.subtotal, dec!(20));
    }
}
