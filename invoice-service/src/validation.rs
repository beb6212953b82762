//! Draft invoice validation.
//!
//! Pure: a draft maps to a [`ValidationReport`]; an empty report means the
//! draft is save-eligible. Nothing here touches the store.

use crate::models::{DraftInvoice, DraftLineItem};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Structured validation result. `fields` is keyed by header field name
/// (plus the `items` key for the empty-collection case); `items` is
/// aligned position-for-position with the draft's item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub fields: BTreeMap<String, String>,
    pub items: Vec<Option<String>>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.items.iter().all(Option::is_none)
    }

    pub fn error_count(&self) -> usize {
        self.fields.len() + self.items.iter().flatten().count()
    }
}

/// Shared numeric predicate: blank text is treated as zero (the bound
/// check decides whether that passes); otherwise the text must parse as a
/// non-negative decimal.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    match Decimal::from_str(trimmed) {
        Ok(value) if value >= Decimal::ZERO => Some(value),
        _ => None,
    }
}

pub fn validate_draft(draft: &DraftInvoice) -> ValidationReport {
    let mut report = ValidationReport::default();

    let required = [
        ("company", &draft.company, "Company is required"),
        (
            "company_address",
            &draft.company_address,
            "Company address is required",
        ),
        ("client", &draft.client, "Client is required"),
        (
            "client_address",
            &draft.client_address,
            "Client address is required",
        ),
        (
            "invoice_number",
            &draft.invoice_number,
            "Invoice number is required",
        ),
    ];
    for (key, value, message) in required {
        if value.trim().is_empty() {
            report.fields.insert(key.to_string(), message.to_string());
        }
    }

    if draft.normalized_due_date().is_none() {
        report
            .fields
            .insert("due_date".to_string(), "A valid due date is required".to_string());
    }

    if draft.items.is_empty() {
        report.fields.insert(
            "items".to_string(),
            "At least one line item is required".to_string(),
        );
    } else {
        report.items = draft
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| validate_item(index, item))
            .collect();
    }

    report
}

/// First failing condition per item, in order: description, quantity,
/// price, tax rate. Row numbers in messages are 1-based.
fn validate_item(index: usize, item: &DraftLineItem) -> Option<String> {
    let row = index + 1;
    if item.description.trim().is_empty() {
        return Some(format!("Line {}: description is required", row));
    }
    match parse_amount(&item.quantity) {
        Some(quantity) if quantity > Decimal::ZERO => {}
        Some(_) => return Some(format!("Line {}: quantity must be greater than zero", row)),
        None => return Some(format!("Line {}: quantity must be a non-negative number", row)),
    }
    if parse_amount(&item.unit_price).is_none() {
        return Some(format!("Line {}: price must be a non-negative number", row));
    }
    if parse_amount(&item.tax_rate).is_none() {
        return Some(format!("Line {}: tax rate must be a non-negative number", row));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_draft() -> DraftInvoice {
        DraftInvoice {
            company: "Acme Inc".into(),
            company_address: "1 Acme Way".into(),
            client: "Globex".into(),
            client_address: "2 Globex Blvd".into(),
            invoice_number: "INV-0001".into(),
            due_date: "2026-04-01".into(),
            items: vec![DraftLineItem {
                description: "Consulting".into(),
                quantity: "2".into(),
                unit_price: "10".into(),
                tax_rate: "10".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_produces_empty_report() {
        let report = validate_draft(&valid_draft());
        assert!(report.is_empty());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn missing_company_and_no_items_yields_exactly_two_errors() {
        let mut draft = valid_draft();
        draft.company = String::new();
        draft.items.clear();

        let report = validate_draft(&draft);
        assert_eq!(report.error_count(), 2);
        assert!(report.fields.contains_key("company"));
        assert!(report.fields.contains_key("items"));
        assert!(report.items.is_empty());
    }

    #[test]
    fn blank_required_fields_each_get_a_distinct_error() {
        let mut draft = valid_draft();
        draft.company = "  ".into();
        draft.company_address = String::new();
        draft.client = String::new();
        draft.client_address = String::new();
        draft.invoice_number = String::new();
        draft.due_date = String::new();

        let report = validate_draft(&draft);
        for key in [
            "company",
            "company_address",
            "client",
            "client_address",
            "invoice_number",
            "due_date",
        ] {
            assert!(report.fields.contains_key(key), "missing error for {key}");
        }
    }

    #[test]
    fn zero_quantity_names_one_based_position_and_later_items_still_checked() {
        let mut draft = valid_draft();
        draft.items = vec![
            DraftLineItem {
                description: "First".into(),
                quantity: "1".into(),
                unit_price: "5".into(),
                ..Default::default()
            },
            DraftLineItem {
                description: "Second".into(),
                quantity: "0".into(),
                unit_price: "5".into(),
                ..Default::default()
            },
            DraftLineItem {
                description: "Third".into(),
                quantity: "3".into(),
                unit_price: "5".into(),
                ..Default::default()
            },
        ];

        let report = validate_draft(&draft);
        assert_eq!(report.items.len(), 3);
        assert_eq!(report.items[0], None);
        assert!(report.items[1].as_deref().unwrap().contains("Line 2"));
        assert_eq!(report.items[2], None);
    }

    #[test]
    fn item_checks_short_circuit_in_order() {
        let item = DraftLineItem {
            description: String::new(),
            quantity: "-1".into(),
            unit_price: "oops".into(),
            tax_rate: "oops".into(),
            ..Default::default()
        };
        // Description failure masks the later ones.
        let message = validate_item(0, &item).unwrap();
        assert!(message.contains("description"));

        let item = DraftLineItem {
            description: "Thing".into(),
            quantity: "1".into(),
            unit_price: "-3".into(),
            tax_rate: "oops".into(),
            ..Default::default()
        };
        let message = validate_item(4, &item).unwrap();
        assert!(message.contains("Line 5"));
        assert!(message.contains("price"));
    }

    #[test]
    fn parse_amount_treats_blank_as_zero_and_rejects_negatives() {
        assert_eq!(parse_amount(""), Some(Decimal::ZERO));
        assert_eq!(parse_amount("  "), Some(Decimal::ZERO));
        assert_eq!(parse_amount("12.5"), Some(dec!(12.5)));
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
