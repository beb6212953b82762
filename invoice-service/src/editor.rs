//! Draft editor: a pure state-transition function over a closed action set.
//!
//! Every form interaction is one [`Action`] applied by [`apply`]; malformed
//! payloads cannot be represented, and unknown targets leave the draft
//! unchanged rather than failing.

use crate::models::{DraftInvoice, DraftLineItem, ShippingInfo, TaxLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
    TaxRate,
}

/// Display toggle on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleField {
    Shipping,
    Discount,
    TaxColumn,
    Signature,
    PaymentDetails,
}

/// Closed set of draft edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    AddItem(DraftLineItem),
    UpdateItem {
        id: Uuid,
        field: ItemField,
        value: String,
    },
    RemoveItem {
        id: Uuid,
    },
    ToggleField(ToggleField),
    UpdateShipping(ShippingInfo),
    AddTax(TaxLine),
    RemoveTax {
        id: Uuid,
    },
    UpdateTaxName {
        id: Uuid,
        name: String,
    },
    UpdateTaxRate {
        id: Uuid,
        rate: Decimal,
    },
    SetDiscount(Decimal),
}

/// Apply one action to the draft, returning the next draft state.
pub fn apply(mut state: DraftInvoice, action: Action) -> DraftInvoice {
    match action {
        Action::AddItem(item) => {
            state.items.push(item);
        }
        Action::UpdateItem { id, field, value } => {
            if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                match field {
                    ItemField::Description => item.description = value,
                    ItemField::Quantity => item.quantity = value,
                    ItemField::UnitPrice => item.unit_price = value,
                    ItemField::TaxRate => item.tax_rate = value,
                }
            }
        }
        Action::RemoveItem { id } => {
            state.items.retain(|item| item.id != id);
        }
        Action::ToggleField(field) => match field {
            ToggleField::Shipping => state.show_shipping = !state.show_shipping,
            ToggleField::Discount => state.show_discount = !state.show_discount,
            ToggleField::TaxColumn => state.show_tax_column = !state.show_tax_column,
            ToggleField::Signature => state.show_signature = !state.show_signature,
            ToggleField::PaymentDetails => {
                state.show_payment_details = !state.show_payment_details
            }
        },
        Action::UpdateShipping(shipping) => {
            state.shipping = shipping;
        }
        Action::AddTax(tax) => {
            state.taxes.push(tax);
        }
        Action::RemoveTax { id } => {
            state.taxes.retain(|tax| tax.id != id);
        }
        Action::UpdateTaxName { id, name } => {
            if let Some(tax) = state.taxes.iter_mut().find(|tax| tax.id == id) {
                tax.name = name;
            }
        }
        Action::UpdateTaxRate { id, rate } => {
            if let Some(tax) = state.taxes.iter_mut().find(|tax| tax.id == id) {
                tax.rate = rate;
            }
        }
        Action::SetDiscount(percent) => {
            state.discount_percent = percent;
        }
    }
    state
}
