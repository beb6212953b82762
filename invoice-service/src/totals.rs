//! Derived invoice totals.
//!
//! All monetary math runs on [`Decimal`]; rounding to two places happens
//! only at presentation via [`round_display`], never while accumulating.

use crate::models::LineItemInput;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Aggregate amounts derived from the line items and invoice flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Pure function of the item set and invoice flags. Hidden blocks
/// contribute nothing: a populated shipping cost with `show_shipping`
/// off adds zero, and likewise for the discount.
pub fn compute_totals(
    items: &[LineItemInput],
    discount_percent: Decimal,
    shipping_cost: Decimal,
    show_discount: bool,
    show_shipping: bool,
) -> InvoiceTotals {
    let mut subtotal = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;

    for item in items {
        let line_amount = item.quantity * item.unit_price;
        subtotal += line_amount;
        tax_total += line_amount * item.tax_rate / Decimal::ONE_HUNDRED;
    }

    let discount = if show_discount {
        subtotal * discount_percent / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let shipping = if show_shipping {
        shipping_cost
    } else {
        Decimal::ZERO
    };

    InvoiceTotals {
        subtotal,
        tax_total,
        discount,
        shipping,
        total: subtotal - discount + tax_total + shipping,
    }
}

/// Two-decimal presentation rounding.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
