//! Data models for invoice-service.

pub mod customer;
pub mod draft;
pub mod invoice;
pub mod line_item;
pub mod product;
pub mod user;

pub use customer::{CreateCustomer, Customer, UpdateCustomer};
pub use draft::{normalize_due_date, DraftInvoice, DraftLineItem};
pub use invoice::{
    Currency, Invoice, InvoiceRecord, InvoiceStatus, ListInvoicesFilter, SaveInvoice,
    ShippingInfo, TaxLine,
};
pub use line_item::{LineItem, LineItemInput};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use user::{AuthUser, Claims, MaybeAuthUser};
