//! Financial documents: quotations, purchase orders, and invoices.
//!
//! All three share the same line-item arithmetic in [`totals`].

pub mod invoice;
pub mod purchase_order;
pub mod quotation;
pub mod totals;

pub use invoice::{Invoice, InvoiceStatus, Payment};
pub use purchase_order::{PurchaseOrder, PurchaseOrderStatus};
pub use quotation::{Quotation, QuotationStatus};
pub use totals::{LineItem, TAX_RATE, Totals, calculate_totals, format_amount};
