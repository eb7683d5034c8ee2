//! Purchase orders issued to suppliers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buildhub_core::result::AppResult;

use super::totals::{LineItem, Totals};

/// Purchase order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    Received,
    Cancelled,
}

/// An order for materials or services from a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique id.
    pub id: Uuid,
    /// Human-facing number, e.g. `PO-2024-017`.
    pub number: String,
    /// Supplier name.
    pub supplier: String,
    /// Ordered lines.
    pub items: Vec<LineItem>,
    /// Status.
    pub status: PurchaseOrderStatus,
    /// Expected delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Start a draft order.
    pub fn new(number: &str, supplier: &str, items: Vec<LineItem>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.to_string(),
            supplier: supplier.to_string(),
            items,
            status: PurchaseOrderStatus::Draft,
            delivery_date: None,
            created_at: now,
        }
    }

    /// Totals over the order's items. Fails on an invalid item.
    pub fn totals(&self) -> AppResult<Totals> {
        Totals::checked_from_items(&self.items)
    }

    /// Mark goods as received. Only ordered POs can be received.
    pub fn receive(&mut self) -> bool {
        if self.status == PurchaseOrderStatus::Ordered {
            self.status = PurchaseOrderStatus::Received;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_requires_ordered() {
        let mut po = PurchaseOrder::new(
            "PO-17",
            "Northside Timber",
            vec![LineItem::new("Pine studs", 40.0, 7.5)],
            Utc::now(),
        );
        assert!(!po.receive());
        po.status = PurchaseOrderStatus::Ordered;
        assert!(po.receive());
        assert_eq!(po.status, PurchaseOrderStatus::Received);
        assert!((po.totals().unwrap().subtotal - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_price_rejected() {
        let po = PurchaseOrder::new(
            "PO-18",
            "Northside Timber",
            vec![LineItem::new("Returned studs", 4.0, -7.5)],
            Utc::now(),
        );
        let err = po.totals().unwrap_err();
        assert!(err.is(buildhub_core::error::ErrorKind::Validation));
    }
}
