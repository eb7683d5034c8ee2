//! Invoices, payments, and overdue reminders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;

use super::totals::{LineItem, Totals};

/// Invoice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared; not yet payable.
    #[default]
    Draft,
    /// Sent to the client and awaiting payment.
    Sent,
    /// Some payment received.
    PartiallyPaid,
    /// Settled in full.
    Paid,
    /// Withdrawn.
    Cancelled,
}

/// A payment recorded against an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Amount received.
    pub amount: f64,
    /// Date the payment arrived.
    pub paid_on: NaiveDate,
    /// Bank or cheque reference.
    #[serde(default)]
    pub reference: Option<String>,
}

/// A bill sent to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique id.
    pub id: Uuid,
    /// Human-facing number, e.g. `INV-2024-100`.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Billed lines.
    pub items: Vec<LineItem>,
    /// Status.
    pub status: InvoiceStatus,
    /// Payment deadline.
    pub due_date: NaiveDate,
    /// Payments received so far.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// When the last reminder went out.
    #[serde(default)]
    pub last_reminder_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Start a draft invoice.
    pub fn new(
        number: &str,
        client: &str,
        items: Vec<LineItem>,
        due_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.to_string(),
            client: client.to_string(),
            items,
            status: InvoiceStatus::Draft,
            due_date,
            payments: Vec::new(),
            last_reminder_at: None,
            created_at: now,
        }
    }

    /// Totals over the invoice's items. Fails on an invalid item.
    pub fn totals(&self) -> AppResult<Totals> {
        Totals::checked_from_items(&self.items)
    }

    /// Sum of recorded payments.
    pub fn amount_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Remaining amount, never below zero.
    pub fn balance_due(&self) -> AppResult<f64> {
        Ok((self.totals()?.total - self.amount_paid()).max(0.0))
    }

    /// Record a payment and move the status accordingly.
    ///
    /// Only sent or partially paid invoices accept payments.
    pub fn record_payment(&mut self, payment: Payment) -> AppResult<()> {
        match self.status {
            InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid => {}
            InvoiceStatus::Draft => {
                return Err(AppError::conflict("Cannot pay an invoice that has not been sent"));
            }
            InvoiceStatus::Paid => {
                return Err(AppError::conflict("Invoice is already paid"));
            }
            InvoiceStatus::Cancelled => {
                return Err(AppError::conflict("Cannot pay a cancelled invoice"));
            }
        }
        if !payment.amount.is_finite() || payment.amount <= 0.0 {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        let total = self.totals()?.total;
        self.payments.push(payment);
        // Sub-cent remainders count as settled.
        let balance = (total - self.amount_paid()).max(0.0);
        self.status = if balance < 0.005 {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::PartiallyPaid
        };
        Ok(())
    }

    /// Outstanding and past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(
            self.status,
            InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid
        ) && today > self.due_date
    }

    /// Overdue and no reminder within the last `interval_days`.
    pub fn needs_reminder(&self, now: DateTime<Utc>, interval_days: i64) -> bool {
        if !self.is_overdue(now.date_naive()) {
            return false;
        }
        match self.last_reminder_at {
            Some(last) => (now - last).num_days() >= interval_days,
            None => true,
        }
    }
}
