//! Line items and total calculation.

use serde::{Deserialize, Serialize};

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;

/// Tax rate applied uniformly to every financial document.
pub const TAX_RATE: f64 = 0.10;

/// One priced line of a quotation, purchase order, or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// What is being supplied.
    #[serde(default)]
    pub description: String,
    /// Quantity.
    pub quantity: f64,
    /// Price per unit.
    pub unit_price: f64,
}

impl LineItem {
    /// Create a line item.
    pub fn new(description: &str, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.to_string(),
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`.
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Reject negative or non-finite quantities and prices.
    pub fn validate(&self) -> AppResult<()> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(AppError::validation(format!(
                "Invalid quantity for '{}'",
                self.description
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(AppError::validation(format!(
                "Invalid unit price for '{}'",
                self.description
            )));
        }
        Ok(())
    }
}

/// Subtotal, tax, and grand total of a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line amounts.
    pub subtotal: f64,
    /// `subtotal * TAX_RATE`.
    pub tax: f64,
    /// `subtotal + tax`.
    pub total: f64,
}

impl Totals {
    /// Compute totals without validating the items.
    fn from_items(items: &[LineItem]) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::amount).sum();
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Validate every item, then compute totals.
    pub fn checked_from_items(items: &[LineItem]) -> AppResult<Self> {
        for item in items {
            item.validate()?;
        }
        Ok(Self::from_items(items))
    }
}

/// Validate `items` and compute their totals.
pub fn calculate_totals(items: &[LineItem]) -> AppResult<Totals> {
    Totals::checked_from_items(items)
}

/// Format an amount with two decimals for display.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quotation_example() {
        let items = [
            LineItem::new("Concrete pump hire", 2.0, 100.0),
            LineItem::new("Site survey", 1.0, 50.0),
        ];
        let totals = Totals::from_items(&items);
        assert!(close(totals.subtotal, 250.0));
        assert!(close(totals.tax, 25.0));
        assert!(close(totals.total, 275.0));
        assert_eq!(format_amount(totals.total), "275.00");
    }

    #[test]
    fn test_empty_items() {
        let totals = Totals::from_items(&[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_negative_values_rejected() {
        let items = [LineItem::new("Credit", -1.0, 10.0)];
        assert!(calculate_totals(&items).is_err());

        let items = [LineItem::new("Bad price", 1.0, f64::NAN)];
        assert!(calculate_totals(&items).is_err());
    }

    #[test]
    fn test_format_amount_rounds_for_display() {
        assert_eq!(format_amount(10.005_1), "10.01");
        assert_eq!(format_amount(3.0), "3.00");
    }
}
