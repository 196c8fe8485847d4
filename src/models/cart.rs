use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Custom validator for non-negative decimal values
fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must be non-negative"))
    }
}

/// A single line in the cart: one product variant at one unit price.
///
/// Invariants enforced by [`Cart::validate`]: `quantity >= 1`,
/// `unit_price >= 0`. Violations are contract errors and fail the whole
/// calculation before any discount work begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CartLine {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    #[validate(custom = "validate_non_negative_decimal")]
    pub unit_price: Decimal,

    /// Original/compare-at price, for strikethrough display only.
    pub compare_at_price: Option<Decimal>,

    pub name: String,
}

impl CartLine {
    /// Line subtotal: unit price × quantity, before any discount.
    pub fn line_subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart snapshot being priced.
///
/// Immutable for the duration of one calculation. The engine never mutates
/// the cart; discounted amounts live only in the resulting
/// [`PricingResult`](crate::models::PricingResult).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Cart {
    #[validate]
    pub lines: Vec<CartLine>,

    #[validate(custom = "validate_non_negative_decimal")]
    pub shipping_amount: Decimal,

    pub customer_id: Option<Uuid>,

    /// Groups the customer belongs to; empty when anonymous.
    pub customer_group_ids: Vec<Uuid>,

    /// Discount code entered at checkout, if any.
    pub discount_code: Option<String>,
}

impl Cart {
    /// Pre-discount subtotal: sum of all line subtotals.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_subtotal).sum()
    }

    /// Total unit count across all lines.
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
