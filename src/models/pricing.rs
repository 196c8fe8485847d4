use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an applied discount landed in the result.
///
/// Buy-x-get-y amounts accumulate into `product_discount_total` but are
/// reported under their own label so receipts can distinguish them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppliedDiscountClass {
    Product,
    Order,
    Shipping,
    BuyXGetY,
}

/// One discount that actually reduced the cart, with the amount it took off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub discount_id: Uuid,
    pub name: String,
    pub class: AppliedDiscountClass,
    pub amount: Decimal,
}

/// Per-line receipt detail.
///
/// `discount_amount` carries only amounts attributable to a specific line
/// (buy-x-get-y free units); class-level discounts are reported in the
/// [`PricingResult`] totals, not prorated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakdown {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_subtotal: Decimal,
    pub discount_amount: Decimal,
    pub line_total: Decimal,
}

/// The outcome of pricing one cart against one discount catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Pre-discount sum of line subtotals.
    pub subtotal: Decimal,
    /// Product-class pick plus all buy-x-get-y amounts.
    pub product_discount_total: Decimal,
    pub order_discount_total: Decimal,
    pub shipping_discount_total: Decimal,
    /// Sum of the three discount totals.
    pub total_discounts: Decimal,
    /// Shipping after the shipping discount, floored at zero.
    pub shipping_amount: Decimal,
    /// Grand total, never negative.
    pub total: Decimal,
    /// Discounts actually applied, in application order: product,
    /// buy-x-get-y, order, shipping.
    pub applied_discounts: Vec<AppliedDiscount>,
    pub line_breakdown: Vec<LineBreakdown>,
}
