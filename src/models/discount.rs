use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discount class: product, order, and shipping discounts are mutually
/// exclusive within their class for one calculation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DiscountClass {
    Product,
    Order,
    Shipping,
}

/// How a discount is redeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMethod {
    /// Applied automatically to every qualifying cart.
    Automatic,
    /// Requires the customer to enter the exact code at checkout.
    Code { code: String },
}

/// Monetary effect of a product/order/shipping discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "value_type", content = "value")]
pub enum DiscountValue {
    /// Percentage of the base amount, 0–100.
    Percentage(Decimal),
    /// Fixed currency amount, capped at the base amount on application.
    FixedAmount(Decimal),
    /// The full shipping amount. Only meaningful for shipping discounts.
    FreeShipping,
}

/// Which customers a discount targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSelection {
    All,
    /// Explicit customer ids.
    Customers(Vec<Uuid>),
    /// Customer-group ids; any overlap with the cart's groups qualifies.
    Groups(Vec<Uuid>),
}

impl CustomerSelection {
    /// Whether a cart identity satisfies this targeting rule.
    ///
    /// An anonymous cart (no customer id) can only satisfy `All`.
    pub fn matches(&self, customer_id: Option<Uuid>, group_ids: &[Uuid]) -> bool {
        match self {
            CustomerSelection::All => true,
            CustomerSelection::Customers(ids) => {
                customer_id.is_some_and(|id| ids.contains(&id))
            }
            CustomerSelection::Groups(ids) => {
                customer_id.is_some() && group_ids.iter().any(|g| ids.contains(g))
            }
        }
    }
}

/// The four discount types, each carrying only the fields relevant to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DiscountKind {
    Product { value: DiscountValue },
    Order { value: DiscountValue },
    Shipping { value: DiscountValue },
    BuyXGetY { buy_quantity: u32, get_quantity: u32 },
}

impl DiscountKind {
    /// The competitive class this kind belongs to, if any. Buy-x-get-y
    /// discounts stack independently and have no class.
    pub fn class(&self) -> Option<DiscountClass> {
        match self {
            DiscountKind::Product { .. } => Some(DiscountClass::Product),
            DiscountKind::Order { .. } => Some(DiscountClass::Order),
            DiscountKind::Shipping { .. } => Some(DiscountClass::Shipping),
            DiscountKind::BuyXGetY { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&DiscountValue> {
        match self {
            DiscountKind::Product { value }
            | DiscountKind::Order { value }
            | DiscountKind::Shipping { value } => Some(value),
            DiscountKind::BuyXGetY { .. } => None,
        }
    }
}

/// A discount definition read from the shop's catalog.
///
/// Snapshot value for one calculation; the engine never mutates it. Usage
/// counts live in the usage store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub method: DiscountMethod,
    #[serde(flatten)]
    pub kind: DiscountKind,
    /// Tie-break for competitive selection; lower sorts first.
    pub priority: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub customer_selection: CustomerSelection,
    /// Pre-discount subtotal the cart must reach before this discount applies.
    pub min_order_amount: Option<Decimal>,
    /// Cap on the computed benefit of percentage/fixed discounts.
    pub max_discount_amount: Option<Decimal>,
    /// Total redemptions allowed across all customers; `None` = unlimited.
    pub usage_limit: Option<i64>,
    /// Redemptions allowed per customer; `None` = unlimited.
    pub usage_limit_per_customer: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discount {
    /// Whether `now` falls inside the active window. Open-ended bounds are
    /// always satisfied on that side.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        let after_start = self.starts_at.map_or(true, |start| now >= start);
        let before_end = self.ends_at.map_or(true, |end| now <= end);
        after_start && before_end
    }

    pub fn class(&self) -> Option<DiscountClass> {
        self.kind.class()
    }

    pub fn is_buy_x_get_y(&self) -> bool {
        matches!(self.kind, DiscountKind::BuyXGetY { .. })
    }

    /// Configuration sanity check. A malformed discount is ineligible rather
    /// than an error, so calculation is always producible.
    pub fn is_well_formed(&self) -> bool {
        let value_ok = match &self.kind {
            DiscountKind::Product { value } | DiscountKind::Order { value } => match value {
                DiscountValue::Percentage(pct) => {
                    *pct >= Decimal::ZERO && *pct <= Decimal::from(100)
                }
                DiscountValue::FixedAmount(amount) => *amount >= Decimal::ZERO,
                // Free shipping makes no sense against a line subtotal.
                DiscountValue::FreeShipping => false,
            },
            DiscountKind::Shipping { value } => match value {
                DiscountValue::Percentage(pct) => {
                    *pct >= Decimal::ZERO && *pct <= Decimal::from(100)
                }
                DiscountValue::FixedAmount(amount) => *amount >= Decimal::ZERO,
                DiscountValue::FreeShipping => true,
            },
            DiscountKind::BuyXGetY {
                buy_quantity,
                get_quantity,
            } => *buy_quantity >= 1 && *get_quantity >= 1,
        };

        let limits_ok = self.min_order_amount.map_or(true, |m| m >= Decimal::ZERO)
            && self.max_discount_amount.map_or(true, |m| m >= Decimal::ZERO);

        value_ok && limits_ok
    }
}
