//! Eligibility filter: which catalog discounts can apply to this cart at all.
//!
//! Pure read over the cart, the pre-fetched usage snapshot, and an explicit
//! `now`. Per-discount problems never raise; a discount that fails any check
//! simply drops out of the candidate set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    models::{Cart, Discount, DiscountKind, DiscountMethod},
    usage::UsageSnapshot,
};

/// Filters `discounts` down to the subset applicable to `cart` at `now`.
///
/// Preserves catalog order, which later fixes the ordering of stacked
/// buy-x-get-y entries in the result.
pub fn eligible_discounts<'a>(
    discounts: &'a [Discount],
    cart: &Cart,
    usage: &UsageSnapshot,
    now: DateTime<Utc>,
) -> Vec<&'a Discount> {
    let subtotal = cart.subtotal();
    discounts
        .iter()
        .filter(|discount| is_eligible(discount, cart, subtotal, usage, now))
        .collect()
}

fn is_eligible(
    discount: &Discount,
    cart: &Cart,
    subtotal: Decimal,
    usage: &UsageSnapshot,
    now: DateTime<Utc>,
) -> bool {
    if !discount.is_active || !discount.is_within_window(now) || !discount.is_well_formed() {
        return false;
    }

    if !code_matches(discount, cart) {
        return false;
    }

    if !discount
        .customer_selection
        .matches(cart.customer_id, &cart.customer_group_ids)
    {
        return false;
    }

    if let Some(minimum) = discount.min_order_amount {
        if subtotal < minimum {
            return false;
        }
    }

    if let Some(limit) = discount.usage_limit {
        if usage.total(discount.id) >= limit {
            return false;
        }
    }

    // Anonymous carts carry zero per-customer usage and are only ever
    // blocked by the total cap.
    if let Some(limit) = discount.usage_limit_per_customer {
        if cart.customer_id.is_some() && usage.for_customer(discount.id) >= limit {
            return false;
        }
    }

    match discount.kind {
        // A shipping discount needs something to ship.
        DiscountKind::Shipping { .. } => !cart.is_empty(),
        // The rest need value on the table.
        DiscountKind::Product { .. }
        | DiscountKind::Order { .. }
        | DiscountKind::BuyXGetY { .. } => {
            cart.lines.iter().any(|line| line.line_subtotal() > Decimal::ZERO)
        }
    }
}

/// Code-method discounts require the cart code to equal the configured code
/// exactly (case-sensitive). Automatic discounts always pass this axis.
fn code_matches(discount: &Discount, cart: &Cart) -> bool {
    match &discount.method {
        DiscountMethod::Automatic => true,
        DiscountMethod::Code { code } => cart.discount_code.as_deref() == Some(code.as_str()),
    }
}
