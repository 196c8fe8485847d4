//! Competitive selector: one winner per discount class.
//!
//! Product, order, and shipping discounts never stack within their class;
//! the candidate with the greatest standalone benefit wins. Buy-x-get-y
//! discounts bypass competition entirely and all apply.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::{
    models::{Cart, Discount, DiscountClass},
    services::allocation::discount_amount,
};

/// The winners of competitive selection, borrowed from the eligible set.
#[derive(Debug, Default)]
pub struct DiscountSelection<'a> {
    pub product: Option<&'a Discount>,
    pub order: Option<&'a Discount>,
    pub shipping: Option<&'a Discount>,
    /// All eligible buy-x-get-y discounts, in catalog order.
    pub buy_x_get_y: Vec<&'a Discount>,
}

/// Picks the best discount per class from the eligible set.
///
/// Benefit is what the discount would yield applied alone: product and order
/// candidates are ranked against the pre-discount line subtotal, shipping
/// candidates against the cart's shipping amount.
pub fn select_best<'a>(eligible: &[&'a Discount], cart: &Cart) -> DiscountSelection<'a> {
    let subtotal = cart.subtotal();
    let mut selection = DiscountSelection::default();

    for &discount in eligible {
        match discount.class() {
            Some(class) => {
                let base = match class {
                    DiscountClass::Product | DiscountClass::Order => subtotal,
                    DiscountClass::Shipping => cart.shipping_amount,
                };
                let slot = match class {
                    DiscountClass::Product => &mut selection.product,
                    DiscountClass::Order => &mut selection.order,
                    DiscountClass::Shipping => &mut selection.shipping,
                };
                let benefit = standalone_benefit(discount, base);

                let wins = match *slot {
                    None => true,
                    Some(incumbent) => {
                        outranks(discount, benefit, incumbent, standalone_benefit(incumbent, base))
                    }
                };
                if wins {
                    *slot = Some(discount);
                }
            }
            None => selection.buy_x_get_y.push(discount),
        }
    }

    selection
}

/// Benefit the discount would yield applied alone to `base`.
fn standalone_benefit(discount: &Discount, base: Decimal) -> Decimal {
    discount
        .kind
        .value()
        .map(|value| discount_amount(value, discount.max_discount_amount, base))
        .unwrap_or(Decimal::ZERO)
}

/// Total order over competing candidates: greater benefit wins, then lower
/// priority value, then lower id. An explicit, tested contract rather than a
/// stable-sort accident.
fn outranks(
    candidate: &Discount,
    candidate_benefit: Decimal,
    incumbent: &Discount,
    incumbent_benefit: Decimal,
) -> bool {
    match candidate_benefit.cmp(&incumbent_benefit) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match candidate.priority.cmp(&incumbent.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => candidate.id < incumbent.id,
        },
    }
}
