//! Pricing aggregator: orchestrates filter, selection, and allocation into a
//! final [`PricingResult`] with the non-negativity invariant enforced.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    catalog::DiscountCatalog,
    errors::ServiceError,
    models::{
        AppliedDiscount, AppliedDiscountClass, Cart, Discount, DiscountKind, LineBreakdown,
        PricingResult,
    },
    services::{
        allocation::{allocate_buy_x_get_y, discount_amount},
        eligibility::eligible_discounts,
        selection::select_best,
    },
    usage::{UsageReader, UsageSnapshot},
};

/// Cart pricing service: the engine's public façade.
///
/// Generic over the two collaborators so callers can plug in their own
/// catalog and usage-counter backends. Holds no per-calculation state; one
/// instance may serve concurrent calculations.
#[derive(Debug, Clone)]
pub struct PricingService<C, U> {
    catalog: Arc<C>,
    usage: Arc<U>,
}

impl<C, U> PricingService<C, U>
where
    C: DiscountCatalog,
    U: UsageReader,
{
    pub fn new(catalog: Arc<C>, usage: Arc<U>) -> Self {
        Self { catalog, usage }
    }

    /// Prices a cart against the shop's discount catalog.
    ///
    /// Validates the cart, reads the catalog and one usage-counter snapshot,
    /// then runs the pure pipeline. The clock is an explicit input so
    /// results are reproducible.
    ///
    /// # Errors
    ///
    /// * `ServiceError::ValidationError` - cart violates its contract
    ///   (non-positive quantity, negative price or shipping)
    /// * Collaborator errors from the catalog or usage reader
    #[instrument(skip(self, cart), fields(lines = cart.lines.len()))]
    pub async fn calculate(
        &self,
        shop_id: Uuid,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Result<PricingResult, ServiceError> {
        cart.validate()?;

        let discounts = self.catalog.active_discounts_for_shop(shop_id).await?;
        let snapshot = UsageSnapshot::load(self.usage.as_ref(), &discounts, cart.customer_id).await?;

        let result = calculate_with(&discounts, &snapshot, cart, now)?;

        debug!(
            "Priced cart for shop {}: subtotal={}, discounts={}, total={}, applied={}",
            shop_id,
            result.subtotal,
            result.total_discounts,
            result.total,
            result.applied_discounts.len()
        );

        Ok(result)
    }
}

/// The pure pricing pipeline over an already-materialized catalog and usage
/// snapshot. Deterministic: identical inputs yield identical results.
pub fn calculate_with(
    discounts: &[Discount],
    usage: &UsageSnapshot,
    cart: &Cart,
    now: DateTime<Utc>,
) -> Result<PricingResult, ServiceError> {
    cart.validate()?;

    let subtotal = cart.subtotal();
    let eligible = eligible_discounts(discounts, cart, usage, now);
    let selection = select_best(&eligible, cart);

    let mut applied = Vec::new();

    // Product class against the raw subtotal.
    let mut product_class_amount = Decimal::ZERO;
    if let Some(discount) = selection.product {
        let amount = class_amount(discount, subtotal);
        if amount > Decimal::ZERO {
            product_class_amount = amount;
            applied.push(applied_entry(discount, AppliedDiscountClass::Product, amount));
        }
    }

    // Buy-x-get-y rules against the original line multiset; they stack with
    // each other and with the product-class pick.
    let mut bxgy_total = Decimal::ZERO;
    let mut per_line = vec![Decimal::ZERO; cart.lines.len()];
    for discount in &selection.buy_x_get_y {
        if let DiscountKind::BuyXGetY {
            buy_quantity,
            get_quantity,
        } = discount.kind
        {
            let allocation = allocate_buy_x_get_y(&cart.lines, buy_quantity, get_quantity);
            if allocation.amount > Decimal::ZERO {
                bxgy_total += allocation.amount;
                for (slot, amount) in per_line.iter_mut().zip(allocation.per_line) {
                    *slot += amount;
                }
                applied.push(applied_entry(
                    discount,
                    AppliedDiscountClass::BuyXGetY,
                    allocation.amount,
                ));
            }
        }
    }

    // Order class against the subtotal net of the product-class pick.
    let intermediate = (subtotal - product_class_amount).max(Decimal::ZERO);
    let mut order_total = Decimal::ZERO;
    if let Some(discount) = selection.order {
        let amount = class_amount(discount, intermediate);
        if amount > Decimal::ZERO {
            order_total = amount;
            applied.push(applied_entry(discount, AppliedDiscountClass::Order, amount));
        }
    }

    // Shipping class, independent of the goods outcome.
    let mut shipping_total = Decimal::ZERO;
    if let Some(discount) = selection.shipping {
        let amount = class_amount(discount, cart.shipping_amount);
        if amount > Decimal::ZERO {
            shipping_total = amount;
            applied.push(applied_entry(
                discount,
                AppliedDiscountClass::Shipping,
                amount,
            ));
        }
    }

    let product_total = product_class_amount + bxgy_total;
    let goods_total = (subtotal - product_total - order_total).max(Decimal::ZERO);
    let shipping_after = (cart.shipping_amount - shipping_total).max(Decimal::ZERO);

    let line_breakdown = cart
        .lines
        .iter()
        .zip(&per_line)
        .map(|(line, line_discount)| {
            let line_subtotal = line.line_subtotal();
            LineBreakdown {
                product_id: line.product_id,
                variant_id: line.variant_id,
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_subtotal,
                discount_amount: *line_discount,
                line_total: (line_subtotal - *line_discount).max(Decimal::ZERO),
            }
        })
        .collect();

    Ok(PricingResult {
        subtotal,
        product_discount_total: product_total,
        order_discount_total: order_total,
        shipping_discount_total: shipping_total,
        total_discounts: product_total + order_total + shipping_total,
        shipping_amount: shipping_after,
        total: goods_total + shipping_after,
        applied_discounts: applied,
        line_breakdown,
    })
}

fn class_amount(discount: &Discount, base: Decimal) -> Decimal {
    discount
        .kind
        .value()
        .map(|value| discount_amount(value, discount.max_discount_amount, base))
        .unwrap_or(Decimal::ZERO)
}

fn applied_entry(
    discount: &Discount,
    class: AppliedDiscountClass,
    amount: Decimal,
) -> AppliedDiscount {
    AppliedDiscount {
        discount_id: discount.id,
        name: discount.name.clone(),
        class,
        amount,
    }
}
