//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use chrono::Utc;
use pricing_engine::{
    Cart, CartLine, CustomerSelection, Discount, DiscountKind, DiscountMethod, DiscountValue,
};
use rust_decimal::Decimal;
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Installs a test subscriber once so `RUST_LOG` surfaces engine events.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Single line with the given quantity and unit price.
pub fn cart_line(quantity: i32, unit_price: Decimal) -> CartLine {
    CartLine {
        product_id: Uuid::new_v4(),
        variant_id: None,
        quantity,
        unit_price,
        compare_at_price: None,
        name: format!("Product {}", &Uuid::new_v4().to_string()[..8]),
    }
}

/// Anonymous cart with the given lines and shipping amount.
pub fn cart(lines: Vec<CartLine>, shipping_amount: Decimal) -> Cart {
    Cart {
        lines,
        shipping_amount,
        customer_id: None,
        customer_group_ids: vec![],
        discount_code: None,
    }
}

/// One-line cart whose subtotal equals `amount`.
pub fn cart_with_subtotal(amount: Decimal, shipping_amount: Decimal) -> Cart {
    cart(vec![cart_line(1, amount)], shipping_amount)
}

/// Active, automatic, untargeted, unlimited discount of the given kind.
pub fn discount(shop_id: Uuid, name: &str, kind: DiscountKind) -> Discount {
    Discount {
        id: Uuid::new_v4(),
        shop_id,
        name: name.to_string(),
        method: DiscountMethod::Automatic,
        kind,
        priority: 0,
        is_active: true,
        starts_at: None,
        ends_at: None,
        customer_selection: CustomerSelection::All,
        min_order_amount: None,
        max_discount_amount: None,
        usage_limit: None,
        usage_limit_per_customer: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Code-method variant of [`discount`].
pub fn code_discount(shop_id: Uuid, name: &str, code: &str, kind: DiscountKind) -> Discount {
    let mut d = discount(shop_id, name, kind);
    d.method = DiscountMethod::Code {
        code: code.to_string(),
    };
    d
}

pub fn percentage(value: Decimal) -> DiscountValue {
    DiscountValue::Percentage(value)
}

pub fn fixed(value: Decimal) -> DiscountValue {
    DiscountValue::FixedAmount(value)
}
