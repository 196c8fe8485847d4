//! Discount arithmetic: percentage/fixed application with capping and cent
//! rounding, and the buy-x-get-y cheapest-unit allocation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CartLine, DiscountValue};

/// Rounds a computed discount amount to a cent value.
fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Monetary amount a percentage/fixed/free-shipping discount takes off a
/// base amount.
///
/// The result is capped at `max_cap` (when set), clamped to `[0, base]`, and
/// rounded to cents. A non-positive base always yields zero.
pub fn discount_amount(
    value: &DiscountValue,
    max_cap: Option<Decimal>,
    base: Decimal,
) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let raw = match value {
        DiscountValue::Percentage(pct) => base * *pct / Decimal::ONE_HUNDRED,
        DiscountValue::FixedAmount(amount) => *amount,
        DiscountValue::FreeShipping => base,
    };

    let capped = match max_cap {
        Some(cap) => raw.min(cap),
        None => raw,
    };

    round_to_cents(capped.clamp(Decimal::ZERO, base)).min(base)
}

/// Result of one buy-x-get-y allocation over the cart's unit multiset.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyXGetYAllocation {
    /// Total value of the free units.
    pub amount: Decimal,
    /// Discount attributed to each cart line, parallel to the input slice.
    pub per_line: Vec<Decimal>,
}

/// Allocates free units for a buy-x-get-y rule.
///
/// The cart expands into one entry per unit of quantity, sorted ascending by
/// unit price. Every complete group of `buy + get` units makes the `get`
/// cheapest units free, so the `floor(units / (buy + get)) * get` cheapest
/// units of the whole multiset are the ones discounted. Leftover units that
/// do not complete a group earn nothing.
pub fn allocate_buy_x_get_y(
    lines: &[CartLine],
    buy_quantity: u32,
    get_quantity: u32,
) -> BuyXGetYAllocation {
    let mut per_line = vec![Decimal::ZERO; lines.len()];
    let group_size = buy_quantity as u64 + get_quantity as u64;

    if group_size == 0 {
        return BuyXGetYAllocation {
            amount: Decimal::ZERO,
            per_line,
        };
    }

    let total_units: u64 = lines.iter().map(|line| line.quantity.max(0) as u64).sum();
    let free_units = (total_units / group_size) * get_quantity as u64;
    if free_units == 0 {
        return BuyXGetYAllocation {
            amount: Decimal::ZERO,
            per_line,
        };
    }

    let mut units: Vec<(Decimal, usize)> = Vec::with_capacity(total_units as usize);
    for (index, line) in lines.iter().enumerate() {
        for _ in 0..line.quantity.max(0) {
            units.push((line.unit_price, index));
        }
    }
    // Line index as secondary key keeps equal-priced units deterministic.
    units.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    for &(price, index) in units.iter().take(free_units as usize) {
        per_line[index] += price;
    }

    let per_line: Vec<Decimal> = per_line.into_iter().map(round_to_cents).collect();
    let amount = per_line.iter().copied().sum();

    BuyXGetYAllocation { amount, per_line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;
    use uuid::Uuid;

    fn line(quantity: i32, unit_price: Decimal) -> CartLine {
        CartLine {
            product_id: Uuid::new_v4(),
            variant_id: None,
            quantity,
            unit_price,
            compare_at_price: None,
            name: "Unit".to_string(),
        }
    }

    // ==================== Amount Arithmetic Tests ====================

    #[test_case(dec!(100.00), dec!(10), dec!(10.00) ; "ten percent of one hundred")]
    #[test_case(dec!(33.33), dec!(50), dec!(16.67) ; "half of odd amount rounds up")]
    #[test_case(dec!(100.00), dec!(0), dec!(0.00) ; "zero percent yields nothing")]
    #[test_case(dec!(100.00), dec!(100), dec!(100.00) ; "full percentage takes the base")]
    fn test_percentage_amount(base: Decimal, pct: Decimal, expected: Decimal) {
        assert_eq!(
            discount_amount(&DiscountValue::Percentage(pct), None, base),
            expected
        );
    }

    #[test]
    fn test_fixed_amount_caps_at_base() {
        assert_eq!(
            discount_amount(&DiscountValue::FixedAmount(dec!(50)), None, dec!(20.00)),
            dec!(20.00)
        );
    }

    #[test]
    fn test_fixed_amount_below_base_applies_fully() {
        assert_eq!(
            discount_amount(&DiscountValue::FixedAmount(dec!(15)), None, dec!(100.00)),
            dec!(15.00)
        );
    }

    #[test]
    fn test_free_shipping_takes_full_base() {
        assert_eq!(
            discount_amount(&DiscountValue::FreeShipping, None, dec!(10.00)),
            dec!(10.00)
        );
    }

    #[test]
    fn test_zero_base_yields_zero() {
        assert_eq!(
            discount_amount(&DiscountValue::Percentage(dec!(50)), None, Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_max_cap_limits_benefit() {
        assert_eq!(
            discount_amount(
                &DiscountValue::Percentage(dec!(50)),
                Some(dec!(20.00)),
                dec!(100.00)
            ),
            dec!(20.00)
        );
    }

    #[test]
    fn test_max_cap_above_benefit_is_inert() {
        assert_eq!(
            discount_amount(
                &DiscountValue::Percentage(dec!(10)),
                Some(dec!(50.00)),
                dec!(100.00)
            ),
            dec!(10.00)
        );
    }

    // ==================== Buy-X-Get-Y Tests ====================

    #[test]
    fn test_bxgy_cheapest_unit_goes_free() {
        let lines = vec![line(1, dec!(50)), line(1, dec!(30)), line(1, dec!(10))];
        let allocation = allocate_buy_x_get_y(&lines, 2, 1);

        assert_eq!(allocation.amount, dec!(10.00));
        assert_eq!(
            allocation.per_line,
            vec![Decimal::ZERO, Decimal::ZERO, dec!(10.00)]
        );
    }

    #[test]
    fn test_bxgy_incomplete_group_earns_nothing() {
        let lines = vec![line(1, dec!(50)), line(1, dec!(30))];
        let allocation = allocate_buy_x_get_y(&lines, 2, 1);

        assert_eq!(allocation.amount, Decimal::ZERO);
    }

    #[test]
    fn test_bxgy_multiple_groups_scale_linearly() {
        // 7 units at uniform price, buy 2 get 1: two complete groups, one
        // leftover unit.
        let lines = vec![line(7, dec!(5.00))];
        let allocation = allocate_buy_x_get_y(&lines, 2, 1);

        assert_eq!(allocation.amount, dec!(10.00));
        assert_eq!(allocation.per_line, vec![dec!(10.00)]);
    }

    #[test]
    fn test_bxgy_quantity_expansion_across_lines() {
        // 2 + 2 units, buy 3 get 1: one group, cheapest unit free.
        let lines = vec![line(2, dec!(8.00)), line(2, dec!(3.00))];
        let allocation = allocate_buy_x_get_y(&lines, 3, 1);

        assert_eq!(allocation.amount, dec!(3.00));
        assert_eq!(allocation.per_line, vec![Decimal::ZERO, dec!(3.00)]);
    }

    #[test]
    fn test_bxgy_get_two_frees_two_cheapest() {
        let lines = vec![
            line(1, dec!(40)),
            line(1, dec!(25)),
            line(1, dec!(15)),
            line(1, dec!(5)),
        ];
        let allocation = allocate_buy_x_get_y(&lines, 2, 2);

        assert_eq!(allocation.amount, dec!(20.00));
        assert_eq!(
            allocation.per_line,
            vec![Decimal::ZERO, Decimal::ZERO, dec!(15.00), dec!(5.00)]
        );
    }

    #[test]
    fn test_bxgy_empty_cart_earns_nothing() {
        let allocation = allocate_buy_x_get_y(&[], 2, 1);

        assert_eq!(allocation.amount, Decimal::ZERO);
        assert!(allocation.per_line.is_empty());
    }

    #[test]
    fn test_bxgy_never_exceeds_subtotal() {
        let lines = vec![line(4, dec!(2.50))];
        let allocation = allocate_buy_x_get_y(&lines, 1, 3);

        let subtotal: Decimal = lines.iter().map(CartLine::line_subtotal).sum();
        assert!(allocation.amount <= subtotal);
        assert_eq!(allocation.amount, dec!(7.50));
    }
}
