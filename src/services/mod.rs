// Core calculation stages
pub mod allocation;
pub mod eligibility;
pub mod pricing;
pub mod selection;

// Re-export services for convenience
pub use allocation::{allocate_buy_x_get_y, discount_amount, BuyXGetYAllocation};
pub use eligibility::eligible_discounts;
pub use pricing::{calculate_with, PricingService};
pub use selection::{select_best, DiscountSelection};
