// Core models
pub mod cart;
pub mod discount;
pub mod pricing;

// Re-export models for convenience
pub use cart::{Cart, CartLine};
pub use discount::{
    CustomerSelection, Discount, DiscountClass, DiscountKind, DiscountMethod, DiscountValue,
};
pub use pricing::{AppliedDiscount, AppliedDiscountClass, LineBreakdown, PricingResult};
