//! Pricing Engine Library
//!
//! This crate provides a deterministic cart pricing and discount resolution
//! engine: given a cart snapshot and a shop's discount catalog, it filters
//! the eligible discounts, competitively selects one winner per class
//! (product, order, shipping), allocates buy-x-get-y free units, and
//! aggregates a final total that is never negative.
//!
//! The engine is a library-level computation contract. Discount definitions
//! and usage counters live behind the [`catalog::DiscountCatalog`] and
//! [`usage::UsageReader`] traits; the current time is always an explicit
//! parameter. Everything after the two collaborator reads is pure and
//! synchronous.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod catalog;
pub mod errors;
pub mod models;
pub mod services;
pub mod usage;

// Re-exports for the common calculation path
pub use catalog::{DiscountCatalog, InMemoryDiscountCatalog};
pub use errors::ServiceError;
pub use models::{
    AppliedDiscount, AppliedDiscountClass, Cart, CartLine, CustomerSelection, Discount,
    DiscountClass, DiscountKind, DiscountMethod, DiscountValue, LineBreakdown, PricingResult,
};
pub use services::{calculate_with, PricingService};
pub use usage::{InMemoryUsageStore, UsageReader, UsageSnapshot};
