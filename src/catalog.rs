//! Discount catalog access: "the active discounts for shop X".
//!
//! Definitions are owned by the admin surface and its persistence layer;
//! this engine consumes them as a read-only snapshot per calculation.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{errors::ServiceError, models::Discount};

/// Read access to a shop's discount definitions.
#[async_trait]
pub trait DiscountCatalog: Send + Sync {
    /// All discount definitions configured for a shop. Pre-filtering by
    /// activity or window is allowed but not required — the eligibility
    /// filter re-checks both.
    async fn active_discounts_for_shop(
        &self,
        shop_id: Uuid,
    ) -> Result<Vec<Discount>, ServiceError>;
}

/// In-memory catalog for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryDiscountCatalog {
    discounts: DashMap<Uuid, Vec<Discount>>,
}

impl InMemoryDiscountCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, discount: Discount) {
        self.discounts
            .entry(discount.shop_id)
            .or_default()
            .push(discount);
    }
}

#[async_trait]
impl DiscountCatalog for InMemoryDiscountCatalog {
    async fn active_discounts_for_shop(
        &self,
        shop_id: Uuid,
    ) -> Result<Vec<Discount>, ServiceError> {
        Ok(self
            .discounts
            .get(&shop_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }
}
