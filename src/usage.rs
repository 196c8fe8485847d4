//! Discount usage counters: the one piece of external state a calculation
//! reads. Counters are maintained by the order-completion workflow; this
//! engine only ever reads them.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{errors::ServiceError, models::Discount};

/// Read access to persisted discount-usage aggregates.
#[async_trait]
pub trait UsageReader: Send + Sync {
    /// Cumulative redemptions of a discount by one customer. A `None`
    /// customer always reads as zero — anonymous carts are never blocked by
    /// per-customer caps.
    async fn usage_count(
        &self,
        discount_id: Uuid,
        customer_id: Option<Uuid>,
    ) -> Result<i64, ServiceError>;

    /// Cumulative redemptions of a discount across all customers.
    async fn total_usage_count(&self, discount_id: Uuid) -> Result<i64, ServiceError>;
}

/// Usage counters materialized for one calculation.
///
/// The snapshot is read once before the pure pipeline runs, so eligibility
/// filtering stays deterministic and free of I/O. Counters are only fetched
/// for discounts that actually carry a limit.
#[derive(Debug, Clone, Default)]
pub struct UsageSnapshot {
    totals: HashMap<Uuid, i64>,
    customer: HashMap<Uuid, i64>,
}

impl UsageSnapshot {
    /// Reads counters for every limited discount in `discounts`, scoped to
    /// the given cart customer.
    pub async fn load<U>(
        reader: &U,
        discounts: &[Discount],
        customer_id: Option<Uuid>,
    ) -> Result<Self, ServiceError>
    where
        U: UsageReader + ?Sized,
    {
        let mut snapshot = UsageSnapshot::default();

        for discount in discounts {
            if discount.usage_limit.is_some() {
                let total = reader.total_usage_count(discount.id).await?;
                snapshot.totals.insert(discount.id, total);
            }
            if discount.usage_limit_per_customer.is_some() && customer_id.is_some() {
                let count = reader.usage_count(discount.id, customer_id).await?;
                snapshot.customer.insert(discount.id, count);
            }
        }

        Ok(snapshot)
    }

    /// Total redemptions recorded for a discount; zero when never read.
    pub fn total(&self, discount_id: Uuid) -> i64 {
        self.totals.get(&discount_id).copied().unwrap_or(0)
    }

    /// Redemptions by the cart's customer; zero when anonymous or never read.
    pub fn for_customer(&self, discount_id: Uuid) -> i64 {
        self.customer.get(&discount_id).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn with_counts(
        totals: HashMap<Uuid, i64>,
        customer: HashMap<Uuid, i64>,
    ) -> Self {
        Self { totals, customer }
    }
}

/// In-memory usage store for tests and embedded use.
///
/// Entries are sharded by `DashMap`, so concurrent calculations can share one
/// instance without external locking.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    totals: DashMap<Uuid, i64>,
    per_customer: DashMap<(Uuid, Uuid), i64>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one redemption. This is the order-completion side of the
    /// contract and is not part of the calculation path; callers own
    /// serializing it against their checkout flow.
    pub fn record_usage(&self, discount_id: Uuid, customer_id: Option<Uuid>) {
        *self.totals.entry(discount_id).or_insert(0) += 1;
        if let Some(customer) = customer_id {
            *self.per_customer.entry((discount_id, customer)).or_insert(0) += 1;
        }
    }
}

#[async_trait]
impl UsageReader for InMemoryUsageStore {
    async fn usage_count(
        &self,
        discount_id: Uuid,
        customer_id: Option<Uuid>,
    ) -> Result<i64, ServiceError> {
        let count = customer_id
            .and_then(|customer| {
                self.per_customer
                    .get(&(discount_id, customer))
                    .map(|entry| *entry)
            })
            .unwrap_or(0);
        Ok(count)
    }

    async fn total_usage_count(&self, discount_id: Uuid) -> Result<i64, ServiceError> {
        Ok(self.totals.get(&discount_id).map(|entry| *entry).unwrap_or(0))
    }
}
