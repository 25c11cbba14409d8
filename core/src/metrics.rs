//! Deterministic aggregates over the loaded record sets.
//!
//! RULE: every ratio guards its denominator. An empty set, a zero
//! average or zero revenue yields 0, never NaN or infinity.
//! Sums accumulate in f64 so oversized cells cannot overflow.
//! Nothing in this module draws randomness.

use crate::{
    config::DashboardConfig,
    record::{InventoryRecord, PricingRecord},
    types::StoreId,
};
use serde::{Deserialize, Serialize};

/// Round half toward positive infinity, the way the dashboard rounds
/// every displayed mean.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total / n as f64
    }
}

/// One bar of a per-store chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreValue {
    pub name:  String,
    pub value: i64,
}

pub fn store_label(store_id: &str) -> String {
    format!("Store {store_id}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub inventory_turnover:    f64,
    pub stockout_rate:         f64,
    pub holding_cost:          f64,
    pub sales_growth:          f64,
    pub profit_margin:         f64,
    /// 20 × mean reviews. Not clamped, so it can exceed 100.
    pub customer_satisfaction: f64,
}

/// Aggregate calculator parameterised by the dashboard assumptions.
#[derive(Debug, Clone, Copy)]
pub struct MetricsEngine {
    cost_ratio:              f64,
    stockout_risk_threshold: i64,
    satisfaction_scale:      f64,
    simulated_sales_growth:  f64,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl MetricsEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cost_ratio:              config.cost_ratio,
            stockout_risk_threshold: config.stockout_risk_threshold,
            satisfaction_scale:      config.satisfaction_scale,
            simulated_sales_growth:  config.simulated_sales_growth,
        }
    }

    // ── Inventory aggregates ───────────────────────────────────────

    pub fn average_stock_level(&self, inventory: &[InventoryRecord]) -> f64 {
        let total: f64 = inventory.iter().map(|r| r.stock_levels as f64).sum();
        mean(total, inventory.len())
    }

    pub fn low_stock_count(&self, inventory: &[InventoryRecord]) -> usize {
        inventory.iter().filter(|r| r.is_below_reorder_point()).count()
    }

    pub fn stockout_risk_count(&self, inventory: &[InventoryRecord]) -> usize {
        inventory
            .iter()
            .filter(|r| r.stockout_frequency > self.stockout_risk_threshold)
            .count()
    }

    /// Percentage of records with at least one stockout.
    pub fn stockout_rate(&self, inventory: &[InventoryRecord]) -> f64 {
        let hit = inventory.iter().filter(|r| r.stockout_frequency > 0).count();
        100.0 * mean(hit as f64, inventory.len())
    }

    // ── Pricing aggregates ─────────────────────────────────────────

    pub fn average_holding_cost(&self, pricing: &[PricingRecord]) -> f64 {
        let total: f64 = pricing.iter().map(|r| r.storage_cost).sum();
        mean(total, pricing.len())
    }

    /// Total units sold over the average units held.
    pub fn inventory_turnover(&self, inventory: &[InventoryRecord], pricing: &[PricingRecord]) -> f64 {
        let total_sales: f64 = pricing.iter().map(|r| r.sales_volume as f64).sum();
        let avg_stock = self.average_stock_level(inventory);
        let divisor = if avg_stock == 0.0 { 1.0 } else { avg_stock };
        total_sales / divisor
    }

    /// Margin % after assumed cost of goods and storage.
    pub fn profit_margin(&self, pricing: &[PricingRecord]) -> f64 {
        let revenue: f64 = pricing.iter().map(PricingRecord::revenue).sum();
        let cost: f64 = pricing
            .iter()
            .map(|r| r.price * self.cost_ratio * r.sales_volume as f64 + r.storage_cost)
            .sum();
        if revenue == 0.0 {
            return 0.0;
        }
        100.0 * (revenue - cost) / revenue
    }

    pub fn customer_satisfaction(&self, pricing: &[PricingRecord]) -> f64 {
        let reviews: f64 = pricing.iter().map(|r| r.customer_reviews as f64).sum();
        self.satisfaction_scale * mean(reviews, pricing.len())
    }

    /// The key metrics panel. All zeros until both feeds have data.
    pub fn key_metrics(&self, inventory: &[InventoryRecord], pricing: &[PricingRecord]) -> KeyMetrics {
        if inventory.is_empty() || pricing.is_empty() {
            return KeyMetrics::default();
        }

        let metrics = KeyMetrics {
            inventory_turnover:    self.inventory_turnover(inventory, pricing),
            stockout_rate:         self.stockout_rate(inventory),
            holding_cost:          self.average_holding_cost(pricing),
            sales_growth:          self.simulated_sales_growth,
            profit_margin:         self.profit_margin(pricing),
            customer_satisfaction: self.customer_satisfaction(pricing),
        };
        log::debug!(
            "metrics: turnover={:.2} stockout_rate={:.1}% margin={:.1}%",
            metrics.inventory_turnover,
            metrics.stockout_rate,
            metrics.profit_margin
        );
        metrics
    }

    // ── Per-store tables ───────────────────────────────────────────

    pub fn stock_levels_by_store(&self, inventory: &[InventoryRecord], store_ids: &[StoreId]) -> Vec<StoreValue> {
        mean_by_store(inventory, store_ids, |r| r.stock_levels)
    }

    pub fn stockout_frequency_by_store(&self, inventory: &[InventoryRecord], store_ids: &[StoreId]) -> Vec<StoreValue> {
        mean_by_store(inventory, store_ids, |r| r.stockout_frequency)
    }

    pub fn lead_time_by_store(&self, inventory: &[InventoryRecord], store_ids: &[StoreId]) -> Vec<StoreValue> {
        mean_by_store(inventory, store_ids, |r| r.supplier_lead_time)
    }
}

/// Rounded per-store mean of one field, one row per id in `store_ids`
/// order. A store with no records reports 0.
fn mean_by_store<F>(inventory: &[InventoryRecord], store_ids: &[StoreId], field: F) -> Vec<StoreValue>
where
    F: Fn(&InventoryRecord) -> i64,
{
    store_ids
        .iter()
        .map(|store_id| {
            let (total, n) = inventory
                .iter()
                .filter(|r| &r.store_id == store_id)
                .fold((0.0f64, 0usize), |(t, n), r| (t + field(r) as f64, n + 1));
            StoreValue {
                name:  store_label(store_id),
                value: if n == 0 { 0 } else { round_half_up(mean(total, n)) },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_up_matches_dashboard_rounding() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(10.0, 0), 0.0);
        assert_eq!(mean(10.0, 4), 2.5);
    }
}
