//! Headline counts behind the recommendations panel.

use crate::{
    config::DashboardConfig,
    record::{InventoryRecord, PricingRecord},
    types::StoreId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryInsights {
    pub low_stock_items:      usize,
    /// Distinct stores, first-seen order.
    pub high_stockout_stores: Vec<StoreId>,
    pub long_lead_time_items: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingInsights {
    pub high_elasticity_products:   usize,
    pub low_elasticity_products:    usize,
    /// Our price more than the configured gap above the competitor's.
    pub competitive_price_products: usize,
}

pub fn inventory_insights(config: &DashboardConfig, inventory: &[InventoryRecord]) -> InventoryInsights {
    let mut high_stockout_stores: Vec<StoreId> = Vec::new();
    for r in inventory {
        if r.stockout_frequency > config.high_stockout_store_threshold
            && !high_stockout_stores.contains(&r.store_id)
        {
            high_stockout_stores.push(r.store_id.clone());
        }
    }

    InventoryInsights {
        low_stock_items: inventory.iter().filter(|r| r.is_below_reorder_point()).count(),
        high_stockout_stores,
        long_lead_time_items: inventory
            .iter()
            .filter(|r| r.supplier_lead_time > config.long_lead_time_days)
            .count(),
    }
}

pub fn pricing_insights(config: &DashboardConfig, pricing: &[PricingRecord]) -> PricingInsights {
    PricingInsights {
        high_elasticity_products: pricing
            .iter()
            .filter(|r| r.elasticity > config.high_elasticity)
            .count(),
        low_elasticity_products: pricing
            .iter()
            .filter(|r| r.elasticity < config.low_elasticity)
            .count(),
        competitive_price_products: pricing
            .iter()
            .filter(|r| r.price > r.competitor_price * config.competitor_gap_ratio)
            .count(),
    }
}
