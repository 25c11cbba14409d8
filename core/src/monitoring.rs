//! Inventory monitoring panel: summary tiles, per-store charts and
//! low-stock alerts.

use crate::{
    metrics::{round_half_up, MetricsEngine, StoreValue},
    record::InventoryRecord,
    types::{ProductId, StoreId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products:    usize,
    /// Rounded to whole units for display.
    pub avg_stock_level:   i64,
    pub low_stock_items:   usize,
    pub stockout_risk:     usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub product_id:    ProductId,
    pub store_id:      StoreId,
    pub current_stock: i64,
    pub reorder_point: i64,
    pub lead_time:     i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedShare {
    pub name:  String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryPanel {
    pub summary:               InventorySummary,
    pub stock_levels_by_store: Vec<StoreValue>,
    pub stockout_frequency:    Vec<StoreValue>,
    pub lead_time_by_store:    Vec<StoreValue>,
    pub inventory_health:      Vec<NamedShare>,
    pub low_stock_alerts:      Vec<LowStockAlert>,
}

pub fn summary(engine: &MetricsEngine, inventory: &[InventoryRecord]) -> InventorySummary {
    InventorySummary {
        total_products:  inventory.len(),
        avg_stock_level: round_half_up(engine.average_stock_level(inventory)),
        low_stock_items: engine.low_stock_count(inventory),
        stockout_risk:   engine.stockout_risk_count(inventory),
    }
}

/// First `limit` records under their reorder point, in feed order.
pub fn low_stock_alerts(inventory: &[InventoryRecord], limit: usize) -> Vec<LowStockAlert> {
    inventory
        .iter()
        .filter(|r| r.is_below_reorder_point())
        .take(limit)
        .map(|r| LowStockAlert {
            product_id:    r.product_id.clone(),
            store_id:      r.store_id.clone(),
            current_stock: r.stock_levels,
            reorder_point: r.reorder_point,
            lead_time:     r.supplier_lead_time,
        })
        .collect()
}

/// Fixed health distribution shown in the donut chart.
pub fn inventory_health() -> Vec<NamedShare> {
    [("Optimal", 65), ("Low Stock", 20), ("Overstock", 10), ("Critical", 5)]
        .into_iter()
        .map(|(name, value)| NamedShare { name: name.into(), value })
        .collect()
}

pub fn inventory_panel(
    engine: &MetricsEngine,
    inventory: &[InventoryRecord],
    store_ids: &[StoreId],
    alert_limit: usize,
) -> InventoryPanel {
    InventoryPanel {
        summary:               summary(engine, inventory),
        stock_levels_by_store: engine.stock_levels_by_store(inventory, store_ids),
        stockout_frequency:    engine.stockout_frequency_by_store(inventory, store_ids),
        lead_time_by_store:    engine.lead_time_by_store(inventory, store_ids),
        inventory_health:      inventory_health(),
        low_stock_alerts:      low_stock_alerts(inventory, alert_limit),
    }
}
