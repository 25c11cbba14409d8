//! Typed views over parsed records.
//!
//! RULE: numeric coercion happens here and only here. A cell that is
//! absent, empty, or unparsable reads as zero. Downstream code works
//! on plain numbers and never re-parses strings.

use crate::{
    parser::Record,
    types::{ProductId, StoreId},
};
use serde::{Deserialize, Serialize};

// ── Column names ───────────────────────────────────────────────────

pub const PRODUCT_ID:             &str = "Product ID";
pub const STORE_ID:               &str = "Store ID";

pub const STOCK_LEVELS:           &str = "Stock Levels";
pub const SUPPLIER_LEAD_TIME:     &str = "Supplier Lead Time (days)";
pub const STOCKOUT_FREQUENCY:     &str = "Stockout Frequency";
pub const REORDER_POINT:          &str = "Reorder Point";
pub const EXPIRY_DATE:            &str = "Expiry Date";
pub const WAREHOUSE_CAPACITY:     &str = "Warehouse Capacity";
pub const ORDER_FULFILLMENT_TIME: &str = "Order Fulfillment Time (days)";

pub const PRICE:                  &str = "Price";
pub const COMPETITOR_PRICES:      &str = "Competitor Prices";
pub const DISCOUNTS:              &str = "Discounts";
pub const SALES_VOLUME:           &str = "Sales Volume";
pub const CUSTOMER_REVIEWS:       &str = "Customer Reviews";
pub const RETURN_RATE:            &str = "Return Rate (%)";
pub const STORAGE_COST:           &str = "Storage Cost";
pub const ELASTICITY_INDEX:       &str = "Elasticity Index";

// ── Coercion ───────────────────────────────────────────────────────

/// Read a cell as an integer from its leading digits, so `"12 units"`
/// reads 12 and `"3.7"` reads 3. An optional sign is allowed. A cell
/// with no leading digit reads 0; values past the i64 range saturate.
pub fn coerce_int(cell: Option<&str>) -> i64 {
    let raw = cell.map(str::trim_start).unwrap_or_default();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for digit in rest.bytes().map_while(|b| b.is_ascii_digit().then(|| i64::from(b - b'0'))) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(digit);
    }
    match (seen_digit, negative) {
        (false, _) => 0,
        (true, true) => -value,
        (true, false) => value,
    }
}

/// Read a cell as a decimal.
pub fn coerce_float(cell: Option<&str>) -> f64 {
    cell.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn text(record: &Record, column: &str) -> String {
    record.get(column).unwrap_or_default().to_string()
}

// ── Inventory ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id:             ProductId,
    pub store_id:               StoreId,
    pub stock_levels:           i64,
    pub supplier_lead_time:     i64,
    pub stockout_frequency:     i64,
    pub reorder_point:          i64,
    /// Kept verbatim; never validated as a date.
    pub expiry_date:            String,
    pub warehouse_capacity:     i64,
    pub order_fulfillment_time: i64,
}

impl InventoryRecord {
    pub fn from_record(record: &Record) -> Self {
        Self {
            product_id:             text(record, PRODUCT_ID),
            store_id:               text(record, STORE_ID),
            stock_levels:           coerce_int(record.get(STOCK_LEVELS)),
            supplier_lead_time:     coerce_int(record.get(SUPPLIER_LEAD_TIME)),
            stockout_frequency:     coerce_int(record.get(STOCKOUT_FREQUENCY)),
            reorder_point:          coerce_int(record.get(REORDER_POINT)),
            expiry_date:            text(record, EXPIRY_DATE),
            warehouse_capacity:     coerce_int(record.get(WAREHOUSE_CAPACITY)),
            order_fulfillment_time: coerce_int(record.get(ORDER_FULFILLMENT_TIME)),
        }
    }

    pub fn is_below_reorder_point(&self) -> bool {
        self.stock_levels < self.reorder_point
    }
}

// ── Pricing ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub product_id:       ProductId,
    pub store_id:         StoreId,
    pub price:            f64,
    pub competitor_price: f64,
    /// Free-form in the feeds ("10%", "0.1", "None"); not used in arithmetic.
    pub discounts:        String,
    pub sales_volume:     i64,
    pub customer_reviews: i64,
    pub return_rate:      f64,
    pub storage_cost:     f64,
    pub elasticity:       f64,
}

impl PricingRecord {
    pub fn from_record(record: &Record) -> Self {
        Self {
            product_id:       text(record, PRODUCT_ID),
            store_id:         text(record, STORE_ID),
            price:            coerce_float(record.get(PRICE)),
            competitor_price: coerce_float(record.get(COMPETITOR_PRICES)),
            discounts:        text(record, DISCOUNTS),
            sales_volume:     coerce_int(record.get(SALES_VOLUME)),
            customer_reviews: coerce_int(record.get(CUSTOMER_REVIEWS)),
            return_rate:      coerce_float(record.get(RETURN_RATE)),
            storage_cost:     coerce_float(record.get(STORAGE_COST)),
            elasticity:       coerce_float(record.get(ELASTICITY_INDEX)),
        }
    }

    /// Revenue at the current price: price × volume.
    pub fn revenue(&self) -> f64 {
        self.price * self.sales_volume as f64
    }
}

/// Anything keyed by a store, for store filtering and grouping.
pub trait StoreKeyed {
    fn store_id(&self) -> &str;
}

impl StoreKeyed for InventoryRecord {
    fn store_id(&self) -> &str { &self.store_id }
}

impl StoreKeyed for PricingRecord {
    fn store_id(&self) -> &str { &self.store_id }
}
