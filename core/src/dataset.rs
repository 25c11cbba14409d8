//! Loaded record sets and the filters applied to them.
//!
//! A `Datasets` value is immutable for one load cycle; reloading
//! replaces it wholesale. Filtering copies out a view and never
//! mutates the loaded sets.

use crate::{
    record::{InventoryRecord, PricingRecord, StoreKeyed},
    types::{Days, StoreId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel the store selector sends for "every store".
pub const ALL: &str = "all";

pub const DEFAULT_TIME_RANGE_DAYS: Days = 30;

/// Longest range the time-series panel will generate (ten years).
pub const MAX_TIME_RANGE_DAYS: Days = 3650;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub inventory: Vec<InventoryRecord>,
    pub pricing:   Vec<PricingRecord>,
}

impl Datasets {
    pub fn new(inventory: Vec<InventoryRecord>, pricing: Vec<PricingRecord>) -> Self {
        Self { inventory, pricing }
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty() && self.pricing.is_empty()
    }

    /// Sorted, de-duplicated union of store ids across both feeds.
    pub fn store_ids(&self) -> Vec<StoreId> {
        let ids: BTreeSet<&str> = self
            .inventory
            .iter()
            .map(|r| r.store_id())
            .chain(self.pricing.iter().map(|r| r.store_id()))
            .collect();
        ids.into_iter().map(str::to_string).collect()
    }

    /// Both sets narrowed to one store (or untouched for `All`).
    pub fn filtered(&self, store: &StoreFilter) -> Datasets {
        Datasets {
            inventory: filter_by_store(&self.inventory, store),
            pricing:   filter_by_store(&self.pricing, store),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFilter {
    #[default]
    All,
    Store(StoreId),
}

impl StoreFilter {
    pub fn parse(selector: &str) -> Self {
        if selector == ALL {
            Self::All
        } else {
            Self::Store(selector.to_string())
        }
    }

    pub fn matches(&self, store_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Store(id) => id == store_id,
        }
    }
}

pub fn filter_by_store<T: StoreKeyed + Clone>(records: &[T], store: &StoreFilter) -> Vec<T> {
    match store {
        StoreFilter::All => records.to_vec(),
        StoreFilter::Store(_) => records
            .iter()
            .filter(|r| store.matches(r.store_id()))
            .cloned()
            .collect(),
    }
}

/// Number of trailing days shown by the time-series panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange(pub Days);

impl TimeRange {
    /// Parse the selector value ("7", "30", "90", "365").
    /// Anything unparsable or longer than `MAX_TIME_RANGE_DAYS` falls
    /// back to the 30-day default.
    pub fn parse(selector: &str) -> Self {
        match selector.trim().parse::<Days>() {
            Ok(days) if days <= MAX_TIME_RANGE_DAYS => Self(days),
            Ok(days) => {
                log::debug!("filters: time range of {days} days exceeds {MAX_TIME_RANGE_DAYS}, using default");
                Self::default()
            }
            Err(_) => {
                log::debug!("filters: unparsable time range {selector:?}, using default");
                Self::default()
            }
        }
    }

    pub fn days(&self) -> Days {
        self.0
    }
}

impl Default for TimeRange {
    fn default() -> Self { Self(DEFAULT_TIME_RANGE_DAYS) }
}

/// Current selector state from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub store:            StoreFilter,
    pub time_range:       TimeRange,
    /// Opaque; only used to label the simulated product forecast.
    pub product_category: String,
}

impl Filters {
    pub fn new(store: &str, time_range: &str, product_category: &str) -> Self {
        Self {
            store:            StoreFilter::parse(store),
            time_range:       TimeRange::parse(time_range),
            product_category: product_category.to_string(),
        }
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            store:            StoreFilter::All,
            time_range:       TimeRange::default(),
            product_category: ALL.to_string(),
        }
    }
}
