//! Feed fetching and loading.
//!
//! The pipeline only needs "give me the full body behind this
//! reference, or fail". Transport, retries and caching belong to
//! whoever implements `TextSource`.
//!
//! RULE: a failed fetch never propagates. The loader logs it and
//! carries on with an empty record set for that feed.

use crate::{
    config::FeedConfig,
    dataset::Datasets,
    error::{InsightsError, InsightsResult},
    parser,
    record::{InventoryRecord, PricingRecord},
};
use std::collections::HashMap;
use std::path::PathBuf;

pub trait TextSource {
    fn fetch(&self, reference: &str) -> InsightsResult<String>;
}

/// Reads feeds from the local filesystem, optionally under a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsTextSource {
    root: Option<PathBuf>,
}

impl FsTextSource {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(reference),
            None => PathBuf::from(reference),
        }
    }
}

impl TextSource for FsTextSource {
    fn fetch(&self, reference: &str) -> InsightsResult<String> {
        let path = self.resolve(reference);
        std::fs::read_to_string(&path).map_err(|e| InsightsError::Fetch {
            reference: path.display().to_string(),
            reason:    e.to_string(),
        })
    }
}

/// Serves bodies from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTextSource {
    bodies: HashMap<String, String>,
}

impl StaticTextSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(reference.into(), body.into());
        self
    }
}

impl TextSource for StaticTextSource {
    fn fetch(&self, reference: &str) -> InsightsResult<String> {
        self.bodies
            .get(reference)
            .cloned()
            .ok_or_else(|| InsightsError::Fetch {
                reference: reference.to_string(),
                reason:    "no such resource".into(),
            })
    }
}

pub struct FeedLoader;

impl FeedLoader {
    /// Fetch and parse both feeds. Every call produces fresh sets.
    pub fn load(source: &dyn TextSource, feeds: &FeedConfig) -> Datasets {
        let inventory: Vec<InventoryRecord> = Self::fetch_records(source, "inventory", &feeds.inventory)
            .iter()
            .map(InventoryRecord::from_record)
            .collect();
        let pricing: Vec<PricingRecord> = Self::fetch_records(source, "pricing", &feeds.pricing)
            .iter()
            .map(PricingRecord::from_record)
            .collect();

        log::info!(
            "loader: inventory={} pricing={} records",
            inventory.len(),
            pricing.len()
        );
        Datasets::new(inventory, pricing)
    }

    fn fetch_records(source: &dyn TextSource, feed: &str, reference: &str) -> Vec<parser::Record> {
        match source.fetch(reference) {
            Ok(body) => {
                let records = parser::parse(&body);
                log::debug!("feed={feed} parsed {} records from {reference}", records.len());
                records
            }
            Err(e) => {
                log::warn!("feed={feed} fetch failed, continuing with empty set: {e}");
                Vec::new()
            }
        }
    }
}
