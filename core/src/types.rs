//! Shared primitive types used across the whole pipeline.

/// A store identifier exactly as it appears in the feeds.
pub type StoreId = String;

/// A product identifier exactly as it appears in the feeds.
pub type ProductId = String;

/// A header token from a tabular feed.
pub type ColumnName = String;

/// A number of calendar days (time-range selector, lead times).
pub type Days = u32;
