//! Inventory and pricing insights for a retail dashboard.
//!
//! Pipeline: feed text → `parser` → typed `record`s → `dataset`
//! filters → `metrics` / `monitoring` / `pricing` / `recommendations`
//! / `forecast` → `view_model`.

pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod monitoring;
pub mod parser;
pub mod pricing;
pub mod record;
pub mod recommendations;
pub mod rng;
pub mod source;
pub mod types;
pub mod view_model;
