//! Explicit dashboard state and the derivation of everything the
//! presentation layer draws from it.
//!
//! The caller owns `DashboardState` and replaces it on every reload
//! or selector change. `derive_view_model` only reads it. The single
//! source of variation between two calls on the same state is the
//! `RngBank` handed in for the simulated series.

use crate::{
    config::DashboardConfig,
    dataset::{Datasets, Filters},
    forecast::{
        self, AccuracyPoint, ForecastPoint, MonthValue, PricePoint, ProductForecast, StoreDemand,
    },
    metrics::{KeyMetrics, MetricsEngine},
    monitoring::{self, InventoryPanel},
    pricing::{self, ElasticityPoint, PricingEngine, ProductPricingRow, StrategyShare},
    recommendations::{self, InventoryInsights, PricingInsights},
    rng::{GeneratorSlot, RngBank},
    types::StoreId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub datasets: Datasets,
    pub filters:  Filters,
}

impl DashboardState {
    pub fn new(datasets: Datasets, filters: Filters) -> Self {
        Self { datasets, filters }
    }

    /// Same data, new selectors. Never refetches.
    pub fn with_filters(&self, filters: Filters) -> Self {
        Self {
            datasets: self.datasets.clone(),
            filters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPanel {
    pub time_series:        Vec<ForecastPoint>,
    pub seasonal_pattern:   Vec<MonthValue>,
    pub store_heatmap:      Vec<StoreDemand>,
    /// Leading slice of `store_heatmap` for the ranked list.
    pub heatmap_highlights: Vec<StoreDemand>,
    pub forecast_accuracy:  Vec<AccuracyPoint>,
    pub product_forecast:   Vec<ProductForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPanel {
    pub price_trend:       Vec<PricePoint>,
    pub elasticity_curve:  Vec<ElasticityPoint>,
    pub strategy_mix:      Vec<StrategyShare>,
    pub products:          Vec<ProductPricingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsPanel {
    pub inventory: InventoryInsights,
    pub pricing:   PricingInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViewModel {
    pub filters:            Filters,
    /// All stores across both feeds, for the store selector.
    pub store_ids:          Vec<StoreId>,
    pub product_categories: Vec<String>,
    pub key_metrics:        KeyMetrics,
    pub demand:             DemandPanel,
    pub inventory:          InventoryPanel,
    pub pricing:            PricingPanel,
    pub recommendations:    RecommendationsPanel,
}

pub fn derive_view_model(
    state: &DashboardState,
    config: &DashboardConfig,
    rng_bank: &RngBank,
    today: NaiveDate,
) -> DashboardViewModel {
    let filters = &state.filters;
    let store_ids = state.datasets.store_ids();
    let view = state.datasets.filtered(&filters.store);

    let metrics = MetricsEngine::new(config);
    let pricing_engine = PricingEngine::new(config);

    let mut heatmap_rng = rng_bank.for_generator(GeneratorSlot::StoreHeatmap);
    let store_heatmap = forecast::store_heatmap(&view.inventory, &mut heatmap_rng);
    let heatmap_highlights = store_heatmap
        .iter()
        .take(config.heatmap_display_limit)
        .cloned()
        .collect();

    let demand = DemandPanel {
        time_series: forecast::time_series(
            filters.time_range.days(),
            today,
            &mut rng_bank.for_generator(GeneratorSlot::TimeSeries),
        ),
        seasonal_pattern: forecast::seasonal_pattern(),
        store_heatmap,
        heatmap_highlights,
        forecast_accuracy: forecast::forecast_accuracy(),
        product_forecast: forecast::product_forecast(
            &filters.product_category,
            &mut rng_bank.for_generator(GeneratorSlot::ProductForecast),
        ),
    };

    let pricing_panel = PricingPanel {
        price_trend:      forecast::price_trend(&mut rng_bank.for_generator(GeneratorSlot::PriceTrend)),
        elasticity_curve: pricing::price_elasticity_curve(),
        strategy_mix:     pricing::pricing_strategy_distribution(),
        products:         pricing_engine.product_rows(&view.pricing, config.pricing_table_rows),
    };

    let vm = DashboardViewModel {
        filters:            filters.clone(),
        key_metrics:        metrics.key_metrics(&view.inventory, &view.pricing),
        inventory:          monitoring::inventory_panel(
            &metrics,
            &view.inventory,
            &store_ids,
            config.low_stock_alert_limit,
        ),
        demand,
        pricing:            pricing_panel,
        recommendations:    RecommendationsPanel {
            inventory: recommendations::inventory_insights(config, &view.inventory),
            pricing:   recommendations::pricing_insights(config, &view.pricing),
        },
        store_ids,
        product_categories: config.product_categories.clone(),
    };

    log::info!(
        "view_model: store={:?} days={} inventory={} pricing={}",
        filters.store,
        filters.time_range.days(),
        view.inventory.len(),
        view.pricing.len()
    );
    vm
}
