use serde::{Deserialize, Serialize};

/// Where the two feeds live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub inventory: String,
    pub pricing:   String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            inventory: "data/inventory_monitoring.csv".into(),
            pricing:   "data/pricing_optimization.csv".into(),
        }
    }
}

/// Thresholds and ratios behind every derived figure.
///
/// The defaults are the dashboard's fixed assumptions; a config file
/// only needs to name the fields it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub feeds: FeedConfig,

    /// Assumed cost of goods as a fraction of price. Also the floor for
    /// recommended prices (`cost_ratio` × price), so lowering it lets
    /// recommendations go below 0.7 × price.
    pub cost_ratio: f64,
    /// Storage cost is spread over this many periods in the simulator.
    pub storage_amortization_periods: f64,
    /// Fixed "sales growth" shown on the key metrics panel.
    pub simulated_sales_growth: f64,
    /// Customer reviews are scaled by this factor (uncapped).
    pub satisfaction_scale: f64,

    pub stockout_risk_threshold:       i64,
    pub high_stockout_store_threshold: i64,
    pub long_lead_time_days:           i64,

    pub high_elasticity:      f64,
    pub low_elasticity:       f64,
    pub competitor_gap_ratio: f64,

    pub pricing_table_rows:    usize,
    pub low_stock_alert_limit: usize,
    pub heatmap_display_limit: usize,

    pub product_categories: Vec<String>,

    pub min_price_change_pct: f64,
    pub max_price_change_pct: f64,

    /// Master seed for the simulated generators. `None` draws one.
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feeds: FeedConfig::default(),
            cost_ratio: 0.7,
            storage_amortization_periods: 30.0,
            simulated_sales_growth: 12.8,
            satisfaction_scale: 20.0,
            stockout_risk_threshold: 10,
            high_stockout_store_threshold: 15,
            long_lead_time_days: 15,
            high_elasticity: 1.2,
            low_elasticity: 0.8,
            competitor_gap_ratio: 1.1,
            pricing_table_rows: 10,
            low_stock_alert_limit: 5,
            heatmap_display_limit: 6,
            product_categories: vec![
                "Electronics".into(),
                "Clothing".into(),
                "Home Goods".into(),
                "Groceries".into(),
                "Beauty".into(),
                "Sports".into(),
            ],
            min_price_change_pct: -30.0,
            max_price_change_pct: 30.0,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)?;
        log::info!("config: loaded {path}");
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with hardcoded defaults and a fixed seed, for tests.
    pub fn default_test() -> Self {
        Self {
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Category selector values, lowercased the way the selector sends them.
    pub fn category_keys(&self) -> Vec<String> {
        self.product_categories
            .iter()
            .map(|c| c.to_lowercase())
            .collect()
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..1.0).contains(&self.cost_ratio) {
            anyhow::bail!("cost_ratio must be in [0, 1), got {}", self.cost_ratio);
        }
        if self.storage_amortization_periods <= 0.0 {
            anyhow::bail!(
                "storage_amortization_periods must be positive, got {}",
                self.storage_amortization_periods
            );
        }
        if self.min_price_change_pct > self.max_price_change_pct {
            anyhow::bail!(
                "price change bounds inverted: [{}, {}]",
                self.min_price_change_pct,
                self.max_price_change_pct
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "pricing_table_rows": 3, "seed": 9 }"#).unwrap();
        assert_eq!(cfg.pricing_table_rows, 3);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.cost_ratio, 0.7);
        assert_eq!(cfg.feeds, FeedConfig::default());
    }

    #[test]
    fn invalid_cost_ratio_rejected() {
        assert!(DashboardConfig::from_json(r#"{ "cost_ratio": 1.5 }"#).is_err());
    }

    #[test]
    fn category_keys_are_lowercase() {
        let cfg = DashboardConfig::default_test();
        assert!(cfg.category_keys().contains(&"home goods".to_string()));
    }
}
