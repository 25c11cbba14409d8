//! Pricing optimisation: rule-based price recommendations and the
//! what-if price change simulator.
//!
//! RULE: recommendation rules are evaluated in a fixed priority
//! order and the first match wins. Later rules are never consulted.
//! The recommended price is then floored at cost_ratio × price.
//!
//! Unit cost is always cost_ratio × the *current* price, including
//! when the simulator evaluates a new price.

use crate::{
    config::DashboardConfig,
    error::{InsightsError, InsightsResult},
    metrics::round_half_up,
    record::PricingRecord,
    types::{ProductId, StoreId},
};
use serde::{Deserialize, Serialize};

/// Which recommendation rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    HighlyPriceSensitive,
    PriceSensitive,
    LowPriceSensitivity,
    CompetitorHigher,
    HighReturnRate,
    HighStorageCost,
    MatchCompetitor,
}

impl RecommendationReason {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::HighlyPriceSensitive => "highly price sensitive",
            Self::PriceSensitive       => "price sensitive",
            Self::LowPriceSensitivity  => "low price sensitivity",
            Self::CompetitorHigher     => "competitor higher",
            Self::HighReturnRate       => "high return rate",
            Self::HighStorageCost      => "high storage cost",
            Self::MatchCompetitor      => "match competitor",
        }
    }

    /// Longer label shown next to the table row.
    pub fn description(&self) -> &'static str {
        match self {
            Self::HighlyPriceSensitive => "Highly price sensitive (elasticity > 1.5)",
            Self::PriceSensitive       => "Price sensitive (elasticity 1.2-1.5)",
            Self::LowPriceSensitivity  => "Low price sensitivity (elasticity < 0.8)",
            Self::CompetitorHigher     => "Competitor price significantly higher",
            Self::HighReturnRate       => "High return rate (>15%)",
            Self::HighStorageCost      => "High storage cost (>20% of price)",
            Self::MatchCompetitor      => "Match competitor with slight discount",
        }
    }
}

/// Inputs for one product's recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceInputs {
    pub price:            f64,
    pub elasticity:       f64,
    pub competitor_price: f64,
    pub return_rate:      f64,
    pub storage_cost:     f64,
}

impl From<&PricingRecord> for PriceInputs {
    fn from(r: &PricingRecord) -> Self {
        Self {
            price:            r.price,
            elasticity:       r.elasticity,
            competitor_price: r.competitor_price,
            return_rate:      r.return_rate,
            storage_cost:     r.storage_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub recommended_price: f64,
    pub reason:            RecommendationReason,
}

/// One row of the product pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricingRow {
    pub product_id:         ProductId,
    pub store_id:           StoreId,
    pub current_price:      f64,
    pub recommended_price:  f64,
    pub competitor_price:   f64,
    pub sales_volume:       i64,
    pub elasticity:         f64,
    pub current_margin:     f64,
    pub recommended_margin: f64,
    /// Recommended vs current, in percent.
    pub price_change:       f64,
    pub reason:             RecommendationReason,
    pub return_rate:        f64,
    pub storage_cost:       f64,
}

/// Inputs for the what-if simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationInputs {
    pub price:        f64,
    pub elasticity:   f64,
    pub sales_volume: f64,
    pub storage_cost: f64,
}

impl From<&PricingRecord> for SimulationInputs {
    fn from(r: &PricingRecord) -> Self {
        Self {
            price:        r.price,
            elasticity:   r.elasticity,
            sales_volume: r.sales_volume as f64,
            storage_cost: r.storage_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationVerdict {
    StronglyRecommended,
    Recommended,
    Neutral,
    Caution,
    NotRecommended,
}

impl SimulationVerdict {
    /// Tier by profit change %, strict greater-than, first match wins.
    pub fn from_profit_change(pct: f64) -> Self {
        if pct > 5.0 {
            Self::StronglyRecommended
        } else if pct > 0.0 {
            Self::Recommended
        } else if pct > -2.0 {
            Self::Neutral
        } else if pct > -5.0 {
            Self::Caution
        } else {
            Self::NotRecommended
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::StronglyRecommended => "strongly recommended",
            Self::Recommended         => "recommended",
            Self::Neutral             => "neutral",
            Self::Caution             => "caution",
            Self::NotRecommended      => "not recommended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSimulation {
    pub price_change:      f64,
    pub current_price:     f64,
    pub new_price:         f64,
    pub current_volume:    f64,
    pub new_volume:        f64,
    pub new_volume_units:  i64,
    pub volume_change:     f64,
    pub current_revenue:   f64,
    pub new_revenue:       f64,
    pub revenue_change:    f64,
    pub current_profit:    f64,
    pub new_profit:        f64,
    pub profit_change:     f64,
    pub current_margin:    f64,
    pub new_margin:        f64,
    pub verdict:           SimulationVerdict,
}

fn margin_pct(price: f64, unit_cost: f64) -> f64 {
    if price == 0.0 {
        0.0
    } else {
        (price - unit_cost) / price * 100.0
    }
}

fn change_pct(new: f64, current: f64) -> f64 {
    if current == 0.0 {
        0.0
    } else {
        (new - current) / current * 100.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PricingEngine {
    cost_ratio:        f64,
    amortization:      f64,
    min_change_pct:    f64,
    max_change_pct:    f64,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl PricingEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cost_ratio:     config.cost_ratio,
            amortization:   config.storage_amortization_periods,
            min_change_pct: config.min_price_change_pct,
            max_change_pct: config.max_price_change_pct,
        }
    }

    /// First matching rule wins, then the result is floored at
    /// `cost_ratio` × price (0.7 × price by default).
    pub fn recommend(&self, inputs: &PriceInputs) -> PriceRecommendation {
        let PriceInputs { price: p, elasticity: e, competitor_price: c, return_rate: rr, storage_cost: sc } = *inputs;

        let (price, reason) = if e > 1.5 {
            ((0.95 * p).min(0.97 * c), RecommendationReason::HighlyPriceSensitive)
        } else if e > 1.2 {
            ((0.97 * p).min(0.98 * c), RecommendationReason::PriceSensitive)
        } else if e < 0.8 {
            (1.10 * p, RecommendationReason::LowPriceSensitivity)
        } else if c > 1.1 * p {
            ((1.08 * p).min(0.95 * c), RecommendationReason::CompetitorHigher)
        } else if rr > 15.0 {
            (0.95 * p, RecommendationReason::HighReturnRate)
        } else if sc > 0.2 * p {
            (0.90 * p, RecommendationReason::HighStorageCost)
        } else {
            (0.98 * c, RecommendationReason::MatchCompetitor)
        };

        PriceRecommendation {
            recommended_price: price.max(self.cost_ratio * p),
            reason,
        }
    }

    /// Table rows for the first `limit` pricing records.
    pub fn product_rows(&self, pricing: &[PricingRecord], limit: usize) -> Vec<ProductPricingRow> {
        pricing
            .iter()
            .take(limit)
            .map(|r| {
                let rec = self.recommend(&PriceInputs::from(r));
                let unit_cost = r.price * self.cost_ratio;
                ProductPricingRow {
                    product_id:         r.product_id.clone(),
                    store_id:           r.store_id.clone(),
                    current_price:      r.price,
                    recommended_price:  rec.recommended_price,
                    competitor_price:   r.competitor_price,
                    sales_volume:       r.sales_volume,
                    elasticity:         r.elasticity,
                    current_margin:     margin_pct(r.price, unit_cost),
                    recommended_margin: margin_pct(rec.recommended_price, unit_cost),
                    price_change:       change_pct(rec.recommended_price, r.price),
                    reason:             rec.reason,
                    return_rate:        r.return_rate,
                    storage_cost:       r.storage_cost,
                }
            })
            .collect()
    }

    /// Project volume, revenue and profit for a `percent` price change.
    pub fn simulate(&self, inputs: &SimulationInputs, percent: f64) -> InsightsResult<PriceSimulation> {
        if !(self.min_change_pct..=self.max_change_pct).contains(&percent) {
            log::warn!("pricing: rejected simulated change of {percent}%");
            return Err(InsightsError::PriceChangeOutOfRange {
                percent,
                min: self.min_change_pct,
                max: self.max_change_pct,
            });
        }

        let SimulationInputs { price, elasticity, sales_volume, storage_cost } = *inputs;

        let new_price = price * (1.0 + percent / 100.0);
        let volume_change = (-elasticity * percent).clamp(-80.0, 200.0);
        let new_volume = (sales_volume * (1.0 + volume_change / 100.0)).max(1.0);

        let unit_cost = price * self.cost_ratio;

        let current_revenue = price * sales_volume;
        let current_profit = current_revenue
            - unit_cost * sales_volume
            - storage_cost * sales_volume / self.amortization;

        let new_revenue = new_price * new_volume;
        let new_profit = new_revenue
            - unit_cost * new_volume
            - storage_cost * new_volume / self.amortization;

        let profit_change = change_pct(new_profit, current_profit);

        let sim = PriceSimulation {
            price_change:     percent,
            current_price:    price,
            new_price,
            current_volume:   sales_volume,
            new_volume,
            new_volume_units: round_half_up(new_volume),
            volume_change,
            current_revenue,
            new_revenue,
            revenue_change:   change_pct(new_revenue, current_revenue),
            current_profit,
            new_profit,
            profit_change,
            current_margin:   margin_pct(price, unit_cost),
            new_margin:       margin_pct(new_price, unit_cost),
            verdict:          SimulationVerdict::from_profit_change(profit_change),
        };
        log::debug!(
            "pricing: simulate {percent:+}% price={price:.2}->{new_price:.2} profit_change={profit_change:.1}% verdict={}",
            sim.verdict.tag()
        );
        Ok(sim)
    }

    /// Simulate for the first pricing record carrying `product_id`.
    pub fn simulate_for_product(
        &self,
        pricing: &[PricingRecord],
        product_id: &str,
        percent: f64,
    ) -> InsightsResult<PriceSimulation> {
        let record = pricing
            .iter()
            .find(|r| r.product_id == product_id)
            .ok_or_else(|| InsightsError::UnknownProduct {
                product_id: product_id.to_string(),
            })?;
        self.simulate(&SimulationInputs::from(record), percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityPoint {
    pub name:   String,
    pub sales:  u32,
    pub profit: u32,
}

/// Fixed illustrative price-elasticity curve (-20% … +20%).
pub fn price_elasticity_curve() -> Vec<ElasticityPoint> {
    [
        ("-20%", 140, 70),
        ("-15%", 125, 75),
        ("-10%", 115, 80),
        ("-5%", 105, 90),
        ("0%", 100, 100),
        ("+5%", 90, 95),
        ("+10%", 80, 88),
        ("+15%", 70, 80),
        ("+20%", 60, 72),
    ]
    .into_iter()
    .map(|(name, sales, profit)| ElasticityPoint { name: name.into(), sales, profit })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyShare {
    pub name:  String,
    pub value: u32,
}

/// Fixed pricing strategy mix shown in the pie chart.
pub fn pricing_strategy_distribution() -> Vec<StrategyShare> {
    [("Standard", 45), ("Discounted", 30), ("Clearance", 15), ("Premium", 10)]
        .into_iter()
        .map(|(name, value)| StrategyShare { name: name.into(), value })
        .collect()
}
