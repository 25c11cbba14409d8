//! Simulated series for the demand forecasting and pricing charts.
//!
//! These are illustrative, not analytical: fixed base values with
//! jitter and a sinusoidal season. Only the store heatmap looks at
//! real data (mean Stock Levels per store); its growth figure is
//! still simulated.
//!
//! RULE: all jitter comes from the `RandomSource` passed in, so a
//! seeded bank reproduces every series exactly.

use crate::{
    dataset::MAX_TIME_RANGE_DAYS,
    metrics::{round_half_up, store_label},
    record::InventoryRecord,
    rng::RandomSource,
    types::Days,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const BASE_DAILY_DEMAND: f64 = 500.0;
const BASE_PRICE:        f64 = 50.0;
/// Most recent days with no observed actual yet.
const FORECAST_ONLY_DAYS: i64 = 7;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date:        String,
    pub actual:      Option<i64>,
    pub forecast:    i64,
    pub upper_bound: i64,
    pub lower_bound: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthValue {
    pub month: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDemand {
    pub store:  String,
    pub demand: i64,
    pub growth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyPoint {
    pub period:   String,
    pub accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForecast {
    pub product:       String,
    pub forecast:      i64,
    pub current_stock: i64,
    pub growth:        i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month:            String,
    pub price:            f64,
    pub competitor_price: f64,
}

fn round_cents(value: f64) -> f64 {
    round_half_up(value * 100.0) as f64 / 100.0
}

/// Daily demand, oldest first, covering `today - days ..= today`.
///
/// `days` is capped at `MAX_TIME_RANGE_DAYS`. A date that falls before
/// the earliest representable day gets an empty label.
pub fn time_series(days: Days, today: NaiveDate, rng: &mut dyn RandomSource) -> Vec<ForecastPoint> {
    if days > MAX_TIME_RANGE_DAYS {
        log::debug!("forecast: capping time series at {MAX_TIME_RANGE_DAYS} days (asked for {days})");
    }
    let days = days.min(MAX_TIME_RANGE_DAYS);
    let span = days as f64;
    (0..=days as i64)
        .rev()
        .map(|i| {
            let date = today.checked_sub_signed(Duration::days(i));
            let (seasonal, trend) = if days == 0 {
                (1.0, 1.0)
            } else {
                (
                    1.0 + 0.2 * ((i as f64 / (span / 6.0)) * PI).sin(),
                    1.0 + (i as f64 / span) * 0.1,
                )
            };
            let level = BASE_DAILY_DEMAND * seasonal * trend;

            let actual = round_half_up(level * rng.uniform(0.9, 1.1));
            let forecast = round_half_up(level * rng.uniform(0.95, 1.05));

            ForecastPoint {
                date:        date.map(|d| d.format("%b %-d").to_string()).unwrap_or_default(),
                actual:      (i <= days as i64 - FORECAST_ONLY_DAYS).then_some(actual),
                forecast,
                upper_bound: round_half_up(forecast as f64 * 1.1),
                lower_bound: round_half_up(forecast as f64 * 0.9),
            }
        })
        .collect()
}

pub fn seasonal_pattern() -> Vec<MonthValue> {
    const VALUES: [i64; 12] = [420, 380, 450, 520, 550, 590, 610, 590, 540, 490, 520, 580];
    MONTHS
        .iter()
        .zip(VALUES)
        .map(|(month, value)| MonthValue { month: month.to_string(), value })
        .collect()
}

/// Mean stock per store, in the order stores first appear.
pub fn store_heatmap(inventory: &[InventoryRecord], rng: &mut dyn RandomSource) -> Vec<StoreDemand> {
    let mut totals: Vec<(&str, f64, usize)> = Vec::new();
    for r in inventory {
        match totals.iter().position(|(id, _, _)| *id == r.store_id) {
            Some(idx) => {
                totals[idx].1 += r.stock_levels as f64;
                totals[idx].2 += 1;
            }
            None => totals.push((r.store_id.as_str(), r.stock_levels as f64, 1)),
        }
    }

    totals
        .into_iter()
        .map(|(store_id, total, count)| StoreDemand {
            store:  store_label(store_id),
            demand: round_half_up(total / count as f64),
            growth: round_half_up(rng.next_f64() * 20.0 - 5.0),
        })
        .collect()
}

pub fn forecast_accuracy() -> Vec<AccuracyPoint> {
    [94, 92, 96, 91, 93, 95, 94, 97]
        .into_iter()
        .enumerate()
        .map(|(i, accuracy)| AccuracyPoint {
            period: format!("Week {}", i + 1),
            accuracy,
        })
        .collect()
}

/// Four sample products labelled after the selected category.
pub fn product_forecast(category: &str, rng: &mut dyn RandomSource) -> Vec<ProductForecast> {
    [("A", 200.0), ("B", 150.0), ("C", 100.0), ("D", 80.0)]
        .into_iter()
        .map(|(suffix, base_demand)| {
            let trend = rng.uniform(1.0, 1.1);
            let seasonal = rng.uniform(1.0, 1.2);
            let jitter = rng.uniform(0.95, 1.05);
            let forecast = round_half_up(base_demand * trend * seasonal * jitter);
            let current_stock = round_half_up(forecast as f64 * rng.uniform(0.8, 1.1));
            ProductForecast {
                product: format!("{category} {suffix}"),
                forecast,
                current_stock,
                growth: round_half_up(rng.next_f64() * 15.0 - 5.0),
            }
        })
        .collect()
}

/// Monthly price vs competitor around a fixed base price.
pub fn price_trend(rng: &mut dyn RandomSource) -> Vec<PricePoint> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(m, month)| {
            let seasonal = 1.0 + 0.1 * ((m as f64 / 6.0) * PI).sin();
            let jitter = rng.uniform(0.95, 1.05);
            let price = BASE_PRICE * seasonal * jitter;
            PricePoint {
                month:            month.to_string(),
                price:            round_cents(price),
                competitor_price: round_cents(price * 0.95),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same value.
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 { self.0 }
    }

    #[test]
    fn midpoint_jitter_gives_unjittered_levels() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let series = time_series(12, today, &mut Fixed(0.5));
        let last = series.last().unwrap();
        assert_eq!(last.date, "Mar 10");
        // i = 0: no season, no trend.
        assert_eq!(last.forecast, 500);
        assert_eq!(last.upper_bound, 550);
        assert_eq!(last.lower_bound, 450);
    }

    #[test]
    fn round_cents_rounds_half_up() {
        assert_eq!(round_cents(12.346), 12.35);
        assert_eq!(round_cents(12.344), 12.34);
    }
}
