//! Price recommendation tests.

use inventory_insights_core::{
    config::DashboardConfig,
    parser::parse,
    pricing::{PriceInputs, PricingEngine, RecommendationReason},
    record::PricingRecord,
};

fn inputs(price: f64, elasticity: f64, competitor_price: f64, return_rate: f64, storage_cost: f64) -> PriceInputs {
    PriceInputs { price, elasticity, competitor_price, return_rate, storage_cost }
}

#[test]
fn first_matching_rule_wins() {
    let engine = PricingEngine::default();
    // Also qualifies for high return rate and high storage cost.
    let rec = engine.recommend(&inputs(100.0, 1.6, 90.0, 40.0, 50.0));
    assert_eq!(rec.reason, RecommendationReason::HighlyPriceSensitive);
    assert_eq!(rec.reason.tag(), "highly price sensitive");
    assert_eq!(rec.recommended_price, (0.95 * 100.0f64).min(0.97 * 90.0));
}

#[test]
fn each_rule_fires_in_isolation() {
    let engine = PricingEngine::default();
    let cases = [
        (inputs(100.0, 1.3, 100.0, 0.0, 0.0), RecommendationReason::PriceSensitive, 97.0),
        (inputs(100.0, 0.5, 100.0, 0.0, 0.0), RecommendationReason::LowPriceSensitivity, 1.10 * 100.0),
        (inputs(100.0, 1.0, 120.0, 0.0, 0.0), RecommendationReason::CompetitorHigher, 108.0),
        (inputs(100.0, 1.0, 100.0, 16.0, 0.0), RecommendationReason::HighReturnRate, 95.0),
        (inputs(100.0, 1.0, 100.0, 0.0, 25.0), RecommendationReason::HighStorageCost, 90.0),
        (inputs(100.0, 1.0, 100.0, 0.0, 0.0), RecommendationReason::MatchCompetitor, 98.0),
    ];
    for (input, reason, expected) in cases {
        let rec = engine.recommend(&input);
        assert_eq!(rec.reason, reason, "wrong rule for {input:?}");
        assert!(
            (rec.recommended_price - expected).abs() < 1e-9,
            "{reason:?}: expected {expected}, got {}",
            rec.recommended_price
        );
    }
}

#[test]
fn boundaries_use_strict_comparisons() {
    let engine = PricingEngine::default();
    // Exactly 1.5 is not "highly" sensitive; exactly 0.8 is not "low".
    assert_eq!(engine.recommend(&inputs(100.0, 1.5, 100.0, 0.0, 0.0)).reason, RecommendationReason::PriceSensitive);
    assert_eq!(engine.recommend(&inputs(100.0, 0.8, 100.0, 0.0, 0.0)).reason, RecommendationReason::MatchCompetitor);
    // Return rate of exactly 15 does not trigger.
    assert_eq!(engine.recommend(&inputs(100.0, 1.0, 100.0, 15.0, 0.0)).reason, RecommendationReason::MatchCompetitor);
}

#[test]
fn recommendation_is_floored_at_cost() {
    let engine = PricingEngine::default();
    let rec = engine.recommend(&inputs(100.0, 1.6, 10.0, 0.0, 0.0));
    assert_eq!(rec.reason, RecommendationReason::HighlyPriceSensitive);
    assert_eq!(rec.recommended_price, 0.7 * 100.0);
}

#[test]
fn recommendation_never_below_floor_across_inputs() {
    let engine = PricingEngine::default();
    let prices = [0.0, 1.0, 19.99, 100.0, 2500.0];
    let elasticities = [0.0, 0.5, 0.8, 1.0, 1.2, 1.3, 1.5, 2.0, 3.0];
    let competitor_ratios = [0.0, 0.5, 0.9, 1.0, 1.1, 1.2, 2.0];
    let return_rates = [0.0, 15.0, 30.0];
    let storage_ratios = [0.0, 0.2, 0.5];

    for &p in &prices {
        for &e in &elasticities {
            for &cr in &competitor_ratios {
                for &rr in &return_rates {
                    for &sr in &storage_ratios {
                        let rec = engine.recommend(&inputs(p, e, p * cr, rr, p * sr));
                        assert!(
                            rec.recommended_price >= 0.7 * p,
                            "price {} below floor for P={p} E={e} C={} RR={rr} SC={}",
                            rec.recommended_price,
                            p * cr,
                            p * sr
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn product_rows_cover_first_rows_only() {
    let mut csv = String::from("Product ID,Store ID,Price,Competitor Prices,Sales Volume,Elasticity Index\n");
    for i in 0..15 {
        csv.push_str(&format!("P{i},S1,10,10,5,1.0\n"));
    }
    let pricing: Vec<PricingRecord> = parse(&csv).iter().map(PricingRecord::from_record).collect();

    let rows = PricingEngine::default().product_rows(&pricing, 10);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].product_id, "P0");
    assert_eq!(rows[9].product_id, "P9");

    let row = &rows[0];
    assert!((row.current_margin - 30.0).abs() < 1e-9, "margin {}", row.current_margin);
    assert_eq!(row.reason, RecommendationReason::MatchCompetitor);
    assert!((row.price_change - -2.0).abs() < 1e-9, "change {}", row.price_change);
}

#[test]
fn zero_price_row_has_finite_figures() {
    let pricing: Vec<PricingRecord> = parse("Product ID,Store ID,Price\nP1,S1,\n")
        .iter()
        .map(PricingRecord::from_record)
        .collect();
    let rows = PricingEngine::default().product_rows(&pricing, 10);
    let row = &rows[0];
    assert_eq!(row.current_margin, 0.0);
    assert_eq!(row.recommended_margin, 0.0);
    assert_eq!(row.price_change, 0.0);
    assert!(row.recommended_price.is_finite());
}

#[test]
fn cost_ratio_also_moves_the_floor() {
    let config = DashboardConfig {
        cost_ratio: 0.5,
        ..DashboardConfig::default_test()
    };
    let engine = PricingEngine::new(&config);
    let rec = engine.recommend(&inputs(100.0, 1.6, 10.0, 0.0, 0.0));
    assert_eq!(rec.recommended_price, 50.0, "Floor follows the configured cost ratio");

    // The shipped defaults keep the 0.7 × price floor.
    assert_eq!(DashboardConfig::default().cost_ratio, 0.7);
    let rec = PricingEngine::new(&DashboardConfig::default()).recommend(&inputs(100.0, 1.6, 10.0, 0.0, 0.0));
    assert_eq!(rec.recommended_price, 0.7 * 100.0);
}
