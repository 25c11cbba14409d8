use inventory_insights_core::{
    config::DashboardConfig,
    metrics::{MetricsEngine, StoreValue},
    monitoring,
    parser::parse,
    record::{InventoryRecord, PricingRecord},
    recommendations,
};

const INVENTORY_CSV: &str = "\
Product ID,Store ID,Stock Levels,Supplier Lead Time (days),Stockout Frequency,Reorder Point
P1,S2,10,20,16,50
P2,S1,101,4,3,40
P3,S2,15,16,18,20
P4,S3,300,2,0,100
P5,S1,100,5,12,150
P6,S2,5,1,1,10
P7,S3,1,30,2,5
";

const PRICING_CSV: &str = "\
Product ID,Store ID,Price,Competitor Prices,Sales Volume,Customer Reviews,Return Rate (%),Storage Cost,Elasticity Index
P1,S1,100,90,10,4,1,1,1.5
P2,S1,100,91,10,4,1,1,1.2
P3,S2,100,95,10,4,1,1,0.5
P4,S3,100,100,10,4,1,1,0.8
";

fn inventory() -> Vec<InventoryRecord> {
    parse(INVENTORY_CSV).iter().map(InventoryRecord::from_record).collect()
}

fn pricing() -> Vec<PricingRecord> {
    parse(PRICING_CSV).iter().map(PricingRecord::from_record).collect()
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn sv(name: &str, value: i64) -> StoreValue {
    StoreValue { name: name.into(), value }
}

#[test]
fn summary_rounds_average_stock() {
    let s = monitoring::summary(&MetricsEngine::default(), &inventory());
    assert_eq!(s.total_products, 7);
    // 532 / 7 = 76.0
    assert_eq!(s.avg_stock_level, 76);
    // P1, P3, P5, P6, P7 are under their reorder point.
    assert_eq!(s.low_stock_items, 5);
    // Stockout frequency > 10: P1, P3, P5.
    assert_eq!(s.stockout_risk, 3);
}

#[test]
fn per_store_tables_follow_caller_order() {
    let engine = MetricsEngine::default();
    let inv = inventory();
    let stores = ids(&["S3", "S1", "S2", "S9"]);

    assert_eq!(
        engine.stock_levels_by_store(&inv, &stores),
        vec![sv("Store S3", 151), sv("Store S1", 101), sv("Store S2", 10), sv("Store S9", 0)]
    );
    assert_eq!(
        engine.stockout_frequency_by_store(&inv, &stores),
        vec![sv("Store S3", 1), sv("Store S1", 8), sv("Store S2", 12), sv("Store S9", 0)]
    );
    assert_eq!(
        engine.lead_time_by_store(&inv, &stores),
        vec![sv("Store S3", 16), sv("Store S1", 5), sv("Store S2", 12), sv("Store S9", 0)]
    );
}

#[test]
fn per_store_means_round_half_up() {
    // S1 stock: (101 + 100) / 2 = 100.5 -> 101
    let rows = MetricsEngine::default().stock_levels_by_store(&inventory(), &ids(&["S1"]));
    assert_eq!(rows[0].value, 101);
}

#[test]
fn alerts_keep_feed_order_and_respect_limit() {
    let alerts = monitoring::low_stock_alerts(&inventory(), 3);
    let products: Vec<&str> = alerts.iter().map(|a| a.product_id.as_str()).collect();
    assert_eq!(products, vec!["P1", "P3", "P5"]);
    assert_eq!(alerts[0].store_id, "S2");
    assert_eq!(alerts[0].current_stock, 10);
    assert_eq!(alerts[0].reorder_point, 50);
    assert_eq!(alerts[0].lead_time, 20);

    assert_eq!(monitoring::low_stock_alerts(&inventory(), 0).len(), 0);
    assert_eq!(monitoring::low_stock_alerts(&inventory(), 50).len(), 5);
}

#[test]
fn equal_stock_and_reorder_point_is_not_low() {
    let csv = "Product ID,Store ID,Stock Levels,Reorder Point\nP1,S1,50,50\n";
    let inv: Vec<InventoryRecord> = parse(csv).iter().map(InventoryRecord::from_record).collect();
    assert!(monitoring::low_stock_alerts(&inv, 5).is_empty());
}

#[test]
fn health_distribution_sums_to_100() {
    let health = monitoring::inventory_health();
    assert_eq!(health.len(), 4);
    assert_eq!(health[0].name, "Optimal");
    assert_eq!(health.iter().map(|h| h.value).sum::<u32>(), 100);
}

#[test]
fn panel_on_empty_inventory() {
    let engine = MetricsEngine::default();
    let panel = monitoring::inventory_panel(&engine, &[], &ids(&["S1"]), 5);
    assert_eq!(panel.summary.total_products, 0);
    assert_eq!(panel.summary.avg_stock_level, 0);
    assert_eq!(panel.stock_levels_by_store, vec![sv("Store S1", 0)]);
    assert!(panel.low_stock_alerts.is_empty());
    assert_eq!(panel.inventory_health.len(), 4);
}

// ── Recommendations ─────────────────────────────────────────────

#[test]
fn inventory_insights_counts() {
    let config = DashboardConfig::default_test();
    let insights = recommendations::inventory_insights(&config, &inventory());
    assert_eq!(insights.low_stock_items, 5);
    // Frequency > 15: P1 (S2, 16) and P3 (S2, 18) collapse to one store.
    assert_eq!(insights.high_stockout_stores, vec!["S2".to_string()]);
    // Lead time > 15: P1 (20), P3 (16), P7 (30).
    assert_eq!(insights.long_lead_time_items, 3);
}

#[test]
fn high_stockout_stores_are_first_seen_order() {
    let csv = "\
Product ID,Store ID,Stockout Frequency
A,S9,20
B,S1,30
C,S9,40
D,S4,15
";
    let inv: Vec<InventoryRecord> = parse(csv).iter().map(InventoryRecord::from_record).collect();
    let insights = recommendations::inventory_insights(&DashboardConfig::default_test(), &inv);
    assert_eq!(insights.high_stockout_stores, vec!["S9".to_string(), "S1".to_string()]);
}

#[test]
fn pricing_insights_use_strict_thresholds() {
    let config = DashboardConfig::default_test();
    let insights = recommendations::pricing_insights(&config, &pricing());
    // 1.5 only; 1.2 is not above the threshold.
    assert_eq!(insights.high_elasticity_products, 1);
    // 0.5 only; 0.8 is not below the threshold.
    assert_eq!(insights.low_elasticity_products, 1);
    // 100 > 99 (P1) and 100 > 100.1 fails (P2): one product.
    assert_eq!(insights.competitive_price_products, 1);
}

#[test]
fn insights_on_empty_sets_are_zero() {
    let config = DashboardConfig::default_test();
    let inv = recommendations::inventory_insights(&config, &[]);
    assert_eq!(inv.low_stock_items, 0);
    assert!(inv.high_stockout_stores.is_empty());
    let pr = recommendations::pricing_insights(&config, &[]);
    assert_eq!(pr.high_elasticity_products, 0);
    assert_eq!(pr.competitive_price_products, 0);
}
