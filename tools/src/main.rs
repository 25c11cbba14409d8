//! insights-runner: headless runner for the retail insights dashboard.
//!
//! Usage:
//!   insights-runner --inventory inv.csv --pricing pricing.csv --store all --time-range 30
//!   insights-runner --config dashboard.json --seed 7 --json
//!   insights-runner --inventory inv.csv --pricing pricing.csv --simulate P0001 --change 10

use anyhow::Result;
use inventory_insights_core::{
    config::DashboardConfig,
    dataset::{Filters, ALL},
    pricing::{PriceSimulation, PricingEngine},
    rng::RngBank,
    source::{FeedLoader, FsTextSource},
    view_model::{derive_view_model, DashboardState, DashboardViewModel},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    log::debug!("runner: args={:?}", args.iter().skip(1).collect::<Vec<_>>());

    let mut config = match find_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = find_arg(&args, "--inventory") {
        config.feeds.inventory = path.to_string();
    }
    if let Some(path) = find_arg(&args, "--pricing") {
        config.feeds.pricing = path.to_string();
    }
    if let Some(seed) = parse_flag(&args, "--seed")? {
        config.seed = Some(seed);
    }

    let filters = Filters::new(
        find_arg(&args, "--store").unwrap_or(ALL),
        find_arg(&args, "--time-range").unwrap_or("30"),
        find_arg(&args, "--category").unwrap_or(ALL),
    );

    if filters.product_category != ALL && !config.category_keys().contains(&filters.product_category) {
        log::warn!("runner: category {:?} is not a configured category", filters.product_category);
    }

    if !json_mode {
        println!("Retail Insights: insights-runner");
        println!("  inventory:  {}", config.feeds.inventory);
        println!("  pricing:    {}", config.feeds.pricing);
        println!("  store:      {:?}", filters.store);
        println!("  time range: {} days", filters.time_range.days());
        println!("  seed:       {:?}", config.seed);
        println!();
    }

    let datasets = FeedLoader::load(&FsTextSource::new(), &config.feeds);
    let state = DashboardState::new(datasets, filters);

    let rng_bank = match config.seed {
        Some(seed) => RngBank::new(seed),
        None => RngBank::from_entropy(),
    };
    let today = chrono::Local::now().date_naive();
    let vm = derive_view_model(&state, &config, &rng_bank, today);

    let simulation = match find_arg(&args, "--simulate") {
        Some(product_id) => {
            let change: f64 = parse_flag(&args, "--change")?.unwrap_or(0.0);
            let view = state.datasets.filtered(&state.filters.store);
            Some(PricingEngine::new(&config).simulate_for_product(&view.pricing, product_id, change)?)
        }
        None => None,
    };

    if json_mode {
        let out = serde_json::json!({
            "view_model": vm,
            "simulation": simulation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_summary(&vm);
        if let Some(sim) = &simulation {
            print_simulation(sim);
        }
    }

    Ok(())
}

fn print_summary(vm: &DashboardViewModel) {
    let k = &vm.key_metrics;
    let inv = &vm.inventory.summary;

    println!("=== KEY METRICS ===");
    println!("  inventory turnover:    {:.1} times/year", k.inventory_turnover);
    println!("  stockout rate:         {:.1}%", k.stockout_rate);
    println!("  holding cost:          ${:.2}", k.holding_cost);
    println!("  sales growth:          {:.1}%", k.sales_growth);
    println!("  profit margin:         {:.1}%", k.profit_margin);
    println!("  customer satisfaction: {:.1}", k.customer_satisfaction);

    println!();
    println!("=== INVENTORY ===");
    println!("  stores:          {}", vm.store_ids.len());
    println!("  total products:  {}", inv.total_products);
    println!("  avg stock level: {} units", inv.avg_stock_level);
    println!("  low stock items: {}", inv.low_stock_items);
    println!("  stockout risk:   {}", inv.stockout_risk);
    if vm.inventory.low_stock_alerts.is_empty() {
        println!("  (No low stock alerts)");
    } else {
        for a in &vm.inventory.low_stock_alerts {
            println!(
                "  ALERT {} @ Store {} | stock {} < reorder {} | lead time {} days",
                a.product_id, a.store_id, a.current_stock, a.reorder_point, a.lead_time
            );
        }
    }

    println!();
    println!("=== PRICING ===");
    if vm.pricing.products.is_empty() {
        println!("  (No pricing data)");
    } else {
        for p in &vm.pricing.products {
            println!(
                "  {} @ Store {} | ${:.2} -> ${:.2} ({:+.1}%) | {}",
                p.product_id,
                p.store_id,
                p.current_price,
                p.recommended_price,
                p.price_change,
                p.reason.description()
            );
        }
    }

    println!();
    println!("=== RECOMMENDATIONS ===");
    let ri = &vm.recommendations.inventory;
    let rp = &vm.recommendations.pricing;
    println!("  low stock items:        {}", ri.low_stock_items);
    println!("  high stockout stores:   {}", ri.high_stockout_stores.join(", "));
    println!("  long lead time items:   {}", ri.long_lead_time_items);
    println!("  high elasticity:        {}", rp.high_elasticity_products);
    println!("  low elasticity:         {}", rp.low_elasticity_products);
    println!("  priced above market:    {}", rp.competitive_price_products);
}

fn print_simulation(sim: &PriceSimulation) {
    println!();
    println!("=== PRICE SIMULATION ({:+.1}%) ===", sim.price_change);
    println!("  price:   ${:.2} -> ${:.2}", sim.current_price, sim.new_price);
    println!(
        "  volume:  {} -> {} ({:+.1}%)",
        sim.current_volume, sim.new_volume_units, sim.volume_change
    );
    println!(
        "  revenue: ${:.2} -> ${:.2} ({:+.1}%)",
        sim.current_revenue, sim.new_revenue, sim.revenue_change
    );
    println!(
        "  profit:  ${:.2} -> ${:.2} ({:+.1}%)",
        sim.current_profit, sim.new_profit, sim.profit_change
    );
    println!("  margin:  {:.1}% -> {:.1}%", sim.current_margin, sim.new_margin);
    println!("  verdict: {}", sim.verdict.tag());
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// `Ok(None)` when the flag is absent; an error when its value does not parse.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    match find_arg(args, flag) {
        None => Ok(None),
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => anyhow::bail!("invalid value {raw:?} for {flag}"),
        },
    }
}
