//! Random number sources for the simulated chart generators.
//!
//! RULE: Nothing in this crate may call a platform RNG directly.
//! Every simulated value is drawn through a `RandomSource`, and the
//! aggregates computed from real feed data never touch one at all.
//!
//! Each generator gets its own stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Adding a new generator never changes existing generators' streams.
//!   - Each generator's output is reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Anything that can hand out uniform floats in [0.0, 1.0).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Roll a float in [low, high).
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

/// A named, deterministic RNG for a single generator.
pub struct SeededRng {
    pub name: &'static str,
    inner:    Pcg64Mcg,
}

impl SeededRng {
    /// Create a generator RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name:  "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// All generator RNGs for one view-model derivation, indexed by slot.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Bank seeded from the thread RNG, for interactive use where
    /// reproducibility does not matter.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::debug!("rng: master seed drawn from entropy: {seed}");
        Self::new(seed)
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_generator(&self, slot: GeneratorSlot) -> SeededRng {
        SeededRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries. Only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    TimeSeries      = 0,
    StoreHeatmap    = 1,
    ProductForecast = 2,
    PriceTrend      = 3,
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeSeries      => "time_series",
            Self::StoreHeatmap    => "store_heatmap",
            Self::ProductForecast => "product_forecast",
            Self::PriceTrend      => "price_trend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank = RngBank::new(12345);
        let mut a = bank.for_generator(GeneratorSlot::PriceTrend);
        let mut b = bank.for_generator(GeneratorSlot::PriceTrend);
        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn slots_get_independent_streams() {
        let bank = RngBank::new(12345);
        let mut a = bank.for_generator(GeneratorSlot::TimeSeries);
        let mut b = bank.for_generator(GeneratorSlot::StoreHeatmap);
        let xs: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();
        assert_ne!(xs, ys, "Distinct slots should not share a stream");
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = RngBank::new(7).for_generator(GeneratorSlot::ProductForecast);
        for _ in 0..1000 {
            let v = rng.uniform(0.95, 1.05);
            assert!((0.95..1.05).contains(&v), "out of range: {v}");
        }
    }
}
