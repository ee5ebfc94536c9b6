/// Weighted sampling and seeded streams shared by every generator.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A categorical distribution over a fixed set of items.
///
/// Weights need not sum to 1; an item is drawn with probability
/// proportional to its weight.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    dist: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(item, weight)` pairs.
    ///
    /// Returns `None` if there are no entries, a weight is negative or
    /// not finite, or every weight is zero.
    pub fn new<I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (items, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        if weights.iter().any(|w| !w.is_finite()) {
            return None;
        }
        let dist = WeightedIndex::new(&weights).ok()?;
        Some(Self { items, dist })
    }

    pub fn sample(&self, rng: &mut StdRng) -> &T {
        &self.items[self.dist.sample(rng)]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Bernoulli trial: true with probability `p`.
pub fn chance(rng: &mut StdRng, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Derive an independent seed for a numbered sub-stream of `master`.
///
/// Stream indices must stay stable once assigned, otherwise seeded output
/// changes.
pub fn derive_seed(master: u64, stream: u64) -> u64 {
    master ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Seeded stream for a numbered sub-generator.
pub fn stream_rng(master: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(master, stream))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rejects_degenerate_weights() {
        assert!(WeightedTable::<char>::new(Vec::new()).is_none());
        assert!(WeightedTable::new(vec![('a', 0.0), ('b', 0.0)]).is_none());
        assert!(WeightedTable::new(vec![('a', -1.0), ('b', 2.0)]).is_none());
        assert!(WeightedTable::new(vec![('a', f64::NAN)]).is_none());
    }

    #[test]
    fn table_never_samples_zero_weight() {
        let table = WeightedTable::new(vec![('a', 0.0), ('b', 1.0), ('c', 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_eq!(*table.sample(&mut rng), 'b');
        }
    }

    #[test]
    fn table_follows_weights() {
        let table = WeightedTable::new(vec![("heavy", 0.9), ("light", 0.1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let heavy = (0..10_000)
            .filter(|_| *table.sample(&mut rng) == "heavy")
            .count();
        let share = heavy as f64 / 10_000.0;
        assert!((share - 0.9).abs() < 0.02, "share was {}", share);
    }

    #[test]
    fn table_sampling_deterministic() {
        let table = WeightedTable::new(vec![(2, 0.4), (3, 0.5), (4, 0.1)]).unwrap();
        assert_eq!(table.len(), 3);
        let mut rng1 = StdRng::seed_from_u64(3);
        let mut rng2 = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(table.sample(&mut rng1), table.sample(&mut rng2));
        }
    }

    #[test]
    fn derived_streams_differ() {
        let mut a = stream_rng(99, 1);
        let mut b = stream_rng(99, 2);
        let xs: Vec<u64> = (0..4).map(|_| a.gen()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.gen()).collect();
        assert_ne!(xs, ys);
    }
}
