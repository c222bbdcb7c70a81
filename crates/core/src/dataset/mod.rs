use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Smallest generated value.
pub const MIN_VALUE: u32 = 1;
/// Largest generated value.
pub const MAX_VALUE: u32 = 100;

/// Bar values shown by the sorting and searching surfaces.
///
/// `initial` is what the last generation produced and what a reset returns
/// to. `canonical` is what is shown between runs; only a completed sort, a
/// reset or a regeneration replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    initial: Vec<u32>,
    canonical: Vec<u32>,
}

impl Dataset {
    pub fn from_values(values: Vec<u32>) -> Self {
        Self {
            canonical: values.clone(),
            initial: values,
        }
    }

    pub fn initial(&self) -> &[u32] {
        &self.initial
    }

    pub fn canonical(&self) -> &[u32] {
        &self.canonical
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Clone handed to an engine for one run.
    pub fn working_copy(&self) -> Vec<u32> {
        self.canonical.clone()
    }

    /// Replaces the canonical values with a completed sort's result.
    pub fn publish(&mut self, values: Vec<u32>) {
        self.canonical = values;
    }

    pub fn restore(&mut self) {
        self.canonical.clone_from(&self.initial);
    }
}

/// Uniform source of dataset values.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    rng: Pcg64,
}

impl DatasetGenerator {
    /// Seeded generator; equal seeds yield equal datasets.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// `size` values drawn uniformly from `1..=100`.
    pub fn generate(&mut self, size: usize) -> Dataset {
        let values = (0..size)
            .map(|_| self.rng.gen_range(MIN_VALUE..=MAX_VALUE))
            .collect();
        Dataset::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_range() {
        let mut generator = DatasetGenerator::seeded(3);
        let dataset = generator.generate(500);
        assert_eq!(dataset.len(), 500);
        assert!(dataset
            .canonical()
            .iter()
            .all(|value| (MIN_VALUE..=MAX_VALUE).contains(value)));
        assert_eq!(dataset.initial(), dataset.canonical());
    }

    #[test]
    fn seeds_are_reproducible() {
        let a = DatasetGenerator::seeded(42).generate(16);
        let b = DatasetGenerator::seeded(42).generate(16);
        assert_eq!(a, b);
    }

    #[test]
    fn publish_keeps_initial_for_restore() {
        let mut dataset = Dataset::from_values(vec![3, 1, 2]);
        dataset.publish(vec![1, 2, 3]);
        assert_eq!(dataset.canonical(), &[1, 2, 3]);
        assert_eq!(dataset.initial(), &[3, 1, 2]);

        dataset.restore();
        assert_eq!(dataset.canonical(), &[3, 1, 2]);
    }
}
