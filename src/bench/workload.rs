use rand::{rngs::StdRng, Rng, SeedableRng};

/// The integers a benchmark run feeds to a structure.
///
/// `n` values are drawn uniformly from `[0, 10 * n]` by a generator seeded
/// with `seed`, so equal arguments always produce the same workload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    values: Vec<i32>,
}

impl Workload {
    pub fn generate(n: usize, seed: u64) -> Self {
        let upper = n.saturating_mul(10).min(i32::MAX as usize) as i32;
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..n).map(|_| rng.gen_range(0..=upper)).collect();
        Self { values }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values with every occurrence of `value` left out.
    pub fn without(&self, value: i32) -> Vec<i32> {
        self.values.iter().copied().filter(|v| *v != value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Workload;

    #[test]
    fn seeded_and_bounded() {
        let workload = Workload::generate(1_000, 42);
        assert_eq!(workload.len(), 1_000);
        assert!(workload.values().iter().all(|v| (0..=10_000).contains(v)));
        assert_eq!(workload, Workload::generate(1_000, 42));
        assert_ne!(workload, Workload::generate(1_000, 43));
    }

    #[test]
    fn without_drops_every_occurrence() {
        let workload = Workload::generate(3, 7);
        let first = workload.values()[0];
        let rest = workload.without(first);
        assert!(!rest.contains(&first));
        assert_eq!(
            rest.len(),
            workload.values().iter().filter(|v| **v != first).count()
        );
    }

    #[test]
    fn empty() {
        assert!(Workload::generate(0, 42).is_empty());
    }
}
