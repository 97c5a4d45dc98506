//! Disjoint subsample drawing.

use rand::seq::index;
use rand::Rng;

use crate::dataset::Dataset;
use crate::error::ResampleError;
use crate::statistic::Group;

/// Counter-based RNG seed generation using SplitMix64.
///
/// This is a stateless PRF that generates deterministic, well-distributed
/// seeds from a base seed and counter. Each trial gets its own stream, so
/// the outcome of trial `i` does not depend on which thread ran it or on
/// how many trials ran before it.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64: https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Draws two disjoint groups of `group_size` rows per call.
#[derive(Debug, Clone, Copy)]
pub struct Subsampler<'a> {
    dataset: &'a Dataset,
    group_size: usize,
}

impl<'a> Subsampler<'a> {
    /// Validate `group_size` against the dataset.
    ///
    /// Fails with [`ResampleError::InvalidSampleSize`] unless
    /// `1 <= group_size` and `2 * group_size <= dataset.len()`.
    pub fn new(dataset: &'a Dataset, group_size: usize) -> Result<Self, ResampleError> {
        let fits = group_size
            .checked_mul(2)
            .is_some_and(|pool| pool <= dataset.len());
        if group_size == 0 || !fits {
            return Err(ResampleError::InvalidSampleSize {
                group_size,
                dataset_len: dataset.len(),
            });
        }
        Ok(Self {
            dataset,
            group_size,
        })
    }

    /// Rows per group.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The dataset being sampled.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Draw `2m` distinct rows uniformly without replacement; the first `m`
    /// form group 1 and the rest group 2.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (Group<'a>, Group<'a>) {
        let mut pool = index::sample(rng, self.dataset.len(), 2 * self.group_size).into_vec();
        let second = pool.split_off(self.group_size);
        (
            Group::new(self.dataset, pool),
            Group::new(self.dataset, second),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;

    fn dataset(n: usize) -> Dataset {
        Dataset::builder()
            .numeric_dense("x", (0..n).map(|i| i as f64).collect())
            .build()
            .unwrap()
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let data = dataset(10);
        assert_eq!(
            Subsampler::new(&data, 0).unwrap_err(),
            ResampleError::InvalidSampleSize {
                group_size: 0,
                dataset_len: 10
            }
        );
        assert!(Subsampler::new(&data, 6).is_err());
        assert!(Subsampler::new(&data, usize::MAX).is_err());
        assert!(Subsampler::new(&data, 5).is_ok());
    }

    #[test]
    fn test_groups_are_disjoint_and_sized() {
        let data = dataset(50);
        let sampler = Subsampler::new(&data, 12).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        for _ in 0..100 {
            let (g1, g2) = sampler.draw(&mut rng);
            assert_eq!(g1.len(), 12);
            assert_eq!(g2.len(), 12);

            let rows: HashSet<usize> = g1.rows().iter().chain(g2.rows()).copied().collect();
            assert_eq!(rows.len(), 24, "groups overlap or repeat rows");
            assert!(rows.iter().all(|&r| r < 50));
        }
    }

    #[test]
    fn test_full_partition() {
        // 2m == N uses every row exactly once
        let data = dataset(8);
        let sampler = Subsampler::new(&data, 4).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let (g1, g2) = sampler.draw(&mut rng);
        let mut rows: Vec<usize> = g1.rows().iter().chain(g2.rows()).copied().collect();
        rows.sort_unstable();
        assert_eq!(rows, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_is_roughly_uniform() {
        let data = dataset(20);
        let sampler = Subsampler::new(&data, 2).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut hits = [0usize; 20];

        for _ in 0..10_000 {
            let (g1, g2) = sampler.draw(&mut rng);
            for &r in g1.rows().iter().chain(g2.rows()) {
                hits[r] += 1;
            }
        }
        // Expected 2000 per row, sd ≈ 42
        for (row, &h) in hits.iter().enumerate() {
            assert!((1700..2300).contains(&h), "row {} drawn {} times", row, h);
        }
    }

    #[test]
    fn test_counter_seed_distinct() {
        let seeds: HashSet<u64> = (0..1000).map(|i| counter_rng_seed(42, i)).collect();
        assert_eq!(seeds.len(), 1000);
        assert_eq!(counter_rng_seed(42, 3), counter_rng_seed(42, 3));
        assert_ne!(counter_rng_seed(42, 3), counter_rng_seed(43, 3));
    }
}
