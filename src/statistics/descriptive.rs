//! Single-pass moment accumulators.
//!
//! Both accumulators use Welford's update, so a run of identical values
//! keeps the mean exactly equal to that value and the second moment at
//! exactly zero. Constant columns are therefore detected as degenerate
//! without a tolerance.

/// Online mean and variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Welford {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    ///
    /// ```text
    /// δ = x - μₙ₋₁
    /// μₙ = μₙ₋₁ + δ/n
    /// M2ₙ = M2ₙ₋₁ + δ·(x - μₙ)
    /// ```
    pub fn update(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Observations seen.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Running mean (0.0 when empty).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean.
    pub fn sum_sq_dev(&self) -> f64 {
        self.m2
    }

    /// Bessel-corrected sample variance; `NaN` for fewer than 2 values.
    pub fn sample_variance(&self) -> f64 {
        if self.n < 2 {
            return f64::NAN;
        }
        self.m2 / (self.n - 1) as f64
    }

    /// Square root of [`sample_variance`](Self::sample_variance).
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

impl FromIterator<f64> for Welford {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        for x in iter {
            acc.update(x);
        }
        acc
    }
}

/// Online co-moment of paired observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelfordCovariance {
    x: Welford,
    y: Welford,
    /// Σ(x - μx)(y - μy)
    c: f64,
}

impl WelfordCovariance {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (x, y) pair.
    pub fn update(&mut self, x: f64, y: f64) {
        let dx = x - self.x.mean();
        self.x.update(x);
        self.y.update(y);
        self.c += dx * (y - self.y.mean());
    }

    /// Pairs seen.
    pub fn count(&self) -> usize {
        self.x.count()
    }

    /// Marginal accumulator for x.
    pub fn x(&self) -> &Welford {
        &self.x
    }

    /// Marginal accumulator for y.
    pub fn y(&self) -> &Welford {
        &self.y
    }

    /// Pearson correlation, or `None` if either margin has zero spread.
    ///
    /// The n or n-1 normalisation cancels, so the choice of variance
    /// convention does not affect this value.
    pub fn correlation(&self) -> Option<f64> {
        let sxx = self.x.sum_sq_dev();
        let syy = self.y.sum_sq_dev();
        if sxx <= 0.0 || syy <= 0.0 {
            return None;
        }
        Some((self.c / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
    }
}

/// Theoretical standard deviation of the difference between the means of
/// two independent groups of size `group_size` drawn from a population with
/// standard deviation `sigma`: σ·√(2/m).
pub fn standard_error_of_difference(sigma: f64, group_size: usize) -> f64 {
    sigma * (2.0 / group_size as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welford_matches_two_pass() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let acc: Welford = data.iter().copied().collect();
        assert_eq!(acc.count(), 8);
        assert!((acc.mean() - 5.0).abs() < 1e-12);
        // Σ(x-5)² = 32, sample variance = 32/7
        assert!((acc.sample_variance() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values_exact() {
        let acc: Welford = std::iter::repeat(0.1).take(1000).collect();
        assert_eq!(acc.mean(), 0.1);
        assert_eq!(acc.sum_sq_dev(), 0.0);
    }

    #[test]
    fn test_single_value_variance_nan() {
        let acc: Welford = [3.0].into_iter().collect();
        assert!(acc.sample_variance().is_nan());
    }

    #[test]
    fn test_correlation_perfect() {
        let mut acc = WelfordCovariance::new();
        for i in 0..10 {
            acc.update(i as f64, 3.0 * i as f64 - 2.0);
        }
        assert!((acc.correlation().unwrap() - 1.0).abs() < 1e-12);

        let mut neg = WelfordCovariance::new();
        for i in 0..10 {
            neg.update(i as f64, -0.5 * i as f64);
        }
        assert!((neg.correlation().unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_known_value() {
        // x = 1..5, y = [2, 4, 5, 4, 5]: r = 6 / sqrt(10 * 6) ≈ 0.7746
        let ys = [2.0, 4.0, 5.0, 4.0, 5.0];
        let mut acc = WelfordCovariance::new();
        for (i, &y) in ys.iter().enumerate() {
            acc.update((i + 1) as f64, y);
        }
        let expected = 6.0 / (10.0f64 * 6.0).sqrt();
        assert!((acc.correlation().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_degenerate() {
        let mut acc = WelfordCovariance::new();
        for i in 0..5 {
            acc.update(i as f64, 7.0);
        }
        assert_eq!(acc.correlation(), None);
    }

    #[test]
    fn test_standard_error_of_difference() {
        assert!((standard_error_of_difference(10.0, 100) - 10.0 * 0.02f64.sqrt()).abs() < 1e-12);
        let ratio = standard_error_of_difference(1.0, 400) / standard_error_of_difference(1.0, 100);
        assert!((ratio - 0.5).abs() < 1e-12);
    }
}
