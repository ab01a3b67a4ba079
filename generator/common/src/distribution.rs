//! Parametric distribution kinds and the samplers that draw from them.

use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal, Weibull};
use strum::IntoStaticStr;

/// A distribution family together with its parameters.
///
/// Each variant maps onto one sampling routine from [`rand_distr`].
/// Parameters are not checked here; [`DistributionKind::sampler()`] rejects the ones
/// the underlying routine cannot handle.
#[derive(Clone, Copy, Debug, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DistributionKind {
    /// Lognormal distribution.
    LogNormal {
        /// Mean of the underlying normal distribution.
        mu: f64,
        /// Standard deviation of the underlying normal distribution.
        sigma: f64,
    },
    /// Weibull distribution.
    ///
    /// Values are drawn from the standard Weibull distribution with the given `shape`
    /// and multiplied by `scale` afterwards.
    Weibull {
        /// Shape parameter `k`.
        shape: f64,
        /// Scale parameter `λ`.
        scale: f64,
    },
    /// Normal (Gaussian) distribution.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        std_dev: f64,
    },
}

impl DistributionKind {
    /// Name of the distribution family, e.g. `"weibull"`.
    pub fn family(&self) -> &'static str {
        self.into()
    }

    /// The parameters of this distribution, in the order they are written to dataset headers.
    pub fn parameters(&self) -> [f64; 2] {
        match *self {
            DistributionKind::LogNormal { mu, sigma } => [mu, sigma],
            DistributionKind::Weibull { shape, scale } => [shape, scale],
            DistributionKind::Normal { mean, std_dev } => [mean, std_dev],
        }
    }

    /// Build a sampler for this distribution.
    ///
    /// Returns a description of the problem if the parameters are outside the domain of
    /// the sampling routine (e.g. a negative standard deviation or a non-positive shape).
    pub fn sampler(&self) -> Result<Sampler, String> {
        match *self {
            DistributionKind::LogNormal { mu, sigma } => LogNormal::new(mu, sigma)
                .map(Sampler::LogNormal)
                .map_err(|e| e.to_string()),
            DistributionKind::Weibull { shape, scale } => Weibull::new(1.0, shape)
                .map(|standard| Sampler::Weibull { standard, scale })
                .map_err(|e| e.to_string()),
            DistributionKind::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .map(Sampler::Normal)
                .map_err(|e| e.to_string()),
        }
    }
}

/// Ready-to-use sampler for a [`DistributionKind`].
#[derive(Clone, Copy, Debug)]
pub enum Sampler {
    LogNormal(LogNormal<f64>),
    Weibull {
        /// Weibull distribution with scale `1`.
        standard: Weibull<f64>,
        /// Multiplier applied after drawing.
        scale: f64,
    },
    Normal(Normal<f64>),
}

impl Distribution<f64> for Sampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::LogNormal(d) => d.sample(rng),
            Sampler::Weibull { standard, scale } => scale * standard.sample(rng),
            Sampler::Normal(d) => d.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::*;

    #[rstest]
    #[case(DistributionKind::LogNormal { mu: 3.0, sigma: 0.3 }, "lognormal", [3.0, 0.3])]
    #[case(DistributionKind::Weibull { shape: 1.0, scale: 2.5 }, "weibull", [1.0, 2.5])]
    #[case(DistributionKind::Normal { mean: 9.0, std_dev: 2.0 }, "normal", [9.0, 2.0])]
    fn names_and_parameters(
        #[case] kind: DistributionKind,
        #[case] family: &str,
        #[case] params: [f64; 2],
    ) {
        assert_eq!(kind.family(), family);
        assert_eq!(kind.parameters(), params);
    }

    #[rstest]
    #[case(DistributionKind::LogNormal { mu: 0.0, sigma: -1.0 })]
    #[case(DistributionKind::Normal { mean: 0.0, std_dev: -2.0 })]
    #[case(DistributionKind::Normal { mean: 0.0, std_dev: f64::NAN })]
    #[case(DistributionKind::Weibull { shape: 0.0, scale: 1.0 })]
    #[case(DistributionKind::Weibull { shape: -1.5, scale: 1.0 })]
    fn rejects_bad_parameters(#[case] kind: DistributionKind) {
        assert!(kind.sampler().is_err(), "{:?} should be rejected", kind);
    }

    #[test]
    fn lognormal_is_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampler = DistributionKind::LogNormal { mu: 3.0, sigma: 0.3 }
            .sampler()
            .unwrap();
        assert!((0..1000).all(|_| sampler.sample(&mut rng) > 0.0));
    }

    #[test]
    fn weibull_scale_is_applied_after_drawing() {
        let standard = DistributionKind::Weibull { shape: 1.5, scale: 1.0 }
            .sampler()
            .unwrap();
        let scaled = DistributionKind::Weibull { shape: 1.5, scale: 2.5 }
            .sampler()
            .unwrap();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let a = standard.sample(&mut rng_a);
            let b = scaled.sample(&mut rng_b);
            assert!(a >= 0.0);
            assert!((b - 2.5 * a).abs() <= 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn normal_mean_is_close() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = DistributionKind::Normal { mean: 9.0, std_dev: 2.0 }
            .sampler()
            .unwrap();
        let n = 20_000;
        let mean = (0..n).map(|_| sampler.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 9.0).abs() < 0.1, "mean = {}", mean);
    }
}
