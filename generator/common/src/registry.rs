//! The table of distributions a dataset can be assembled from.

use std::collections::BTreeMap;

use crate::distribution::DistributionKind;
use crate::error::DatasetError;

/// Distributions sampled by default, in output order.
pub const DEFAULT_SELECTION: [&str; 3] = ["lognormal", "weibull", "normal"];

/// Number of samples drawn from each default distribution.
pub const DEFAULT_SAMPLE_COUNT: usize = 50_000;

/// A named distribution and the number of samples to draw from it.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionSpec {
    pub name: String,
    pub kind: DistributionKind,
    pub sample_count: usize,
}

impl DistributionSpec {
    pub fn new(name: impl Into<String>, kind: DistributionKind, sample_count: usize) -> Self {
        DistributionSpec {
            name: name.into(),
            kind,
            sample_count,
        }
    }

    /// The values written after the name in a dataset header.
    ///
    /// Parameters use Rust's `{:?}` float formatting: the shortest representation that
    /// round-trips, always with a fractional part (`1.0`, `0.3`). Magnitudes below `1e-4` or
    /// from `1e16` up switch to exponent form without padding (`1e-7`, not `1e-07`).
    /// The sample count follows as an integer.
    pub fn header_fields(&self) -> Vec<String> {
        self.kind
            .parameters()
            .iter()
            .map(|p| format!("{:?}", p))
            .chain(std::iter::once(self.sample_count.to_string()))
            .collect()
    }
}

/// Mapping from distribution name to its [`DistributionSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    specs: BTreeMap<String, DistributionSpec>,
}

impl Registry {
    /// The registry with the built-in parameter table.
    pub fn builtin() -> Self {
        Registry::empty()
            .with(DistributionSpec::new(
                "lognormal",
                DistributionKind::LogNormal { mu: 3.0, sigma: 0.3 },
                DEFAULT_SAMPLE_COUNT,
            ))
            .with(DistributionSpec::new(
                "weibull",
                DistributionKind::Weibull {
                    shape: 1.0,
                    scale: 2.5,
                },
                DEFAULT_SAMPLE_COUNT,
            ))
            .with(DistributionSpec::new(
                "normal",
                DistributionKind::Normal {
                    mean: 9.0,
                    std_dev: 2.0,
                },
                DEFAULT_SAMPLE_COUNT,
            ))
    }

    pub fn empty() -> Self {
        Registry {
            specs: BTreeMap::new(),
        }
    }

    /// Add a distribution, replacing any registered under the same name.
    pub fn insert(&mut self, spec: DistributionSpec) -> Option<DistributionSpec> {
        self.specs.insert(spec.name.clone(), spec)
    }

    pub fn with(mut self, spec: DistributionSpec) -> Self {
        self.insert(spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DistributionSpec> {
        self.specs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Look up a single name.
    pub fn lookup(&self, name: &str) -> Result<&DistributionSpec, DatasetError> {
        self.get(name)
            .ok_or_else(|| DatasetError::UnknownDistribution {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Look up every name of a selection, keeping the selection order.
    ///
    /// Fails on the first name that is not registered.
    pub fn resolve<S: AsRef<str>>(
        &self,
        selection: &[S],
    ) -> Result<Vec<&DistributionSpec>, DatasetError> {
        selection.iter().map(|n| self.lookup(n.as_ref())).collect()
    }

    /// Total number of samples a selection produces.
    pub fn total_samples<S: AsRef<str>>(&self, selection: &[S]) -> Result<usize, DatasetError> {
        Ok(self
            .resolve(selection)?
            .iter()
            .map(|spec| spec.sample_count)
            .sum())
    }
}
