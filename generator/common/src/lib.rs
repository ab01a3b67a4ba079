//! Building blocks of the sample generator.
//!
//! A [`Registry`](registry::Registry) names the available distributions, the
//! [`builder`] draws samples for a selection of them, and [`random`] creates the
//! generator that is threaded through a run.

pub mod builder;
pub mod distribution;
pub mod error;
pub mod random;
pub mod registry;

pub use builder::{build, build_with_progress, Block, SampleBatch};
pub use distribution::{DistributionKind, Sampler};
pub use error::DatasetError;
pub use registry::{DistributionSpec, Registry, DEFAULT_SELECTION};
