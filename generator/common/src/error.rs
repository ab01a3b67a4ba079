//! Errors raised while assembling a dataset.

use thiserror::Error;

/// Errors raised while resolving a selection or drawing samples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// A selected name is not present in the registry.
    #[error("unknown distribution {name:?} (known: {known})")]
    UnknownDistribution {
        /// The name that was looked up.
        name: String,
        /// Comma separated list of registered names.
        known: String,
    },
    /// The parameters of a distribution are outside the domain of its sampling routine.
    #[error("invalid parameters for distribution {name:?}: {reason}")]
    InvalidParameters {
        /// Registry name of the distribution.
        name: String,
        /// Reason reported by the sampling routine.
        reason: String,
    },
}
