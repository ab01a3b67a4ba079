//! Assembling a dataset from a selection of distributions.

use std::ops::Range;

use rand::Rng;
use rand_distr::Distribution;
use tracing::{debug, info, instrument};

use crate::error::DatasetError;
use crate::registry::Registry;

/// Number of samples drawn between two progress callbacks.
const PROGRESS_CHUNK: usize = 4096;

/// Position of one distribution's samples inside a [`SampleBatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Registry name of the distribution.
    pub name: String,
    /// Indices of the samples drawn from it.
    pub range: Range<usize>,
}

/// Samples of all selected distributions, concatenated in selection order.
///
/// The samples of each distribution are contiguous; [`SampleBatch::blocks()`] tells where
/// each one starts and ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleBatch {
    values: Vec<f64>,
    blocks: Vec<Block>,
}

impl SampleBatch {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The samples belonging to one block.
    pub fn block_values(&self, block: &Block) -> &[f64] {
        &self.values[block.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Draw the configured number of samples from every selected distribution.
///
/// See [`build_with_progress()`].
pub fn build<R, S>(
    selection: &[S],
    registry: &Registry,
    rng: &mut R,
) -> Result<SampleBatch, DatasetError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    build_with_progress(selection, registry, rng, |_| {})
}

/// Draw the configured number of samples from every selected distribution.
///
/// All names are resolved and all samplers are constructed before the first value is drawn,
/// so an unknown name or invalid parameters leave the generator untouched.
///
/// # Arguments
/// * `selection` - Names of the distributions to sample, in output order.
/// * `registry` - Where the names are looked up.
/// * `rng` - The generator all distributions draw from. It is not reset between distributions.
/// * `progress` - Called with the number of samples drawn since the previous call.
#[instrument(skip_all, fields(distributions = selection.len()))]
pub fn build_with_progress<R, S, F>(
    selection: &[S],
    registry: &Registry,
    rng: &mut R,
    mut progress: F,
) -> Result<SampleBatch, DatasetError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
    F: FnMut(u64),
{
    let specs = registry.resolve(selection)?;
    let samplers = specs
        .iter()
        .map(|spec| {
            spec.kind
                .sampler()
                .map_err(|reason| DatasetError::InvalidParameters {
                    name: spec.name.clone(),
                    reason,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total: usize = specs.iter().map(|spec| spec.sample_count).sum();
    let mut values = Vec::with_capacity(total);
    let mut blocks = Vec::with_capacity(specs.len());

    for (spec, sampler) in specs.iter().zip(samplers.iter()) {
        info!(
            "Drawing {} samples from {} {:?}...",
            spec.sample_count,
            spec.kind.family(),
            spec.kind.parameters()
        );

        let start = values.len();
        let mut remaining = spec.sample_count;
        while remaining > 0 {
            let n = remaining.min(PROGRESS_CHUNK);
            values.extend(sampler.sample_iter(&mut *rng).take(n));
            progress(n as u64);
            remaining -= n;
        }

        debug!("Block {:?} spans {}..{}", spec.name, start, values.len());
        blocks.push(Block {
            name: spec.name.clone(),
            range: start..values.len(),
        });
    }

    Ok(SampleBatch { values, blocks })
}
