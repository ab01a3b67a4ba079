use clap::{Parser, ValueHint};
use generator_common::random::seeded_rng;
use generator_common::Registry;
use rand::rngs::StdRng;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "distribution_data/combined_data.txt";

/// Sample Generator
///
/// Draws samples from the built-in lognormal, Weibull and normal distributions and writes
/// them, together with their parameters, to a single dataset file.
#[derive(Parser, Debug, Clone)]
pub struct Args {
    #[clap(short, long, parse(from_os_str), value_hint = ValueHint::FilePath, default_value = DEFAULT_OUTPUT)]
    /// File to write the dataset to (header followed by one value per line)
    pub output: PathBuf,
    /// Seed value (a random one is generated and logged when omitted)
    #[clap(long, short)]
    pub seed: Option<u64>,
    #[clap(long, parse(from_os_str), value_hint = ValueHint::FilePath)]
    /// File to write the histogram to (svg)
    pub histogram: Option<PathBuf>,
    /// Number of histogram bins
    #[clap(long, default_value_t = crate::histogram::DEFAULT_BINS)]
    pub bins: usize,
    /// Read the dataset file back after writing and check it against the samples
    #[clap(long)]
    pub verify: bool,
    /// Log filter, overrides RUST_LOG
    #[clap(long)]
    pub log_filter: Option<String>,
}

impl Args {
    /// Arguments for a run writing to `output` with everything else at its default.
    pub fn with_output(output: impl Into<PathBuf>) -> Self {
        Args {
            output: output.into(),
            seed: None,
            histogram: None,
            bins: crate::histogram::DEFAULT_BINS,
            verify: false,
            log_filter: None,
        }
    }

    pub fn get_registry(&self) -> Registry {
        Registry::builtin()
    }

    /// The generator for this run and the seed it was created from.
    pub fn get_rng(&self) -> (StdRng, u64) {
        seeded_rng(self.seed)
    }
}
