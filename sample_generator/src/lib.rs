use std::path::PathBuf;

use anyhow::{ensure, Context};
use generator_common::{build_with_progress, Registry, SampleBatch, DEFAULT_SELECTION};
use tracing::info;

use crate::args::Args;
use crate::dataset_file::DatasetFile;
use crate::histogram::Histogram;

pub mod args;
#[cfg(feature = "benchmark")]
pub mod benchmark;
pub mod dataset_file;
pub mod histogram;
pub mod pbar;
#[cfg(test)]
pub mod tests;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Seed the generator was created from.
    pub seed: u64,
    /// Number of values written.
    pub samples: usize,
    pub output: PathBuf,
    pub histogram: Option<PathBuf>,
}

/// Sample the built-in distributions and write the dataset described by `app`.
pub fn run_app(app: &Args) -> anyhow::Result<RunReport> {
    run_selection(app, &app.get_registry(), &DEFAULT_SELECTION)
}

/// Sample `selection` from `registry` and write the dataset described by `app`.
pub fn run_selection<S: AsRef<str>>(
    app: &Args,
    registry: &Registry,
    selection: &[S],
) -> anyhow::Result<RunReport> {
    let (mut rng, seed) = app.get_rng();
    info!("Using seed {}", seed);

    let total = registry.total_samples(selection)?;
    info!(
        "Sampling {} values from {} distributions...",
        total,
        selection.len()
    );

    pbar::create_progress_bar(total as u64);
    let batch = build_with_progress(selection, registry, &mut rng, pbar::increment_progress);
    pbar::finish_progress_bar();
    let batch = batch?;

    log_block_summaries(&batch);

    info!("Writing dataset file...");
    dataset_file::write_dataset_file(&app.output, selection, registry, &batch)
        .with_context(|| format!("writing dataset to {}", app.output.display()))?;
    info!("Done writing!");

    if app.verify {
        info!("Verifying dataset file...");
        let file = dataset_file::read_dataset_file(&app.output)
            .with_context(|| format!("reading back {}", app.output.display()))?;
        verify_dataset(&file, selection, &batch)?;
        info!("Dataset file verified.");
    }

    if let Some(p) = &app.histogram {
        info!("Drawing histogram...");
        let histogram = Histogram::from_samples(batch.values(), app.bins);
        histogram::render_histogram(&histogram, p)
            .with_context(|| format!("drawing histogram to {}", p.display()))?;
    }

    Ok(RunReport {
        seed,
        samples: batch.len(),
        output: app.output.clone(),
        histogram: app.histogram.clone(),
    })
}

fn log_block_summaries(batch: &SampleBatch) {
    for block in batch.blocks() {
        let values = batch.block_values(block);
        if values.is_empty() {
            info!("{}: no samples", block.name);
            continue;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        info!(
            "{}: {} samples, min = {:.4}, mean = {:.4}, max = {:.4}",
            block.name,
            values.len(),
            min,
            mean,
            max
        );
    }
}

/// Check a parsed dataset file against the selection and samples it was written from.
pub fn verify_dataset<S: AsRef<str>>(
    file: &DatasetFile,
    selection: &[S],
    batch: &SampleBatch,
) -> anyhow::Result<()> {
    ensure!(
        file.distributions.len() == selection.len(),
        "expected {} distributions in header, found {}",
        selection.len(),
        file.distributions.len()
    );
    for (i, (header, name)) in file.distributions.iter().zip(selection).enumerate() {
        let name: &str = name.as_ref();
        ensure!(
            header.name == name,
            "header line {} names {:?}, expected {:?}",
            i + 2,
            header.name,
            name
        );
    }
    ensure!(
        file.values.len() == batch.len(),
        "expected {} values, found {}",
        batch.len(),
        file.values.len()
    );
    for (i, (read, drawn)) in file.values.iter().zip(batch.values()).enumerate() {
        let same = read == drawn
            || (read - drawn).abs() <= 1e-12 * drawn.abs().max(1.0)
            || (read.is_nan() && drawn.is_nan());
        ensure!(same, "value {} reads back as {}, drew {}", i, read, drawn);
    }
    Ok(())
}
