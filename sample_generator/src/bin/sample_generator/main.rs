use clap::Parser;
use sample_generator::args::Args;
use sample_generator::{pbar, run_app};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let app = Args::parse();
    pbar::setup_logging(app.log_filter.clone());

    anyhow::ensure!(app.bins >= 1, "Number of histogram bins must be at least 1.");

    let report = run_app(&app)?;

    info!(
        "Wrote {} samples to {} (seed {})",
        report.samples,
        report.output.display(),
        report.seed
    );
    Ok(())
}
