//! Density histogram of a sample batch.

use std::path::Path;

use plotters::prelude::*;
use tracing::{info, warn};

pub const DEFAULT_BINS: usize = 100;

/// Equal-width histogram normalized to a probability density.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Partition the range of `values` into `bins` equal-width bins.
    ///
    /// The last bin includes its right edge. Non-finite values are ignored.
    /// If all values are equal, the range is widened to `value ± 0.5`.
    pub fn from_samples(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite = values.iter().copied().filter(|v| v.is_finite());

        let (min, max) = finite
            .clone()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return Histogram {
                start: 0.0,
                bin_width: 0.0,
                counts: Vec::new(),
            };
        }

        let (start, end) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let bin_width = (end - start) / bins as f64;

        let mut counts = vec![0u64; bins];
        for v in finite {
            let i = (((v - start) / bin_width) as usize).min(bins - 1);
            counts[i] += 1;
        }

        Histogram {
            start,
            bin_width,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.counts.len() as f64
    }

    /// Number of values counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Height of every bar, such that the bars integrate to one.
    pub fn densities(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts
            .iter()
            .map(|&c| c as f64 / (total * self.bin_width))
            .collect()
    }

    /// `(left edge, right edge, density)` of every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.densities().into_iter().enumerate().map(move |(i, d)| {
            let left = self.start + self.bin_width * i as f64;
            (left, left + self.bin_width, d)
        })
    }
}

/// Draw `histogram` as an svg image at `path`.
pub fn render_histogram<P: AsRef<Path>>(histogram: &Histogram, path: P) -> anyhow::Result<()> {
    if histogram.is_empty() {
        warn!("No finite samples, not drawing a histogram.");
        return Ok(());
    }

    let max_density = histogram.densities().into_iter().fold(0.0f64, f64::max);
    let bar_style = GREEN.mix(0.6).filled();

    let root = SVGBackend::new(path.as_ref(), (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(25, 25, 25, 25);

    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .set_all_label_area_size(50)
        .build_cartesian_2d(histogram.start..histogram.end(), 0.0..max_density * 1.05)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Value")
        .y_desc("Density")
        .x_label_formatter(&|v| format!("{:.1}", v))
        .y_label_formatter(&|v| format!("{:.3}", v))
        .draw()?;

    chart
        .draw_series(
            histogram
                .bars()
                .map(|(x0, x1, d)| Rectangle::new([(x0, 0.0), (x1, d)], bar_style)),
        )?
        .label("Combined Data")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], bar_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!("Histogram written to {}", path.as_ref().display());
    Ok(())
}
