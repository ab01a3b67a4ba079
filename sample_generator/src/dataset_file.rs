//! Reading and writing dataset files.
//!
//! A dataset file is plain text:
//!
//! ```text
//! <number of distributions>
//! <name> <param> <param> <sample count>    (once per distribution)
//! <value>                                  (once per sample, 15 fractional digits)
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use generator_common::{DatasetError, DistributionSpec, Registry, SampleBatch};
use thiserror::Error;
use tracing::{debug, info};

/// Number of fractional digits every value is written with.
pub const VALUE_PRECISION: usize = 15;

#[derive(Debug, Error)]
pub enum DatasetFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Lookup(#[from] DatasetError),
    #[error("line {line}: expected the number of distributions, found {found:?}")]
    BadCount { line: usize, found: String },
    #[error("expected {expected} distribution header lines, found {found}")]
    MissingHeader { expected: usize, found: usize },
    #[error("line {line}: empty distribution header")]
    EmptyHeader { line: usize },
    #[error("line {line}: {found:?} is not a number")]
    BadValue { line: usize, found: String },
    #[error("distribution {index}: header describes {expected} but the batch holds {found}")]
    BatchMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}

/// One distribution line of a dataset header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderLine {
    pub name: String,
    /// Everything after the name, as written.
    pub fields: Vec<String>,
}

impl HeaderLine {
    pub fn from_spec(spec: &DistributionSpec) -> Self {
        HeaderLine {
            name: spec.name.clone(),
            fields: spec.header_fields(),
        }
    }
}

impl std::fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for field in &self.fields {
            write!(f, " {}", field)?;
        }
        Ok(())
    }
}

/// Contents of a dataset file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetFile {
    pub distributions: Vec<HeaderLine>,
    pub values: Vec<f64>,
}

/// Write the header for `selection` followed by the samples of `batch`.
///
/// Every name of `selection` is looked up, and the blocks of `batch` are checked against
/// it, before anything is written.
pub fn write_dataset<W: Write, S: AsRef<str>>(
    out: W,
    selection: &[S],
    registry: &Registry,
    batch: &SampleBatch,
) -> Result<(), DatasetFileError> {
    let specs = registry.resolve(selection)?;
    check_batch(&specs, batch)?;
    write_resolved(out, &specs, batch.values())
}

/// Create (or truncate) `path` and write the dataset to it.
///
/// The parent directory must already exist.
pub fn write_dataset_file<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    selection: &[S],
    registry: &Registry,
    batch: &SampleBatch,
) -> Result<(), DatasetFileError> {
    let specs = registry.resolve(selection)?;
    check_batch(&specs, batch)?;
    let file = File::create(path.as_ref())?;
    write_resolved(BufWriter::new(file), &specs, batch.values())?;
    info!(
        "Wrote {} distributions and {} values to {}",
        specs.len(),
        batch.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// The batch must hold one block per header line, with the same name and sample count.
fn check_batch(specs: &[&DistributionSpec], batch: &SampleBatch) -> Result<(), DatasetFileError> {
    let blocks = batch.blocks();
    for index in 0..specs.len().max(blocks.len()) {
        let expected = specs.get(index).map(|s| (s.name.as_str(), s.sample_count));
        let found = blocks.get(index).map(|b| (b.name.as_str(), b.range.len()));
        if expected != found {
            return Err(DatasetFileError::BatchMismatch {
                index,
                expected: describe_block(expected),
                found: describe_block(found),
            });
        }
    }
    Ok(())
}

fn describe_block(block: Option<(&str, usize)>) -> String {
    match block {
        Some((name, count)) => format!("{} with {} samples", name, count),
        None => "nothing".to_string(),
    }
}

fn write_resolved<W: Write>(
    mut out: W,
    specs: &[&DistributionSpec],
    values: &[f64],
) -> Result<(), DatasetFileError> {
    writeln!(out, "{}", specs.len())?;
    for spec in specs {
        let header = HeaderLine::from_spec(spec);
        debug!("Header: {}", header);
        writeln!(out, "{}", header)?;
    }
    for v in values {
        writeln!(out, "{:.*}", VALUE_PRECISION, v)?;
    }
    out.flush()?;
    Ok(())
}

/// Parse a dataset.
pub fn read_dataset<R: BufRead>(input: R) -> Result<DatasetFile, DatasetFileError> {
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l));

    let count = match lines.next() {
        Some((line, l)) => {
            let l = l?;
            l.trim()
                .parse::<usize>()
                .map_err(|_| DatasetFileError::BadCount { line, found: l })?
        }
        None => {
            return Err(DatasetFileError::BadCount {
                line: 1,
                found: String::new(),
            })
        }
    };

    let mut distributions = Vec::with_capacity(count);
    for _ in 0..count {
        let (line, l) = lines.next().ok_or(DatasetFileError::MissingHeader {
            expected: count,
            found: distributions.len(),
        })?;
        let l = l?;
        let mut parts = l.split_whitespace().map(str::to_string);
        let name = parts.next().ok_or(DatasetFileError::EmptyHeader { line })?;
        distributions.push(HeaderLine {
            name,
            fields: parts.collect(),
        });
    }

    let mut values = Vec::new();
    for (line, l) in lines {
        let l = l?;
        let v = l
            .trim()
            .parse::<f64>()
            .map_err(|_| DatasetFileError::BadValue { line, found: l })?;
        values.push(v);
    }

    Ok(DatasetFile {
        distributions,
        values,
    })
}

pub fn read_dataset_file<P: AsRef<Path>>(path: P) -> Result<DatasetFile, DatasetFileError> {
    let file = File::open(path.as_ref())?;
    read_dataset(BufReader::new(file))
}
