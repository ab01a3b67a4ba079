use std::path::Path;
use std::sync::Once;

use generator_common::{DatasetError, DistributionKind, DistributionSpec, Registry};
use regex::Regex;
use rstest::*;
use tempfile::TempDir;

use crate::args::Args;
use crate::dataset_file::{read_dataset_file, DatasetFileError};
use crate::{run_app, run_selection};

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn scenario_registry() -> Registry {
    Registry::empty()
        .with(DistributionSpec::new(
            "lognormal",
            DistributionKind::LogNormal { mu: 3.0, sigma: 0.3 },
            20,
        ))
        .with(DistributionSpec::new(
            "weibull",
            DistributionKind::Weibull {
                shape: 1.0,
                scale: 2.5,
            },
            10,
        ))
        .with(DistributionSpec::new(
            "normal",
            DistributionKind::Normal {
                mean: 9.0,
                std_dev: 2.0,
            },
            5,
        ))
}

fn args_in(dir: &TempDir, seed: u64) -> Args {
    let mut args = Args::with_output(dir.path().join("combined_data.txt"));
    args.seed = Some(seed);
    args
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn value_line() -> Regex {
    Regex::new(r"^-?\d+\.\d{15}$").unwrap()
}

#[rstest]
#[case(&[])]
#[case(&["normal"])]
#[case(&["weibull"])]
#[case(&["lognormal", "weibull", "normal"])]
#[case(&["normal", "lognormal"])]
fn file_layout_matches_selection(#[case] selection: &[&str]) {
    init();
    let dir = tempfile::tempdir().unwrap();
    let registry = scenario_registry();
    let args = args_in(&dir, 2024);

    let report = run_selection(&args, &registry, selection).unwrap();
    let expected_values = registry.total_samples(selection).unwrap();
    assert_eq!(report.samples, expected_values);

    let lines = read_lines(&args.output);
    assert_eq!(lines[0], selection.len().to_string());
    for (i, name) in selection.iter().enumerate() {
        assert_eq!(lines[i + 1].split(' ').next(), Some(*name));
    }

    let values = &lines[1 + selection.len()..];
    assert_eq!(values.len(), expected_values);
    let re = value_line();
    assert!(values.iter().all(|l| re.is_match(l)));
}

#[test]
fn weibull_scenario() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let args = args_in(&dir, 7);
    run_selection(&args, &scenario_registry(), &["weibull"]).unwrap();

    let lines = read_lines(&args.output);
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "1");
    assert_eq!(lines[1], "weibull 1.0 2.5 10");
    let re = value_line();
    for l in &lines[2..] {
        assert!(re.is_match(l), "{}", l);
        assert!(l.parse::<f64>().unwrap() >= 0.0, "{}", l);
    }
}

#[test]
fn normal_smoke() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let args = args_in(&dir, 9);
    run_selection(&args, &scenario_registry(), &["normal"]).unwrap();

    let file = read_dataset_file(&args.output).unwrap();
    assert_eq!(file.distributions[0].fields, ["9.0", "2.0", "5"]);
    assert_eq!(file.values.len(), 5);
    assert!(file.values.iter().all(|v| v.is_finite()));
}

#[test]
fn empty_selection_writes_only_the_count() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let args = args_in(&dir, 1);
    let empty: [&str; 0] = [];
    run_selection(&args, &scenario_registry(), &empty).unwrap();
    assert_eq!(std::fs::read_to_string(&args.output).unwrap(), "0\n");
}

#[test]
fn same_seed_same_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let registry = scenario_registry();
    let selection = ["lognormal", "weibull", "normal"];

    let mut a = args_in(&dir, 31337);
    a.output = dir.path().join("a.txt");
    let mut b = args_in(&dir, 31337);
    b.output = dir.path().join("b.txt");

    run_selection(&a, &registry, &selection).unwrap();
    run_selection(&b, &registry, &selection).unwrap();
    assert_eq!(
        std::fs::read(&a.output).unwrap(),
        std::fs::read(&b.output).unwrap()
    );
}

#[test]
fn unknown_distribution_fails_without_output() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let args = args_in(&dir, 3);
    let err = run_selection(&args, &scenario_registry(), &["normal", "pareto"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::UnknownDistribution { name, .. }) if name == "pareto"
    ));
    assert!(!args.output.exists());
}

#[test]
fn missing_parent_directory_is_an_io_error() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let mut args = args_in(&dir, 3);
    args.output = dir.path().join("missing").join("combined_data.txt");
    let err = run_selection(&args, &scenario_registry(), &["normal"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetFileError>(),
        Some(DatasetFileError::Io(_))
    ));
}

#[test]
fn builtin_run_with_verify_and_histogram() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let mut args = args_in(&dir, 5);
    args.verify = true;
    args.histogram = Some(dir.path().join("combined_data.svg"));

    let report = run_app(&args).unwrap();
    assert_eq!(report.seed, 5);
    assert_eq!(report.samples, 150_000);

    let file = read_dataset_file(&args.output).unwrap();
    let names: Vec<&str> = file.distributions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["lognormal", "weibull", "normal"]);
    assert_eq!(file.distributions[0].to_string(), "lognormal 3.0 0.3 50000");
    assert_eq!(file.distributions[1].to_string(), "weibull 1.0 2.5 50000");
    assert_eq!(file.distributions[2].to_string(), "normal 9.0 2.0 50000");

    // Weibull block sits between the lognormal and normal blocks.
    assert!(file.values[50_000..100_000].iter().all(|v| *v >= 0.0));
    assert!(dir.path().join("combined_data.svg").exists());
}
