use std::path::PathBuf;

use clap::Parser;
use kira_roiqc::cli::{Cli, Commands};

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from([
        "kira-roiqc",
        "run",
        "--timeseries",
        "a.tsv",
        "b.tsv",
        "--confounds",
        "a_conf.tsv",
        "b_conf.tsv",
        "--out",
        "qc",
    ])
    .unwrap();
    let Commands::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.scans.timeseries, vec![PathBuf::from("a.tsv"), PathBuf::from("b.tsv")]);
    assert_eq!(args.scans.confounds.len(), 2);
    assert!(args.scans.coords.is_none());
    assert_eq!(args.threads, 1);
    assert_eq!(args.fd_threshold, 0.2);
    assert_eq!(args.iterations, 100);
    assert!(args.seed.is_none());
    assert!(!args.group_only);
    assert!(!args.json);
}

#[test]
fn zero_threads_is_rejected() {
    let res = Cli::try_parse_from([
        "kira-roiqc",
        "run",
        "--timeseries",
        "a.tsv",
        "--confounds",
        "a_conf.tsv",
        "--out",
        "qc",
        "--threads",
        "0",
    ]);
    assert!(res.is_err());
}

#[test]
fn confounds_are_required() {
    let res = Cli::try_parse_from(["kira-roiqc", "validate", "--timeseries", "a.tsv"]);
    assert!(res.is_err());
}

#[test]
fn validate_accepts_coords() {
    let cli = Cli::try_parse_from([
        "kira-roiqc",
        "validate",
        "--timeseries",
        "a.tsv",
        "--confounds",
        "a_conf.tsv",
        "--coords",
        "atlas.tsv",
    ])
    .unwrap();
    let Commands::Validate(args) = cli.command else {
        panic!("expected validate");
    };
    assert_eq!(args.scans.coords, Some(PathBuf::from("atlas.tsv")));
}
