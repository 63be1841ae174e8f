//! Unit tests for CLI argument parsing and validation.
//!
//! This module exercises the command-line interface defined in
//! [`graphrun::cli`] using `rstest` for parameterised coverage of success and
//! error scenarios.
use camino::Utf8PathBuf;
use clap::Parser;
use clap::error::ErrorKind;
use graphrun::cli::{Cli, DEFAULT_OUTPUT};
use rstest::rstest;
use std::path::PathBuf;

fn inputs(names: &[&str]) -> Vec<Utf8PathBuf> {
    names.iter().map(Utf8PathBuf::from).collect()
}

#[rstest]
#[case(vec!["graphrun"], true, &[], DEFAULT_OUTPUT, false, false)]
#[case(vec!["graphrun", "-n"], false, &[], DEFAULT_OUTPUT, false, false)]
#[case(vec!["graphrun", "--no-build", "--verbose"], false, &[], DEFAULT_OUTPUT, true, false)]
#[case(vec!["graphrun", "-c", "-v"], true, &[], DEFAULT_OUTPUT, true, true)]
#[case(vec!["graphrun", "-i", "a.ts", "b.ts"], true, &["a.ts", "b.ts"], DEFAULT_OUTPUT, false, false)]
#[case(
    vec!["graphrun", "-o", "calls.txt", "--input", "src/z.ts", "src/a.ts", "-c"],
    true,
    &["src/z.ts", "src/a.ts"],
    "calls.txt",
    false,
    true,
)]
#[case(vec!["graphrun", "-nvc", "-i", "one.ts"], false, &["one.ts"], DEFAULT_OUTPUT, true, true)]
fn parse_cli(
    #[case] argv: Vec<&str>,
    #[case] build: bool,
    #[case] input: &[&str],
    #[case] output: &str,
    #[case] verbose: bool,
    #[case] clean: bool,
) {
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    assert_eq!(cli.build, build);
    assert_eq!(cli.input, inputs(input));
    assert_eq!(cli.output, output);
    assert_eq!(cli.verbose, verbose);
    assert_eq!(cli.clean, clean);
}

#[test]
fn defaults_match_parsed_empty_command_line() {
    let parsed = Cli::try_parse_from(["graphrun", "--root", "/repo"]).expect("parse");
    let expected = Cli {
        root: Some(PathBuf::from("/repo")),
        ..Cli::default()
    };
    assert_eq!(parsed, expected);
}

#[test]
fn repeated_input_flags_accumulate_in_order() {
    let cli = Cli::try_parse_from(["graphrun", "-i", "b.ts", "-v", "-i", "a.ts"]).expect("parse");
    assert_eq!(cli.input, inputs(&["b.ts", "a.ts"]));
}

#[rstest]
#[case(vec!["graphrun", "--frobnicate"], ErrorKind::UnknownArgument)]
#[case(vec!["graphrun", "stray.ts"], ErrorKind::UnknownArgument)]
#[case(vec!["graphrun", "-i"], ErrorKind::InvalidValue)]
#[case(vec!["graphrun", "-o"], ErrorKind::InvalidValue)]
fn parse_cli_errors(#[case] argv: Vec<&str>, #[case] expected_error: ErrorKind) {
    let err = Cli::try_parse_from(argv).expect_err("unexpected success");
    assert_eq!(err.kind(), expected_error);
}

#[test]
fn usage_errors_exit_with_two() {
    let err = Cli::try_parse_from(["graphrun", "--frobnicate"]).expect_err("unexpected success");
    assert_eq!(err.exit_code(), 2);
}
