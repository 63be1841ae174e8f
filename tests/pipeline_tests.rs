//! Pipeline behaviour through the public library API.
//!
//! These tests drive [`graphrun::pipeline::Pipeline`] with an in-memory
//! runner that records each command, and with the real [`SystemRunner`]
//! against fake executables, checking what users see when a stage fails.

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use clap::Parser;
use graphrun::cli::Cli;
use graphrun::config::Config;
use graphrun::error::PipelineError;
use graphrun::log::{ColourMode, Log};
use graphrun::paths::PathSet;
use graphrun::pipeline::{Pipeline, Programs};
use graphrun::process::{CommandLine, ProcessExit, ProcessRunner, SystemRunner};
use std::cell::RefCell;
use std::io;
use test_support::{Workspace, display_error_chain};

/// Records every command and answers with a fixed exit per program name.
#[derive(Default)]
struct RecordingRunner {
    commands: RefCell<Vec<CommandLine>>,
    tsc_code: i32,
    node_code: i32,
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        self.commands.borrow_mut().push(command.clone());
        let code = if command.program().as_str() == "tsc" {
            self.tsc_code
        } else {
            self.node_code
        };
        Ok(ProcessExit::from_code(code))
    }
}

fn config(workspace: &Workspace, argv: &[&str]) -> Result<Config> {
    let args = std::iter::once("graphrun").chain(argv.iter().copied());
    let cli = Cli::try_parse_from(args).context("parse cli")?;
    let paths = PathSet::with_root(workspace.path("scripts"), workspace.root().to_path_buf());
    Ok(Config::new(cli, paths))
}

fn execute(
    config: &Config,
    runner: &dyn ProcessRunner,
    programs: Programs,
) -> (Result<(), PipelineError>, String) {
    let log = Log::new(Vec::new(), ColourMode::Plain);
    let result = Pipeline::new(config, &log, runner)
        .with_programs(programs)
        .execute();
    let output = String::from_utf8_lossy(&log.into_inner()).into_owned();
    (result, output)
}

#[test]
fn full_run_invokes_toolchain_then_analyzer() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.mkdir("build")?;
    let config = config(&workspace, &["-i", "lib/a.ts", "lib/b.ts"])?;
    let runner = RecordingRunner::default();

    let (result, output) = execute(&config, &runner, Programs::default());
    ensure!(result.is_ok(), "pipeline failed: {result:?}");
    ensure!(output.is_empty(), "quiet run printed {output:?}");

    let commands = runner.commands.into_inner();
    let rendered: Vec<String> = commands.iter().map(ToString::to_string).collect();
    let expected = [
        "tsc".to_owned(),
        format!(
            "node {} {} lib/a.ts lib/b.ts",
            workspace.path("build/main.js"),
            workspace.path("out"),
        ),
    ];
    ensure!(rendered == expected, "unexpected commands: {rendered:?}");
    ensure!(workspace.exists("out"), "output directory should be created");
    Ok(())
}

#[test]
fn analyzer_failure_reports_child_exit() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.mkdir("build")?;
    let config = config(&workspace, &["-n", "-i", "a.ts"])?;
    let runner = RecordingRunner {
        node_code: 9,
        ..RecordingRunner::default()
    };

    let (result, _) = execute(&config, &runner, Programs::default());
    let err = result.err().context("analyzer failure expected")?;
    ensure!(err.exit_code() == 9, "exit code {}", err.exit_code());
    let chain = display_error_chain(&err);
    ensure!(
        chain == "Analyzer failed: node exited with code 9",
        "unexpected chain {chain:?}"
    );
    Ok(())
}

#[test]
fn verbose_clean_reports_each_directory() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.touch("out/graph.txt")?;
    workspace.touch("build/main.js")?;
    let config = config(&workspace, &["-c", "-n", "-v"])?;
    let runner = RecordingRunner::default();

    let (result, output) = execute(&config, &runner, Programs::default());
    ensure!(result.is_ok(), "pipeline failed: {result:?}");
    let lines: Vec<&str> = output.lines().collect();
    let expected = [
        "INFO: Removing out directory",
        "INFO: Removing build directory",
        "INFO: Skipping build stage",
        "INFO: No samples or inputs were specified",
    ];
    ensure!(lines == expected, "unexpected output {lines:?}");
    ensure!(runner.commands.borrow().is_empty(), "nothing should be spawned");
    Ok(())
}

#[cfg(unix)]
#[test]
fn system_runner_propagates_fake_toolchain_status() -> Result<()> {
    let workspace = Workspace::new()?;
    let tsc = test_support::fake_exit("tsc", 2)?;
    let node = test_support::fake_exit("node", 0)?;
    let config = config(&workspace, &["-i", "a.ts"])?;
    let programs = Programs {
        tsc: tsc.path().to_path_buf(),
        node: node.path().to_path_buf(),
    };

    let (result, _) = execute(&config, &SystemRunner, programs);
    let err = result.err().context("build failure expected")?;
    ensure!(err.exit_code() == 2, "exit code {}", err.exit_code());
    ensure!(
        display_error_chain(&err) == format!("Build failed: {} exited with code 2", tsc.path()),
        "unexpected chain {}",
        display_error_chain(&err)
    );
    ensure!(tsc.recorded_args()? == Some(Vec::new()), "tsc takes no arguments");
    ensure!(node.recorded_args()?.is_none(), "analyzer must not run");
    Ok(())
}

#[cfg(unix)]
#[test]
fn missing_executable_is_a_build_failure() -> Result<()> {
    let workspace = Workspace::new()?;
    let config = config(&workspace, &[])?;
    let programs = Programs {
        tsc: workspace.path("missing/tsc"),
        node: Utf8PathBuf::from("node"),
    };

    let (result, _) = execute(&config, &SystemRunner, programs);
    let err = result.err().context("spawn failure expected")?;
    ensure!(
        matches!(err, PipelineError::BuildFailed { .. }),
        "unexpected error {err:?}"
    );
    ensure!(err.exit_code() == 1, "exit code {}", err.exit_code());
    Ok(())
}
