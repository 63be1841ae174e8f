//! Fake toolchain and analyzer executables.
//!
//! Each helper writes a small `/bin/sh` script into its own temporary
//! directory. Point graphrun at a script with the matching override variable
//! from [`toolchain_env`].

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A fake executable that lives as long as this value.
#[derive(Debug)]
pub struct FakeTool {
    _dir: TempDir,
    path: Utf8PathBuf,
    capture: Utf8PathBuf,
}

impl FakeTool {
    /// Path of the script.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Arguments recorded by the last invocation, or `None` if the script
    /// never ran.
    pub fn recorded_args(&self) -> Result<Option<Vec<String>>> {
        if !self.capture.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.capture)
            .with_context(|| format!("read capture {}", self.capture))?;
        Ok(Some(text.lines().map(str::to_owned).collect()))
    }
}

/// Make a script file executable on Unix platforms.
#[cfg(unix)]
fn make_script_executable(path: &Path, context: &str) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("{context}: read metadata {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("{context}: set permissions {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_script_executable(_path: &Path, _context: &str) -> Result<()> {
    Ok(())
}

/// Write a script named `name` whose body runs after argument capture.
fn write_tool(name: &str, body: &str) -> Result<FakeTool> {
    let dir = TempDir::new().with_context(|| format!("{name}: create temp dir"))?;
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("{name}: temp dir {} is not UTF-8", path.display()))?;
    let path = root.join(name);
    let capture = root.join(format!("{name}.args"));
    let script = format!(
        concat!(
            "#!/bin/sh\n",
            ": > \"{capture}\"\n",
            "for arg in \"$@\"; do\n",
            "  printf '%s\\n' \"$arg\" >> \"{capture}\"\n",
            "done\n",
            "{body}\n",
        ),
        capture = capture,
        body = body,
    );
    fs::write(&path, script).with_context(|| format!("{name}: write script {path}"))?;
    make_script_executable(path.as_std_path(), name)?;
    Ok(FakeTool {
        _dir: dir,
        path,
        capture,
    })
}

/// A fake executable that records its arguments and exits with `exit_code`.
pub fn fake_exit(name: &str, exit_code: i32) -> Result<FakeTool> {
    write_tool(name, &format!("exit {exit_code}"))
}

/// A fake `tsc` that emits `build/main.js` below the working directory and
/// exits with `exit_code`.
pub fn fake_compiler(exit_code: i32) -> Result<FakeTool> {
    write_tool(
        "tsc",
        &format!(
            concat!(
                "mkdir -p build\n",
                "echo 'console.log(\"analyzer\")' > build/main.js\n",
                "exit {code}",
            ),
            code = exit_code,
        ),
    )
}

/// A fake `node` that writes a placeholder graph into the output directory
/// (its second argument) and exits with `exit_code`.
pub fn fake_analyzer(exit_code: i32) -> Result<FakeTool> {
    write_tool(
        "node",
        &format!(
            concat!(
                "if [ -d \"$2\" ]; then\n",
                "  echo 'digraph {{}}' > \"$2/graph.txt\"\n",
                "fi\n",
                "exit {code}",
            ),
            code = exit_code,
        ),
    )
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn fake_exit_records_arguments_and_status() -> Result<()> {
        let tool = fake_exit("tsc", 3)?;
        let status = Command::new(tool.path().as_std_path())
            .args(["--project", "two words"])
            .status()
            .context("run fake tool")?;
        anyhow::ensure!(status.code() == Some(3), "unexpected status {status}");
        let args = tool.recorded_args()?.context("capture written")?;
        anyhow::ensure!(args == ["--project", "two words"], "unexpected args {args:?}");
        Ok(())
    }

    #[test]
    fn unused_tool_has_no_capture() -> Result<()> {
        let tool = fake_analyzer(0)?;
        anyhow::ensure!(tool.recorded_args()?.is_none(), "capture should be absent");
        Ok(())
    }
}
