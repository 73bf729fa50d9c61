//! Blocking execution of external tools.

use std::ffi::OsStr;
use std::process::{Command, Output};

use tracing::trace;

use crate::constants::tools::STDERR_TAIL_CHARS;
use crate::error::{Error, Result};

/// Run a tool to completion and capture its output.
///
/// A non-zero exit status is not an error here; callers inspect
/// `Output::status` and decide.
pub fn run_tool<I, S>(program: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    trace!("Running {command:?}");

    command.output().map_err(|e| Error::ToolSpawn {
        tool: program.to_string(),
        source: e,
    })
}

/// Last part of a tool's stderr, for error messages.
pub fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();

    let char_count = trimmed.chars().count();
    if char_count <= STDERR_TAIL_CHARS {
        return trimmed.to_string();
    }

    trimmed.chars().skip(char_count - STDERR_TAIL_CHARS).collect()
}

/// Describe a failed exit, preferring stderr over the bare status.
pub fn failure_reason(output: &Output) -> String {
    let tail = stderr_tail(output);
    if tail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        tail
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tool_captures_stdout() {
        let output = run_tool("sh", ["-c", "echo hello"]).unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let result = run_tool("clipharvest-no-such-tool", ["--version"]);
        assert!(matches!(result, Err(Error::ToolSpawn { .. })));
    }

    #[test]
    fn test_failure_reason_uses_stderr() {
        let output = run_tool("sh", ["-c", "echo boom >&2; exit 3"]).unwrap();
        assert!(!output.status.success());
        assert_eq!(failure_reason(&output), "boom");
    }

    #[test]
    fn test_stderr_tail_is_bounded() {
        let script = format!("printf '%0{}d' 0 >&2", STDERR_TAIL_CHARS * 2);
        let output = run_tool("sh", ["-c", script.as_str()]).unwrap();
        assert_eq!(stderr_tail(&output).len(), STDERR_TAIL_CHARS);
    }
}
