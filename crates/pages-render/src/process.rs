//! External tool subprocess handling.
//!
//! `lualatex` and `pdftk` are located and run the same way: a configured path
//! wins, then an environment variable, then `PATH`.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{RenderError, RenderResult};

/// Default timeout for one tool invocation (2 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// An external command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Name used in messages and looked up in `PATH`.
    pub name: &'static str,
    /// Environment variable that may hold the executable path.
    pub env_var: &'static str,
}

/// The LaTeX compiler.
pub const LUALATEX: Tool = Tool {
    name: "lualatex",
    env_var: "PAGES_LUALATEX",
};

/// The PDF concatenation tool.
pub const PDFTK: Tool = Tool {
    name: "pdftk",
    env_var: "PAGES_PDFTK",
};

/// How to locate and run a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Path to the executable; searched for when absent.
    pub executable: Option<PathBuf>,
    /// Timeout of one invocation.
    pub timeout: Duration,
    /// Whether to capture stderr for error reports.
    pub capture_output: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            executable: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl ToolConfig {
    /// Sets the executable path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Finds the executable of `tool`.
pub fn find_tool(tool: Tool, config: &ToolConfig) -> RenderResult<PathBuf> {
    // Check config override first
    if let Some(ref path) = config.executable {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    if let Ok(path) = std::env::var(tool.env_var) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
    }

    which::which(tool.name).map_err(|_| RenderError::ToolNotFound {
        tool: tool.name,
        env_var: tool.env_var,
    })
}

/// Runs a prepared command to completion and fails on a non-zero exit.
pub fn run_tool(tool: Tool, mut cmd: Command, config: &ToolConfig) -> RenderResult<()> {
    if config.capture_output {
        // Keep stdout unpiped; a full stdout pipe would stall the child.
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());
    }
    cmd.stdin(Stdio::null());

    log::info!("running {:?}", cmd);
    let child = cmd.spawn().map_err(|source| RenderError::SpawnFailed {
        tool: tool.name,
        source,
    })?;

    let (status, stderr) = wait_with_timeout(tool, child, config.timeout, config.capture_output)?;
    if !status.success() {
        let exit_code = status.code().unwrap_or(-1);
        return Err(RenderError::process_failed(tool.name, exit_code, stderr));
    }
    Ok(())
}

fn wait_with_timeout(
    tool: Tool,
    mut child: Child,
    timeout: Duration,
    capture_output: bool,
) -> RenderResult<(ExitStatus, String)> {
    let start = Instant::now();

    // stderr is drained while the child runs; a full pipe would block it.
    let stderr_reader = match child.stderr.take() {
        Some(mut err) if capture_output => Some(
            thread::Builder::new()
                .name(format!("{}-stderr", tool.name))
                .spawn(move || {
                    let mut buf = Vec::new();
                    let _ = err.read_to_end(&mut buf);
                    String::from_utf8_lossy(&buf).into_owned()
                })?,
        ),
        _ => None,
    };

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RenderError::Timeout {
                        tool: tool.name,
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RenderError::SpawnFailed {
                    tool: tool.name,
                    source,
                });
            }
        }
    };

    let stderr = match stderr_reader {
        Some(handle) => handle.join().map_err(|_| {
            RenderError::worker_failed(format!("{} stderr reader panicked", tool.name))
        })?,
        None => String::new(),
    };

    Ok((status, stderr))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }

    #[test]
    fn test_config_builder() {
        let config = ToolConfig::default()
            .executable("/usr/bin/lualatex")
            .timeout_secs(600);
        assert_eq!(config.executable, Some(PathBuf::from("/usr/bin/lualatex")));
        assert_eq!(config.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_run_tool_reports_stderr() {
        let err = run_tool(LUALATEX, shell("echo broken 1>&2; exit 3"), &ToolConfig::default())
            .unwrap_err();
        match err {
            RenderError::ProcessFailed {
                tool,
                exit_code,
                stderr,
            } => {
                assert_eq!(tool, "lualatex");
                assert_eq!(exit_code, 3);
                assert!(stderr.contains("broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_tool_survives_large_stderr() {
        // Far more than a pipe buffer.
        let config = ToolConfig::default().timeout_secs(30);
        let err = run_tool(
            LUALATEX,
            shell("head -c 1000000 /dev/zero | tr '\\0' x 1>&2; exit 1"),
            &config,
        )
        .unwrap_err();
        match err {
            RenderError::ProcessFailed { stderr, .. } => assert_eq!(stderr.len(), 1_000_000),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_tool_times_out() {
        let config = ToolConfig::default().timeout(Duration::from_millis(200));
        let err = run_tool(PDFTK, shell("sleep 5"), &config).unwrap_err();
        assert!(matches!(err, RenderError::Timeout { tool: "pdftk", .. }));
    }

    #[test]
    fn test_find_tool_prefers_configured_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ToolConfig::default().executable(file.path());
        assert_eq!(find_tool(LUALATEX, &config).unwrap(), file.path());
    }

    #[test]
    fn test_find_tool_missing() {
        let tool = Tool {
            name: "pages-tool-that-does-not-exist",
            env_var: "PAGES_TOOL_THAT_DOES_NOT_EXIST",
        };
        let err = find_tool(tool, &ToolConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::ToolNotFound { .. }));
    }
}
