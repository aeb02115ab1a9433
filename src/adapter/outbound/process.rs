//! [`CommandRunner`] backed by `std::process`.
//!
//! Programs are spawned directly from an argument vector. Captured runs
//! collect stdout and stderr; streamed runs inherit the terminal so build and
//! log output appears live.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};
use crate::port::outbound::command::{CommandOutput, CommandRunner, Invocation, RunOptions};

/// Runs external programs as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation, options: RunOptions) -> Result<CommandOutput> {
        let mut command = Command::new(invocation.program());
        command.args(invocation.arg_list());
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        let spawn_error = |source| Error::Spawn {
            program: invocation.program().to_string(),
            source,
        };

        let output = if options.capture {
            let out = command
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_error)?;
            CommandOutput {
                exit_code: exit_code(out.status),
                stdout: Some(String::from_utf8_lossy(&out.stdout).into_owned()),
                stderr: Some(String::from_utf8_lossy(&out.stderr).into_owned()),
            }
        } else {
            let status = command.status().map_err(spawn_error)?;
            CommandOutput::with_code(exit_code(status))
        };

        output.checked(invocation, options)
    }

    fn is_available(&self, program: &str) -> bool {
        find_executable(program).is_some()
    }
}

/// Exit code, or `128 + signal` for a process killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

/// Locate `program` on `PATH`, or check it directly if it contains a path
/// separator.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        candidates(&dir, program)
            .into_iter()
            .find(|candidate| is_executable(candidate))
    })
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program), dir.join(format!("{program}.exe"))]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
