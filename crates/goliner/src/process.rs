//! Subprocess helpers shared by the formatter and the build step

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{GolinerError, Result};
use crate::signals::InterruptGuard;

/// Everything a finished tool run produced
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Run `cmd` to completion with its output captured, feeding `input` on stdin.
///
/// With a guard, interruption signals received while waiting are forwarded to
/// the child.
pub fn capture(
    cmd: &mut Command,
    input: Option<&[u8]>,
    guard: Option<&InterruptGuard>,
) -> Result<Captured> {
    let program = Path::new(cmd.get_program()).to_path_buf();
    cmd.stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| GolinerError::spawn(&program, e))?;
    if let Some(guard) = guard {
        guard.watch(child.id());
    }

    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        // A tool that exits early closes the pipe; its status says why.
        if let Err(e) = stdin.write_all(input) {
            tracing::debug!("writing to {} failed: {}", program.display(), e);
        }
    }

    let output = child.wait_with_output();
    if let Some(guard) = guard {
        guard.unwatch();
    }
    let output = output.map_err(|e| GolinerError::spawn(&program, e))?;

    Ok(Captured {
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
