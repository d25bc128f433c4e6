//! Build and run a validated program in a throwaway workspace

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{GolinerError, Result};
use crate::format::{Formatter, ValidatedProgram};
use crate::process::capture;
use crate::signals::InterruptGuard;
use crate::workspace::{Workspace, BINARY_FILE, SOURCE_FILE};

/// External tools and where their scratch space lives
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// The `go` command
    pub go: PathBuf,
    /// The `gofmt` command
    pub gofmt: PathBuf,
    /// Parent directory for workspaces (defaults to the OS temp directory)
    pub temp_root: Option<PathBuf>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            go: PathBuf::from("go"),
            gofmt: PathBuf::from("gofmt"),
            temp_root: None,
        }
    }
}

impl Toolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn go(mut self, go: impl Into<PathBuf>) -> Self {
        self.go = go.into();
        self
    }

    pub fn gofmt(mut self, gofmt: impl Into<PathBuf>) -> Self {
        self.gofmt = gofmt.into();
        self
    }

    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(&self.gofmt)
    }

    /// Compile `program` and run it with `args`, stdio inherited.
    ///
    /// The workspace is gone by the time this returns, whatever the outcome.
    pub fn build_and_run(&self, program: &ValidatedProgram, args: &[String]) -> Result<()> {
        // Declared first so it is dropped last: cleanup runs with the
        // handlers still in place.
        let guard = InterruptGuard::install();
        let workspace = Workspace::create(self.temp_root.as_deref())?;

        workspace.write_source(program)?;
        self.compile(&workspace, &guard)?;
        run_binary(&workspace.binary_path(), args, &guard)
    }

    /// Build inside the workspace so an enclosing Go module cannot claim the file.
    fn compile(&self, workspace: &Workspace, guard: &InterruptGuard) -> Result<()> {
        tracing::debug!("compiling {}", workspace.source_path().display());
        let mut cmd = Command::new(&self.go);
        cmd.args(["build", "-o", BINARY_FILE, SOURCE_FILE])
            .current_dir(workspace.path());

        let captured = capture(&mut cmd, None, Some(guard))?;
        if let Some(signal) = guard.received() {
            return Err(GolinerError::Interrupted { signal });
        }
        if !captured.success() {
            return Err(GolinerError::build(captured.stderr_lossy()));
        }
        Ok(())
    }
}

fn run_binary(binary: &Path, args: &[String], guard: &InterruptGuard) -> Result<()> {
    tracing::debug!("running {} with {} argument(s)", binary.display(), args.len());
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| GolinerError::spawn(binary, e))?;

    guard.watch(child.id());
    let status = child.wait();
    guard.unwatch();
    let status = status.map_err(|e| GolinerError::spawn(binary, e))?;

    if let Some(signal) = guard.received() {
        return Err(GolinerError::Interrupted { signal });
    }
    if !status.success() {
        return Err(GolinerError::Run {
            code: status.code(),
        });
    }
    Ok(())
}
