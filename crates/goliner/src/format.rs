//! Source validation through gofmt
//!
//! gofmt is the only syntax check the generated program gets before the
//! compiler sees it.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{GolinerError, Result};
use crate::process::capture;

/// A program gofmt accepted, in gofmt's canonical layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProgram(Vec<u8>);

impl ValidatedProgram {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ValidatedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Runs gofmt over program text
#[derive(Debug, Clone)]
pub struct Formatter {
    gofmt: PathBuf,
}

impl Formatter {
    pub fn new(gofmt: impl Into<PathBuf>) -> Self {
        Self {
            gofmt: gofmt.into(),
        }
    }

    /// Format `source`, failing with [`GolinerError::Validation`] if gofmt
    /// cannot parse it.
    pub fn format(&self, source: &str) -> Result<ValidatedProgram> {
        let captured = capture(&mut Command::new(&self.gofmt), Some(source.as_bytes()), None)?;
        if !captured.success() {
            let diagnostic = captured.stderr_lossy().into_owned();
            tracing::debug!("gofmt rejected the program:\n{}", diagnostic.trim_end());
            return Err(GolinerError::validation(diagnostic));
        }
        Ok(ValidatedProgram::new(captured.stdout))
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new("gofmt")
    }
}
