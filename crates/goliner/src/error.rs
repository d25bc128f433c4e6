//! Error types for goliner

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GolinerError>;

#[derive(Error, Debug)]
pub enum GolinerError {
    #[error("{0}")]
    Usage(String),

    /// The assembled program was rejected by the formatter. The formatter's
    /// own diagnostic is kept for logging but never shown to the user.
    #[error("syntax error")]
    Validation { diagnostic: String },

    #[error("{0}")]
    Workspace(#[from] std::io::Error),

    #[error("cannot start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", .diagnostics.trim_end())]
    Build { diagnostics: String },

    #[error("script exited with {}", describe_exit(.code))]
    Run { code: Option<i32> },

    #[error("interrupted by {signal}")]
    Interrupted { signal: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl GolinerError {
    pub fn usage(message: impl Into<String>) -> Self {
        GolinerError::Usage(message.into())
    }

    pub fn validation(diagnostic: impl Into<String>) -> Self {
        GolinerError::Validation {
            diagnostic: diagnostic.into(),
        }
    }

    pub fn spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GolinerError::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn build(diagnostics: impl Into<String>) -> Self {
        GolinerError::Build {
            diagnostics: diagnostics.into(),
        }
    }

    /// Every failure maps to the same process status.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// A failed script already wrote whatever it had to say to the inherited
    /// stderr, so nothing more is printed for it.
    pub fn is_silent(&self) -> bool {
        matches!(self, GolinerError::Run { .. })
    }
}
