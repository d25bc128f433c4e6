//! goliner
//!
//! Wraps a Go snippet in a complete program, checks it with gofmt, then
//! builds and runs it from a throwaway workspace.

pub mod driver;
pub mod error;
pub mod format;
pub mod imports;
pub mod pipeline;
pub mod process;
pub mod signals;
pub mod template;
pub mod workspace;

pub use driver::{Outcome, Runner, ScriptOptions};
pub use error::{GolinerError, Result};
pub use format::{Formatter, ValidatedProgram};
pub use imports::{parse_imports, render_import_block, ImportFilter};
pub use pipeline::Toolchain;
pub use template::Template;
pub use workspace::Workspace;
