//! Driver that takes a snippet from options to a result

use crate::error::Result;
use crate::format::ValidatedProgram;
use crate::pipeline::Toolchain;
use crate::template::Template;

/// Options for one invocation
#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    /// The Go snippet
    pub script: String,
    /// Semicolon-separated import clauses
    pub imports: String,
    /// Run the snippet once per input line (`-n`)
    pub line_mode: bool,
    /// Like `line_mode`, echoing each line afterwards (`-p`)
    pub print_mode: bool,
    /// Print the generated program instead of running it (`-d`)
    pub dry_run: bool,
    /// Arguments handed to the generated program
    pub args: Vec<String>,
}

impl ScriptOptions {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    pub fn imports(mut self, imports: impl Into<String>) -> Self {
        self.imports = imports.into();
        self
    }

    pub fn line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }

    pub fn print_mode(mut self, print_mode: bool) -> Self {
        self.print_mode = print_mode;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Fails with a usage error when `-n` and `-p` are both set.
    pub fn template(&self) -> Result<Template> {
        Template::from_flags(self.line_mode, self.print_mode)
    }
}

/// What a successful invocation did
#[derive(Debug)]
pub enum Outcome {
    /// Dry run: the program to print
    Printed(ValidatedProgram),
    /// The program was built and exited successfully
    Ran,
}

pub struct Runner {
    options: ScriptOptions,
    toolchain: Toolchain,
}

impl Runner {
    pub fn new(options: ScriptOptions) -> Self {
        Self {
            options,
            toolchain: Toolchain::default(),
        }
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Generate the program text, unformatted.
    pub fn assemble(&self) -> Result<String> {
        let template = self.options.template()?;
        Ok(template.assemble(&self.options.script, &self.options.imports))
    }

    /// Generate and validate the program.
    pub fn validate(&self) -> Result<ValidatedProgram> {
        let source = self.assemble()?;
        self.toolchain.formatter().format(&source)
    }

    /// Assemble, validate, then print or build and run.
    pub fn run(&self) -> Result<Outcome> {
        let program = self.validate()?;
        if self.options.dry_run {
            return Ok(Outcome::Printed(program));
        }
        self.toolchain.build_and_run(&program, &self.options.args)?;
        Ok(Outcome::Ran)
    }
}
