//! Program templates
//!
//! A snippet is wrapped in one of two fixed Go programs. Assembly is plain
//! text substitution; checking the result is left to gofmt and the compiler.

use crate::error::{GolinerError, Result};
use crate::imports::{parse_imports, render_import_block, ImportFilter};

const HEADER: &str = "// generated by goliner(1)\npackage main";

/// Statement appended to the line callback by `-p`.
const ECHO_LINE: &str = "\nfmt.Println(line)";

/// The program skeleton a snippet is injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// The snippet is the body of `main`
    WholeProgram,
    /// The snippet is the body of a callback run once per input line
    LineFilter { echo: bool },
}

impl Template {
    /// Pick the template for the `-n`/`-p` flag pair.
    pub fn from_flags(line_mode: bool, print_mode: bool) -> Result<Self> {
        match (line_mode, print_mode) {
            (true, true) => Err(GolinerError::usage(
                "-n and -p cannot be used together",
            )),
            (false, false) => Ok(Template::WholeProgram),
            (true, false) => Ok(Template::LineFilter { echo: false }),
            (false, true) => Ok(Template::LineFilter { echo: true }),
        }
    }

    pub fn import_filter(self) -> ImportFilter {
        match self {
            Template::WholeProgram => ImportFilter::NonEmpty,
            Template::LineFilter { .. } => ImportFilter::ExcludeBuiltins,
        }
    }

    /// Build the complete program text for `snippet`.
    pub fn assemble(self, snippet: &str, import_spec: &str) -> String {
        let body = trim_snippet(snippet);
        let imports = render_import_block(&parse_imports(import_spec, self.import_filter()));
        match self {
            Template::WholeProgram => render_whole_program(&imports, body),
            Template::LineFilter { echo } => render_line_filter(&imports, body, echo),
        }
    }
}

fn trim_snippet(snippet: &str) -> &str {
    snippet.trim_matches(|c: char| matches!(c, '\t' | '\n' | '\x0b' | '\x0c' | '\r' | ' '))
}

fn render_whole_program(imports: &str, body: &str) -> String {
    format!(
        "{HEADER}

{imports}

func main() {{
{body}
}}
"
    )
}

fn render_line_filter(imports: &str, body: &str, echo: bool) -> String {
    let appendage = if echo { ECHO_LINE } else { "" };
    format!(
        "{HEADER}

import (
\t\"bufio\"
\t\"fmt\"
\t\"os\"
)

{imports}

func fn(line string) {{
{body}{appendage}
}}

func doIt(in *os.File) {{
\tscanner := bufio.NewScanner(in)
\tfor scanner.Scan() {{
\t\tfn(scanner.Text())
\t}}
}}

func main() {{
\targc := len(os.Args)
\tif argc <= 1 {{
\t\tdoIt(os.Stdin)
\t}} else {{
\t\tfor i := 1; i < argc; i++ {{
\t\t\tinfile := os.Args[i]
\t\t\tif infile == \"-\" {{
\t\t\t\tdoIt(os.Stdin)
\t\t\t}} else {{
\t\t\t\tin, err := os.Open(infile)
\t\t\t\tif err != nil {{
\t\t\t\t\tfmt.Fprintln(os.Stderr, err)
\t\t\t\t}} else {{
\t\t\t\t\tdoIt(in)
\t\t\t\t\tin.Close()
\t\t\t\t}}
\t\t\t}}
\t\t}}
\t}}
}}
"
    )
}
