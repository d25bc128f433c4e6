//! Import clause extraction
//!
//! Turns the `-i` specification (`"strings";"regexp";r "regexp"`) into the
//! clauses of a Go import block.

/// Packages the line filter template already imports.
const FILTER_BUILTINS: [&str; 6] = [
    "\"bufio\"",
    "`bufio`",
    "\"fmt\"",
    "`fmt`",
    "\"os\"",
    "`os`",
];

/// Which clauses survive extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFilter {
    /// Drop empty clauses only
    NonEmpty,
    /// Also drop the packages declared by the line filter template
    ExcludeBuiltins,
}

impl ImportFilter {
    pub fn accepts(self, clause: &str) -> bool {
        match self {
            ImportFilter::NonEmpty => !clause.is_empty(),
            ImportFilter::ExcludeBuiltins => {
                !clause.is_empty() && !FILTER_BUILTINS.contains(&clause)
            }
        }
    }
}

/// Split an import specification into clauses, in the order written.
///
/// Malformed clauses are kept as-is; the Go compiler reports them.
pub fn parse_imports(spec: &str, filter: ImportFilter) -> Vec<String> {
    spec.trim_matches(|c: char| c == ' ' || c == ';')
        .split(';')
        .map(|clause| clause.trim_matches(|c: char| c == ' ' || c == '\t'))
        .filter(|clause| filter.accepts(clause))
        .map(str::to_owned)
        .collect()
}

/// Render clauses as an import block.
///
/// No clauses renders nothing at all: `import ()` is rejected by gofmt.
pub fn render_import_block(clauses: &[String]) -> String {
    if clauses.is_empty() {
        return String::new();
    }
    format!("import (\n{}\n)", clauses.join("\n"))
}
