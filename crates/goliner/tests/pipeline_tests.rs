//! Integration tests for validation and the build/run pipeline
//!
//! Tests that need gofmt or go skip themselves when the toolchain is missing.

#[macro_use]
mod common;

use common::{entries, go_available, gofmt_available};
use goliner::{GolinerError, Outcome, Runner, ScriptOptions, Toolchain};
use tempfile::TempDir;

fn runner(options: ScriptOptions, root: &TempDir) -> Runner {
    Runner::new(options).with_toolchain(Toolchain::new().temp_root(root.path()))
}

#[test]
fn test_dry_run_prints_canonical_program() {
    require!(gofmt_available());
    let root = TempDir::new().unwrap();
    let options = ScriptOptions::new("fmt.Println(\"hi\")").imports("\"fmt\"").dry_run(true);

    let program = match runner(options, &root).run().unwrap() {
        Outcome::Printed(program) => program.to_string(),
        Outcome::Ran => panic!("dry run built the program"),
    };

    assert_eq!(
        program,
        "// generated by goliner(1)\npackage main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n"
    );
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_dry_run_filter_program_is_valid() {
    require!(gofmt_available());
    let root = TempDir::new().unwrap();
    let options = ScriptOptions::new("line = strings.ToUpper(line)")
        .print_mode(true)
        .imports("\"strings\";\"fmt\"")
        .dry_run(true);

    let Outcome::Printed(program) = runner(options, &root).run().unwrap() else {
        panic!("dry run built the program");
    };
    let program = program.to_string();

    assert!(program.contains("func fn(line string) {\n\tline = strings.ToUpper(line)\n\tfmt.Println(line)\n}"));
    assert!(program.contains("import (\n\t\"strings\"\n)"));
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_syntax_error_creates_no_workspace() {
    require!(gofmt_available());
    for dry_run in [true, false] {
        let root = TempDir::new().unwrap();
        let options = ScriptOptions::new("if x {").dry_run(dry_run);

        let err = runner(options, &root).run().unwrap_err();

        assert!(matches!(err, GolinerError::Validation { .. }));
        assert_eq!(err.to_string(), "syntax error");
        assert_eq!(entries(root.path()), 0);
    }
}

#[test]
fn test_successful_run_removes_workspace() {
    require!(go_available());
    let root = TempDir::new().unwrap();
    let options = ScriptOptions::new("x := 1\n_ = x");

    let outcome = runner(options, &root).run().unwrap();

    assert!(matches!(outcome, Outcome::Ran));
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_build_failure_reports_diagnostics() {
    require!(go_available());
    let root = TempDir::new().unwrap();
    let options = ScriptOptions::new("undefinedName()");

    let err = runner(options, &root).run().unwrap_err();

    match &err {
        GolinerError::Build { diagnostics } => assert!(diagnostics.contains("undefinedName")),
        other => panic!("expected a build error, got {other:?}"),
    }
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_failing_script_status() {
    require!(go_available());
    let root = TempDir::new().unwrap();
    let options = ScriptOptions::new("os.Exit(3)").imports("\"os\"");

    let err = runner(options, &root).run().unwrap_err();

    assert!(matches!(err, GolinerError::Run { code: Some(3) }));
    assert!(err.is_silent());
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_script_receives_trailing_args() {
    require!(go_available());
    let root = TempDir::new().unwrap();
    let snippet = r#"if len(os.Args) != 3 || os.Args[1] != "-x" || os.Args[2] != "two words" {
	os.Exit(4)
}"#;
    let options = ScriptOptions::new(snippet)
        .imports("\"os\"")
        .args(["-x", "two words"]);

    let outcome = runner(options, &root).run().unwrap();

    assert!(matches!(outcome, Outcome::Ran));
    assert_eq!(entries(root.path()), 0);
}

#[test]
fn test_missing_compiler() {
    require!(gofmt_available());
    let root = TempDir::new().unwrap();
    let toolchain = Toolchain::new().go("/nonexistent/go").temp_root(root.path());
    let runner = Runner::new(ScriptOptions::new("_ = 1")).with_toolchain(toolchain);

    let err = runner.run().unwrap_err();

    assert!(matches!(err, GolinerError::Spawn { .. }));
    assert_eq!(entries(root.path()), 0);
}

// The tests below stand shell tools in for gofmt and go, so they run
// without a Go installation.

#[cfg(unix)]
mod stubbed {
    use super::*;
    use crate::common::{write_go_stub, write_stub};

    fn stub_runner(options: ScriptOptions, root: &TempDir, go: impl Into<std::path::PathBuf>) -> Runner {
        let toolchain = Toolchain::new().gofmt("cat").go(go).temp_root(root.path());
        Runner::new(options).with_toolchain(toolchain)
    }

    #[test]
    fn test_compiler_failure_removes_workspace() {
        let root = TempDir::new().unwrap();

        let err = stub_runner(ScriptOptions::new("x()"), &root, "false").run().unwrap_err();

        assert!(matches!(err, GolinerError::Build { .. }));
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_compiler_diagnostics_are_captured() {
        let root = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let go = write_stub(tools.path(), "go", "echo './script.go:4:1: undefined: x' >&2\nexit 1");

        let err = stub_runner(ScriptOptions::new("x()"), &root, go).run().unwrap_err();

        assert_eq!(err.to_string(), "./script.go:4:1: undefined: x");
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_missing_binary_removes_workspace() {
        let root = TempDir::new().unwrap();

        let err = stub_runner(ScriptOptions::new("x()"), &root, "true").run().unwrap_err();

        assert!(matches!(err, GolinerError::Spawn { .. }));
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_failing_binary_removes_workspace() {
        let root = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let go = write_go_stub(tools.path(), "exit 3");

        let err = stub_runner(ScriptOptions::new("x()"), &root, go).run().unwrap_err();

        assert!(matches!(err, GolinerError::Run { code: Some(3) }));
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_binary_gets_args_and_workspace_is_removed() {
        let root = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let go = write_go_stub(tools.path(), "[ \"$#\" = 2 ] && [ \"$1\" = -p ] && [ \"$2\" = \"two words\" ]");
        let options = ScriptOptions::new("x()").args(["-p", "two words"]);

        let outcome = stub_runner(options, &root, go).run().unwrap();

        assert!(matches!(outcome, Outcome::Ran));
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_unusable_temp_root() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("not-a-directory");
        std::fs::write(&file, b"").unwrap();
        let toolchain = Toolchain::new().gofmt("cat").go("true").temp_root(&file);

        let err = Runner::new(ScriptOptions::new("x()"))
            .with_toolchain(toolchain)
            .run()
            .unwrap_err();

        assert!(matches!(err, GolinerError::Workspace(_)));
        assert_eq!(entries(root.path()), 1);
    }
}
