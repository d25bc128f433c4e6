//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Stdio};

fn tool_works(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

pub fn gofmt_available() -> bool {
    tool_works("gofmt", &["-l"])
}

pub fn go_available() -> bool {
    gofmt_available() && tool_works("go", &["version"])
}

/// Skip the current test when the Go toolchain is missing.
macro_rules! require {
    ($check:expr) => {
        if !$check {
            eprintln!("skipping: Go toolchain not found on PATH");
            return;
        }
    };
}

pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Write an executable shell script standing in for a Go tool.
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("cannot write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("cannot make stub executable");
    path
}

/// A `go` stub whose "build" writes `script` as the program to run.
#[cfg(unix)]
pub fn write_go_stub(dir: &Path, script: &str) -> std::path::PathBuf {
    // Invoked as `go build -o script.exe script.go`.
    let body = format!("cat > \"$3\" <<'SCRIPT'\n#!/bin/sh\n{script}\nSCRIPT\nchmod +x \"$3\"");
    write_stub(dir, "go", &body)
}
