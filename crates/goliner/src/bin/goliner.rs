//! goliner CLI

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use goliner::{GolinerError, Outcome, Runner, ScriptOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "goliner")]
#[command(about = "Run a Go one-liner: wrap the script in a program, build it and run it")]
#[command(version)]
#[command(override_usage = "goliner [-d] [-i packages] [-n|-p] 'script' [file ...]")]
struct Args {
    /// Print the generated program but do not run it
    #[arg(short = 'd', long = "dry-run")]
    dry_run: bool,

    /// Semicolon-separated import clauses, e.g. '"strings";"regexp"'
    #[arg(short = 'i', long = "import", value_name = "PACKAGES", default_value = "")]
    import: String,

    /// Assume a 'read line' loop around the script
    #[arg(short = 'n', long = "lines", conflicts_with = "print")]
    lines: bool,

    /// Like -n, but also print each line afterwards, like sed
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// The script, followed by arguments for the generated program
    #[arg(
        value_name = "SCRIPT",
        required = true,
        num_args = 1..,
        trailing_var_arg = true
    )]
    command: Vec<String>,
}

fn init_tracing() {
    // Stdout belongs to the script; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut command = args.command.into_iter();
    let script = command.next().unwrap_or_default();

    let options = ScriptOptions::new(script)
        .imports(args.import)
        .line_mode(args.lines)
        .print_mode(args.print)
        .dry_run(args.dry_run)
        .args(command);

    match Runner::new(options).run()? {
        Outcome::Printed(program) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(program.as_bytes())
                .and_then(|()| stdout.flush())
                .context("cannot write program to stdout")?;
        }
        Outcome::Ran => {}
    }
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Help and version go to stdout and are not failures.
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_tracing();

    if let Err(e) = run(args) {
        let code = match e.downcast_ref::<GolinerError>() {
            Some(err) => {
                if err.is_silent() {
                    tracing::debug!("{}", err);
                } else {
                    eprintln!("{err}");
                }
                err.exit_code()
            }
            None => {
                eprintln!("goliner: {e:#}");
                1
            }
        };
        process::exit(code);
    }
}
