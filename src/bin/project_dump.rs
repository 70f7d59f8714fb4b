//! project-dump - write a project's text files into one JSON document
//!
//! With no arguments the project root is the project this program was built
//! from, and the dump goes to `project_dump.json` there.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use tracing::error;

use opskit::dump::{self, ProjectSerializer, DEFAULT_OUTPUT_NAME};

/// Source of this program, skipped like the executable itself
const SOURCE_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/", file!());

/// Command line options
#[derive(Debug, Default)]
struct DumpArgs {
    /// Enable debug logging
    debug: bool,
    /// Project root
    root: Option<PathBuf>,
    /// Output file
    output: Option<PathBuf>,
}

impl DumpArgs {
    /// Parse command line arguments
    fn parse() -> anyhow::Result<Self> {
        let mut dump_args = DumpArgs::default();

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--debug" | "-d" => dump_args.debug = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("project-dump v{}", opskit::VERSION);
                    process::exit(0);
                }
                flag if flag.starts_with('-') => anyhow::bail!("Unknown option: {}", flag),
                _ if dump_args.root.is_none() => dump_args.root = Some(PathBuf::from(&arg)),
                _ if dump_args.output.is_none() => {
                    dump_args.output = Some(PathBuf::from(&arg));
                }
                _ => anyhow::bail!("Unexpected argument: {}", arg),
            }
        }

        Ok(dump_args)
    }
}

/// Print help information
fn print_help() {
    println!("project-dump - serialize a project's text files to JSON");
    println!();
    println!("USAGE:");
    println!("    project-dump [OPTIONS] [ROOT [OUTPUT]]");
    println!();
    println!("ARGS:");
    println!("    ROOT                   Project directory (default: the source checkout)");
    println!("    OUTPUT                 Dump file (default: ROOT/{})", DEFAULT_OUTPUT_NAME);
    println!();
    println!("OPTIONS:");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -V, --version          Print version information");
}

fn run(args: DumpArgs) -> anyhow::Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => dump::default_root().context("Cannot determine the project root")?,
    };
    let output = args
        .output
        .unwrap_or_else(|| root.join(DEFAULT_OUTPUT_NAME));

    ProjectSerializer::default()
        .exclude_current_exe()
        .exclude_path(SOURCE_FILE)
        .serialize(&root, &output)
        .with_context(|| format!("Failed to serialize {}", root.display()))?;
    Ok(())
}

fn main() {
    let args = DumpArgs::parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        print_help();
        process::exit(2);
    });

    opskit::init_logging(args.debug);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {:?}", e);
        if let Some(hint) = e.downcast_ref::<opskit::Error>().and_then(opskit::error_hint) {
            eprintln!("Hint: {}", hint);
        }
        process::exit(1);
    }
}
