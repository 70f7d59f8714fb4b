//! remote-run - run `ls -la` on a remote host through a scripted SSH login
//!
//! Connection settings come from `DEPLOY_HOST`, `DEPLOY_USER`,
//! `DEPLOY_PASSWORD` and `DEPLOY_LIST_PATH`. Remote output goes to stdout,
//! logs go to stderr.

use std::env;
use std::process;

use anyhow::Context;
use tracing::{debug, error, info};

use opskit::remote::{self, SessionOptions};
use opskit::DeployConfig;

/// Command line options
#[derive(Debug, Default)]
struct RunArgs {
    /// Enable debug logging
    debug: bool,
}

impl RunArgs {
    /// Parse command line arguments
    fn parse() -> anyhow::Result<Self> {
        let mut run_args = RunArgs::default();

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--debug" | "-d" => run_args.debug = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("remote-run v{}", opskit::VERSION);
                    process::exit(0);
                }
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }

        Ok(run_args)
    }
}

/// Print help information
fn print_help() {
    println!("remote-run - run a directory listing on a host over SSH");
    println!();
    println!("USAGE:");
    println!("    remote-run [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -V, --version          Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    DEPLOY_HOST            Host to connect to (required)");
    println!("    DEPLOY_USER            Login user (default: root)");
    println!("    DEPLOY_PASSWORD        Password sent when prompted (default: none)");
    println!("    DEPLOY_LIST_PATH       Remote directory to list (default: /opt)");
    println!("    OPSKIT_DEBUG           Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn run() -> anyhow::Result<()> {
    let config = DeployConfig::from_env().context("Invalid deployment configuration")?;
    debug!("Loaded {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = remote::run(&config, &SessionOptions::default(), &mut out)
        .with_context(|| format!("Remote session to {} failed", config.host))?;

    info!(
        "Session finished (password sent: {}, {} bytes of output)",
        summary.password_sent, summary.bytes_forwarded
    );
    Ok(())
}

fn main() {
    let args = RunArgs::parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        print_help();
        process::exit(2);
    });

    opskit::init_logging(args.debug);

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {:?}", e);
        if let Some(hint) = e.downcast_ref::<opskit::Error>().and_then(opskit::error_hint) {
            eprintln!("Hint: {}", hint);
        }
        process::exit(1);
    }
}
