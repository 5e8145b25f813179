//! # optchain demo application
//!
//! A sample CLI that declares its options with optchain and prints a
//! greeting. It exists to demonstrate and manually verify the precedence
//! rules, not to be useful.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example optchain_demo
//! cargo run --example optchain_demo -- --help
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature              | How to exercise it                                                   |
//! |----------------------|----------------------------------------------------------------------|
//! | Defaults             | `cargo run --example optchain_demo`                                  |
//! | Env var override     | `OPTCHAIN_NAME=env cargo run --example optchain_demo`                |
//! | Flag beats env       | `OPTCHAIN_NAME=env cargo run --example optchain_demo -- -n flag`     |
//! | Typed values         | `cargo run --example optchain_demo -- --repeat 3 --shout`            |
//! | Conversion error     | `OPTCHAIN_REPEAT=lots cargo run --example optchain_demo`             |
//! | Env-only option      | `OPTCHAIN_TOKEN=s3cret cargo run --example optchain_demo`            |
//! | Where values came from | `cargo run --example optchain_demo -- --report`                    |
//! | Lifecycle logging    | `RUST_LOG=optchain=trace cargo run --example optchain_demo`          |

mod options;

use std::fs;
use std::path::Path;
use std::process;

use clap::Command;
use optchain::{OptError, Registry};
use tracing_subscriber::EnvFilter;

use options::DemoOptions;

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// The command optchain registers its flags on.
fn command() -> Command {
    Command::new("optchain-demo")
        .about("optchain demo: a sample CLI for showcasing option resolution")
}

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

fn ansi_color_code(name: &str) -> &'static str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn greet(options: &DemoOptions) -> Result<(), OptError> {
    let name = options.name.must_lookup()?;
    let repeat = options.repeat.must_lookup()?;
    let shout = options.shout.must_lookup()?;
    let color = ansi_color_code(&options.color.must_lookup()?);

    let mut greeting = format!("Hello, {name}!");
    if shout {
        greeting = greeting.to_uppercase();
    }
    for _ in 0..repeat.max(0) {
        println!("{color}{greeting}{RESET}");
    }

    if let Some(token) = options.token.lookup()? {
        println!("(authenticated with a {}-character token)", token.len());
    }

    if let Some(dir) = options.out_dir.lookup()? {
        let path = Path::new(&dir).join("greeting.txt");
        if let Err(e) = fs::write(&path, format!("{greeting}\n")) {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let registry = Registry::with_command(command());
    let options = DemoOptions::declare(&registry).unwrap_or_else(|e| {
        eprintln!("Invalid option declaration:\n{e}");
        process::exit(2);
    });

    match registry.parse() {
        Ok(()) => {}
        Err(OptError::Clap(e)) => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }

    let report = options.report.must_lookup().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(2);
    });
    if report {
        println!("{}", registry.report());
        return;
    }

    if let Err(e) = greet(&options) {
        eprintln!("Failed to resolve options:\n{e}");
        process::exit(1);
    }
}
