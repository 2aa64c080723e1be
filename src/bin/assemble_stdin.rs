//! Reads raw generation output from stdin and prints the assembled record
//! as JSON on stdout.
//!
//! Logging goes to stderr; set `RUST_LOG=gen_content_parser=debug` to trace
//! each pipeline stage.

use std::io::{self, Read};

use gen_content_parser::{assemble_bytes, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut raw = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut raw) {
        eprintln!("Failed to read from stdin: {err}");
        std::process::exit(1);
    }

    let record = match assemble_bytes(&raw) {
        Ok(record) => record,
        Err(err @ Error::Encoding(_)) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Assembly failed: {err}");
            std::process::exit(2);
        }
    };

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize record: {err}");
            std::process::exit(2);
        }
    }
}
