// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wprs::Cli;

fn main() {
    // WP_LOG=debug turns on engine diagnostics; quiet by default.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("WP_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = wprs::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
