// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reliagraph CLI entrypoint.
//!
//! Exit codes: 0 success, 1 validation / not-found / import errors, 2 usage or configuration
//! errors, 3 persistence errors.

use std::io;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use reliagraph::cli::{self, Args};

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Reliagraph");
    debug!(args:?; "Parsed arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = cli::run(&args, &mut out) {
        error!(error = err.to_string(); "Command failed");
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }

    info!("Completed successfully");
}
