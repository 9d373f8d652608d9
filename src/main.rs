// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::ArgMatches;
use tracing_subscriber::EnvFilter;

use ynabctl::cli;
use ynabctl::commands::{self, Context};
use ynabctl::config::Settings;
use ynabctl::render::OutputFormat;

const LOG_ENV: &str = "YNABCTL_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Ignore a second install; stdout stays reserved for command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match matches.subcommand() {
        Some(("config", sub)) => commands::config::handle(sub, &mut stdout),
        Some(("ai", _)) => commands::ai::handle(&mut stdout),
        Some((name, sub)) => {
            let settings = Settings::load()?;
            let ctx = Context::from_settings(
                &settings,
                matches.get_one::<String>("budget").cloned(),
                matches.get_one::<OutputFormat>("format").copied(),
            )?;
            let value = commands::dispatch(&ctx, name, sub)?;
            ctx.emit(&value, &mut stdout)
        }
        None => {
            drop(stdout);
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
