// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `config` subcommands. These run without a token or budget.

use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};
use clap::ArgMatches;

use super::{arg, unknown};
use crate::config::{ConfigUpdate, Settings, config_path, mask_token};
use crate::render::OutputFormat;

fn or_not_set(v: Option<&str>) -> &str {
    v.unwrap_or("(not set)")
}

pub fn show<W: Write>(settings: &Settings, path: &Path, out: &mut W) -> Result<()> {
    writeln!(out, "Config file: {}", path.display())?;
    writeln!(out)?;
    writeln!(out, "Token:          {}", mask_token(settings.token()))?;
    writeln!(
        out,
        "Default Budget: {}",
        or_not_set(settings.default_budget())
    )?;
    writeln!(
        out,
        "Format:         {}",
        or_not_set(settings.format.as_deref().filter(|f| !f.is_empty()))
    )?;
    Ok(())
}

/// Apply one `set-*` subcommand to the file at `path` and report it.
pub fn set<W: Write>(path: &Path, name: &str, m: &ArgMatches, out: &mut W) -> Result<()> {
    match name {
        "set-token" => {
            let update = ConfigUpdate {
                token: Some(arg(m, "token")?.to_string()),
                ..ConfigUpdate::default()
            };
            Settings::persist_to(path, update).context("failed to save token")?;
            writeln!(out, "Token saved successfully.")?;
        }
        "set-default-budget" => {
            let id = arg(m, "id")?;
            let update = ConfigUpdate {
                default_budget: Some(id.to_string()),
                ..ConfigUpdate::default()
            };
            Settings::persist_to(path, update).context("failed to save default budget")?;
            writeln!(out, "Default budget set to: {}", id)?;
        }
        "set-format" => {
            let format: OutputFormat = arg(m, "value")?.parse()?;
            let update = ConfigUpdate {
                format: Some(format),
                ..ConfigUpdate::default()
            };
            Settings::persist_to(path, update).context("failed to save format")?;
            writeln!(out, "Default format set to: {}", format)?;
        }
        other => anyhow::bail!("unknown subcommand '{}'", other),
    }
    Ok(())
}

pub fn handle<W: Write>(m: &ArgMatches, out: &mut W) -> Result<()> {
    let path = config_path()?;
    match m.subcommand() {
        Some(("show", _)) => {
            let settings = Settings::load().context("failed to load config")?;
            show(&settings, &path, out)
        }
        Some((name, sub)) => set(&path, name, sub, out),
        None => Err(unknown(m)),
    }
}
