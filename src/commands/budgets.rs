// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use clap::ArgMatches;

use super::{Context, unknown};
use crate::render::Renderable;

/// Explicit positional id, else the context budget.
fn target<'a>(ctx: &'a Context, m: &'a ArgMatches) -> Result<&'a str> {
    match m.get_one::<String>("id") {
        Some(id) => Ok(id.as_str()),
        None => Ok(ctx.budget_id()?),
    }
}

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    match m.subcommand() {
        Some(("list", _)) => {
            let budgets = ctx.client.list_budgets().context("failed to get budgets")?;
            Ok(budgets.into())
        }
        Some(("get", sub)) => {
            let id = target(ctx, sub)?;
            let budget = ctx.client.get_budget(id).context("failed to get budget")?;
            Ok(budget.into())
        }
        Some(("settings", sub)) => {
            let id = target(ctx, sub)?;
            let settings = ctx
                .client
                .get_budget_settings(id)
                .context("failed to get budget settings")?;
            Ok(settings.into())
        }
        _ => Err(unknown(m)),
    }
}
