// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::render::Renderable;
use crate::utils::{resolve_month, today};

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", _)) => {
            let months = ctx
                .client
                .list_months(budget)
                .context("failed to get months")?;
            Ok(months.into())
        }
        Some(("get", sub)) => {
            let month = resolve_month(arg(sub, "month")?, today())?;
            let detail = ctx
                .client
                .get_month(budget, month)
                .context("failed to get month")?;
            Ok(detail.into())
        }
        _ => Err(unknown(m)),
    }
}
