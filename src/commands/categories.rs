// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result, anyhow};
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::client::amount_to_milliunits;
use crate::render::Renderable;
use crate::utils::{resolve_month, today};

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", _)) => {
            let groups = ctx
                .client
                .list_categories(budget)
                .context("failed to get categories")?;
            Ok(groups.into())
        }
        Some(("get", sub)) => {
            let category = ctx
                .client
                .get_category(budget, arg(sub, "id")?)
                .context("failed to get category")?;
            Ok(category.into())
        }
        Some(("update", sub)) => {
            let month = resolve_month(arg(sub, "month")?, today())?;
            let budgeted = sub
                .get_one::<f64>("budgeted")
                .copied()
                .ok_or_else(|| anyhow!("--budgeted is required"))?;
            let category = ctx
                .client
                .update_category_budgeted(
                    budget,
                    month,
                    arg(sub, "id")?,
                    amount_to_milliunits(budgeted),
                )
                .context("failed to update category")?;
            Ok(category.into())
        }
        _ => Err(unknown(m)),
    }
}
