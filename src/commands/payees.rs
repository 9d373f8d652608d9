// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::render::Renderable;

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", _)) => {
            let payees = ctx
                .client
                .list_payees(budget)
                .context("failed to get payees")?;
            Ok(payees.into())
        }
        Some(("get", sub)) => {
            let payee = ctx
                .client
                .get_payee(budget, arg(sub, "id")?)
                .context("failed to get payee")?;
            Ok(payee.into())
        }
        Some(("update", sub)) => {
            let payee = ctx
                .client
                .rename_payee(budget, arg(sub, "id")?, arg(sub, "name")?)
                .context("failed to update payee")?;
            Ok(payee.into())
        }
        _ => Err(unknown(m)),
    }
}
