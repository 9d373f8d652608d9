// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::client::amount_to_milliunits;
use crate::models::SaveAccount;
use crate::render::Renderable;

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", _)) => {
            let accounts = ctx
                .client
                .list_accounts(budget)
                .context("failed to get accounts")?;
            Ok(accounts.into())
        }
        Some(("get", sub)) => {
            let account = ctx
                .client
                .get_account(budget, arg(sub, "id")?)
                .context("failed to get account")?;
            Ok(account.into())
        }
        Some(("create", sub)) => {
            let balance = sub.get_one::<f64>("balance").copied().unwrap_or_default();
            let save = SaveAccount {
                name: arg(sub, "name")?.to_string(),
                account_type: arg(sub, "type")?.to_string(),
                balance: amount_to_milliunits(balance),
            };
            let account = ctx
                .client
                .create_account(budget, &save)
                .context("failed to create account")?;
            Ok(account.into())
        }
        _ => Err(unknown(m)),
    }
}
