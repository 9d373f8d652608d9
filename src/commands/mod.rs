// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod ai;
pub mod budgets;
pub mod categories;
pub mod config;
pub mod months;
pub mod payees;
pub mod scheduled;
pub mod transactions;
pub mod user;

use std::io::Write;

use anyhow::{Result, anyhow};
use clap::ArgMatches;

use crate::client::Client;
use crate::config::{ConfigError, Settings};
use crate::render::{OutputFormat, Renderable, render};

/// Per-invocation state shared by every API command.
#[derive(Debug, Clone)]
pub struct Context {
    pub client: Client,
    budget: Option<String>,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(client: Client, budget: Option<String>, format: OutputFormat) -> Self {
        Self {
            client,
            budget: budget.filter(|b| !b.is_empty()),
            format,
        }
    }

    /// Flags win over `settings`. Fails before any request when no token is
    /// configured or the configured format is invalid.
    pub fn from_settings(
        settings: &Settings,
        budget_flag: Option<String>,
        format_flag: Option<OutputFormat>,
    ) -> Result<Self> {
        let token = settings.token().ok_or(ConfigError::MissingToken)?;
        let format = match format_flag {
            Some(f) => f,
            None => settings.output_format()?.unwrap_or_default(),
        };
        let budget = budget_flag
            .filter(|b| !b.is_empty())
            .or_else(|| settings.default_budget().map(str::to_string));
        Ok(Self::new(Client::new(token)?, budget, format))
    }

    pub fn budget_id(&self) -> Result<&str, ConfigError> {
        self.budget.as_deref().ok_or(ConfigError::MissingBudget)
    }

    pub fn emit<W: Write>(&self, value: &Renderable, out: &mut W) -> Result<()> {
        render(value, self.format, out)
    }
}

/// Route an API subcommand to its handler.
pub fn dispatch(ctx: &Context, name: &str, m: &ArgMatches) -> Result<Renderable> {
    match name {
        "user" => user::handle(ctx),
        "budgets" => budgets::handle(ctx, m),
        "accounts" => accounts::handle(ctx, m),
        "categories" => categories::handle(ctx, m),
        "payees" => payees::handle(ctx, m),
        "transactions" => transactions::handle(ctx, m),
        "scheduled" => scheduled::handle(ctx, m),
        "months" => months::handle(ctx, m),
        other => Err(anyhow!("unknown command '{}'", other)),
    }
}

pub(crate) fn arg<'a>(m: &'a ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{}>", id))
}

pub(crate) fn unknown(m: &ArgMatches) -> anyhow::Error {
    anyhow!(
        "unknown subcommand '{}'",
        m.subcommand_name().unwrap_or_default()
    )
}
