// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgGroup, Command, crate_version, value_parser};

use crate::models::{ClearedStatus, Frequency, TransactionType};
use crate::render::OutputFormat;
use crate::utils::parse_date;

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Rejects `NaN`, `inf` and values too large to express in milliunits.
fn amount_arg(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount '{}'", s))?;
    if !v.is_finite() || (v * 1000.0).abs() >= i64::MAX as f64 {
        return Err(format!("amount '{}' is out of range", s));
    }
    Ok(v)
}

fn id(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).required(true).help(help)
}

fn amount(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .allow_negative_numbers(true)
        .value_parser(amount_arg)
        .help(help)
}

/// Flags shared by `transactions create` and `transactions update`.
fn transaction_fields(cmd: Command, create: bool) -> Command {
    cmd.arg(Arg::new("account").long("account").required(create).help("Account ID"))
        .arg(amount("amount", "Amount; negative for outflow").required(create))
        .arg(
            Arg::new("date")
                .long("date")
                .value_parser(date_arg)
                .help("Date (YYYY-MM-DD); defaults to today on create"),
        )
        .arg(Arg::new("payee-id").long("payee-id").help("Payee ID"))
        .arg(
            Arg::new("payee-name")
                .long("payee-name")
                .help("Payee name; a new payee is created if none matches"),
        )
        .arg(Arg::new("category").long("category").help("Category ID"))
        .arg(Arg::new("memo").long("memo"))
        .arg(
            Arg::new("cleared")
                .long("cleared")
                .value_parser(value_parser!(ClearedStatus)),
        )
        .arg(
            Arg::new("approved")
                .long("approved")
                .num_args(0..=1)
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
        )
        .arg(
            Arg::new("flag")
                .long("flag")
                .help("Flag color (red, orange, yellow, green, blue, purple)"),
        )
}

/// Flags shared by `scheduled create` and `scheduled update`.
fn scheduled_fields(cmd: Command, create: bool) -> Command {
    cmd.arg(Arg::new("account").long("account").required(create).help("Account ID"))
        .arg(
            Arg::new("frequency")
                .long("frequency")
                .required(create)
                .value_parser(value_parser!(Frequency)),
        )
        .arg(amount("amount", "Amount; negative for outflow").required(create))
        .arg(
            Arg::new("date")
                .long("date")
                .value_parser(date_arg)
                .help("First occurrence (YYYY-MM-DD); defaults to today on create"),
        )
        .arg(Arg::new("payee-id").long("payee-id").help("Payee ID"))
        .arg(Arg::new("payee-name").long("payee-name").help("Payee name"))
        .arg(Arg::new("category").long("category").help("Category ID"))
        .arg(Arg::new("memo").long("memo"))
        .arg(Arg::new("flag").long("flag").help("Flag color"))
}

pub fn build_cli() -> Command {
    Command::new("ynabctl")
        .about("Command-line client for the YNAB budgeting API")
        .version(crate_version!())
        .after_help(
            "Set a token first: ynabctl config set-token <token>\n\
             Tokens are issued under YNAB Account Settings > Developer Settings.",
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .global(true)
                .value_name("ID")
                .help("Budget ID (overrides the configured default)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .global(true)
                .value_parser(value_parser!(OutputFormat))
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log requests to stderr"),
        )
        .subcommand(Command::new("user").about("Show the authenticated user"))
        .subcommand(
            Command::new("budgets")
                .about("Budgets")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(Arg::new("id")))
                .subcommand(
                    Command::new("settings")
                        .about("Date and currency format")
                        .arg(Arg::new("id")),
                ),
        )
        .subcommand(
            Command::new("accounts")
                .about("Accounts")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(id("id", "Account ID")))
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("checking, savings, cash, creditCard, lineOfCredit, ..."),
                        )
                        .arg(amount("balance", "Starting balance").default_value("0")),
                ),
        )
        .subcommand(
            Command::new("categories")
                .about("Categories")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(id("id", "Category ID")))
                .subcommand(
                    Command::new("update")
                        .about("Set the budgeted amount for one month")
                        .arg(id("id", "Category ID"))
                        .arg(amount("budgeted", "Budgeted amount").required(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .default_value("current")
                                .help("YYYY-MM-DD, YYYY-MM or 'current'"),
                        ),
                ),
        )
        .subcommand(
            Command::new("payees")
                .about("Payees")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(id("id", "Payee ID")))
                .subcommand(
                    Command::new("update")
                        .about("Rename a payee")
                        .arg(id("id", "Payee ID"))
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("transactions")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("since")
                                .long("since")
                                .value_parser(date_arg)
                                .help("On or after this date (YYYY-MM-DD)"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(value_parser!(TransactionType))
                                .conflicts_with("scope"),
                        )
                        .arg(Arg::new("account").long("account").help("Account ID"))
                        .arg(Arg::new("category").long("category").help("Category ID"))
                        .arg(Arg::new("payee").long("payee").help("Payee ID"))
                        .group(
                            ArgGroup::new("scope")
                                .args(["account", "category", "payee"])
                                .multiple(false),
                        ),
                )
                .subcommand(Command::new("get").arg(id("id", "Transaction ID")))
                .subcommand(transaction_fields(Command::new("create"), true))
                .subcommand(transaction_fields(
                    Command::new("update")
                        .about("Change only the supplied fields")
                        .arg(id("id", "Transaction ID")),
                    false,
                ))
                .subcommand(Command::new("delete").arg(id("id", "Transaction ID"))),
        )
        .subcommand(
            Command::new("scheduled")
                .visible_alias("scheduled-transactions")
                .about("Scheduled transactions")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(id("id", "Scheduled transaction ID")))
                .subcommand(scheduled_fields(Command::new("create"), true))
                .subcommand(scheduled_fields(
                    Command::new("update")
                        .about("Change only the supplied fields")
                        .arg(id("id", "Scheduled transaction ID")),
                    false,
                ))
                .subcommand(
                    Command::new("delete").arg(id("id", "Scheduled transaction ID")),
                ),
        )
        .subcommand(
            Command::new("months")
                .about("Budget months")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("get").arg(
                        Arg::new("month")
                            .default_value("current")
                            .help("YYYY-MM-DD, YYYY-MM or 'current'"),
                    ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Local settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-token").arg(id("token", "Personal access token")))
                .subcommand(
                    Command::new("set-default-budget").arg(id("id", "Budget ID")),
                )
                .subcommand(
                    Command::new("set-format").arg(id("value", "json or table")),
                ),
        )
        .subcommand(Command::new("ai").about("Print a usage guide for AI assistants"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn scoped_filters_are_exclusive() {
        let res = build_cli().try_get_matches_from([
            "ynabctl",
            "transactions",
            "list",
            "--account",
            "a1",
            "--payee",
            "p1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn type_filter_conflicts_with_scope() {
        let res = build_cli().try_get_matches_from([
            "ynabctl",
            "transactions",
            "list",
            "--type",
            "unapproved",
            "--category",
            "c1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn type_filter_rejects_unknown_values() {
        let res = build_cli().try_get_matches_from([
            "ynabctl",
            "transactions",
            "list",
            "--type",
            "pending",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn negative_amounts_parse() {
        let m = build_cli()
            .try_get_matches_from([
                "ynabctl",
                "transactions",
                "create",
                "--account",
                "a1",
                "--amount",
                "-25.50",
            ])
            .unwrap();
        let (_, tx) = m.subcommand().unwrap();
        let (_, create) = tx.subcommand().unwrap();
        assert_eq!(create.get_one::<f64>("amount"), Some(&-25.5));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        for bad in ["NaN", "inf", "-inf", "1e30"] {
            let res = build_cli().try_get_matches_from([
                "ynabctl",
                "transactions",
                "create",
                "--account",
                "a1",
                "--amount",
                bad,
            ]);
            assert!(res.is_err(), "{bad} was accepted");
        }
        let res = build_cli().try_get_matches_from([
            "ynabctl",
            "categories",
            "update",
            "c1",
            "--budgeted",
            "NaN",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn bare_approved_means_true() {
        let m = build_cli()
            .try_get_matches_from(["ynabctl", "transactions", "update", "t1", "--approved"])
            .unwrap();
        let (_, tx) = m.subcommand().unwrap();
        let (_, update) = tx.subcommand().unwrap();
        assert_eq!(update.get_one::<bool>("approved"), Some(&true));
    }

    #[test]
    fn scheduled_alias_and_global_flags() {
        let m = build_cli()
            .try_get_matches_from([
                "ynabctl",
                "scheduled-transactions",
                "list",
                "-b",
                "b9",
                "-f",
                "table",
            ])
            .unwrap();
        assert_eq!(m.subcommand_name(), Some("scheduled"));
        assert_eq!(m.get_one::<String>("budget").map(String::as_str), Some("b9"));
        assert_eq!(
            m.get_one::<OutputFormat>("format"),
            Some(&OutputFormat::Table)
        );
    }
}
