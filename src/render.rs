// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON and table output for API results.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use comfy_table::Table;
use serde_json::Value;

use crate::config::ConfigError;
use crate::models::{
    Account, Budget, BudgetSettings, Category, CategoryGroup, Month, Payee, ScheduledTransaction,
    Transaction, User,
};
use crate::utils::{fmt_date, fmt_milliunits, pretty_table, truncate};

const MEMO_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// Everything a command can print.
#[derive(Debug, Clone)]
pub enum Renderable {
    User(User),
    Budgets(Vec<Budget>),
    Budget(Budget),
    BudgetSettings(BudgetSettings),
    Accounts(Vec<Account>),
    Account(Account),
    CategoryGroups(Vec<CategoryGroup>),
    Category(Category),
    Payees(Vec<Payee>),
    Payee(Payee),
    Transactions(Vec<Transaction>),
    Transaction(Transaction),
    ScheduledTransactions(Vec<ScheduledTransaction>),
    ScheduledTransaction(ScheduledTransaction),
    Months(Vec<Month>),
    Month(Month),
    /// No table layout; always printed as JSON.
    Json(Value),
}

macro_rules! renderable_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Renderable {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        })*
    };
}

renderable_from! {
    User => User,
    Vec<Budget> => Budgets,
    Budget => Budget,
    BudgetSettings => BudgetSettings,
    Vec<Account> => Accounts,
    Account => Account,
    Vec<CategoryGroup> => CategoryGroups,
    Category => Category,
    Vec<Payee> => Payees,
    Payee => Payee,
    Vec<Transaction> => Transactions,
    Transaction => Transaction,
    Vec<ScheduledTransaction> => ScheduledTransactions,
    ScheduledTransaction => ScheduledTransaction,
    Vec<Month> => Months,
    Month => Month,
    Value => Json,
}

impl Renderable {
    /// The wrapped value, unfiltered.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Self::User(v) => serde_json::to_value(v),
            Self::Budgets(v) => serde_json::to_value(v),
            Self::Budget(v) => serde_json::to_value(v),
            Self::BudgetSettings(v) => serde_json::to_value(v),
            Self::Accounts(v) => serde_json::to_value(v),
            Self::Account(v) => serde_json::to_value(v),
            Self::CategoryGroups(v) => serde_json::to_value(v),
            Self::Category(v) => serde_json::to_value(v),
            Self::Payees(v) => serde_json::to_value(v),
            Self::Payee(v) => serde_json::to_value(v),
            Self::Transactions(v) => serde_json::to_value(v),
            Self::Transaction(v) => serde_json::to_value(v),
            Self::ScheduledTransactions(v) => serde_json::to_value(v),
            Self::ScheduledTransaction(v) => serde_json::to_value(v),
            Self::Months(v) => serde_json::to_value(v),
            Self::Month(v) => serde_json::to_value(v),
            Self::Json(v) => Ok(v.clone()),
        }
    }

    /// `None` for values without a table layout.
    pub fn to_table(&self) -> Option<Table> {
        let table = match self {
            Self::User(u) => pretty_table(&["ID"], vec![vec![u.id.clone()]]),
            Self::Budgets(list) => pretty_table(
                &["ID", "Name", "Last Modified"],
                list.iter()
                    .map(|b| {
                        vec![
                            b.id.clone(),
                            b.name.clone(),
                            b.last_modified_on.clone().unwrap_or_default(),
                        ]
                    })
                    .collect(),
            ),
            Self::Budget(b) => pretty_table(
                &["ID", "Name", "First Month", "Last Month"],
                vec![vec![
                    b.id.clone(),
                    b.name.clone(),
                    b.first_month.map(fmt_date).unwrap_or_default(),
                    b.last_month.map(fmt_date).unwrap_or_default(),
                ]],
            ),
            Self::BudgetSettings(s) => pretty_table(
                &["Setting", "Value"],
                vec![
                    vec!["Date Format".into(), s.date_format.format.clone()],
                    vec!["Currency".into(), s.currency_format.iso_code.clone()],
                    vec![
                        "Currency Symbol".into(),
                        s.currency_format.currency_symbol.clone(),
                    ],
                    vec![
                        "Decimal Digits".into(),
                        s.currency_format.decimal_digits.to_string(),
                    ],
                ],
            ),
            Self::Accounts(list) => pretty_table(
                &["ID", "Name", "Type", "Balance", "On Budget", "Closed"],
                list.iter()
                    .filter(|a| !a.deleted)
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.name.clone(),
                            a.account_type.clone(),
                            fmt_milliunits(a.balance),
                            a.on_budget.to_string(),
                            a.closed.to_string(),
                        ]
                    })
                    .collect(),
            ),
            Self::Account(a) => {
                let mut rows = vec![
                    field("ID", &a.id),
                    field("Name", &a.name),
                    field("Type", &a.account_type),
                    field("Balance", fmt_milliunits(a.balance)),
                    field("Cleared Balance", fmt_milliunits(a.cleared_balance)),
                    field("Uncleared Balance", fmt_milliunits(a.uncleared_balance)),
                    field("On Budget", a.on_budget.to_string()),
                    field("Closed", a.closed.to_string()),
                ];
                push_some(&mut rows, "Note", a.note.as_deref());
                detail(rows)
            }
            Self::CategoryGroups(groups) => pretty_table(
                &["Group", "Category", "Budgeted", "Activity", "Balance"],
                groups
                    .iter()
                    .filter(|g| g.is_visible())
                    .flat_map(|g| {
                        g.categories.iter().filter(|c| c.is_visible()).map(|c| {
                            vec![
                                g.name.clone(),
                                c.name.clone(),
                                fmt_milliunits(c.budgeted),
                                fmt_milliunits(c.activity),
                                fmt_milliunits(c.balance),
                            ]
                        })
                    })
                    .collect(),
            ),
            Self::Category(c) => {
                let mut rows = vec![
                    field("ID", &c.id),
                    field("Name", &c.name),
                    field("Group", c.category_group_name.as_deref().unwrap_or_default()),
                    field("Budgeted", fmt_milliunits(c.budgeted)),
                    field("Activity", fmt_milliunits(c.activity)),
                    field("Balance", fmt_milliunits(c.balance)),
                ];
                if let Some(goal) = c.goal_type.as_deref().filter(|g| !g.is_empty()) {
                    rows.push(field("Goal Type", goal));
                    rows.push(field(
                        "Goal Target",
                        fmt_milliunits(c.goal_target.unwrap_or_default()),
                    ));
                }
                push_some(&mut rows, "Note", c.note.as_deref());
                detail(rows)
            }
            Self::Payees(list) => pretty_table(
                &["ID", "Name", "Transfer Account"],
                list.iter()
                    .filter(|p| !p.deleted)
                    .map(|p| {
                        vec![
                            p.id.clone(),
                            p.name.clone(),
                            p.transfer_account_id.clone().unwrap_or_default(),
                        ]
                    })
                    .collect(),
            ),
            Self::Payee(p) => {
                let mut rows = vec![field("ID", &p.id), field("Name", &p.name)];
                push_some(
                    &mut rows,
                    "Transfer Account ID",
                    p.transfer_account_id.as_deref(),
                );
                detail(rows)
            }
            Self::Transactions(list) => pretty_table(
                &["Date", "Payee", "Category", "Memo", "Amount", "Cleared"],
                list.iter()
                    .filter(|t| !t.deleted)
                    .map(|t| {
                        vec![
                            fmt_date(t.date),
                            t.payee_name.clone().unwrap_or_default(),
                            t.category_name.clone().unwrap_or_default(),
                            truncate(t.memo.as_deref().unwrap_or_default(), MEMO_WIDTH),
                            fmt_milliunits(t.amount),
                            t.cleared.as_str().to_string(),
                        ]
                    })
                    .collect(),
            ),
            Self::Transaction(t) => {
                let mut rows = vec![
                    field("ID", &t.id),
                    field("Date", fmt_date(t.date)),
                    field("Amount", fmt_milliunits(t.amount)),
                    field("Payee", t.payee_name.as_deref().unwrap_or_default()),
                    field("Category", t.category_name.as_deref().unwrap_or_default()),
                    field("Account", &t.account_name),
                    field("Cleared", t.cleared.as_str()),
                    field("Approved", t.approved.to_string()),
                ];
                push_some(&mut rows, "Memo", t.memo.as_deref());
                push_some(&mut rows, "Flag", t.flag_color.as_deref());
                for sub in t.subtransactions.iter().filter(|s| !s.deleted) {
                    let label = sub.category_name.as_deref().unwrap_or("(split)");
                    rows.push(field(
                        "Split",
                        format!("{} {}", label, fmt_milliunits(sub.amount)),
                    ));
                }
                detail(rows)
            }
            Self::ScheduledTransactions(list) => pretty_table(
                &["Date Next", "Frequency", "Payee", "Category", "Amount"],
                list.iter()
                    .filter(|st| !st.deleted)
                    .map(|st| {
                        vec![
                            fmt_date(st.date_next),
                            st.frequency.as_str().to_string(),
                            st.payee_name.clone().unwrap_or_default(),
                            st.category_name.clone().unwrap_or_default(),
                            fmt_milliunits(st.amount),
                        ]
                    })
                    .collect(),
            ),
            Self::ScheduledTransaction(st) => {
                let mut rows = vec![
                    field("ID", &st.id),
                    field("Date First", fmt_date(st.date_first)),
                    field("Date Next", fmt_date(st.date_next)),
                    field("Frequency", st.frequency.as_str()),
                    field("Amount", fmt_milliunits(st.amount)),
                    field("Payee", st.payee_name.as_deref().unwrap_or_default()),
                    field("Category", st.category_name.as_deref().unwrap_or_default()),
                    field("Account", &st.account_name),
                ];
                push_some(&mut rows, "Memo", st.memo.as_deref());
                detail(rows)
            }
            Self::Months(list) => pretty_table(
                &["Month", "Income", "Budgeted", "Activity", "To Be Budgeted"],
                list.iter()
                    .filter(|m| !m.deleted)
                    .map(|m| {
                        vec![
                            fmt_date(m.month),
                            fmt_milliunits(m.income),
                            fmt_milliunits(m.budgeted),
                            fmt_milliunits(m.activity),
                            fmt_milliunits(m.to_be_budgeted),
                        ]
                    })
                    .collect(),
            ),
            Self::Month(m) => {
                let mut rows = vec![
                    field("Month", fmt_date(m.month)),
                    field("Income", fmt_milliunits(m.income)),
                    field("Budgeted", fmt_milliunits(m.budgeted)),
                    field("Activity", fmt_milliunits(m.activity)),
                    field("To Be Budgeted", fmt_milliunits(m.to_be_budgeted)),
                ];
                if let Some(days) = m.age_of_money.filter(|d| *d > 0) {
                    rows.push(field("Age of Money", format!("{} days", days)));
                }
                push_some(&mut rows, "Note", m.note.as_deref());
                detail(rows)
            }
            Self::Json(_) => return None,
        };
        Some(table)
    }
}

fn field(name: &str, value: impl Into<String>) -> Vec<String> {
    vec![name.to_string(), value.into()]
}

fn push_some(rows: &mut Vec<Vec<String>>, name: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        rows.push(field(name, v));
    }
}

fn detail(rows: Vec<Vec<String>>) -> Table {
    pretty_table(&["Field", "Value"], rows)
}

pub fn render<W: Write>(value: &Renderable, format: OutputFormat, out: &mut W) -> Result<()> {
    if format == OutputFormat::Table {
        if let Some(table) = value.to_table() {
            writeln!(out, "{}", table)?;
            return Ok(());
        }
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&value.to_json()?)?)?;
    Ok(())
}
