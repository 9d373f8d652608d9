// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDate;
use clap::ArgMatches;

use super::{Context, arg, unknown};
use crate::client::{TransactionQuery, TransactionScope, amount_to_milliunits};
use crate::models::{ClearedStatus, SaveTransaction, Transaction, TransactionType};
use crate::render::Renderable;
use crate::utils::today;

/// Fields supplied on the command line for create or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionOverrides {
    pub account_id: Option<String>,
    pub date: Option<NaiveDate>,
    /// Milliunits.
    pub amount: Option<i64>,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub memo: Option<String>,
    pub cleared: Option<ClearedStatus>,
    pub approved: Option<bool>,
    pub flag_color: Option<String>,
}

impl TransactionOverrides {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let text = |id: &str| m.get_one::<String>(id).cloned();
        Self {
            account_id: text("account"),
            date: m.get_one::<NaiveDate>("date").copied(),
            amount: m.get_one::<f64>("amount").copied().map(amount_to_milliunits),
            payee_id: text("payee-id"),
            payee_name: text("payee-name"),
            category_id: text("category"),
            memo: text("memo"),
            cleared: m.get_one::<ClearedStatus>("cleared").copied(),
            approved: m.get_one::<bool>("approved").copied(),
            flag_color: text("flag"),
        }
    }

    /// Overlay the supplied fields on `existing`; everything else is carried
    /// over unchanged. A new payee name without a payee id drops the old id so
    /// the name takes effect.
    pub fn apply(self, existing: &Transaction) -> SaveTransaction {
        let mut save = SaveTransaction::from(existing);
        if let Some(v) = self.account_id {
            save.account_id = v;
        }
        if let Some(v) = self.date {
            save.date = v;
        }
        if let Some(v) = self.amount {
            save.amount = v;
        }
        if self.payee_name.is_some() && self.payee_id.is_none() {
            save.payee_id = None;
        }
        if let Some(v) = self.payee_id {
            save.payee_id = Some(v);
        }
        if let Some(v) = self.payee_name {
            save.payee_name = Some(v);
        }
        if let Some(v) = self.category_id {
            save.category_id = Some(v);
        }
        if let Some(v) = self.memo {
            save.memo = Some(v);
        }
        if let Some(v) = self.cleared {
            save.cleared = Some(v);
        }
        if let Some(v) = self.approved {
            save.approved = Some(v);
        }
        if let Some(v) = self.flag_color {
            save.flag_color = Some(v);
        }
        save
    }

    pub fn into_create(self, today: NaiveDate) -> Result<SaveTransaction> {
        Ok(SaveTransaction {
            account_id: self
                .account_id
                .ok_or_else(|| anyhow!("account ID is required (--account)"))?,
            date: self.date.unwrap_or(today),
            amount: self
                .amount
                .ok_or_else(|| anyhow!("amount is required (--amount)"))?,
            payee_id: self.payee_id,
            payee_name: self.payee_name,
            category_id: self.category_id,
            memo: self.memo,
            cleared: self.cleared,
            approved: self.approved,
            flag_color: self.flag_color,
        })
    }
}

pub fn query_from_matches(m: &ArgMatches) -> TransactionQuery {
    let scope = if let Some(id) = m.get_one::<String>("account") {
        TransactionScope::Account(id.clone())
    } else if let Some(id) = m.get_one::<String>("category") {
        TransactionScope::Category(id.clone())
    } else if let Some(id) = m.get_one::<String>("payee") {
        TransactionScope::Payee(id.clone())
    } else {
        TransactionScope::All
    };
    TransactionQuery {
        scope,
        since_date: m.get_one::<NaiveDate>("since").copied(),
        kind: m.get_one::<TransactionType>("type").copied(),
    }
}

pub fn handle(ctx: &Context, m: &ArgMatches) -> Result<Renderable> {
    let budget = ctx.budget_id()?;
    match m.subcommand() {
        Some(("list", sub)) => {
            let query = query_from_matches(sub);
            let list = ctx
                .client
                .list_transactions(budget, &query)
                .context("failed to get transactions")?;
            Ok(list.into())
        }
        Some(("get", sub)) => {
            let tx = ctx
                .client
                .get_transaction(budget, arg(sub, "id")?)
                .context("failed to get transaction")?;
            Ok(tx.into())
        }
        Some(("create", sub)) => {
            let save = TransactionOverrides::from_matches(sub).into_create(today())?;
            let tx = ctx
                .client
                .create_transaction(budget, &save)
                .context("failed to create transaction")?;
            Ok(tx.into())
        }
        Some(("update", sub)) => {
            let id = arg(sub, "id")?;
            let existing = ctx
                .client
                .get_transaction(budget, id)
                .context("failed to get existing transaction")?;
            let save = TransactionOverrides::from_matches(sub).apply(&existing);
            let tx = ctx
                .client
                .update_transaction(budget, id, &save)
                .context("failed to update transaction")?;
            Ok(tx.into())
        }
        Some(("delete", sub)) => {
            let tx = ctx
                .client
                .delete_transaction(budget, arg(sub, "id")?)
                .context("failed to delete transaction")?;
            Ok(tx.into())
        }
        _ => Err(unknown(m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli;
    use serde_json::json;

    fn existing() -> Transaction {
        serde_json::from_value(json!({
            "id": "t1",
            "date": "2024-05-01",
            "amount": -1000,
            "memo": "old",
            "cleared": "cleared",
            "approved": true,
            "account_id": "a1",
            "account_name": "Checking",
            "payee_id": "p1",
            "payee_name": "Grocer",
            "category_id": "c1"
        }))
        .unwrap()
    }

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let mut full = vec!["ynabctl", "transactions"];
        full.extend_from_slice(args);
        let m = cli::build_cli().try_get_matches_from(full).unwrap();
        let (_, tx) = m.subcommand().unwrap();
        let (_, sub) = tx.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let m = sub_matches(&["update", "t1", "--memo", "new"]);
        let save = TransactionOverrides::from_matches(&m).apply(&existing());
        assert_eq!(save.memo.as_deref(), Some("new"));
        assert_eq!(save.amount, -1000);
        assert_eq!(save.payee_id.as_deref(), Some("p1"));
        assert_eq!(save.cleared, Some(ClearedStatus::Cleared));
        assert_eq!(save.approved, Some(true));
    }

    #[test]
    fn payee_name_alone_replaces_payee() {
        let m = sub_matches(&["update", "t1", "--payee-name", "Bakery"]);
        let save = TransactionOverrides::from_matches(&m).apply(&existing());
        assert_eq!(save.payee_id, None);
        assert_eq!(save.payee_name.as_deref(), Some("Bakery"));
    }

    #[test]
    fn create_defaults_date_to_today() {
        let m = sub_matches(&["create", "--account", "a1", "--amount", "-12.34"]);
        let today = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let save = TransactionOverrides::from_matches(&m)
            .into_create(today)
            .unwrap();
        assert_eq!(save.date, today);
        assert_eq!(save.amount, -12340);
        assert_eq!(save.approved, None);
    }

    #[test]
    fn list_flags_build_scoped_query() {
        let m = sub_matches(&["list", "--category", "c7", "--since", "2025-02-01"]);
        let q = query_from_matches(&m);
        assert_eq!(q.scope, TransactionScope::Category("c7".into()));
        assert_eq!(q.since_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(q.kind, None);
    }
}
